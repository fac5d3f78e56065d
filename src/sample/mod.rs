mod classify;
mod scan;

pub use classify::*;
pub use scan::*;
