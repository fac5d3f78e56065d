mod config;
mod error;
mod log;

pub use config::*;
pub use error::{Error, ErrorMode};
pub use self::log::*;
