pub mod constants;

mod extract;
mod logtable;
mod pipeline;

pub use extract::ExtractCMD;
pub use logtable::LogTableCMD;
pub use pipeline::PipelineCMD;
