pub mod assemble;
pub mod command;
pub mod pipeline;
pub mod postprocess;
pub mod process;
pub mod runtime;
pub mod sample;
pub mod utils;
