pub mod extract;
pub mod logtable;

pub use extract::Extract;
pub use logtable::LogTable;
