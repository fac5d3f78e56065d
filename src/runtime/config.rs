use std::path::PathBuf;
use std::sync::OnceLock;

use crate::assemble::AssemblySettings;
use crate::runtime;
use crate::sample::ClassifyPolicy;

///////////////////////////////
/// Global Config Options
pub static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct Config {
    /// Input root, always ending with a separator
    pub path_in: PathBuf,
    /// Output root, always ending with a separator
    pub path_out: PathBuf,

    pub assembly: AssemblySettings,
    pub program_logtable: PathBuf,
    pub program_extract: PathBuf,

    pub policy: ClassifyPolicy,
    pub error_mode: runtime::ErrorMode,
    pub shared_copy: bool,

    pub log_level: runtime::LogLevel,
    pub log_mode: runtime::LogMode,
    pub log_path: PathBuf,
}

impl Config {
    /// Store the config for the rest of the process. Only the first call has any effect
    pub fn install(self) -> &'static Config {
        CONFIG.get_or_init(|| self)
    }
}
