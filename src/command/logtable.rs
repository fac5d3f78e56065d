use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::postprocess::LogTable;
use crate::runtime::LogArgs;
use crate::utils::require_directory;

#[derive(Args)]
pub struct LogTableCMD {
    #[arg(short = 'i', value_parser = clap::value_parser!(PathBuf))]
    /// Folder holding one assembly folder per sample
    pub path_in: PathBuf,

    #[arg(short = 'o', value_parser = clap::value_parser!(PathBuf))]
    /// Folder to write the two summary tables to
    pub path_out: PathBuf,

    #[command(flatten)]
    pub log: LogArgs,
}

impl LogTableCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        require_directory(&self.path_in)?;
        self.log.init(self.path_in.join("asmbatch_logtable.log"))?;

        let tables = LogTable::run(&LogTable {
            path_in: self.path_in.clone(),
            path_out: self.path_out.clone(),
        })?;

        log::info!(
            "Log table has finished successfully: {} samples, {} components",
            tables.assemblies.len(),
            tables.components.len()
        );
        Ok(())
    }
}
