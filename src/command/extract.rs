use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::constants::ASSEMBLY_FILE_NAME;
use crate::postprocess::Extract;
use crate::runtime::LogArgs;
use crate::utils::require_directory;

#[derive(Args)]
pub struct ExtractCMD {
    #[arg(short = 'i', value_parser = clap::value_parser!(PathBuf))]
    /// Assembly folder of one sample
    pub path_in: PathBuf,

    #[arg(short = 'f', default_value = ASSEMBLY_FILE_NAME)]
    /// Name of the FASTA file inside the folder
    pub file_name: String,

    #[arg(short = 'o', value_parser = clap::value_parser!(PathBuf))]
    /// Also copy every extracted sequence file into this folder
    pub path_shared: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

impl ExtractCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        require_directory(&self.path_in)?;
        self.log.init(self.path_in.join("asmbatch_extract.log"))?;

        let written = Extract::run(&Extract {
            path_in: self.path_in.clone(),
            file_name: self.file_name.clone(),
            path_shared: self.path_shared.clone(),
        })?;

        log::info!("Extract has finished successfully: {} files", written.len());
        Ok(())
    }
}
