use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::constants::{
    DEFAULT_ASSEMBLER, DEFAULT_ASSEMBLER_MODE, DEFAULT_ASSEMBLER_THREADS, DEFAULT_EXTRACTOR,
    DEFAULT_LOGTABLE, DEFAULT_LOG_FILE_NAME,
};
use crate::assemble::AssemblySettings;
use crate::pipeline::{run_pipeline, BatchReport};
use crate::process::SystemRunner;
use crate::runtime::{Config, ErrorMode, LogArgs};
use crate::sample::ClassifyPolicy;
use crate::utils::{expand_and_resolve_path, require_directory, resolve_program, with_trailing_separator};

#[derive(Args)]
pub struct PipelineCMD {
    #[arg(short = 'i', value_parser = clap::value_parser!(PathBuf), required_unless_present = "help")]
    /// Input folder with one subfolder of reads per sample
    pub path_in: Option<PathBuf>,

    #[arg(short = 'o', value_parser = clap::value_parser!(PathBuf), required_unless_present = "help")]
    /// Existing output folder; gets one assembly folder per sample plus a summary folder
    pub path_out: Option<PathBuf>,

    #[arg(long = "assembler", default_value = DEFAULT_ASSEMBLER)]
    /// Assembler executable
    pub assembler: PathBuf,

    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_ASSEMBLER_THREADS)]
    /// Threads given to each assembler run
    pub threads: usize,

    #[arg(long = "mode", default_value = DEFAULT_ASSEMBLER_MODE)]
    /// Assembler mode: conservative, normal or bold
    pub mode: String,

    #[arg(long = "logtable")]
    /// Log-table parser executable. Defaults to the one installed next to this program
    pub logtable: Option<PathBuf>,

    #[arg(long = "extractor")]
    /// Sequence extractor executable. Defaults to the one installed next to this program
    pub extractor: Option<PathBuf>,

    #[arg(long = "policy", value_enum, default_value_t = ClassifyPolicy::Strict)]
    /// What to do when two files in a sample claim the same role
    pub policy: ClassifyPolicy,

    #[arg(long = "error-mode", value_enum, default_value_t = ErrorMode::Continue)]
    /// Keep going after a failed sample, or halt
    pub error_mode: ErrorMode,

    #[arg(long = "no-shared-copy")]
    /// Do not copy extracted sequences into the shared summary folder
    pub no_shared_copy: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

impl PipelineCMD {
    /// Check a folder argument and bring it into its canonical form
    fn resolve_dir(path: &Option<PathBuf>, flag: &str) -> Result<PathBuf> {
        let path = path
            .as_ref()
            .with_context(|| format!("Missing mandatory flag {}", flag))?;
        let path = expand_and_resolve_path(path)?;
        require_directory(&path)?;
        Ok(with_trailing_separator(path))
    }

    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<BatchReport> {
        let path_in = Self::resolve_dir(&self.path_in, "-i")?;
        let path_out = Self::resolve_dir(&self.path_out, "-o")?;

        let log_path = self.log.init(path_out.join(DEFAULT_LOG_FILE_NAME))?;

        let config = Config {
            path_in,
            path_out,
            assembly: AssemblySettings {
                program: self.assembler.clone(),
                threads: self.threads,
                mode: self.mode.clone(),
            },
            program_logtable: self
                .logtable
                .clone()
                .unwrap_or_else(|| resolve_program(DEFAULT_LOGTABLE)),
            program_extract: self
                .extractor
                .clone()
                .unwrap_or_else(|| resolve_program(DEFAULT_EXTRACTOR)),
            policy: self.policy,
            error_mode: self.error_mode,
            shared_copy: !self.no_shared_copy,
            log_level: self.log.log_level,
            log_mode: self.log.log_mode,
            log_path,
        }
        .install();
        log::debug!("{:?}", config);

        let report = run_pipeline(config, &SystemRunner)?;
        report.log_summary();
        Ok(report)
    }
}
