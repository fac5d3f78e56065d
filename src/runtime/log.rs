use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::command::constants::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_MODE};
use crate::utils::expand_and_resolve_path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" | "warning" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" | "none" => LevelFilter::Off,
            _ => return Err(format!("Invalid log level: {}", s)),
        };
        Ok(LogLevel(level))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogMode {
    Both,
    Path,
    Terminal,
    Discard,
}
impl std::str::FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_lowercase().as_str() {
            "both" => LogMode::Both,
            "path" | "file" => LogMode::Path,
            "terminal" | "term" | "cli" => LogMode::Terminal,
            "discard" | "none" => LogMode::Discard,
            _ => return Err(format!("Invalid log mode: {}", s)),
        };
        Ok(mode)
    }
}

/// Writes every log line to stderr and to the log file
struct TeeWriter {
    file: File,
}
impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn open_log_file(log_path: PathBuf) -> anyhow::Result<File> {
    let path = expand_and_resolve_path(log_path)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

pub fn setup_global_logger(
    log_level: LogLevel,
    log_output: LogMode,
    log_path: PathBuf,
) -> anyhow::Result<()> {
    let mut builder = Builder::new();
    builder.format_timestamp_secs();

    match log_output {
        LogMode::Discard => {
            builder.filter_level(LevelFilter::Off);
        }

        LogMode::Terminal => {
            builder.filter_level(log_level.into());
            builder.target(Target::Stderr);
        }

        LogMode::Path => {
            let file = open_log_file(log_path)?;
            builder.filter_level(log_level.into());
            builder.write_style(env_logger::WriteStyle::Never);
            builder.target(Target::Pipe(Box::new(file)));
        }

        LogMode::Both => {
            let file = open_log_file(log_path)?;
            builder.filter_level(log_level.into());
            builder.write_style(env_logger::WriteStyle::Never);
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
        }
    };

    builder.try_init().context("Logger was already initialized")?;
    Ok(())
}

///////////////////////////////
/// Logging flags shared by every binary
#[derive(Args, Clone, Debug)]
pub struct LogArgs {
    #[arg(long = "log-level", default_value = DEFAULT_LOG_LEVEL)]
    /// trace, debug, info, warn, error or off
    pub log_level: LogLevel,

    #[arg(long = "log-mode", default_value = DEFAULT_LOG_MODE)]
    /// terminal, path, both or discard
    pub log_mode: LogMode,

    #[arg(long = "log-path")]
    /// Log file for the path and both modes
    pub log_path: Option<PathBuf>,
}

impl LogArgs {
    /// Start logging; returns the log file path that was used
    pub fn init(&self, default_path: PathBuf) -> anyhow::Result<PathBuf> {
        let log_path = self.log_path.clone().unwrap_or(default_path);
        setup_global_logger(self.log_level, self.log_mode, log_path.clone())?;
        Ok(log_path)
    }
}
