use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use crate::runtime::Error;
use crate::utils::command_to_string;

/// How many trailing stderr lines to keep in an error message
pub const STDERR_TAIL_LINES: usize = 10;

/// An external program plus its arguments, not yet run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        ToolCommand {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Short name of the program, for messages
    pub fn utility(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    pub fn to_command(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", command_to_string(&self.to_command()))
    }
}

/// What came back from a finished program
#[derive(Clone, Debug)]
pub struct ToolOutput {
    /// None if the process was killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// What the program wrote to stderr, if anything
    pub fn stderr_text(&self) -> Option<&str> {
        let text = self.stderr.trim_end();
        (!text.is_empty()).then_some(text)
    }

    /// Turn a non-zero exit into an error carrying the end of stderr.
    /// On success the full stderr goes to the debug log
    pub fn check(self, cmd: &ToolCommand) -> Result<ToolOutput, Error> {
        if self.success {
            if let Some(text) = self.stderr_text() {
                log::debug!("{} stderr:\n{}", cmd.utility(), text);
            }
            return Ok(self);
        }
        let status = match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        let tail = stderr_tail(&self.stderr, STDERR_TAIL_LINES);
        let msg = if tail.is_empty() {
            status
        } else {
            format!("{}: {}", status, tail)
        };
        Err(Error::utility_execution_error(
            cmd.utility(),
            cmd.to_string(),
            Some(msg),
        ))
    }
}

fn stderr_tail(stderr: &str, n: usize) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join(" | ")
}

/// Something that can run an external program to completion
pub trait ToolRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<ToolOutput, Error>;
}

/// Runs programs as child processes and waits for them
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<ToolOutput, Error> {
        log::debug!("Running {}", cmd);
        let output = cmd
            .to_command()
            .output()
            .map_err(|_| Error::utility_not_executable(cmd.program.to_string_lossy()))?;

        Ok(ToolOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
