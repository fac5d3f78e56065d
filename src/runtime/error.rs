use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sample::ReadRole;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Directory at {:?} not found.", .path)]
    DirectoryNotFound { path: PathBuf },

    #[error("Path {:?} exists but is not a directory.", .path)]
    NotADirectory { path: PathBuf },

    #[error("Output directory {:?} already exists. Remove it or choose another output folder.", .path)]
    OutputExists { path: PathBuf },

    #[error("Output directory {:?} lies inside input directory {:?}. Choose an output folder outside the input.", .output, .input)]
    OutputInsideInput { input: PathBuf, output: PathBuf },

    #[error("File at {:?} is invalid{}.", .path, Error::format_msg_as_detail(.msg))]
    FileNotValid { path: PathBuf, msg: Option<String> },

    #[error(
        "Sample folder {:?} has more than one {} read file: {:?} and {:?}",
        .folder,
        .role,
        .first,
        .second
    )]
    AmbiguousReads {
        folder: PathBuf,
        role: ReadRole,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Sample folder {:?} has an incomplete read set{}", .folder, Error::format_msg_as_detail(.msg))]
    IncompleteReadSet { folder: PathBuf, msg: Option<String> },

    #[error(
        "Utility '{}' failed on execute '{}'{}",
        .utility,
        .cmd,
        Error::format_msg_as_detail(.msg)
    )]
    UtilityExecutionError {
        utility: String,
        cmd: String,
        msg: Option<String>,
    },

    #[error(
        "Failed trying to execute utility '{utility}'. Make sure it is in your $PATH and you have execution permissions."
    )]
    UtilityNotExecutable { utility: String },

    #[error("Failed parsing {}{}", .context, Error::format_msg_as_detail(.msg))]
    ParseError { context: String, msg: Option<String> },
}

impl Error {
    #[cold]
    pub fn directory_not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::DirectoryNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn not_a_directory<P: AsRef<Path>>(path: P) -> Self {
        Error::NotADirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn output_exists<P: AsRef<Path>>(path: P) -> Self {
        Error::OutputExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn output_inside_input<I: AsRef<Path>, O: AsRef<Path>>(input: I, output: O) -> Self {
        Error::OutputInsideInput {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_valid<P: AsRef<Path>, M: Into<String>>(path: P, msg: Option<M>) -> Self {
        Error::FileNotValid {
            path: path.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn ambiguous_reads<P: AsRef<Path>, A: AsRef<Path>, B: AsRef<Path>>(
        folder: P,
        role: ReadRole,
        first: A,
        second: B,
    ) -> Self {
        Error::AmbiguousReads {
            folder: folder.as_ref().to_path_buf(),
            role,
            first: first.as_ref().to_path_buf(),
            second: second.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn incomplete_read_set<P: AsRef<Path>, M: Into<String>>(folder: P, msg: Option<M>) -> Self {
        Error::IncompleteReadSet {
            folder: folder.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn utility_execution_error<U: Into<String>, C: Into<String>, M: Into<String>>(
        utility: U,
        cmd: C,
        msg: Option<M>,
    ) -> Self {
        Error::UtilityExecutionError {
            utility: utility.into(),
            cmd: cmd.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn utility_not_executable<U: Into<String>>(utility: U) -> Self {
        Error::UtilityNotExecutable {
            utility: utility.into(),
        }
    }

    #[cold]
    pub fn parse_error<C: Into<String>, M: Into<String>>(context: C, msg: Option<M>) -> Self {
        Error::ParseError {
            context: context.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }
}

///////////////////////////////
/// What to do once a sample has failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ErrorMode {
    /// Record the failure and carry on with the next sample
    #[default]
    Continue,
    /// Stop assembling at the first failed sample
    Halt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_formatting() {
        let e = Error::utility_execution_error("unicycler", "unicycler -o x", Some("exit status 1"));
        assert_eq!(
            e.to_string(),
            "Utility 'unicycler' failed on execute 'unicycler -o x' (exit status 1)"
        );

        let e = Error::incomplete_read_set("/data/s1", None::<String>);
        assert_eq!(e.to_string(), "Sample folder \"/data/s1\" has an incomplete read set");
    }
}
