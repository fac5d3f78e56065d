use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::command::constants::{ASSEMBLY_FILE_NAME, ASSEMBLY_LOG_NAME};
use crate::process::{ToolCommand, ToolOutput, ToolRunner};
use crate::runtime::Error;
use crate::sample::{ReadSet, SampleFolder};

/// Fixed settings passed to the assembler for every sample
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblySettings {
    pub program: PathBuf,
    pub threads: usize,
    pub mode: String,
}

/// Build the assembler call for one sample.
///
/// Short reads must come as a pair. A sample without long reads is assembled from short
/// reads alone and gets no `-l` argument; a sample with only long reads gets no `-1`/`-2`.
pub fn assembler_command(
    settings: &AssemblySettings,
    folder: &Path,
    reads: &ReadSet,
    out_dir: &Path,
) -> Result<ToolCommand, Error> {
    if reads.is_empty() {
        return Err(Error::incomplete_read_set(folder, Some("no read files found")));
    }
    let mut cmd = ToolCommand::new(&settings.program);

    match (&reads.forward, &reads.reverse) {
        (Some(forward), Some(reverse)) => {
            cmd = cmd.arg("-1").arg(forward).arg("-2").arg(reverse);
        }
        (Some(_), None) => {
            return Err(Error::incomplete_read_set(folder, Some("forward reads without reverse reads")));
        }
        (None, Some(_)) => {
            return Err(Error::incomplete_read_set(folder, Some("reverse reads without forward reads")));
        }
        (None, None) => {}
    }

    match &reads.long {
        Some(long) => {
            cmd = cmd.arg("-l").arg(long);
        }
        None => {
            log::warn!("No long reads in {:?}, assembling from short reads only", folder);
        }
    }

    Ok(cmd
        .arg("-o")
        .arg(out_dir)
        .arg("-t")
        .arg(settings.threads.to_string())
        .arg("--mode")
        .arg(&settings.mode)
        .current_dir(out_dir))
}

/// Where the assembler leaves its results for one sample
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyOutput {
    pub dir: PathBuf,
    pub assembly: PathBuf,
    pub log: PathBuf,
}

impl AssemblyOutput {
    pub fn in_dir(dir: PathBuf) -> Self {
        AssemblyOutput {
            assembly: dir.join(ASSEMBLY_FILE_NAME),
            log: dir.join(ASSEMBLY_LOG_NAME),
            dir,
        }
    }
}

/// Make the output folder for a sample. An existing folder is an error since runs cannot be resumed
pub fn create_sample_output(out_root: &Path, sample: &SampleFolder) -> Result<PathBuf, Error> {
    let dir = out_root.join(&sample.name);
    match fs::create_dir(&dir) {
        Ok(()) => Ok(dir),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(Error::output_exists(&dir)),
        Err(e) => Err(Error::file_not_valid(&dir, Some(e.to_string()))),
    }
}

/// Assemble one sample and wait for the assembler to finish
pub fn assemble_sample(
    runner: &dyn ToolRunner,
    settings: &AssemblySettings,
    sample: &SampleFolder,
    reads: &ReadSet,
    out_root: &Path,
) -> Result<AssemblyOutput, Error> {
    //Check the reads before touching the output tree
    let cmd = assembler_command(settings, &sample.path, reads, &out_root.join(&sample.name))?;
    let dir = create_sample_output(out_root, sample)?;
    log::info!("Assembling {} into {:?}", sample.name, dir);
    log::debug!("{}", cmd);

    let output: ToolOutput = runner.run(&cmd)?;
    output.check(&cmd)?;

    let result = AssemblyOutput::in_dir(dir);
    if !result.assembly.is_file() {
        log::warn!(
            "Assembler finished for {} but {:?} is missing",
            sample.name,
            result.assembly
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::OsString;

    struct RecordingRunner {
        calls: RefCell<Vec<ToolCommand>>,
        succeed: bool,
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, cmd: &ToolCommand) -> Result<ToolOutput, Error> {
            self.calls.borrow_mut().push(cmd.clone());
            Ok(ToolOutput {
                code: Some(if self.succeed { 0 } else { 1 }),
                success: self.succeed,
                stdout: String::new(),
                stderr: "Error: reads are broken".to_string(),
            })
        }
    }

    fn settings() -> AssemblySettings {
        AssemblySettings {
            program: PathBuf::from("unicycler"),
            threads: 8,
            mode: "normal".to_string(),
        }
    }

    fn full_reads() -> ReadSet {
        ReadSet {
            forward: Some(PathBuf::from("/in/s1/s1-1.fastq")),
            reverse: Some(PathBuf::from("/in/s1/s1-2.fastq")),
            long: Some(PathBuf::from("/in/s1/s1-L1000.fastq")),
        }
    }

    fn args_of(cmd: &ToolCommand) -> Vec<String> {
        cmd.args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_command_full() {
        let cmd = assembler_command(&settings(), Path::new("/in/s1"), &full_reads(), Path::new("/out/s1")).unwrap();
        assert_eq!(
            args_of(&cmd),
            vec![
                "-1", "/in/s1/s1-1.fastq", "-2", "/in/s1/s1-2.fastq", "-l", "/in/s1/s1-L1000.fastq",
                "-o", "/out/s1", "-t", "8", "--mode", "normal"
            ]
        );
    }

    #[test]
    fn test_command_without_long_reads() {
        let mut reads = full_reads();
        reads.long = None;
        let cmd = assembler_command(&settings(), Path::new("/in/s1"), &reads, Path::new("/out/s1")).unwrap();
        assert!(!cmd.args.contains(&OsString::from("-l")));
        assert!(cmd.args.contains(&OsString::from("-1")));
    }

    #[test]
    fn test_command_long_only() {
        let reads = ReadSet {
            long: Some(PathBuf::from("/in/s1/s1-L1000.fastq")),
            ..Default::default()
        };
        let cmd = assembler_command(&settings(), Path::new("/in/s1"), &reads, Path::new("/out/s1")).unwrap();
        assert_eq!(args_of(&cmd)[..2], ["-l", "/in/s1/s1-L1000.fastq"]);
    }

    #[test]
    fn test_command_unpaired_rejected() {
        let mut reads = full_reads();
        reads.reverse = None;
        assert!(matches!(
            assembler_command(&settings(), Path::new("/in/s1"), &reads, Path::new("/out/s1")),
            Err(Error::IncompleteReadSet { .. })
        ));
    }

    #[test]
    fn test_command_no_reads_rejected() {
        match assembler_command(&settings(), Path::new("/in/s1"), &ReadSet::default(), Path::new("/out/s1")) {
            Err(Error::IncompleteReadSet { msg, .. }) => assert_eq!(msg.as_deref(), Some("no read files found")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_assemble_creates_output_and_reports_failure() {
        let out = tempfile::tempdir().unwrap();
        let sample = SampleFolder {
            name: "s1".to_string(),
            path: PathBuf::from("/in/s1"),
        };

        let failing = RecordingRunner {
            calls: RefCell::new(Vec::new()),
            succeed: false,
        };
        let err = assemble_sample(&failing, &settings(), &sample, &full_reads(), out.path()).unwrap_err();
        assert!(matches!(err, Error::UtilityExecutionError { .. }));
        assert!(out.path().join("s1").is_dir());
        assert_eq!(failing.calls.borrow().len(), 1);

        //Second attempt must not reuse the folder
        let ok = RecordingRunner {
            calls: RefCell::new(Vec::new()),
            succeed: true,
        };
        let err = assemble_sample(&ok, &settings(), &sample, &full_reads(), out.path()).unwrap_err();
        assert!(matches!(err, Error::OutputExists { .. }));
        assert!(ok.calls.borrow().is_empty());
    }

    #[test]
    fn test_incomplete_sample_leaves_no_output() {
        let out = tempfile::tempdir().unwrap();
        let sample = SampleFolder {
            name: "s2".to_string(),
            path: PathBuf::from("/in/s2"),
        };
        let runner = RecordingRunner {
            calls: RefCell::new(Vec::new()),
            succeed: true,
        };
        let err = assemble_sample(&runner, &settings(), &sample, &ReadSet::default(), out.path()).unwrap_err();
        assert!(matches!(err, Error::IncompleteReadSet { .. }));
        assert!(!out.path().join("s2").exists());
    }
}
