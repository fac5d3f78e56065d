use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::runtime::Error;

/// Suffixes for each role. Long reads are matched first since "L1000.fastq" also ends in "0.fastq"
pub const SUFFIXES_LONG: [&str; 2] = ["L1000.fastq", "L1000.fastq.gz"];
pub const SUFFIXES_FORWARD: [&str; 2] = ["1.fastq", "1.fastq.gz"];
pub const SUFFIXES_REVERSE: [&str; 2] = ["2.fastq", "2.fastq.gz"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadRole {
    Forward,
    Reverse,
    Long,
}

impl fmt::Display for ReadRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadRole::Forward => "forward",
            ReadRole::Reverse => "reverse",
            ReadRole::Long => "long",
        };
        write!(f, "{}", name)
    }
}

///////////////////////////////
/// How to treat a folder where several files claim the same role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ClassifyPolicy {
    /// Refuse the sample
    #[default]
    Strict,
    /// Keep the file that sorts last by name
    LastWins,
}

/// The read files found in one sample folder
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadSet {
    pub forward: Option<PathBuf>,
    pub reverse: Option<PathBuf>,
    pub long: Option<PathBuf>,
}

impl ReadSet {
    fn slot(&mut self, role: ReadRole) -> &mut Option<PathBuf> {
        match role {
            ReadRole::Forward => &mut self.forward,
            ReadRole::Reverse => &mut self.reverse,
            ReadRole::Long => &mut self.long,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_none() && self.reverse.is_none() && self.long.is_none()
    }
}

/// Figure out which role a file plays from the end of its name
pub fn classify_file_name(name: &str) -> Option<ReadRole> {
    let table = [
        (ReadRole::Long, &SUFFIXES_LONG),
        (ReadRole::Forward, &SUFFIXES_FORWARD),
        (ReadRole::Reverse, &SUFFIXES_REVERSE),
    ];
    table
        .iter()
        .find(|(_, suffixes)| suffixes.iter().any(|s| name.ends_with(s)))
        .map(|(role, _)| *role)
}

/// Classify the files directly inside a sample folder. Subfolders are not entered
pub fn classify_folder(folder: &Path, policy: ClassifyPolicy) -> anyhow::Result<ReadSet> {
    let mut reads = ReadSet::default();

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable entry in {:?}: {}", folder, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping file with non UTF-8 name {:?}", entry.path());
            continue;
        };

        let Some(role) = classify_file_name(name) else {
            log::debug!("Ignoring {:?}", entry.path());
            continue;
        };

        let slot = reads.slot(role);
        if let Some(previous) = slot.as_ref() {
            match policy {
                ClassifyPolicy::Strict => {
                    return Err(Error::ambiguous_reads(folder, role, previous, entry.path()).into());
                }
                ClassifyPolicy::LastWins => {
                    log::warn!(
                        "Replacing {} read {:?} with {:?} in {:?}",
                        role,
                        previous,
                        entry.path(),
                        folder
                    );
                }
            }
        }
        *slot = Some(entry.path().to_path_buf());
    }

    Ok(reads)
}
