use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One per-specimen folder under the input root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleFolder {
    /// Folder name, reused verbatim as the output folder name
    pub name: String,
    pub path: PathBuf,
}

/// List the immediate subfolders of the input root, sorted by name.
///
/// Entries that cannot be inspected (dangling links, permission errors) are not samples and
/// are skipped with a warning. Failing to read the root itself is an error
pub fn list_sample_folders(root: &Path) -> anyhow::Result<Vec<SampleFolder>> {
    let mut samples = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable entry in {:?}: {}", root, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        samples.push(SampleFolder {
            name,
            path: entry.path().to_path_buf(),
        });
    }
    Ok(samples)
}
