use anyhow::{Context, Result};
use path_clean::PathClean;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Expands ~ and env vars if possible (only for UTF-8 paths), and always returns an absolute PathBuf.
/// Logs a warning if the path is not valid UTF-8 or expansion fails, but still makes the path absolute.
/// Does NOT fail if the file does not exist.
pub fn expand_and_resolve_path<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    let input = input.as_ref();
    let expanded: PathBuf = match input.to_str() {
        Some(s) => {
            if let Ok(expanded) = shellexpand::full(s) {
                PathBuf::from(expanded.as_ref())
            } else {
                log::warn!("Failed to expand path {:?}. Using original path.", input);
                input.to_path_buf()
            }
        }
        None => {
            log::warn!("Path {:?} is not valid UTF-8. Skipping path expansion.", input);
            input.to_path_buf()
        }
    };

    // Try canonicalize, else make absolute
    if let Ok(absolute) = fs::canonicalize(&expanded) {
        return Ok(absolute);
    }
    let abs = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(expanded)
    };
    Ok(abs.clean())
}

/// Returns the path with exactly one trailing separator. Applying it twice gives the same result.
/// Works on the raw bytes so paths that are not UTF-8 come back unchanged
#[cfg(unix)]
pub fn with_trailing_separator<P: AsRef<Path>>(input: P) -> PathBuf {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let raw = input.as_ref().as_os_str().as_bytes();
    let end = raw.iter().rposition(|b| *b != b'/').map_or(0, |i| i + 1);

    let mut out = raw[..end].to_vec();
    out.push(b'/');
    PathBuf::from(OsString::from_vec(out))
}

#[cfg(not(unix))]
pub fn with_trailing_separator<P: AsRef<Path>>(input: P) -> PathBuf {
    use std::path::MAIN_SEPARATOR;

    let raw = input.as_ref().as_os_str().to_string_lossy();
    let trimmed = raw.trim_end_matches(|c: char| c == MAIN_SEPARATOR || c == '/');

    let mut out = OsString::from(trimmed);
    out.push(MAIN_SEPARATOR.to_string());
    PathBuf::from(out)
}

/// Fails unless the path exists and is a directory
pub fn require_directory<P: AsRef<Path>>(path: P) -> Result<(), crate::runtime::Error> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(crate::runtime::Error::not_a_directory(path)),
        Err(_) => Err(crate::runtime::Error::directory_not_found(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::MAIN_SEPARATOR;

    #[test]
    fn test_trailing_separator_added() {
        let p = with_trailing_separator("data/reads");
        assert_eq!(p.to_string_lossy(), format!("data/reads{}", MAIN_SEPARATOR));
    }

    #[test]
    fn test_trailing_separator_idempotent() {
        let once = with_trailing_separator("data/reads");
        let twice = with_trailing_separator(&once);
        assert_eq!(once, twice);

        let many = with_trailing_separator("data/reads///");
        assert_eq!(many, once);
    }

    #[test]
    fn test_trailing_separator_root() {
        let root = MAIN_SEPARATOR.to_string();
        assert_eq!(with_trailing_separator(&root).to_string_lossy(), root);
    }

    #[test]
    fn test_trailing_separator_keeps_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/data/reads\xff");
        let once = with_trailing_separator(raw);
        assert_eq!(once.as_os_str().as_bytes(), b"/data/reads\xff/");
        assert_eq!(with_trailing_separator(&once), once);
        assert_eq!(with_trailing_separator(OsStr::from_bytes(b"/data/reads\xff//")), once);
    }

    #[test]
    fn test_non_utf8_directory_still_valid() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let reads = dir.path().join(OsStr::from_bytes(b"reads\xff"));
        fs::create_dir(&reads).unwrap();
        let normalised = with_trailing_separator(expand_and_resolve_path(&reads).unwrap());
        assert!(require_directory(&normalised).is_ok());
    }

    #[test]
    fn test_require_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(require_directory(dir.path()).is_ok());

        let file = dir.path().join("x.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            require_directory(&file),
            Err(crate::runtime::Error::NotADirectory { .. })
        ));
        assert!(matches!(
            require_directory(dir.path().join("missing")),
            Err(crate::runtime::Error::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_expand_relative_is_absolute() {
        let p = expand_and_resolve_path("some/dir/../file.txt").unwrap();
        assert!(p.is_absolute());
        assert!(p.ends_with("some/file.txt"));
    }
}
