use std::env;
use std::path::{Path, PathBuf};

use log::debug;
use log::info;

use crate::runtime::Error;

/// Find a helper program. A file with that name next to the running executable wins,
/// then $PATH. Falls back to the bare name so the spawn error names the program
pub fn resolve_program(name: &str) -> PathBuf {
    let sibling = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(name)));
    if let Some(sibling) = sibling {
        if sibling.is_file() {
            debug!("Using {} next to the executable: {:?}", name, sibling);
            return sibling;
        }
    }

    match which::which(name) {
        Ok(path) => path,
        Err(_) => PathBuf::from(name),
    }
}

/// Check that a program can be found and run before any work starts
pub fn check_program(program: &Path) -> Result<(), Error> {
    debug!("Checking for {:?}", program);
    let name = program.to_string_lossy().to_string();
    let found = if program.components().count() > 1 {
        program.is_file()
    } else {
        which::which(program).is_ok()
    };

    if found {
        info!("Found {}", name);
        Ok(())
    } else {
        Err(Error::utility_not_executable(name))
    }
}
