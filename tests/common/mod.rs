#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const ASSEMBLY: &str = "\
>1 length=12 depth=1.00x circular=true
ACGTACGTACGT
>2 length=8 depth=2.00x
ACGTTTTT
";

pub const UNICYCLER_LOG: &str = "\
Rotating completed replicons (2024-01-01 10:30:00)
    Component   Segments   Links   Length   N50   Longest segment   Status
        total          2       1       20       12                12
            1          1       1       12       12                12   complete
            2          1       0        8        8                 8   incomplete

Assembly complete (2024-01-01 10:31:00)
";

/// A stand-in assembler: writes a fixed assembly and log into the -o folder.
/// Fails for any sample whose forward read path contains "broken"
pub fn fake_assembler(dir: &Path) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
out=""
fwd=""
while [ $# -gt 0 ]; do
    case "$1" in
        -o) out="$2"; shift 2 ;;
        -1) fwd="$2"; shift 2 ;;
        *) shift ;;
    esac
done
case "$fwd" in
    *broken*) echo "Error: could not load reads" >&2; exit 1 ;;
esac
mkdir -p "$out"
cat > "$out/assembly.fasta" <<'FASTA'
{}FASTA
cat > "$out/unicycler.log" <<'LOG'
{}LOG
"#,
        ASSEMBLY, UNICYCLER_LOG
    );

    let path = dir.join("fake_unicycler.sh");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn add_sample(root: &Path, name: &str, files: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for f in files {
        fs::write(dir.join(f), "@r1\nACGT\n+\nIIII\n").unwrap();
    }
}

pub fn asmbatch(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asmbatch"))
        .args(args)
        .output()
        .unwrap()
}

pub fn helper_args() -> Vec<std::ffi::OsString> {
    vec![
        "--logtable".into(),
        env!("CARGO_BIN_EXE_asmbatch_logtable").into(),
        "--extractor".into(),
        env!("CARGO_BIN_EXE_asmbatch_extract").into(),
    ]
}

pub fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
