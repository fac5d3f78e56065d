use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bio::io::fasta;

use crate::runtime::Error;

/// Shape of an assembled sequence, as reported in the FASTA header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Circular,
    Linear,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Circular => "circular",
            Topology::Linear => "linear",
        }
    }
}

/// What the assembler wrote after the record id, e.g. `length=4900000 depth=1.00x circular=true`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    pub length: Option<usize>,
    pub topology: Topology,
}

pub fn parse_header_description(desc: Option<&str>) -> HeaderInfo {
    let mut info = HeaderInfo {
        length: None,
        topology: Topology::Linear,
    };
    let Some(desc) = desc else {
        return info;
    };

    for token in desc.split_whitespace() {
        match token.split_once('=') {
            Some(("length", v)) => info.length = v.parse().ok(),
            Some(("circular", v)) if v.eq_ignore_ascii_case("true") => info.topology = Topology::Circular,
            _ => {}
        }
    }
    info
}

/// File name for one extracted sequence: `<sample>_<index>_<length>bp_<topology>.fasta`
pub fn sequence_file_name(sample: &str, index: usize, length: usize, topology: Topology) -> String {
    format!("{}_{}_{}bp_{}.fasta", sample, index, length, topology.as_str())
}

/// Extractor parameters
pub struct Extract {
    /// Per-sample assembly folder
    pub path_in: PathBuf,
    /// Name of the assembly file inside `path_in`
    pub file_name: String,
    /// Also copy every written file here
    pub path_shared: Option<PathBuf>,
}

impl Extract {
    /// Split the assembly into one FASTA file per sequence. Returns the files written in the sample folder
    pub fn run(params: &Extract) -> anyhow::Result<Vec<PathBuf>> {
        let path_fasta = params.path_in.join(&params.file_name);
        if !path_fasta.is_file() {
            return Err(Error::file_not_valid(&path_fasta, Some("assembly file is missing")).into());
        }

        let sample = sample_name(&params.path_in);
        let reader = fasta::Reader::from_file(&path_fasta)
            .with_context(|| format!("Failed to open {:?}", path_fasta))?;

        let mut written = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::file_not_valid(&path_fasta, Some(e.to_string())))?;
            let info = parse_header_description(record.desc());
            let length = info.length.unwrap_or_else(|| record.seq().len());

            let path_out = params
                .path_in
                .join(sequence_file_name(&sample, i + 1, length, info.topology));
            let mut writer = fasta::Writer::to_file(&path_out)
                .with_context(|| format!("Failed to create {:?}", path_out))?;
            writer.write_record(&record)?;
            writer.flush()?;
            written.push(path_out);
        }

        if written.is_empty() {
            log::warn!("No sequences in {:?}", path_fasta);
        }

        if let Some(shared) = &params.path_shared {
            copy_into(&written, shared)?;
        }

        log::info!("Extracted {} sequences for {}", written.len(), sample);
        Ok(written)
    }
}

fn sample_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "assembly".to_string())
}

fn copy_into(files: &[PathBuf], dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    for f in files {
        let Some(name) = f.file_name() else {
            continue;
        };
        let target = dir.join(name);
        fs::copy(f, &target).with_context(|| format!("Failed to copy {:?} to {:?}", f, target))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSEMBLY: &str = "\
>1 length=12 depth=1.00x circular=true
ACGTACGTACGT
>2 length=8 depth=3.20x
ACGTTTTT
>3
ACG
";

    #[test]
    fn test_parse_header() {
        let info = parse_header_description(Some("length=4900000 depth=1.00x circular=true"));
        assert_eq!(info.length, Some(4_900_000));
        assert_eq!(info.topology, Topology::Circular);

        let info = parse_header_description(Some("length=300 depth=1.00x"));
        assert_eq!(info.topology, Topology::Linear);

        let info = parse_header_description(None);
        assert_eq!(info.length, None);
    }

    #[test]
    fn test_sequence_file_name() {
        assert_eq!(
            sequence_file_name("s1", 2, 300000, Topology::Circular),
            "s1_2_300000bp_circular.fasta"
        );
    }

    #[test]
    fn test_extract_with_shared_copy() {
        let dir = tempfile::tempdir().unwrap();
        let sample_dir = dir.path().join("s1");
        fs::create_dir(&sample_dir).unwrap();
        fs::write(sample_dir.join("assembly.fasta"), ASSEMBLY).unwrap();
        let shared = dir.path().join("summary").join("sequences");

        let written = Extract::run(&Extract {
            path_in: sample_dir.clone(),
            file_name: "assembly.fasta".to_string(),
            path_shared: Some(shared.clone()),
        })
        .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "s1_1_12bp_circular.fasta",
                "s1_2_8bp_linear.fasta",
                "s1_3_3bp_linear.fasta"
            ]
        );
        for n in &names {
            assert!(shared.join(n).is_file());
        }

        let text = fs::read_to_string(sample_dir.join("s1_1_12bp_circular.fasta")).unwrap();
        assert!(text.starts_with(">1 length=12"));
        assert!(text.contains("ACGTACGTACGT"));
    }

    #[test]
    fn test_extract_missing_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let err = Extract::run(&Extract {
            path_in: dir.path().to_path_buf(),
            file_name: "assembly.fasta".to_string(),
            path_shared: None,
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FileNotValid { .. })
        ));
    }
}
