use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::command::constants::{ASSEMBLY_LOG_NAME, TABLE_ASSEMBLY_SUMMARY, TABLE_COMPONENT_SUMMARY};
use crate::runtime::Error;
use crate::sample::list_sample_folders;

lazy_static! {
    static ref RE_ANSI: Regex = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    static ref RE_HEADER: Regex =
        Regex::new(r"^\s*Component\s+Segments\s+Links\s+Length\s+N50\s+Longest segment\s+Status\s*$").unwrap();
    static ref RE_ROW: Regex = Regex::new(
        r"^\s*(total|\d+)\s+([\d,]+)\s+([\d,]+)\s+([\d,]+)\s+([\d,]+)\s+([\d,]+)(?:\s+(\S+))?\s*$"
    )
    .unwrap();
}

/// One line of the assembler's component table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentStats {
    pub segments: u64,
    pub links: u64,
    pub length: u64,
    pub n50: u64,
    pub longest_segment: u64,
    pub status: String,
}

/// The last component table found in an assembler log
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub total: Option<ComponentStats>,
    pub components: Vec<(u32, ComponentStats)>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AssemblySummaryRow {
    pub sample: String,
    pub components: usize,
    pub segments: u64,
    pub links: u64,
    pub length: u64,
    pub n50: u64,
    pub longest_segment: u64,
    pub complete_components: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ComponentSummaryRow {
    pub sample: String,
    pub component: u32,
    pub segments: u64,
    pub links: u64,
    pub length: u64,
    pub n50: u64,
    pub longest_segment: u64,
    pub status: String,
}

const HEADER_ASSEMBLY_SUMMARY: [&str; 8] = [
    "sample",
    "components",
    "segments",
    "links",
    "length",
    "n50",
    "longest_segment",
    "complete_components",
];
const HEADER_COMPONENT_SUMMARY: [&str; 8] = [
    "sample",
    "component",
    "segments",
    "links",
    "length",
    "n50",
    "longest_segment",
    "status",
];

fn parse_grouped(s: &str) -> Result<u64, Error> {
    s.replace(',', "")
        .parse()
        .map_err(|_| Error::parse_error("component table", Some(format!("bad number '{}'", s))))
}

/// Pull the last component table out of the text of an assembler log
pub fn parse_results_table(log_text: &str) -> Result<Option<ResultsTable>, Error> {
    let mut last: Option<ResultsTable> = None;
    let mut current: Option<ResultsTable> = None;

    for raw in log_text.lines() {
        let line = RE_ANSI.replace_all(raw, "");

        if RE_HEADER.is_match(&line) {
            if let Some(done) = current.take() {
                last = Some(done);
            }
            current = Some(ResultsTable::default());
            continue;
        }

        let Some(table) = current.as_mut() else {
            continue;
        };

        if let Some(caps) = RE_ROW.captures(&line) {
            let stats = ComponentStats {
                segments: parse_grouped(&caps[2])?,
                links: parse_grouped(&caps[3])?,
                length: parse_grouped(&caps[4])?,
                n50: parse_grouped(&caps[5])?,
                longest_segment: parse_grouped(&caps[6])?,
                status: caps.get(7).map(|m| m.as_str().to_string()).unwrap_or_default(),
            };
            if &caps[1] == "total" {
                table.total = Some(stats);
            } else {
                let id = caps[1]
                    .parse()
                    .map_err(|_| Error::parse_error("component table", Some(format!("bad component '{}'", &caps[1]))))?;
                table.components.push((id, stats));
            }
        } else if !line.trim().is_empty() {
            //Table ended
            last = current.take();
        }
    }

    if current.is_some() {
        last = current;
    }
    Ok(last)
}

impl AssemblySummaryRow {
    pub fn from_table(sample: &str, table: Option<&ResultsTable>) -> Self {
        let mut row = AssemblySummaryRow {
            sample: sample.to_string(),
            components: 0,
            segments: 0,
            links: 0,
            length: 0,
            n50: 0,
            longest_segment: 0,
            complete_components: 0,
        };
        let Some(table) = table else {
            return row;
        };

        row.components = table.components.len();
        row.complete_components = table
            .components
            .iter()
            .filter(|(_, c)| c.status == "complete")
            .count();

        match &table.total {
            Some(total) => {
                row.segments = total.segments;
                row.links = total.links;
                row.length = total.length;
                row.n50 = total.n50;
                row.longest_segment = total.longest_segment;
            }
            None => {
                //Single component logs have no total line
                for (_, c) in &table.components {
                    row.segments += c.segments;
                    row.links += c.links;
                    row.length += c.length;
                    row.n50 = row.n50.max(c.n50);
                    row.longest_segment = row.longest_segment.max(c.longest_segment);
                }
            }
        }
        row
    }
}

/// Both summary tables, ready to write
#[derive(Debug, Default)]
pub struct LogTables {
    pub assemblies: Vec<AssemblySummaryRow>,
    pub components: Vec<ComponentSummaryRow>,
}

impl LogTables {
    pub fn add_sample(&mut self, sample: &str, table: Option<&ResultsTable>) {
        self.assemblies.push(AssemblySummaryRow::from_table(sample, table));
        if let Some(table) = table {
            for (id, c) in &table.components {
                self.components.push(ComponentSummaryRow {
                    sample: sample.to_string(),
                    component: *id,
                    segments: c.segments,
                    links: c.links,
                    length: c.length,
                    n50: c.n50,
                    longest_segment: c.longest_segment,
                    status: c.status.clone(),
                });
            }
        }
    }

    /// Write the two tables into a folder, creating it if needed
    pub fn write(&self, dir: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

        let path_assemblies = dir.join(TABLE_ASSEMBLY_SUMMARY);
        write_tsv(&path_assemblies, &HEADER_ASSEMBLY_SUMMARY, &self.assemblies)?;

        let path_components = dir.join(TABLE_COMPONENT_SUMMARY);
        write_tsv(&path_components, &HEADER_COMPONENT_SUMMARY, &self.components)?;

        Ok((path_assemblies, path_components))
    }
}

fn write_tsv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Log-table parser parameters
pub struct LogTable {
    pub path_in: PathBuf,
    pub path_out: PathBuf,
}

impl LogTable {
    /// Run the algorithm
    pub fn run(params: &LogTable) -> anyhow::Result<LogTables> {
        let mut tables = LogTables::default();

        for sample in list_sample_folders(&params.path_in)? {
            let path_log = sample.path.join(ASSEMBLY_LOG_NAME);
            if !path_log.is_file() {
                log::debug!("No assembler log in {:?}, skipping", sample.path);
                continue;
            }

            let text = fs::read_to_string(&path_log)
                .with_context(|| format!("Failed to read {:?}", path_log))?;
            let table = parse_results_table(&text)?;
            if table.is_none() {
                log::warn!("No results table in {:?}; the assembly probably failed", path_log);
            }
            tables.add_sample(&sample.name, table.as_ref());
        }

        if tables.assemblies.is_empty() {
            log::warn!("No assembler logs found under {:?}", params.path_in);
        }

        let (a, c) = tables.write(&params.path_out)?;
        log::info!("Wrote {:?} and {:?}", a, c);
        Ok(tables)
    }
}
