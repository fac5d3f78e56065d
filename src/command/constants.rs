pub const DEFAULT_ASSEMBLER: &str = "unicycler";
pub const DEFAULT_ASSEMBLER_THREADS: usize = 8;
pub const DEFAULT_ASSEMBLER_MODE: &str = "normal";

pub const DEFAULT_LOGTABLE: &str = "asmbatch_logtable";
pub const DEFAULT_EXTRACTOR: &str = "asmbatch_extract";

pub const ASSEMBLY_FILE_NAME: &str = "assembly.fasta";
pub const ASSEMBLY_LOG_NAME: &str = "unicycler.log";

pub const SUMMARY_DIR_NAME: &str = "summary";
pub const SHARED_SEQUENCES_DIR_NAME: &str = "sequences";
pub const TABLE_ASSEMBLY_SUMMARY: &str = "assembly_summary.tsv";
pub const TABLE_COMPONENT_SUMMARY: &str = "component_summary.tsv";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_MODE: &str = "terminal";
pub const DEFAULT_LOG_FILE_NAME: &str = "asmbatch.log";
