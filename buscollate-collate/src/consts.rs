pub const DEFAULT_OUT: &str = "per_gene";
pub const FASTA_LINE_WIDTH: usize = 60;
pub const OUTPUT_EXTENSION: &str = "fa";
