//! Collation of per-genome BUSCO cDNA results.
//!
//! Given a file-of-filenames of per-genome BUSCO cDNA FASTA files and a
//! tab-separated list of BUSCO genes, this library scans every genome,
//! keeps the longest isoform seen for each listed gene, and writes one
//! FASTA file per resolved gene. Genomes that cannot be read and genes
//! that never match are reported rather than silently dropped.

pub mod collate;
pub mod consts;
pub mod fasta;
pub mod genes;
pub mod manifest;
pub mod report;
pub mod writer;

// Re-exports
pub use collate::*;
pub use fasta::*;
pub use genes::*;
pub use manifest::*;
pub use report::*;
pub use writer::*;
