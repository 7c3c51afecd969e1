use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fxhash::FxHashMap;
use serde::Serialize;

use crate::consts::{FASTA_LINE_WIDTH, OUTPUT_EXTENSION};
use crate::fasta::IsoformRecord;

/// A resolved gene whose output file could not be written.
#[derive(Clone, Debug, Serialize)]
pub struct WriteFailure {
    pub gene_id: String,
    pub reason: String,
}

///
/// Write one FASTA file per resolved gene under the output directory.
///
/// The directory is created if absent. Each file is named
/// `<gene_id>.fa` and holds a single record: a `>{gene_id} {genome}`
/// header followed by the winning sequence wrapped at 60 columns.
/// Per-gene write failures are collected and returned; only a failure
/// to create the output directory itself aborts.
///
/// # Arguments:
/// - best: longest isoform per gene, as produced by `collate`
/// - output: path to the output directory
///
pub fn write_per_gene(
    best: &FxHashMap<String, IsoformRecord>,
    output: &Path,
) -> Result<Vec<WriteFailure>> {
    fs::create_dir_all(output).with_context(|| {
        format!(
            "There was an error creating the output directory: {:?}",
            output
        )
    })?;

    let metadata = fs::metadata(output)
        .with_context(|| format!("Failed to stat output directory: {:?}", output))?;
    if metadata.permissions().readonly() {
        anyhow::bail!("Output directory is not writable: {:?}", output);
    }

    let mut failures: Vec<WriteFailure> = Vec::new();

    // sorted for a deterministic write order
    let mut gene_ids: Vec<&String> = best.keys().collect();
    gene_ids.sort();

    for gene_id in gene_ids {
        let record = &best[gene_id];

        if let Err(e) = write_gene_file(gene_id, record, output) {
            eprintln!("warning: couldn't write {}: {:#}", gene_id, e);
            failures.push(WriteFailure {
                gene_id: gene_id.to_string(),
                reason: format!("{e:#}"),
            });
        }
    }

    Ok(failures)
}

fn write_gene_file(gene_id: &str, record: &IsoformRecord, output: &Path) -> Result<()> {
    // a gene id with a path separator would escape the output directory
    if gene_id.contains(['/', '\\']) {
        anyhow::bail!("gene id contains a path separator: {:?}", gene_id);
    }

    let file_path = output.join(format!("{gene_id}.{OUTPUT_EXTENSION}"));
    let file = File::create(&file_path)
        .with_context(|| format!("Failed to create output file: {:?}", file_path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, ">{} {}", gene_id, record.genome)?;
    for chunk in record.sequence.chunks(FASTA_LINE_WIDTH) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}
