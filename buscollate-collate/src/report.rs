use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::collate::CollationOutcome;
use crate::genes::{GeneCount, GeneList};
use crate::writer::WriteFailure;

#[derive(Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Summary of a full collation run, printed at the end of every run and
/// optionally written as JSON for pipeline consumption.
#[derive(Serialize)]
pub struct RunReport {
    pub genes_requested: usize,
    pub genes_resolved: usize,
    pub duplicate_gene_ids: usize,
    pub genomes_scanned: usize,
    pub genomes_skipped: usize,
    pub records_seen: usize,
    pub records_matched: usize,
    pub unresolved: Vec<String>,
    pub skipped_files: Vec<SkippedFile>,
    pub write_failures: Vec<WriteFailure>,
}

impl RunReport {
    pub fn new(genes: &GeneList, outcome: &CollationOutcome, failures: &[WriteFailure]) -> Self {
        let skipped_files = outcome
            .warnings
            .iter()
            .map(|w| SkippedFile {
                path: w.path.display().to_string(),
                reason: w.reason.clone(),
            })
            .collect();

        RunReport {
            genes_requested: genes.n_genes(),
            genes_resolved: outcome.best.len(),
            duplicate_gene_ids: genes.duplicate_count(),
            genomes_scanned: outcome.genomes_scanned,
            genomes_skipped: outcome.warnings.len(),
            records_seen: outcome.records_seen,
            records_matched: outcome.records_matched,
            unresolved: outcome.unresolved.clone(),
            skipped_files,
            write_failures: failures.to_vec(),
        }
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize run report to JSON")?;

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;
        file.write_all(json.as_bytes())?;
        writeln!(file)?;

        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Resolved {}/{} genes from {} genomes ({} skipped)",
            self.genes_resolved, self.genes_requested, self.genomes_scanned, self.genomes_skipped
        )?;
        writeln!(
            f,
            "Records: {} seen, {} matched a listed gene",
            self.records_seen, self.records_matched
        )?;

        if self.duplicate_gene_ids > 0 {
            writeln!(
                f,
                "Gene list contained {} duplicate identifier(s)",
                self.duplicate_gene_ids
            )?;
        }

        if !self.unresolved.is_empty() {
            writeln!(f, "Unresolved genes ({}):", self.unresolved.len())?;
            for gene_id in &self.unresolved {
                writeln!(f, "  {}", gene_id)?;
            }
        }

        if !self.write_failures.is_empty() {
            writeln!(f, "Write failures ({}):", self.write_failures.len())?;
            for failure in &self.write_failures {
                writeln!(f, "  {}: {}", failure.gene_id, failure.reason)?;
            }
        }

        Ok(())
    }
}
