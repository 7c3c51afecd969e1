use std::path::PathBuf;

use anyhow::Result;
use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};

use buscollate_core::utils::remove_all_extensions;

use crate::fasta::{IsoformRecord, read_isoform_records};
use crate::genes::{GeneList, GeneLookup};
use crate::manifest::SequenceFileManifest;

/// A genome file that was skipped during collation, with the reason.
#[derive(Clone, Debug)]
pub struct FileWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning every genome in the manifest: the longest isoform
/// per resolved gene, the genes that never matched, and everything that
/// was skipped along the way.
pub struct CollationOutcome {
    pub best: FxHashMap<String, IsoformRecord>,
    pub unresolved: Vec<String>,
    pub warnings: Vec<FileWarning>,
    pub genomes_scanned: usize,
    pub records_seen: usize,
    pub records_matched: usize,
}

///
/// Scan every genome file in the manifest and keep, per listed gene, the
/// longest isoform seen so far.
///
/// Replacement only happens on a strictly greater sequence length, so an
/// equal-length tie is kept by the genome that appears earlier in the
/// manifest (and by the earlier record within one file). Files that
/// cannot be read or parsed are recorded as warnings and skipped; they
/// never abort the run.
///
/// # Arguments:
/// - genes: the BUSCO genes to collate
/// - manifest: per-genome result files, in priority order
///
pub fn collate(genes: &GeneList, manifest: &SequenceFileManifest) -> Result<CollationOutcome> {
    let mut best: FxHashMap<String, IsoformRecord> = FxHashMap::default();
    let mut warnings: Vec<FileWarning> = Vec::new();
    let mut genomes_scanned = 0;
    let mut records_seen = 0;
    let mut records_matched = 0;

    let pb = ProgressBar::new(manifest.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} genomes ({eta})")?
            .progress_chars("##-"),
    );

    for path in manifest.paths() {
        let genome = remove_all_extensions(path);

        match read_isoform_records(path, &genome) {
            Ok(records) => {
                genomes_scanned += 1;

                for record in records {
                    records_seen += 1;

                    if !genes.contains_gene(&record.gene_id) {
                        continue;
                    }
                    records_matched += 1;

                    let replace = match best.get(&record.gene_id) {
                        Some(current) => record.len() > current.len(),
                        None => true,
                    };
                    if replace {
                        best.insert(record.gene_id.clone(), record);
                    }
                }
            }
            Err(e) => {
                pb.suspend(|| eprintln!("warning: skipping {}: {:#}", path.display(), e));
                warnings.push(FileWarning {
                    path: path.clone(),
                    reason: format!("{e:#}"),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let unresolved: Vec<String> = genes
        .iter()
        .filter(|id| !best.contains_key(*id))
        .map(|id| id.to_string())
        .collect();

    Ok(CollationOutcome {
        best,
        unresolved,
        warnings,
        genomes_scanned,
        records_seen,
        records_matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::genes::GeneCount;

    fn write_fofn(dir: &Path, entries: &[&Path]) -> PathBuf {
        let fofn = dir.join("genomes.fofn");
        let mut file = std::fs::File::create(&fofn).unwrap();
        for entry in entries {
            writeln!(file, "{}", entry.display()).unwrap();
        }
        fofn
    }

    #[fixture]
    fn gene_list() -> (TempDir, GeneList) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.tsv");
        std::fs::write(&path, "busco_id\nBUSCO1\nBUSCO2\n").unwrap();
        let genes = GeneList::from_file(&path, None).unwrap();
        (dir, genes)
    }

    #[rstest]
    fn longest_isoform_wins_across_genomes(gene_list: (TempDir, GeneList)) {
        let (dir, genes) = gene_list;

        let g1 = dir.path().join("g1.fa");
        std::fs::write(&g1, format!(">BUSCO1\n{}\n", "A".repeat(300))).unwrap();
        let g2 = dir.path().join("g2.fa");
        std::fs::write(
            &g2,
            format!(">BUSCO1\n{}\n>BUSCO2\n{}\n", "C".repeat(450), "G".repeat(200)),
        )
        .unwrap();

        let fofn = write_fofn(dir.path(), &[&g1, &g2]);
        let manifest = SequenceFileManifest::from_file(&fofn).unwrap();

        let outcome = collate(&genes, &manifest).unwrap();

        assert_eq!(outcome.genomes_scanned, 2);
        assert_eq!(outcome.best["BUSCO1"].genome, "g2");
        assert_eq!(outcome.best["BUSCO1"].len(), 450);
        assert_eq!(outcome.best["BUSCO2"].genome, "g2");
        assert_eq!(outcome.best["BUSCO2"].len(), 200);
        assert!(outcome.unresolved.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[rstest]
    fn equal_length_tie_keeps_earlier_genome(gene_list: (TempDir, GeneList)) {
        let (dir, genes) = gene_list;

        let g1 = dir.path().join("first.fa");
        std::fs::write(&g1, ">BUSCO1\nACGTACGT\n").unwrap();
        let g2 = dir.path().join("second.fa");
        std::fs::write(&g2, ">BUSCO1\nTTTTTTTT\n").unwrap();

        let fofn = write_fofn(dir.path(), &[&g1, &g2]);
        let manifest = SequenceFileManifest::from_file(&fofn).unwrap();

        let outcome = collate(&genes, &manifest).unwrap();

        assert_eq!(outcome.best["BUSCO1"].genome, "first");
        assert_eq!(outcome.best["BUSCO1"].sequence, b"ACGTACGT");
    }

    #[rstest]
    fn missing_genome_is_warned_and_skipped(gene_list: (TempDir, GeneList)) {
        let (dir, genes) = gene_list;

        let missing = dir.path().join("not_there.fa");
        let g2 = dir.path().join("g2.fa");
        std::fs::write(&g2, ">BUSCO1\nACGT\n").unwrap();

        let fofn = write_fofn(dir.path(), &[&missing, &g2]);
        let manifest = SequenceFileManifest::from_file(&fofn).unwrap();

        let outcome = collate(&genes, &manifest).unwrap();

        assert_eq!(outcome.genomes_scanned, 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].path, missing);
        assert_eq!(outcome.best["BUSCO1"].genome, "g2");
    }

    #[rstest]
    fn gene_with_no_match_is_unresolved(gene_list: (TempDir, GeneList)) {
        let (dir, genes) = gene_list;

        let g1 = dir.path().join("g1.fa");
        std::fs::write(&g1, ">BUSCO1\nACGT\n>UNLISTED\nACGTACGT\n").unwrap();

        let fofn = write_fofn(dir.path(), &[&g1]);
        let manifest = SequenceFileManifest::from_file(&fofn).unwrap();

        let outcome = collate(&genes, &manifest).unwrap();

        assert_eq!(outcome.unresolved, vec!["BUSCO2".to_string()]);
        assert_eq!(outcome.records_seen, 2);
        assert_eq!(outcome.records_matched, 1);
    }

    #[rstest]
    fn nothing_matches_everything_unresolved(gene_list: (TempDir, GeneList)) {
        let (dir, genes) = gene_list;

        let g1 = dir.path().join("g1.fa");
        std::fs::write(&g1, ">OTHER\nACGT\n").unwrap();

        let fofn = write_fofn(dir.path(), &[&g1]);
        let manifest = SequenceFileManifest::from_file(&fofn).unwrap();

        let outcome = collate(&genes, &manifest).unwrap();

        assert_eq!(outcome.unresolved.len(), genes.n_genes());
        assert!(outcome.best.is_empty());
    }
}
