use std::io::BufRead;
use std::path::Path;

use anyhow::Result;

use buscollate_core::error::CollateError;
use buscollate_core::utils::get_dynamic_reader;

/// A single cDNA isoform pulled out of a per-genome BUSCO result file.
#[derive(Clone, Debug)]
pub struct IsoformRecord {
    pub gene_id: String,
    pub isoform: Option<String>,
    pub genome: String,
    pub sequence: Vec<u8>,
}

impl IsoformRecord {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Split a FASTA header into the BUSCO gene id and an optional isoform
/// label. The record id is the token before the first whitespace; ids of
/// the form `<busco_id>|<isoform>` carry an isoform label after the pipe.
fn parse_header(header: &str) -> (String, Option<String>) {
    let id = header.split_whitespace().next().unwrap_or_default();
    match id.split_once('|') {
        Some((gene, isoform)) if !isoform.is_empty() => {
            (gene.to_string(), Some(isoform.to_string()))
        }
        Some((gene, _)) => (gene.to_string(), None),
        None => (id.to_string(), None),
    }
}

/// Parse one genome's BUSCO cDNA FASTA file (plain or gzipped) into
/// isoform records tagged with the given genome name.
///
/// Sequence lines are concatenated and uppercased. A record with no id,
/// sequence data before the first header, or a file with no records at
/// all is a parse error for that file.
pub fn read_isoform_records(path: &Path, genome: &str) -> Result<Vec<IsoformRecord>> {
    let mut reader = get_dynamic_reader(path)?;
    let mut results = Vec::new();
    let mut line = String::new();

    let mut current: Option<(String, Option<String>)> = None;
    let mut sequence: Vec<u8> = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            // EOF - finalize the last record if any
            if let Some((gene_id, isoform)) = current.take() {
                results.push(IsoformRecord {
                    gene_id,
                    isoform,
                    genome: genome.to_string(),
                    sequence: std::mem::take(&mut sequence),
                });
            }
            break;
        }

        if line.starts_with('>') {
            // Save previous record if any
            if let Some((gene_id, isoform)) = current.take() {
                results.push(IsoformRecord {
                    gene_id,
                    isoform,
                    genome: genome.to_string(),
                    sequence: std::mem::take(&mut sequence),
                });
            }

            let (gene_id, isoform) = parse_header(line[1..].trim());
            if gene_id.is_empty() {
                return Err(CollateError::FastaParse {
                    path: path.display().to_string(),
                    reason: "record with no id".to_string(),
                }
                .into());
            }
            current = Some((gene_id, isoform));
        } else if !line.trim().is_empty() {
            if current.is_none() {
                return Err(CollateError::FastaParse {
                    path: path.display().to_string(),
                    reason: "sequence data before any header".to_string(),
                }
                .into());
            }

            let trimmed = line.trim_end();
            sequence.extend(trimmed.bytes().map(|b| b.to_ascii_uppercase()));
        }
    }

    if results.is_empty() {
        return Err(CollateError::FastaParse {
            path: path.display().to_string(),
            reason: "no FASTA records".to_string(),
        }
        .into());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_records_and_headers() {
        let records =
            read_isoform_records(Path::new("tests/data/genomes/alpha.fa"), "alpha").unwrap();

        assert_eq!(records.len(), 2);

        assert_eq!(records[0].gene_id, "100043at7742");
        assert_eq!(records[0].isoform.as_deref(), Some("transcript-1"));
        assert_eq!(records[0].genome, "alpha");
        assert_eq!(records[0].sequence, b"ACGTACGTACGT");
        assert_eq!(records[0].len(), 12);

        assert_eq!(records[1].gene_id, "124at7742");
        assert_eq!(records[1].isoform, None);
        assert_eq!(records[1].sequence, b"ACGT");
    }

    #[test]
    fn concatenates_wrapped_sequence_lines() {
        let records =
            read_isoform_records(Path::new("tests/data/genomes/beta.fa"), "beta").unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].gene_id, "100043at7742");
        assert_eq!(records[0].sequence, b"ACGTACGTACGTACGTACGT");
        assert_eq!(records[0].len(), 20);
    }

    #[test]
    fn gzipped_file_parses_the_same() {
        let plain = read_isoform_records(Path::new("tests/data/genomes/beta.fa"), "beta").unwrap();
        let gzipped =
            read_isoform_records(Path::new("tests/data/genomes/beta.fa.gz"), "beta").unwrap();

        assert_eq!(plain.len(), gzipped.len());
        for (p, g) in plain.iter().zip(gzipped.iter()) {
            assert_eq!(p.gene_id, g.gene_id);
            assert_eq!(p.sequence, g.sequence);
        }
    }

    #[test]
    fn sequence_before_header_is_an_error() {
        let result = read_isoform_records(Path::new("tests/data/genomes/bad.fa"), "bad");
        assert!(result.is_err());
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.fa");
        std::fs::write(&path, "").unwrap();

        let result = read_isoform_records(&path, "empty");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_isoform_records(Path::new("no/such/genome.fa"), "none");
        assert!(result.is_err());
    }

    #[test]
    fn header_without_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noid.fa");
        std::fs::write(&path, ">\nACGT\n").unwrap();

        let result = read_isoform_records(&path, "noid");
        assert!(result.is_err());
    }
}
