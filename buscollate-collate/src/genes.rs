use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use fxhash::FxHashSet;

use buscollate_core::error::CollateError;
use buscollate_core::utils::get_dynamic_reader;

/// The set of BUSCO gene identifiers a collation run is restricted to.
///
/// Loaded from a tab-separated file with a header row. Identifiers keep
/// their first-appearance order so reporting stays deterministic; lookup
/// goes through a hash set.
pub struct GeneList {
    ids: Vec<String>,
    index: FxHashSet<String>,
    duplicates: usize,
}

pub trait GeneLookup {
    fn contains_gene(&self, id: &str) -> bool;
}

pub trait GeneCount {
    fn n_genes(&self) -> usize;
}

impl GeneLookup for GeneList {
    fn contains_gene(&self, id: &str) -> bool {
        self.index.contains(id)
    }
}

impl GeneCount for GeneList {
    fn n_genes(&self) -> usize {
        self.ids.len()
    }
}

impl GeneList {
    /// Load a gene list from a tab-separated file with a header row.
    ///
    /// The identifier column defaults to the first column; pass
    /// `id_column` to select one by header name instead. Rows with an
    /// empty identifier cell are skipped; duplicate identifiers are kept
    /// once and counted.
    pub fn from_file(path: &Path, id_column: Option<&str>) -> Result<Self> {
        let reader = get_dynamic_reader(path)
            .with_context(|| format!("Couldn't open gene list: {:?}", path))?;

        let mut lines = reader.lines().enumerate();

        let header = match lines.next() {
            Some((_, line)) => line.with_context(|| "There was an error reading the header")?,
            None => {
                return Err(CollateError::EmptyGeneList(path.display().to_string()).into());
            }
        };

        let column = match id_column {
            Some(name) => header
                .split('\t')
                .position(|field| field.trim() == name)
                .ok_or_else(|| CollateError::MissingIdColumn(name.to_string()))?,
            None => 0,
        };

        let mut ids: Vec<String> = Vec::new();
        let mut index: FxHashSet<String> = FxHashSet::default();
        let mut duplicates = 0;

        for (lineno, line) in lines {
            let line =
                line.with_context(|| format!("There was an error reading line {}", lineno + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let id = match line.split('\t').nth(column) {
                Some(field) if !field.trim().is_empty() => field.trim().to_string(),
                _ => {
                    eprintln!(
                        "warning: gene list line {} has no identifier, skipping",
                        lineno + 1
                    );
                    continue;
                }
            };

            if index.contains(&id) {
                duplicates += 1;
                continue;
            }

            index.insert(id.clone());
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(CollateError::EmptyGeneList(path.display().to_string()).into());
        }

        Ok(GeneList {
            ids,
            index,
            duplicates,
        })
    }

    /// Gene identifiers in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|id| id.as_str())
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}
