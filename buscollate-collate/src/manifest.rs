use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use buscollate_core::error::CollateError;
use buscollate_core::utils::get_dynamic_reader;

/// An ordered list of per-genome result files, read from a
/// file-of-filenames (one path per line). Manifest order decides which
/// genome wins a length tie, so it is preserved exactly as given.
pub struct SequenceFileManifest {
    paths: Vec<PathBuf>,
}

impl SequenceFileManifest {
    /// Read a file-of-filenames. Entries are trimmed; blank lines and
    /// `#` comment lines are skipped. Whether each entry resolves to a
    /// readable file is checked later, per entry, during collation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)
            .with_context(|| format!("Couldn't open manifest: {:?}", path))?;

        let mut paths: Vec<PathBuf> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line =
                line.with_context(|| format!("There was an error reading line {}", index + 1))?;

            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }

            paths.push(PathBuf::from(entry));
        }

        if paths.is_empty() {
            return Err(CollateError::EmptyManifest(path.display().to_string()).into());
        }

        Ok(SequenceFileManifest { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
