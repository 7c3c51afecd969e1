use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Strip every extension from a file name, so `m12878.cdna.fa.gz`
/// becomes `m12878`. Used to derive a genome tag from a manifest entry.
pub fn remove_all_extensions(path: &Path) -> String {
    let mut stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();

    let mut parent_path = path.with_file_name(stem.clone());
    while parent_path.extension().is_some() {
        parent_path = parent_path.with_extension("");
        stem = parent_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
    }

    stem
}
