use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollateError {
    #[error("Gene list has no identifier column named: {0}")]
    MissingIdColumn(String),

    #[error("Gene list contains no gene identifiers: {0}")]
    EmptyGeneList(String),

    #[error("Manifest contains no usable entries: {0}")]
    EmptyManifest(String),

    #[error("Malformed FASTA in {path}: {reason}")]
    FastaParse { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
