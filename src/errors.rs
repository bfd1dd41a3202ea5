use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cases::Case;

/// Error type for loading, filtering and persisting a case document.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("input file {} does not exist", path.display())]
    FileNotFound { path: PathBuf },
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("missing field '{field}' in {context}")]
    MissingField { field: String, context: String },
    #[error("invalid entry {index} in '{}': {reason}", case.key())]
    InvalidEntry {
        case: Case,
        index: usize,
        reason: String,
    },
    #[error("cannot write {}: {source}", path.display())]
    WriteFailure { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, FilterError>;
