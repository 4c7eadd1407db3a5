use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for document validation, parsing, and ingestion failures.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{path:?} has wrong format; only '.txt' and '.json' documents are supported")]
    InvalidFormat { path: PathBuf },
    #[error("{path:?} is missing the required \"text\" field")]
    MissingTextField { path: PathBuf },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
