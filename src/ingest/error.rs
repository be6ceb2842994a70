use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
/// Errors that abort an ingestion run.
///
/// Per-row data problems never appear here; those rows are skipped and
/// counted.
pub enum IngestError {
    /// The dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    DatasetRead(#[from] std::io::Error),

    /// Every row was rejected.
    #[error(
        "no valid documents processed (CSV format mismatch, all entries filtered, or header-only file)"
    )]
    NoValidRows,

    /// Embedding a document failed.
    #[error("embedding failed during ingestion: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The index rejected an operation.
    #[error("vector index update failed: {0}")]
    Index(#[from] RetrievalError),

    /// The snapshot could not be persisted. Fatal to the run.
    #[error("failed to persist ingest snapshot to '{path}': {message}")]
    SnapshotFailed {
        /// Snapshot path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
