use thiserror::Error;

use crate::completion::CompletionError;
use crate::embedding::EmbeddingError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
/// Failures of the scoring pipeline's external collaborators.
///
/// A malformed model reply is deliberately NOT represented here: the parser
/// recovers it into a degraded-but-valid evaluation. Only collaborator
/// failures propagate.
pub enum ScoringError {
    /// Query embedding failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Reference retrieval failed.
    #[error("reference retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The completion call failed.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
}
