//! Qdrant-backed reference essay index.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{EssayIndex, QdrantEssayIndex};
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEssayIndex, cosine_similarity};
pub use model::{EssayDocument, EssayPoint, ReferenceExcerpt, RetrievedEssay, essay_point_id};

/// Collection holding the ingested Task 2 essays.
pub const ESSAY_COLLECTION_NAME: &str = "task2_essays";

/// References retrieved per scoring request unless configured otherwise.
pub const DEFAULT_TOP_K: u64 = 5;

/// Minimum similarity for a reference to be used.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteConsistency {
    /// Wait for the operation to be fully indexed and searchable.
    /// Slow, but ensures read-after-write consistency.
    /// Maps to `wait=true`.
    Strong,
    /// Return immediately after the server acknowledges receipt.
    /// Fast, but data may not be searchable immediately.
    /// Maps to `wait=false`.
    Eventual,
}

impl From<WriteConsistency> for bool {
    fn from(c: WriteConsistency) -> bool {
        matches!(c, WriteConsistency::Strong)
    }
}
