//! Bandscore library crate (used by the server and integration tests).
//!
//! Retrieval-augmented scoring for IELTS Writing Task 2 essays. A scoring
//! request flows through one pipeline: normalize the essay, retrieve
//! similar labeled essays from the index, render the examiner prompt, call
//! the chat model, decode its reply tolerantly, and record score metrics.
//!
//! # Module map
//!
//! - [`preprocess`] - essay text normalization
//! - [`prompt`] - the examiner prompt template
//! - [`scoring`] - the pipeline, its reply parser, and wire types
//! - [`metrics`] - in-process score metrics
//! - [`embedding`] - hosted/stub embedding client
//! - [`retrieval`] - Qdrant essay index (trait, client, mock)
//! - [`completion`] - chat completion client
//! - [`gateway`] - Axum routes and handlers
//! - [`ingest`] - CSV dataset ingestion
//! - [`config`] - `BANDSCORE_*` environment configuration

pub mod completion;
pub mod config;
pub mod embedding;
pub mod gateway;
pub mod ingest;
pub mod metrics;
pub mod preprocess;
pub mod prompt;
pub mod retrieval;
pub mod scoring;

pub use completion::{CompletionClient, CompletionError, MOCK_EVALUATION_REPLY};
pub use config::{Config, ConfigError};
pub use embedding::{DEFAULT_EMBEDDING_DIM, EmbeddingError, EssayEmbedder};
pub use gateway::{HandlerState, create_router_with_state};
pub use ingest::{
    DEFAULT_SNAPSHOT_FILENAME, DatasetIngestor, IngestConfig, IngestError, IngestSummary,
};
pub use metrics::EvaluationMetrics;
pub use prompt::ScoringContext;
pub use retrieval::{
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, ESSAY_COLLECTION_NAME, EssayDocument, EssayIndex,
    EssayPoint, QdrantEssayIndex, ReferenceExcerpt, RetrievalError, RetrievedEssay,
    WriteConsistency,
};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockEssayIndex;
pub use scoring::{
    EssayRequest, EssayScorer, EvaluationResponse, ParseOutcome, ParsedEvaluation, ScoringError,
    parse_model_reply,
};
