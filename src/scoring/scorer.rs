use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::completion::CompletionClient;
use crate::embedding::EssayEmbedder;
use crate::metrics::EvaluationMetrics;
use crate::preprocess;
use crate::prompt::ScoringContext;
use crate::retrieval::{
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, EssayIndex, ReferenceExcerpt, RetrievedEssay,
};

use super::error::ScoringError;
use super::parser::{ParseOutcome, parse_model_reply};
use super::types::{EssayRequest, EvaluationResponse};

/// The retrieval-augmented scoring pipeline.
///
/// One call per essay: clean, retrieve references, prompt the model, parse
/// its reply, record metrics. Collaborator failures propagate; a malformed
/// model reply does not (the parser degrades it to defaults).
pub struct EssayScorer<R: EssayIndex> {
    index: Arc<R>,
    embedder: Arc<EssayEmbedder>,
    completions: CompletionClient,
    metrics: Arc<EvaluationMetrics>,
    collection: String,
    top_k: u64,
    similarity_threshold: f32,
}

impl<R: EssayIndex> std::fmt::Debug for EssayScorer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EssayScorer")
            .field("collection", &self.collection)
            .field("top_k", &self.top_k)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}

impl<R: EssayIndex> EssayScorer<R> {
    /// Creates a scorer with the default retrieval limits.
    pub fn new(
        index: Arc<R>,
        embedder: Arc<EssayEmbedder>,
        completions: CompletionClient,
        metrics: Arc<EvaluationMetrics>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            index,
            embedder,
            completions,
            metrics,
            collection: collection.into(),
            top_k: DEFAULT_TOP_K,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Overrides how many references are retrieved and the minimum
    /// similarity they must reach.
    pub fn with_retrieval_limits(mut self, top_k: u64, similarity_threshold: f32) -> Self {
        self.top_k = top_k;
        self.similarity_threshold = similarity_threshold;
        self
    }

    /// Returns the shared metrics store.
    pub fn metrics(&self) -> &Arc<EvaluationMetrics> {
        &self.metrics
    }

    /// Scores one essay.
    pub async fn score_essay(
        &self,
        request: &EssayRequest,
    ) -> Result<EvaluationResponse, ScoringError> {
        let cleaned = preprocess::clean_essay(&request.essay);
        let query = format!("{}\n{}", request.question, cleaned);

        let query_vector = self.embedder.embed(&query).await?;

        let hits = self
            .index
            .search(
                &self.collection,
                query_vector,
                self.top_k,
                self.similarity_threshold,
            )
            .await?;
        info!(count = hits.len(), "retrieved reference essays");

        let references: Vec<ReferenceExcerpt> =
            hits.into_iter().map(RetrievedEssay::into_excerpt).collect();

        let prompt = ScoringContext {
            question: &request.question,
            essay: &cleaned,
            references: &references,
        }
        .render();
        debug!(prompt_len = prompt.len(), "composed scoring prompt");

        let raw_reply = self.completions.complete(&prompt).await?;

        let parsed = parse_model_reply(&raw_reply);
        if let ParseOutcome::Degraded { reason } = &parsed.outcome {
            warn!(%reason, "model reply did not match the evaluation schema, returning defaults");
        }

        self.track(&parsed.evaluation);
        Ok(parsed.evaluation)
    }

    /// Records each criterion score against the response's overall band.
    fn track(&self, evaluation: &EvaluationResponse) {
        let band = evaluation.overall_band.to_string();

        for (criterion, score) in [
            ("taskResponse", evaluation.task_response),
            ("coherenceCohesion", evaluation.coherence_cohesion),
            ("lexicalResource", evaluation.lexical_resource),
            ("grammaticalRangeAccuracy", evaluation.grammatical_range_accuracy),
        ] {
            self.metrics.track_evaluation(&band, criterion, score);
        }
    }
}
