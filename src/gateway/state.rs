use std::sync::Arc;

use crate::metrics::EvaluationMetrics;
use crate::retrieval::EssayIndex;
use crate::scoring::EssayScorer;

/// Shared handler state: the scorer and the metrics store it feeds.
pub struct HandlerState<R: EssayIndex + 'static> {
    pub scorer: Arc<EssayScorer<R>>,
    pub metrics: Arc<EvaluationMetrics>,
}

impl<R: EssayIndex + 'static> HandlerState<R> {
    pub fn new(scorer: Arc<EssayScorer<R>>, metrics: Arc<EvaluationMetrics>) -> Self {
        Self { scorer, metrics }
    }
}

// Manual impl: `R` itself need not be `Clone`, the state only clones `Arc`s.
impl<R: EssayIndex + 'static> Clone for HandlerState<R> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            metrics: Arc::clone(&self.metrics),
        }
    }
}
