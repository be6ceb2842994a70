//! In-process evaluation metrics.
//!
//! Approximate running metrics, not an audit log: nothing here is
//! persisted, and a process restart starts the counts over.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use parking_lot::Mutex;

/// Per-band/per-criterion score observations.
///
/// The two maps must stay consistent with each other (a band count without
/// its score observations would be a lie), so every mutation happens under
/// a single lock acquisition. Share via `Arc` and inject where needed.
#[derive(Debug, Default)]
pub struct EvaluationMetrics {
    inner: Mutex<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    score_distributions: HashMap<String, Vec<f64>>,
    band_counts: HashMap<String, u64>,
}

impl EvaluationMetrics {
    /// Creates an empty metrics store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one score observation for `criterion` under `band`.
    pub fn track_evaluation(&self, band: &str, criterion: &str, score: f64) {
        let mut inner = self.inner.lock();

        inner
            .score_distributions
            .entry(format!("{band}-{criterion}"))
            .or_default()
            .push(score);
        *inner.band_counts.entry(band.to_string()).or_insert(0) += 1;
    }

    /// Returns the arithmetic mean per `"band-criterion"` key.
    pub fn average_scores_by_band(&self) -> HashMap<String, f64> {
        let inner = self.inner.lock();

        inner
            .score_distributions
            .iter()
            .map(|(key, scores)| {
                let mean = if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<f64>() / scores.len() as f64
                };
                (key.clone(), mean)
            })
            .collect()
    }

    /// Returns a copy of the per-band observation counts.
    pub fn band_distribution(&self) -> HashMap<String, u64> {
        self.inner.lock().band_counts.clone()
    }

    /// Clears both maps, atomically with respect to [`Self::track_evaluation`].
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.score_distributions.clear();
        inner.band_counts.clear();
    }
}
