use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback value for any score field the model omitted or mangled.
pub const DEFAULT_SCORE: f64 = 5.0;

/// Feedback substituted when the model reply carries none.
pub const NO_FEEDBACK: &str = "No feedback provided";

/// Suggestion entry substituted when the reply carries no usable suggestions.
pub const GENERIC_SUGGESTION: &str = "Please check your essay format and try again.";

/// Key for the fallback suggestion entry.
pub const GENERIC_SUGGESTION_KEY: &str = "general";

/// An essay submitted for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayRequest {
    /// The Task 2 question the essay answers.
    pub question: String,
    /// The essay text, as written.
    pub essay: String,
}

/// A complete Task 2 evaluation.
///
/// Every field is populated even when the model reply could not be parsed;
/// `suggestions` is never empty (the parser substitutes a generic entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub task_response: f64,
    pub coherence_cohesion: f64,
    pub lexical_resource: f64,
    pub grammatical_range_accuracy: f64,
    pub overall_band: f64,
    pub examiner_feedback: String,
    pub suggestions: HashMap<String, String>,
}

impl EvaluationResponse {
    /// Builds the all-defaults evaluation returned when the model reply
    /// could not be decoded at all.
    pub fn degraded(reason: &str) -> Self {
        Self {
            task_response: DEFAULT_SCORE,
            coherence_cohesion: DEFAULT_SCORE,
            lexical_resource: DEFAULT_SCORE,
            grammatical_range_accuracy: DEFAULT_SCORE,
            overall_band: DEFAULT_SCORE,
            examiner_feedback: format!("Could not evaluate properly. {reason}"),
            suggestions: HashMap::from([(
                GENERIC_SUGGESTION_KEY.to_string(),
                GENERIC_SUGGESTION.to_string(),
            )]),
        }
    }
}
