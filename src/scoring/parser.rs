//! Tolerant decoding of model replies.
//!
//! The model is asked for a single JSON object but is free to prepend
//! commentary, drop fields, or return prose. Parsing is therefore a total
//! function: any input yields a complete [`EvaluationResponse`], with a
//! tagged outcome so callers can tell a clean parse from a degraded one.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::types::{
    DEFAULT_SCORE, EvaluationResponse, GENERIC_SUGGESTION, GENERIC_SUGGESTION_KEY, NO_FEEDBACK,
};

/// How the reply decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The reply contained a decodable JSON object.
    Parsed,
    /// The reply had no usable JSON object; the evaluation is all defaults.
    Degraded {
        /// Why decoding failed.
        reason: String,
    },
}

/// A decoded reply plus its parse outcome.
#[derive(Debug, Clone)]
pub struct ParsedEvaluation {
    pub evaluation: EvaluationResponse,
    pub outcome: ParseOutcome,
}

impl ParsedEvaluation {
    /// Returns `true` if the reply decoded cleanly.
    pub fn is_parsed(&self) -> bool {
        matches!(self.outcome, ParseOutcome::Parsed)
    }
}

/// Decodes a raw model reply into an evaluation. Never fails.
pub fn parse_model_reply(raw: &str) -> ParsedEvaluation {
    match decode_reply(raw) {
        Ok(evaluation) => ParsedEvaluation {
            evaluation,
            outcome: ParseOutcome::Parsed,
        },
        Err(reason) => ParsedEvaluation {
            evaluation: EvaluationResponse::degraded(&reason),
            outcome: ParseOutcome::Degraded { reason },
        },
    }
}

fn decode_reply(raw: &str) -> Result<EvaluationResponse, String> {
    let trimmed = raw.trim();

    // Tolerate commentary before the object ("Sure! Here is the JSON: {...").
    let start = trimmed
        .find('{')
        .ok_or_else(|| "no JSON object in model reply".to_string())?;

    let object: Map<String, Value> =
        serde_json::from_str(&trimmed[start..]).map_err(|e| e.to_string())?;

    Ok(EvaluationResponse {
        task_response: score_field(&object, "taskResponse"),
        coherence_cohesion: score_field(&object, "coherenceCohesion"),
        lexical_resource: score_field(&object, "lexicalResource"),
        grammatical_range_accuracy: score_field(&object, "grammaticalRangeAccuracy"),
        overall_band: score_field(&object, "overallBand"),
        examiner_feedback: feedback_field(&object),
        suggestions: suggestions_field(object.get("suggestions")),
    })
}

/// Reads a numeric field: numbers pass through, other scalars get a decimal
/// parse, anything else falls back to [`DEFAULT_SCORE`].
fn score_field(object: &Map<String, Value>, key: &str) -> f64 {
    match object.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_SCORE),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_SCORE),
        _ => DEFAULT_SCORE,
    }
}

fn feedback_field(object: &Map<String, Value>) -> String {
    match object.get("examinerFeedback") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => NO_FEEDBACK.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Converts the `suggestions` object to string/string entries, skipping
/// nulls. Anything that leaves no entries (absent field, non-object value,
/// all entries filtered) yields the generic fallback, so the map is never
/// empty.
fn suggestions_field(value: Option<&Value>) -> HashMap<String, String> {
    let mut suggestions = HashMap::new();

    if let Some(Value::Object(entries)) = value {
        for (key, entry) in entries {
            match entry {
                Value::Null => {}
                Value::String(s) => {
                    suggestions.insert(key.clone(), s.clone());
                }
                other => {
                    suggestions.insert(key.clone(), other.to_string());
                }
            }
        }
    }

    if suggestions.is_empty() {
        suggestions.insert(
            GENERIC_SUGGESTION_KEY.to_string(),
            GENERIC_SUGGESTION.to_string(),
        );
    }

    suggestions
}
