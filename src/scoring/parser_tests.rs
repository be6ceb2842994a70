use std::collections::HashMap;

use super::parser::{ParseOutcome, parse_model_reply};
use super::types::{DEFAULT_SCORE, GENERIC_SUGGESTION, NO_FEEDBACK};

#[test]
fn test_parse_reply_with_leading_commentary() {
    let raw = "Sure! {\"taskResponse\":7,\"coherenceCohesion\":6,\"lexicalResource\":6,\
               \"grammaticalRangeAccuracy\":5,\"overallBand\":6,\
               \"examinerFeedback\":\"Good structure\",\
               \"suggestions\":{\"taskResponse\":\"Add more examples\"}}";

    let parsed = parse_model_reply(raw);
    assert!(parsed.is_parsed());

    let evaluation = parsed.evaluation;
    assert_eq!(evaluation.task_response, 7.0);
    assert_eq!(evaluation.coherence_cohesion, 6.0);
    assert_eq!(evaluation.lexical_resource, 6.0);
    assert_eq!(evaluation.grammatical_range_accuracy, 5.0);
    assert_eq!(evaluation.overall_band, 6.0);
    assert_eq!(evaluation.examiner_feedback, "Good structure");
    assert_eq!(
        evaluation.suggestions,
        HashMap::from([("taskResponse".to_string(), "Add more examples".to_string())])
    );
}

#[test]
fn test_parse_prose_reply_degrades_to_defaults() {
    let parsed = parse_model_reply("not json at all");

    assert!(matches!(parsed.outcome, ParseOutcome::Degraded { .. }));

    let evaluation = parsed.evaluation;
    assert_eq!(evaluation.task_response, DEFAULT_SCORE);
    assert_eq!(evaluation.coherence_cohesion, DEFAULT_SCORE);
    assert_eq!(evaluation.lexical_resource, DEFAULT_SCORE);
    assert_eq!(evaluation.grammatical_range_accuracy, DEFAULT_SCORE);
    assert_eq!(evaluation.overall_band, DEFAULT_SCORE);
    assert!(evaluation.examiner_feedback.starts_with("Could not evaluate properly."));
    assert_eq!(
        evaluation.suggestions,
        HashMap::from([("general".to_string(), GENERIC_SUGGESTION.to_string())])
    );
}

#[test]
fn test_parse_never_panics_on_hostile_input() {
    for raw in [
        "",
        "   ",
        "{",
        "{\"taskResponse\":",
        "[1, 2, 3]",
        "null",
        "prefix { \"overallBand\": } suffix",
        "{}",
    ] {
        let parsed = parse_model_reply(raw);
        assert!(!parsed.evaluation.suggestions.is_empty(), "input {raw:?}");
    }
}

#[test]
fn test_numeric_fields_parse_from_strings() {
    let parsed = parse_model_reply("{\"taskResponse\":\"6.5\",\"overallBand\":\" 7 \"}");

    assert!(parsed.is_parsed());
    assert_eq!(parsed.evaluation.task_response, 6.5);
    assert_eq!(parsed.evaluation.overall_band, 7.0);
    // Missing fields fall back.
    assert_eq!(parsed.evaluation.lexical_resource, DEFAULT_SCORE);
}

#[test]
fn test_non_numeric_scalars_fall_back() {
    let parsed = parse_model_reply(
        "{\"taskResponse\":\"strong\",\"coherenceCohesion\":true,\"lexicalResource\":[6]}",
    );

    assert!(parsed.is_parsed());
    assert_eq!(parsed.evaluation.task_response, DEFAULT_SCORE);
    assert_eq!(parsed.evaluation.coherence_cohesion, DEFAULT_SCORE);
    assert_eq!(parsed.evaluation.lexical_resource, DEFAULT_SCORE);
}

#[test]
fn test_missing_feedback_substituted() {
    let parsed = parse_model_reply("{\"overallBand\":6}");
    assert_eq!(parsed.evaluation.examiner_feedback, NO_FEEDBACK);

    let parsed = parse_model_reply("{\"examinerFeedback\":null}");
    assert_eq!(parsed.evaluation.examiner_feedback, NO_FEEDBACK);
}

#[test]
fn test_suggestions_null_entries_are_filtered() {
    let parsed = parse_model_reply(
        "{\"suggestions\":{\"taskResponse\":null,\"lexicalResource\":\"Vary word choice\"}}",
    );

    assert_eq!(
        parsed.evaluation.suggestions,
        HashMap::from([("lexicalResource".to_string(), "Vary word choice".to_string())])
    );
}

#[test]
fn test_suggestions_empty_after_filtering_get_generic_entry() {
    for raw in [
        "{\"suggestions\":{}}",
        "{\"suggestions\":{\"taskResponse\":null}}",
        "{\"suggestions\":\"be better\"}",
        "{\"overallBand\":6}",
    ] {
        let parsed = parse_model_reply(raw);
        assert_eq!(
            parsed.evaluation.suggestions,
            HashMap::from([("general".to_string(), GENERIC_SUGGESTION.to_string())]),
            "input {raw:?}"
        );
    }
}

#[test]
fn test_non_string_suggestion_values_stringified() {
    let parsed = parse_model_reply("{\"suggestions\":{\"taskResponse\":7}}");
    assert_eq!(
        parsed.evaluation.suggestions,
        HashMap::from([("taskResponse".to_string(), "7".to_string())])
    );
}
