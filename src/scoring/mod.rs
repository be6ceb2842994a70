//! Retrieval-augmented essay scoring.
//!
//! [`EssayScorer`] ties the pipeline together: normalize the essay,
//! retrieve similar labeled essays, prompt the model, decode its reply
//! tolerantly, and record score metrics. The reply decoder lives in
//! [`parser`] and never fails; collaborator errors surface as
//! [`ScoringError`].

pub mod error;
pub mod parser;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod parser_tests;

pub use error::ScoringError;
pub use parser::{ParseOutcome, ParsedEvaluation, parse_model_reply};
pub use scorer::EssayScorer;
pub use types::{
    DEFAULT_SCORE, EssayRequest, EvaluationResponse, GENERIC_SUGGESTION, GENERIC_SUGGESTION_KEY,
    NO_FEEDBACK,
};
