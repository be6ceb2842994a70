//! Scoring prompt construction.
//!
//! The rendered text is a wire contract: the closing schema names the exact
//! JSON fields the response parser reads back. Changing field names here
//! without changing the parser breaks scoring silently, so the whole
//! template lives in one place and is tested on its own.


use std::fmt::Write;

use crate::retrieval::ReferenceExcerpt;

/// Everything the scoring prompt embeds.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    /// The task question, verbatim.
    pub question: &'a str,
    /// The cleaned essay text.
    pub essay: &'a str,
    /// Retrieved reference essays; the reference section is omitted
    /// entirely when empty.
    pub references: &'a [ReferenceExcerpt],
}

const PREAMBLE: &str =
    "You are an experienced IELTS examiner. Evaluate this essay based on IELTS Writing Task 2 criteria.";

const RUBRIC: &str = r"Scoring Criteria:
1. Task Response (TR): Address all parts, develop position, support ideas
2. Coherence & Cohesion (CC): Logical organization, paragraphing, linking devices
3. Lexical Resource (LR): Vocabulary range, accuracy, collocations
4. Grammatical Range & Accuracy (GRA): Sentence structures, grammar, punctuation";

const SCHEMA_INSTRUCTION: &str = r#"Provide evaluation in this exact JSON format:
{
  "taskResponse": [score 1-9],
  "coherenceCohesion": [score 1-9],
  "lexicalResource": [score 1-9],
  "grammaticalRangeAccuracy": [score 1-9],
  "overallBand": [score 1-9],
  "examinerFeedback": "[detailed feedback]",
  "suggestions": {
    "taskResponse": "[specific suggestions]",
    "coherenceCohesion": "[specific suggestions]",
    "lexicalResource": "[specific suggestions]",
    "grammaticalRangeAccuracy": "[specific suggestions]"
  }
}"#;

impl ScoringContext<'_> {
    /// Renders the examiner prompt. Deterministic for a given context.
    pub fn render(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(PREAMBLE);
        prompt.push_str("\n\n");

        let _ = writeln!(prompt, "Question: {}\n", self.question);
        let _ = writeln!(prompt, "Essay to evaluate:\n{}\n", self.essay);

        prompt.push_str(RUBRIC);
        prompt.push_str("\n\n");

        if !self.references.is_empty() {
            prompt.push_str("Example Essays for Reference:\n");
            for excerpt in self.references {
                let _ = writeln!(
                    prompt,
                    "--- Band {} example ---\n{}\n",
                    excerpt.band, excerpt.text
                );
            }
        }

        prompt.push_str(SCHEMA_INSTRUCTION);
        prompt
    }
}
