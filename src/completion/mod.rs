//! Chat completion client.
//!
//! One prompt in, one raw text completion out. Provider routing (Mistral,
//! OpenAI, ...) is the `genai` client's job; the model name in config
//! decides where the request goes. Exactly one attempt per call, no
//! retries.

pub mod error;

pub use error::CompletionError;

use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error};

enum CompletionBackend {
    Genai { client: Client, model: String },
    Mock { reply: String },
}

/// Client for the scoring model.
pub struct CompletionClient {
    backend: CompletionBackend,
}

/// Canned reply used by the mock backend: a schema-valid evaluation so the
/// mock stack exercises the happy parse path end to end.
pub const MOCK_EVALUATION_REPLY: &str = r#"{
  "taskResponse": 6,
  "coherenceCohesion": 7,
  "lexicalResource": 6,
  "grammaticalRangeAccuracy": 6,
  "overallBand": 6,
  "examinerFeedback": "A solid response with room to develop ideas further.",
  "suggestions": {
    "taskResponse": "Support each main idea with a concrete example.",
    "coherenceCohesion": "Use a wider range of linking devices.",
    "lexicalResource": "Replace repeated common words with precise alternatives.",
    "grammaticalRangeAccuracy": "Check article usage in complex sentences."
  }
}"#;

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            CompletionBackend::Genai { model, .. } => {
                f.debug_struct("CompletionClient").field("model", model).finish()
            }
            CompletionBackend::Mock { .. } => {
                f.debug_struct("CompletionClient").field("mock", &true).finish()
            }
        }
    }
}

impl CompletionClient {
    /// Creates a provider-backed client for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            backend: CompletionBackend::Genai {
                client: Client::default(),
                model: model.into(),
            },
        }
    }

    /// Creates a mock client returning [`MOCK_EVALUATION_REPLY`].
    pub fn mock() -> Self {
        Self::mock_with_reply(MOCK_EVALUATION_REPLY)
    }

    /// Creates a mock client returning a fixed reply.
    pub fn mock_with_reply(reply: impl Into<String>) -> Self {
        Self {
            backend: CompletionBackend::Mock {
                reply: reply.into(),
            },
        }
    }

    /// Returns `true` if backed by the mock.
    pub fn is_mock(&self) -> bool {
        matches!(self.backend, CompletionBackend::Mock { .. })
    }

    /// Sends `prompt` as a single user message and returns the completion
    /// text.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        match &self.backend {
            CompletionBackend::Genai { client, model } => {
                debug!(model, prompt_len = prompt.len(), "requesting completion");

                let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

                let response =
                    client
                        .exec_chat(model, request, None)
                        .await
                        .map_err(|e| {
                            error!(model, error = %e, "completion provider call failed");
                            CompletionError::Provider {
                                message: e.to_string(),
                            }
                        })?;

                let text = response
                    .first_text()
                    .map(str::to_string)
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(CompletionError::EmptyCompletion)?;

                Ok(text)
            }
            CompletionBackend::Mock { reply } => Ok(reply.clone()),
        }
    }
}
