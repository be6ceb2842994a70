//! Query and document embeddings.
//!
//! Embeddings come from a hosted OpenAI-compatible `/v1/embeddings`
//! endpoint. Without an API key the embedder runs in stub mode: a
//! deterministic seeded vector per input, good enough for tests and local
//! runs against a mock index but meaningless for real retrieval.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::EmbeddingError;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output dimension of `mistral-embed`, the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;

enum EmbedderBackend {
    Remote {
        http: reqwest::Client,
        endpoint: String,
        model: String,
        api_key: String,
    },
    Stub,
}

/// Embedding generator (supports stub mode).
pub struct EssayEmbedder {
    backend: EmbedderBackend,
    embedding_dim: usize,
}

impl std::fmt::Debug for EssayEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EssayEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Remote { endpoint, model, .. } => {
                        format!("Remote({endpoint}, {model})")
                    }
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim)
            .finish()
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingsItem>,
}

#[derive(Deserialize)]
struct EmbeddingsItem {
    embedding: Vec<f32>,
}

impl EssayEmbedder {
    /// Creates a remote embedder against an OpenAI-compatible endpoint.
    pub fn remote(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            backend: EmbedderBackend::Remote {
                http: reqwest::Client::new(),
                endpoint: endpoint.into(),
                model: model.into(),
                api_key: api_key.into(),
            },
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }

    /// Creates a stub embedder with the default dimension.
    pub fn stub() -> Self {
        Self::stub_with_dim(DEFAULT_EMBEDDING_DIM)
    }

    /// Creates a stub embedder with an explicit dimension (tests use small
    /// dimensions).
    pub fn stub_with_dim(embedding_dim: usize) -> Self {
        Self {
            backend: EmbedderBackend::Stub,
            embedding_dim,
        }
    }

    /// Generates a normalized embedding for a single string.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Remote {
                http,
                endpoint,
                model,
                api_key,
            } => self.embed_remote(text, http, endpoint, model, api_key).await,
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    async fn embed_remote(
        &self,
        text: &str,
        http: &reqwest::Client,
        endpoint: &str,
        model: &str,
        api_key: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), model, "requesting embedding");

        let request = EmbeddingsRequest {
            model,
            input: [text],
        };

        let response = http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ProviderRejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingsResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    message: e.to_string(),
                })?;

        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                message: "response carried no embedding data".to_string(),
            })?;

        if embedding.len() != self.embedding_dim {
            return Err(EmbeddingError::InvalidDimension {
                expected: self.embedding_dim,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.embedding_dim);
        let mut state = seed;

        for _ in 0..self.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(&mut embedding);
        embedding
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}

fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in embedding {
            *x /= norm;
        }
    }
}
