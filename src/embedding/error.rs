use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding client.
pub enum EmbeddingError {
    /// The HTTP request itself failed (connect, DNS, timeout).
    #[error("embedding request failed: {message}")]
    RequestFailed {
        /// Error message.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("embedding provider rejected the request (status {status}): {message}")]
    ProviderRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, if readable.
        message: String,
    },

    /// The response body did not match the embeddings schema.
    #[error("malformed embedding response: {message}")]
    MalformedResponse {
        /// Error message.
        message: String,
    },

    /// The embedding had an unexpected dimension.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
