use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the completion client.
pub enum CompletionError {
    /// The provider call failed (network, auth, quota).
    #[error("completion provider call failed: {message}")]
    Provider {
        /// Error message.
        message: String,
    },

    /// The provider answered without any text content.
    #[error("model returned an empty completion")]
    EmptyCompletion,
}
