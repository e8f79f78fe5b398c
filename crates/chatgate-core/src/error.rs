use thiserror::Error;

/// Top-level error type for chatgate.
#[derive(Debug, Error)]
pub enum ChatgateError {
    /// Error from an inference provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}
