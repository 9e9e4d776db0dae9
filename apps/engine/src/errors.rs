use thiserror::Error;

use crate::providers::ProviderError;

/// Top-level error type for the evaluation engine.
///
/// Parse failures never appear here: the response parser always degrades to
/// a best-effort `Evaluation` instead of erroring, so callers only see hard
/// failures (bad configuration, unavailable backend) on this channel.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing credential, unsupported provider name, or invalid stage.
    /// Raised before any network call is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure, timeout, or non-success status from a model backend.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Stage 2 (post-interview synthesis) is a recognized stage that is not
    /// built yet; callers branch on this instead of a generic error.
    #[error("Stage {0} evaluation not yet implemented")]
    StageNotImplemented(u8),
}
