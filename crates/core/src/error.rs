//! Error types for the content pipeline.

/// Raised when no JSON value could be recovered from a model response.
///
/// This is a recoverable signal: the orchestrator treats it as an invalid attempt and
/// retries rather than failing the whole generation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is empty")]
    Empty,

    #[error("no JSON object or array found in response ({0} bytes analysed)")]
    NoJsonFound(usize),

    #[error("all extraction strategies failed: {0}")]
    Malformed(String),
}

/// Failure of the external text-generation capability.
///
/// Kept distinct from bad output so callers can tell "model unreachable" apart from
/// "model produced unusable data".
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    #[error("generation request rejected: {0}")]
    Rejected(String),

    #[error("scripted generator has no responses left")]
    Exhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("canonical document mismatch: {0}")]
    Canonical(String),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
