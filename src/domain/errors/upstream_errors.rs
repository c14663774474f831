use thiserror::Error;

/// Errors talking to the upstream export engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Upstream export service unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Invalid export job id: {0}")]
    InvalidJobId(String),
}

/// Result type for upstream calls
pub type UpstreamResult<T> = Result<T, UpstreamError>;
