use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Failure kinds shared by the chat and prediction pipelines.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream error: {reason}")]
    UpstreamError { status: Option<u16>, reason: String },

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        AppError::InvalidRequest(reason.into())
    }

    pub fn upstream_status(status: u16) -> Self {
        AppError::UpstreamError {
            status: Some(status),
            reason: format!("status {}", status),
        }
    }

    pub fn upstream_shape(reason: impl Into<String>) -> Self {
        AppError::UpstreamError {
            status: None,
            reason: reason.into(),
        }
    }

    /// Whether a caller may resend the same request after a backoff.
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamError { .. } | AppError::UpstreamUnreachable(_)
        )
    }

    /// Classifies a transport failure from an outbound call.
    pub fn from_transport(service: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamUnreachable(format!("{} timed out", service))
        } else if err.is_connect() || err.is_request() {
            AppError::UpstreamUnreachable(format!("{} unreachable", service))
        } else if err.is_decode() {
            AppError::InternalError(format!("{} returned an unreadable body", service))
        } else {
            AppError::InternalError(format!("{} request failed", service))
        }
    }
}
