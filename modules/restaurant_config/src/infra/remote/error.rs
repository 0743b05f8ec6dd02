use reqwest::StatusCode;

/// Failures talking to the remote REST and storage endpoints
#[derive(Debug, thiserror::Error)]
pub enum RemoteStoreError {
    #[error("invalid remote URL `{input}`: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("HTTP request failed: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("request failed with HTTP {status} during {operation}: {message}")]
    HttpStatus {
        status: StatusCode,
        operation: &'static str,
        message: String,
    },

    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("unexpected response during {operation}: {reason}")]
    UnexpectedResponse {
        operation: &'static str,
        reason: String,
    },
}
