//! Error types for the statusboard client

/// Errors that can occur while talking to the status backend
#[derive(Debug, thiserror::Error)]
pub enum StatusboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure, non-2xx response or an undecodable body
    #[error("Network error: {0}")]
    Network(String),

    /// Input rejected by the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx response whose body carried an `error` message
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for statusboard operations
pub type Result<T> = std::result::Result<T, StatusboardError>;
