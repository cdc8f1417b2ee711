//! Error types for the note summarizer

/// Errors surfaced while generating a summary. The display text of the
/// request-related variants is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure or an unreadable response; the detail is only logged
    #[error("Failed to connect to server. Ensure backend is running.")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for summarizer operations
pub type Result<T> = std::result::Result<T, SummarizerError>;
