//! Error types for raigate

/// Result type alias using raigate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for raigate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors (missing credentials, malformed pipeline file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Content classification errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Search collaborator errors
    #[error("search error: {0}")]
    Search(String),

    /// Generation collaborator errors
    #[error("generation error: {0}")]
    Generation(String),

    /// Connection-level failures talking to a hosted service
    #[error("transport error: {0}")]
    Transport(String),

    /// A hosted service answered with a non-success status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },

    /// A hosted service answered with a body we could not interpret
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new search error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }

    /// Create a new generation error
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new non-success status error
    pub fn status(service: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            service: service.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a new invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
