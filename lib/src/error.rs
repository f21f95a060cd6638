/// Custom error type for the tiosa library
///
/// Domain variants (`NotFound`, `BadRequest`, `Conflict`) carry the short,
/// machine-checkable reason that the HTTP API puts in its `error` field.
#[derive(Debug, thiserror::Error)]
pub enum TiosaError {
    /// I/O errors (data file, config file, export files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors (API client, metadata providers)
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid field in a request
    #[error("{0}")]
    BadRequest(String),

    /// Entity already exists
    #[error("{0}")]
    Conflict(String),

    /// Operation needs admin mode on the client
    #[error("Admin mode required")]
    AdminRequired,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using TiosaError
pub type Result<T> = std::result::Result<T, TiosaError>;

impl From<String> for TiosaError {
    fn from(s: String) -> Self {
        TiosaError::Other(s)
    }
}

impl From<&str> for TiosaError {
    fn from(s: &str) -> Self {
        TiosaError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for TiosaError {
    fn from(err: serde_yaml::Error) -> Self {
        TiosaError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for TiosaError {
    fn from(err: serde_json::Error) -> Self {
        TiosaError::Json(err.to_string())
    }
}

impl From<tl::ParseError> for TiosaError {
    fn from(err: tl::ParseError) -> Self {
        TiosaError::HtmlParse(err.to_string())
    }
}
