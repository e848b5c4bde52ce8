use thiserror::Error;

/// Client operation errors.
///
/// The UI collapses every request failure into one generic notice per
/// action; the structured variants exist for logs and tests.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::Configuration(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::Authentication(message.into())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
