use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request to '{url}' failed with status {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Network error for '{url}': {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// The upstream URL the failed call was addressed to, if any.
    pub fn cause(&self) -> Option<&str> {
        match self {
            StoreError::Status { url, .. }
            | StoreError::Network { url, .. }
            | StoreError::Decode { url, .. } => Some(url),
            StoreError::InvalidPath(_) | StoreError::InvalidConfiguration(_) => None,
        }
    }

    pub(crate) fn decode(url: &str, message: impl Into<String>) -> Self {
        StoreError::Decode {
            url: url.to_string(),
            message: message.into(),
        }
    }
}
