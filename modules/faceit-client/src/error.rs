use thiserror::Error;

pub type Result<T> = std::result::Result<T, FaceitError>;

#[derive(Debug, Error)]
pub enum FaceitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl FaceitError {
    /// True for 4xx responses, the only case the name-qualified lookup retries.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FaceitError::Api { status, .. } if (400..500).contains(status))
    }
}

impl From<reqwest::Error> for FaceitError {
    fn from(err: reqwest::Error) -> Self {
        FaceitError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FaceitError {
    fn from(err: serde_json::Error) -> Self {
        FaceitError::Parse(err.to_string())
    }
}
