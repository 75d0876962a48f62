use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Raised by the fetch helper for any non-2xx status. Status and body are not kept.
    #[error("request failed")]
    RequestUnsuccessful,
}

impl ApiError {
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ApiError::RequestFailed(err) if err.is_timeout() || err.is_connect() => {
                Some("Check your network connection or try again later")
            }
            ApiError::InvalidUrl(_) => Some("Base URLs must be absolute, e.g. https://api.github.com"),
            ApiError::InvalidHeader { .. } => {
                Some("Tokens, API versions and user agents must be visible ASCII")
            }
            ApiError::JsonError(_) => Some("The endpoint did not return a JSON document"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
