pub mod config;
pub mod fetch;
pub mod github;

use anyhow::anyhow;
use ghrest_api::error::ApiError;

/// Converts a client error into an `anyhow` error, appending the hint when one exists.
pub fn api_error(err: ApiError) -> anyhow::Error {
    match err.suggestion().map(str::to_string) {
        Some(hint) => anyhow!("{err}\nhint: {hint}"),
        None => anyhow::Error::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_appends_hint() {
        let err = api_error(ApiError::InvalidHeader {
            name: "User-Agent".to_string(),
        });
        let message = err.to_string();
        assert!(message.starts_with("Invalid header value for User-Agent"));
        assert!(message.contains("hint: "));
    }

    #[test]
    fn test_api_error_without_hint() {
        let err = api_error(ApiError::RequestUnsuccessful);
        assert_eq!(err.to_string(), "request failed");
    }
}
