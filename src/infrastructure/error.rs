use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a request to the NASA API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build request URL: {0}")]
    InvalidUrl(String),

    /// Transport failure. The URL is stripped so the API key never ends up in logs.
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Request(error.without_url())
    }
}

impl FetchError {
    /// Short category name used in log records
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::Request(_) => "network",
            FetchError::UnexpectedStatus { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_status_and_body() {
        let error = FetchError::UnexpectedStatus {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "OVER_RATE_LIMIT".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("OVER_RATE_LIMIT"));
        assert_eq!(error.kind(), "status");
    }

    #[test]
    fn decode_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: FetchError = source.into();
        assert_eq!(error.kind(), "decode");
    }
}
