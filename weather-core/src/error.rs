use reqwest::StatusCode;
use thiserror::Error;

/// Failure while talking to the weather provider.
///
/// These never reach the chat user as-is: the report layer turns each one
/// into a fixed reply string.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to reach {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no place matches the query")]
    PlaceNotFound,
}

impl ProviderError {
    /// True when the upstream was unreachable, timed out or answered badly.
    pub fn is_upstream_unavailable(&self) -> bool {
        !matches!(self, ProviderError::PlaceNotFound)
    }
}
