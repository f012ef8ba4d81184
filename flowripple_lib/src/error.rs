//! Error types for the Flowripple capture client.

use thiserror::Error;

/// Why a single capture request did not complete.
///
/// This is the mode-free failure produced by signing and sending; callers of
/// [`Client::capture`](crate::Client::capture) only ever see it wrapped in a
/// [`CaptureError`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Network or protocol failure reported by the transport.
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Request failed with status code {0}")]
    Status(u16),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Status(status.as_u16()),
            None => Error::Transport(err.to_string()),
        }
    }
}

/// Returned by `capture` when a request fails and silent mode is off.
#[derive(Error, Debug)]
#[error("Failed to capture event: {reason}")]
pub struct CaptureError {
    reason: String,
    #[source]
    source: Option<Error>,
}

impl CaptureError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    /// The underlying failure message, without the `Failed to capture event` prefix.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// HTTP status of the rejected request, if the endpoint answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self.source {
            Some(Error::Status(code)) => Some(code),
            _ => None,
        }
    }
}

impl From<Error> for CaptureError {
    fn from(err: Error) -> Self {
        Self {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}

/// Raised when client settings cannot be resolved from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(
        "API key not found. Set FLOWRIPPLE_API_KEY, FLOWRIPPLE_OP_ENTRY_PATH (1Password) \
         or FLOWRIPPLE_BW_ITEM_ID (Bitwarden)."
    )]
    ApiKeyNotFound,
}
