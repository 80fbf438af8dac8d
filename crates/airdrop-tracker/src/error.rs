//! Error types for the airdrop tracker.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal preconditions that stop a run before any network activity.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The bearer credential is not present in the environment.
    #[error(
        "{var} environment variable is not set\n  export {var}='your_bearer_token_here'"
    )]
    MissingCredential { var: String },

    /// The protocol registry could not be read.
    #[error("Failed to read protocol registry {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The protocol registry is not valid JSON or lacks a `protocols` list.
    #[error("Failed to parse protocol registry {path}: {source}")]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `--protocol` named an id the registry does not contain.
    #[error("Protocol '{0}' not found in registry")]
    UnknownProtocol(String),
}

/// Errors from a single recent-search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure (DNS, refused connection, reset, timeout).
    #[error("Connection error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 429.
    #[error("HTTP error 429: {body}")]
    RateLimited { body: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// HTTP status code, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Whether the error signals the API's rate limit.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
