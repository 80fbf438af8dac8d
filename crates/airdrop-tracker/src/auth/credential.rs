//! Bearer credential for the X API.

use std::fmt;

use crate::error::TrackerError;

/// Environment variable holding the X API bearer token.
pub const BEARER_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token obtained elsewhere.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Load the credential from `TWITTER_BEARER_TOKEN`.
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::from_var(BEARER_TOKEN_VAR)
    }

    /// Load the credential from the named environment variable.
    ///
    /// An empty or whitespace-only value counts as unset.
    pub fn from_var(var: &str) -> Result<Self, TrackerError> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self(token)),
            _ => Err(TrackerError::MissingCredential {
                var: var.to_string(),
            }),
        }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// The raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
