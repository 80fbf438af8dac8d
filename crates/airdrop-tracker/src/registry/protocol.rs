//! Registry file types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// A tracked DEX protocol.
///
/// The registry carries more per-protocol metadata (chains, links, notes)
/// for the dashboard; only the fields the scraper needs are read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Unique id, used as the snapshot key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Search query for the X API.
    #[serde(
        rename = "xSearchQuery",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub x_search_query: Option<String>,
    /// Whether the protocol has already issued a token.
    #[serde(rename = "hasToken", default, skip_serializing_if = "Option::is_none")]
    pub has_token: Option<bool>,
}

impl Protocol {
    /// Create a protocol with no configured query and no token flag.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x_search_query: None,
            has_token: None,
        }
    }

    /// Set the configured search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.x_search_query = Some(query.into());
        self
    }

    /// Set the token-issued flag.
    #[must_use]
    pub fn with_token(mut self, has_token: bool) -> Self {
        self.has_token = Some(has_token);
        self
    }

    /// The query to send: the configured one, or `"{name} airdrop"`.
    #[must_use]
    pub fn search_query(&self) -> String {
        match self.x_search_query.as_deref() {
            Some(query) if !query.trim().is_empty() => query.to_string(),
            _ => format!("{} airdrop", self.name),
        }
    }

    /// Missing or null `hasToken` counts as no token.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.has_token.unwrap_or(false)
    }
}

/// Contents of `protocols.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Tracked protocols in file order.
    pub protocols: Vec<Protocol>,
}

impl Registry {
    /// Load the registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| TrackerError::RegistryRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content).map_err(|source| TrackerError::RegistryParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse registry JSON.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
