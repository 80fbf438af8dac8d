//! The per-run snapshot written to `tweets.json`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Sentiment;
use crate::registry::Protocol;
use crate::twitter::Tweet;

/// Tweets and sentiment gathered for one protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolResult {
    /// Protocol display name.
    pub name: String,
    /// Query sent to the search API.
    pub query: String,
    /// Number of tweets collected.
    pub tweet_count: usize,
    /// Sentiment over `tweets`.
    pub sentiment: Sentiment,
    /// Normalized tweets.
    pub tweets: Vec<Tweet>,
}

impl ProtocolResult {
    /// Build a result from collected tweets, scoring their sentiment.
    #[must_use]
    pub fn new(protocol: &Protocol, query: impl Into<String>, tweets: Vec<Tweet>) -> Self {
        Self {
            name: protocol.name.clone(),
            query: query.into(),
            tweet_count: tweets.len(),
            sentiment: Sentiment::estimate(&tweets),
            tweets,
        }
    }

    /// Result for a protocol whose fetch failed or found nothing.
    #[must_use]
    pub fn empty(protocol: &Protocol, query: impl Into<String>) -> Self {
        Self::new(protocol, query, Vec::new())
    }

    /// Whether any tweets were collected.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.tweet_count > 0
    }
}

/// Aggregated output of one run.
///
/// Rebuilt from scratch every run; never merged with an earlier file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the run started collecting.
    pub fetched_at: DateTime<Utc>,
    /// Number of entries in `protocols`.
    pub protocol_count: usize,
    /// Results keyed by protocol id.
    pub protocols: BTreeMap<String, ProtocolResult>,
}

impl Snapshot {
    /// Create an empty snapshot stamped with `fetched_at`.
    #[must_use]
    pub fn new(fetched_at: DateTime<Utc>) -> Self {
        Self {
            fetched_at,
            protocol_count: 0,
            protocols: BTreeMap::new(),
        }
    }

    /// Record the result for a protocol id, replacing any earlier one.
    pub fn insert(&mut self, id: impl Into<String>, result: ProtocolResult) {
        self.protocols.insert(id.into(), result);
        self.protocol_count = self.protocols.len();
    }

    /// Number of protocols with at least one tweet.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.protocols.values().filter(|r| r.is_success()).count()
    }

    /// Number of protocols with no tweets (failed or empty fetch).
    #[must_use]
    pub fn failed(&self) -> usize {
        self.protocols.len().saturating_sub(self.succeeded())
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        Ok(snapshot)
    }

    /// Save the snapshot as pretty-printed JSON, overwriting `path`.
    ///
    /// The document is serialized in full before the file is touched.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(())
    }
}
