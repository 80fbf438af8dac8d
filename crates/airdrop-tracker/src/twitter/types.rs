//! Twitter data types.

use serde::{Deserialize, Serialize};

/// Body of a `GET /2/tweets/search/recent` response.
///
/// The API omits `data` entirely when nothing matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching tweets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawTweet>>,
    /// Expanded objects referenced by the tweets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<Includes>,
    /// Paging metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SearchMeta>,
}

impl SearchResponse {
    /// Tweets in the response, empty if none.
    #[must_use]
    pub fn tweets(&self) -> &[RawTweet] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Users expanded via `expansions=author_id`, empty if none.
    #[must_use]
    pub fn users(&self) -> &[RawUser] {
        self.includes
            .as_ref()
            .and_then(|i| i.users.as_deref())
            .unwrap_or_default()
    }

    /// Whether the response carries at least one tweet.
    #[must_use]
    pub fn has_tweets(&self) -> bool {
        !self.tweets().is_empty()
    }
}

/// The `includes` side table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<RawUser>>,
}

/// The `meta` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub result_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// A tweet as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTweet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub public_metrics: Option<RawPublicMetrics>,
}

/// `public_metrics` of a tweet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPublicMetrics {
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub impression_count: Option<u64>,
}

/// A user from `includes.users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub public_metrics: Option<RawUserMetrics>,
}

/// `public_metrics` of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUserMetrics {
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// A tweet normalized for the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet ID.
    pub id: Option<String>,
    /// Tweet text content.
    pub text: Option<String>,
    /// Creation time as reported by the API.
    pub created_at: Option<String>,
    /// Detected language.
    pub lang: Option<String>,
    /// Tweet author.
    pub author: Author,
    /// Public engagement counters.
    pub metrics: Metrics,
}

/// Author information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Handle (without @).
    pub username: String,
    /// Follower count.
    pub followers: u64,
}

impl Author {
    /// Placeholder for tweets whose author was not expanded.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            username: "unknown".to_string(),
            followers: 0,
        }
    }
}

/// Engagement counters of a tweet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub impressions: u64,
}

impl Metrics {
    /// Weighted engagement: likes + 2 * retweets + replies.
    #[must_use]
    pub fn engagement(&self) -> u64 {
        self.likes + self.retweets * 2 + self.replies
    }
}
