//! X (Twitter) recent-search access.
//!
//! Provides the search client, the raw API shapes and the normalized
//! tweet format written to the snapshot.

mod client;
mod formatter;
mod types;

pub use client::{
    SearchClient, TweetSearch, DEFAULT_TIMEOUT_SECS, RATE_LIMIT_COOLDOWN_MINS, RECENT_SEARCH_URL,
};
pub use formatter::TweetFormatter;
pub use types::{
    Author, Includes, Metrics, RawPublicMetrics, RawTweet, RawUser, RawUserMetrics,
    SearchMeta, SearchResponse, Tweet,
};
