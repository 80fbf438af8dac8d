//! Engagement-based sentiment analysis.
//!
//! A cheap popularity proxy, not NLP: tweets are scored by how much
//! engagement they attract on average.

mod sentiment;

pub use sentiment::{EngagementTotals, Sentiment, SentimentLabel};
