//! Sentiment scoring from tweet engagement.

use serde::{Deserialize, Serialize};

use crate::twitter::Tweet;

/// Sentiment bucket for a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "notable")]
    Notable,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "low interest")]
    LowInterest,
    #[serde(rename = "no data")]
    NoData,
}

impl SentimentLabel {
    /// Bucket an average engagement value.
    ///
    /// Thresholds are strict: exactly 100 is `Positive`, not `VeryPositive`.
    #[must_use]
    pub fn from_avg_engagement(avg: f64) -> Self {
        if avg > 100.0 {
            Self::VeryPositive
        } else if avg > 50.0 {
            Self::Positive
        } else if avg > 20.0 {
            Self::Notable
        } else if avg > 5.0 {
            Self::Neutral
        } else {
            Self::LowInterest
        }
    }

    /// Score on the 0-5 scale.
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Self::VeryPositive => 5,
            Self::Positive => 4,
            Self::Notable => 3,
            Self::Neutral => 2,
            Self::LowInterest => 1,
            Self::NoData => 0,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryPositive => write!(f, "very positive"),
            Self::Positive => write!(f, "positive"),
            Self::Notable => write!(f, "notable"),
            Self::Neutral => write!(f, "neutral"),
            Self::LowInterest => write!(f, "low interest"),
            Self::NoData => write!(f, "no data"),
        }
    }
}

/// Engagement and impression sums over a set of tweets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementTotals {
    /// Sum of likes + 2 * retweets + replies.
    pub engagement: u64,
    /// Sum of impressions, counting a tweet with 0 impressions as 1.
    ///
    /// Not used by the score yet; kept so an impression-normalized rate
    /// never divides by zero.
    pub impressions: u64,
}

impl EngagementTotals {
    /// Sum engagement and floored impressions.
    #[must_use]
    pub fn tally(tweets: &[Tweet]) -> Self {
        tweets.iter().fold(Self::default(), |acc, tweet| Self {
            engagement: acc.engagement + tweet.metrics.engagement(),
            impressions: acc.impressions + tweet.metrics.impressions.max(1),
        })
    }
}

/// Sentiment summary for one protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Score from 0 (no data) to 5.
    pub score: u8,
    /// Bucket label.
    pub label: SentimentLabel,
    /// Number of tweets scored.
    pub tweet_count: usize,
    /// Mean engagement per tweet, one decimal. Absent without data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_engagement: Option<f64>,
}

impl Sentiment {
    /// The record for a protocol with no tweets.
    #[must_use]
    pub fn no_data() -> Self {
        Self {
            score: 0,
            label: SentimentLabel::NoData,
            tweet_count: 0,
            avg_engagement: None,
        }
    }

    /// Estimate sentiment from normalized tweets.
    #[must_use]
    pub fn estimate(tweets: &[Tweet]) -> Self {
        if tweets.is_empty() {
            return Self::no_data();
        }

        let totals = EngagementTotals::tally(tweets);
        let avg = totals.engagement as f64 / tweets.len() as f64;
        let label = SentimentLabel::from_avg_engagement(avg);

        Self {
            score: label.score(),
            label,
            tweet_count: tweets.len(),
            avg_engagement: Some(round_one_decimal(avg)),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
