//! Normalizes raw API tweets into the snapshot format.

use std::collections::HashMap;

use super::types::{Author, Metrics, RawTweet, RawUser, SearchResponse, Tweet};

/// Formatter for recent-search results.
pub struct TweetFormatter;

impl TweetFormatter {
    /// Index the expanded users by id.
    #[must_use]
    pub fn users_by_id(response: &SearchResponse) -> HashMap<&str, &RawUser> {
        response
            .users()
            .iter()
            .map(|user| (user.id.as_str(), user))
            .collect()
    }

    /// Format every tweet in a response.
    #[must_use]
    pub fn format_all(response: &SearchResponse) -> Vec<Tweet> {
        let users = Self::users_by_id(response);
        response
            .tweets()
            .iter()
            .map(|tweet| Self::format(tweet, &users))
            .collect()
    }

    /// Normalize one tweet, joining its author from `users`.
    ///
    /// Never fails: an unknown author becomes [`Author::unknown`] and
    /// missing counters become 0.
    #[must_use]
    pub fn format(tweet: &RawTweet, users: &HashMap<&str, &RawUser>) -> Tweet {
        let author = tweet
            .author_id
            .as_deref()
            .and_then(|id| users.get(id))
            .map_or_else(Author::unknown, |user| Self::author(user));

        let metrics = tweet
            .public_metrics
            .as_ref()
            .map(|m| Metrics {
                likes: m.like_count.unwrap_or(0),
                retweets: m.retweet_count.unwrap_or(0),
                replies: m.reply_count.unwrap_or(0),
                impressions: m.impression_count.unwrap_or(0),
            })
            .unwrap_or_default();

        Tweet {
            id: tweet.id.clone(),
            text: tweet.text.clone(),
            created_at: tweet.created_at.clone(),
            lang: tweet.lang.clone(),
            author,
            metrics,
        }
    }

    fn author(user: &RawUser) -> Author {
        let fallback = Author::unknown();
        Author {
            name: user.name.clone().unwrap_or(fallback.name),
            username: user.username.clone().unwrap_or(fallback.username),
            followers: user
                .public_metrics
                .as_ref()
                .and_then(|m| m.followers_count)
                .unwrap_or(0),
        }
    }
}
