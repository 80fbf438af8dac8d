//! Run pipeline - orchestrates the fetch-format-score-store flow.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::registry::Protocol;
use crate::storage::{ProtocolResult, Snapshot};
use crate::twitter::{TweetFormatter, TweetSearch};

/// Default pause between protocol requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Snapshot output path.
    pub output_path: PathBuf,
    /// Max tweets requested per protocol.
    pub max_results: u32,
    /// Pause between consecutive protocol requests.
    pub request_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/tweets.json"),
            max_results: 10,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Protocols processed.
    pub total: usize,
    /// Protocols with at least one tweet.
    pub succeeded: usize,
    /// Protocols whose fetch failed or found nothing.
    pub failed: usize,
    /// Where the snapshot was written.
    pub output_path: PathBuf,
}

/// Run orchestrator.
///
/// Strictly sequential: one request at a time, paced by `request_delay`.
pub struct Pipeline {
    config: PipelineConfig,
    search: Arc<dyn TweetSearch>,
}

impl Pipeline {
    /// Create a new pipeline.
    #[must_use]
    pub fn new(config: PipelineConfig, search: Arc<dyn TweetSearch>) -> Self {
        Self { config, search }
    }

    /// Collect results for every protocol and write the snapshot.
    pub async fn run(&self, protocols: &[Protocol]) -> Result<RunSummary> {
        let snapshot = self.collect(protocols).await;
        snapshot.save(&self.config.output_path)?;

        let summary = RunSummary {
            total: snapshot.protocol_count,
            succeeded: snapshot.succeeded(),
            failed: snapshot.failed(),
            output_path: self.config.output_path.clone(),
        };

        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            output = %summary.output_path.display(),
            "Run complete"
        );

        Ok(summary)
    }

    /// Fetch and score every protocol in registry order.
    ///
    /// Never fails: a protocol whose search fails or returns nothing is
    /// recorded with zero tweets.
    pub async fn collect(&self, protocols: &[Protocol]) -> Snapshot {
        let mut snapshot = Snapshot::new(Utc::now());
        let total = protocols.len();

        tracing::info!(protocols = total, "Starting run");

        for (i, protocol) in protocols.iter().enumerate() {
            let result = self.fetch_protocol(protocol, i + 1, total).await;
            snapshot.insert(protocol.id.clone(), result);

            if i + 1 < total && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }
        }

        snapshot
    }

    async fn fetch_protocol(
        &self,
        protocol: &Protocol,
        position: usize,
        total: usize,
    ) -> ProtocolResult {
        let query = protocol.search_query();
        tracing::debug!(protocol = %protocol.id, query = %query, "Searching");

        let response = self.search.search(&query, self.config.max_results).await;

        let result = match response.filter(|r| r.has_tweets()) {
            Some(response) => {
                let tweets = TweetFormatter::format_all(&response);
                let result = ProtocolResult::new(protocol, query, tweets);
                tracing::info!(
                    protocol = %protocol.id,
                    tweets = result.tweet_count,
                    label = %result.sentiment.label,
                    "Fetched protocol"
                );
                result
            }
            None => {
                tracing::warn!(protocol = %protocol.id, "Fetch failed or no tweets");
                ProtocolResult::empty(protocol, query)
            }
        };

        // Progress is printed regardless of the log filter
        println!("{}", progress_line(position, total, &protocol.name, &result));
        result
    }
}

/// One human-readable progress line for a processed protocol.
fn progress_line(position: usize, total: usize, name: &str, result: &ProtocolResult) -> String {
    if result.is_success() {
        format!(
            "[{position}/{total}] {name}: {} tweets (sentiment: {}, avg engagement: {})",
            result.tweet_count,
            result.sentiment.label,
            result.sentiment.avg_engagement.unwrap_or_default(),
        )
    } else {
        format!("[{position}/{total}] {name}: fetch failed or no tweets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twitter::{RawTweet, SearchResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records queries and answers with a fixed number of tweets.
    struct RecordingSearch {
        queries: Mutex<Vec<(String, u32)>>,
        tweets: usize,
    }

    #[async_trait]
    impl TweetSearch for RecordingSearch {
        async fn search(&self, query: &str, max_results: u32) -> Option<SearchResponse> {
            self.queries
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));
            Some(SearchResponse {
                data: Some(vec![RawTweet::default(); self.tweets]),
                ..Default::default()
            })
        }
    }

    fn config() -> PipelineConfig {
        PipelineConfig {
            max_results: 25,
            request_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_collect_uses_query_fallback_and_max_results() {
        let search = Arc::new(RecordingSearch {
            queries: Mutex::new(Vec::new()),
            tweets: 1,
        });
        let pipeline = Pipeline::new(config(), search.clone());
        let protocols = vec![
            Protocol::new("hyperliquid", "Hyperliquid").with_query("$HYPE airdrop"),
            Protocol::new("lighter", "Lighter"),
        ];

        let snapshot = pipeline.collect(&protocols).await;

        let queries = search.queries.lock().unwrap().clone();
        assert_eq!(
            queries,
            vec![
                ("$HYPE airdrop".to_string(), 25),
                ("Lighter airdrop".to_string(), 25),
            ]
        );
        assert_eq!(snapshot.protocols["lighter"].query, "Lighter airdrop");
        assert_eq!(snapshot.succeeded(), 2);
    }

    #[tokio::test]
    async fn test_collect_empty_registry() {
        let search = Arc::new(RecordingSearch {
            queries: Mutex::new(Vec::new()),
            tweets: 0,
        });
        let pipeline = Pipeline::new(config(), search);

        let snapshot = pipeline.collect(&[]).await;
        assert_eq!(snapshot.protocol_count, 0);
        assert!(snapshot.protocols.is_empty());
    }

    #[tokio::test]
    async fn test_request_delay_between_protocols_only() {
        let search = Arc::new(RecordingSearch {
            queries: Mutex::new(Vec::new()),
            tweets: 1,
        });
        let pipeline = Pipeline::new(
            PipelineConfig {
                request_delay: Duration::from_millis(50),
                ..config()
            },
            search,
        );
        let protocols = vec![
            Protocol::new("a", "A"),
            Protocol::new("b", "B"),
            Protocol::new("c", "C"),
        ];

        let started = std::time::Instant::now();
        pipeline.collect(&protocols).await;
        let elapsed = started.elapsed();

        // Two pauses for three protocols, none after the last.
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[test]
    fn test_progress_line_for_fetched_protocol() {
        let protocol = Protocol::new("lighter", "Lighter");
        let tweets = TweetFormatter::format_all(&SearchResponse {
            data: Some(vec![RawTweet::default(); 2]),
            ..Default::default()
        });
        let result = ProtocolResult::new(&protocol, "Lighter airdrop", tweets);

        assert_eq!(
            progress_line(1, 3, &protocol.name, &result),
            format!(
                "[1/3] Lighter: 2 tweets (sentiment: {}, avg engagement: 0)",
                result.sentiment.label
            )
        );
    }

    #[test]
    fn test_progress_line_for_failed_protocol() {
        let protocol = Protocol::new("paradex", "Paradex");
        let result = ProtocolResult::empty(&protocol, "Paradex airdrop");

        assert_eq!(
            progress_line(3, 3, &protocol.name, &result),
            "[3/3] Paradex: fetch failed or no tweets"
        );
    }
}
