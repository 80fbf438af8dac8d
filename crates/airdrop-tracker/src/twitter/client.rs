//! X API v2 recent-search client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::auth::Credential;
use crate::error::SearchError;

use super::types::SearchResponse;

/// Recent-search endpoint.
pub const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long the API asks clients to back off after a 429.
pub const RATE_LIMIT_COOLDOWN_MINS: u64 = 15;

/// Error bodies are cut to this many characters in logs.
const ERROR_BODY_MAX_CHARS: usize = 200;

const TWEET_FIELDS: &str = "created_at,public_metrics,author_id,lang";
const EXPANSIONS: &str = "author_id";
const USER_FIELDS: &str = "name,username,public_metrics";

/// Source of recent tweets for a query.
///
/// Implementations never fail: any error is logged and reported as `None`
/// so a run can move on to the next protocol.
#[async_trait]
pub trait TweetSearch: Send + Sync {
    /// Search recent tweets matching `query`.
    async fn search(&self, query: &str, max_results: u32) -> Option<SearchResponse>;
}

/// Bearer-authenticated recent-search client.
#[derive(Clone)]
pub struct SearchClient {
    /// HTTP client.
    client: Client,
    /// Bearer credential.
    credential: Credential,
    /// Full URL of the search endpoint.
    base_url: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl SearchClient {
    /// Create a client for the public X API.
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn new(credential: Credential) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(concat!("airdrop-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            credential,
            base_url: RECENT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Point the client at a different search endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue one search request.
    ///
    /// No retries: a 429 is returned as [`SearchError::RateLimited`].
    pub async fn try_search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchResponse, SearchError> {
        let max_results = max_results.to_string();
        debug!(url = %self.base_url, query, max_results = %max_results, "GET recent search");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("tweet.fields", TWEET_FIELDS),
                ("expansions", EXPANSIONS),
                ("user.fields", USER_FIELDS),
            ])
            .header(AUTHORIZATION, self.credential.bearer_header())
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited {
                body: truncate_body(&text),
            });
        }
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&text), "Failed to parse response");
            SearchError::Decode(e)
        })
    }
}

#[async_trait]
impl TweetSearch for SearchClient {
    async fn search(&self, query: &str, max_results: u32) -> Option<SearchResponse> {
        match self.try_search(query, max_results).await {
            Ok(response) => Some(response),
            Err(SearchError::Http(e)) => {
                warn!(query, reason = %e, timeout = e.is_timeout(), "Connection error");
                None
            }
            Err(e) => {
                warn!(query, status = ?e.status(), error = %e, "Search request failed");
                if e.is_rate_limited() {
                    warn!(
                        cooldown_mins = RATE_LIMIT_COOLDOWN_MINS,
                        "Rate limit reached; retry after {RATE_LIMIT_COOLDOWN_MINS} minutes"
                    );
                }
                None
            }
        }
    }
}

/// Truncate an error body, respecting UTF-8 character boundaries.
fn truncate_body(text: &str) -> String {
    text.chars().take(ERROR_BODY_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_PATH: &str = "/2/tweets/search/recent";

    fn client_for(server: &MockServer) -> SearchClient {
        SearchClient::new(Credential::new("test-token"))
            .unwrap()
            .with_base_url(format!("{}{SEARCH_PATH}", server.uri()))
    }

    #[tokio::test]
    async fn test_search_sends_fields_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("query", "Lighter airdrop"))
            .and(query_param("max_results", "10"))
            .and(query_param("tweet.fields", TWEET_FIELDS))
            .and(query_param("expansions", "author_id"))
            .and(query_param("user.fields", USER_FIELDS))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "1", "text": "gm", "author_id": "9"}],
                "includes": {"users": [{"id": "9", "name": "Nine", "username": "nine"}]},
                "meta": {"result_count": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.search("Lighter airdrop", 10).await.unwrap();
        assert_eq!(response.tweets().len(), 1);
        assert_eq!(response.users()[0].name.as_deref(), Some("Nine"));
    }

    #[tokio::test]
    async fn test_api_error_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_search("x", 10).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(client.search("x", 10).await.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search("x", 10).await.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_error_variant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_search("x", 10).await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("e".repeat(1000)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        match client.try_search("x", 10).await.unwrap_err() {
            SearchError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), ERROR_BODY_MAX_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.try_search("x", 10).await,
            Err(SearchError::Decode(_))
        ));
        assert!(client.search("x", 10).await.is_none());
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"meta": {"result_count": 0}}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).with_timeout(Duration::from_millis(50));
        match client.try_search("x", 10).await.unwrap_err() {
            SearchError::Http(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_yields_none() {
        let client = SearchClient::new(Credential::new("test-token"))
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:1{SEARCH_PATH}"));

        assert!(matches!(
            client.try_search("x", 10).await,
            Err(SearchError::Http(_))
        ));
        assert!(client.search("x", 10).await.is_none());
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "エ".repeat(300);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), ERROR_BODY_MAX_CHARS);
    }
}
