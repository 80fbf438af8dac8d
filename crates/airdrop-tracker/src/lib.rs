//! Airdrop tracker for perp DEX protocols.
//!
//! This crate provides:
//! - Protocol registry loading and filtering
//! - X (Twitter) recent-search client with bearer auth
//! - Tweet normalization and engagement-based sentiment scoring
//! - A sequential, rate-paced run pipeline writing one JSON snapshot

pub mod analysis;
pub mod auth;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod storage;
pub mod twitter;

// Re-export main types
pub use analysis::{Sentiment, SentimentLabel};
pub use auth::Credential;
pub use error::{SearchError, TrackerError};
pub use pipeline::{Pipeline, PipelineConfig, RunSummary};
pub use registry::{Protocol, Registry, RegistryFilter};
pub use storage::{ProtocolResult, Snapshot};
pub use twitter::{SearchClient, Tweet, TweetSearch};
