//! Airdrop tracker CLI - fetch X posts per perp DEX protocol and score sentiment.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use airdrop_tracker::pipeline::{Pipeline, PipelineConfig, DEFAULT_REQUEST_DELAY};
use airdrop_tracker::{Credential, Registry, RegistryFilter, SearchClient};

/// Perp DEX Airdrop Tracker - X API scraper.
#[derive(Parser)]
#[command(name = "airdrop-tracker")]
#[command(about = "Fetch recent X posts for tracked perp DEX protocols and score sentiment")]
#[command(version)]
pub struct Cli {
    /// Only fetch the protocol with this id
    #[arg(long)]
    protocol: Option<String>,

    /// Snapshot output path
    #[arg(long, env = "AIRDROP_OUTPUT", default_value = "data/tweets.json")]
    output: PathBuf,

    /// Protocol registry path
    #[arg(long, env = "AIRDROP_REGISTRY", default_value = "data/protocols.json")]
    registry: PathBuf,

    /// Max tweets to request per protocol
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    max_results: u32,

    /// Only fetch protocols that have not issued a token
    #[arg(long)]
    no_token_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json_logs);

    // Fatal preconditions, checked before any request goes out
    let credential = Credential::from_env()?;
    tracing::debug!("Loaded bearer token from environment");

    let registry = Registry::load(&cli.registry)?;
    let filter = RegistryFilter {
        protocol_id: cli.protocol.clone(),
        no_token_only: cli.no_token_only,
    };
    let protocols = filter.apply(registry.protocols)?;

    println!("{}", "=== Perp DEX Airdrop Tracker - X API Scraper ===".bold());
    println!("   Protocols: {}", protocols.len());
    println!("   Output: {}\n", cli.output.display());

    let client = SearchClient::new(credential).context("Failed to build HTTP client")?;
    let config = PipelineConfig {
        output_path: cli.output,
        max_results: cli.max_results,
        request_delay: DEFAULT_REQUEST_DELAY,
    };

    let pipeline = Pipeline::new(config, Arc::new(client));
    let summary = pipeline.run(&protocols).await?;

    println!("\n{}", "=== Done ===".bold());
    println!("   Fetched: {}", summary.succeeded.to_string().green());
    println!("   Failed:  {}", summary.failed.to_string().red());
    println!("   Saved to: {}", summary.output_path.display());

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("airdrop_tracker=debug,info")
        } else {
            EnvFilter::new("airdrop_tracker=info,warn")
        }
    });

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
