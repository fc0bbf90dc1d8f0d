//! Server entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use roundtable_application::{PacingPolicy, TranscriptLogger};
use roundtable_infrastructure::{AnthropicGateway, ConfigLoader, JsonlTranscript};
use roundtable_presentation::{AppState, Cli, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting roundtable");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    let roster = Arc::new(config.to_roster().context("invalid roster configuration")?);
    info!(
        personas = %roster
            .personas()
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        "roster loaded"
    );

    // === Dependency Injection ===
    let gateway = Arc::new(
        AnthropicGateway::new(
            config.generation.model.clone(),
            &config.generation.api_key_env,
            config.generation.request_timeout(),
        )
        .context("failed to build generation gateway")?,
    );

    let transcript: Arc<dyn TranscriptLogger> = if config.discussion.transcript_path.is_empty() {
        Arc::new(roundtable_application::NoTranscript)
    } else {
        match JsonlTranscript::new(&config.discussion.transcript_path) {
            Some(transcript) => {
                info!(path = %transcript.path().display(), "transcript enabled");
                Arc::new(transcript)
            }
            None => Arc::new(roundtable_application::NoTranscript),
        }
    };

    let pacing: PacingPolicy = config.discussion.pacing();
    let state = AppState::new(roster, gateway)
        .with_window(config.discussion.window())
        .with_settings(config.discussion.scheduler_settings())
        .with_pacing(pacing)
        .with_transcript(transcript);

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("invalid host:port combination")?;

    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
