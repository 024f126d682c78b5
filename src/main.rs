//! Gemini API relay binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                GEMINI RELAY                 │
//!                      │                                             │
//!   Client Request     │  ┌────────┐   ┌───────────┐   ┌─────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│   auth    │──▶│  relay  │──┼──▶ generativelanguage
//!                      │  │ server │   │ resolver  │   │ forward │  │    .googleapis.com
//!                      │  └────────┘   └───────────┘   └────┬────┘  │
//!                      │                                    │        │
//!   Client Response    │  ┌──────────────────────┐          │        │
//!   ◀──────────────────┼──│ stream / buffer +CORS│◀─────────┘        │
//!                      │  └──────────────────────┘                   │
//!                      └────────────────────────────────────────────┘
//! ```
//!
//! The relay is stateless between requests: every inbound request is a pure
//! function of its own contents plus the static configuration.

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_relay::config::loader::{load_config, ConfigError};
use gemini_relay::config::validation::validate_config;
use gemini_relay::config::RelayConfig;
use gemini_relay::http::HttpServer;

#[derive(Parser, Debug)]
#[command(
    name = "gemini-relay",
    version,
    about = "Reverse proxy for the Google Generative Language API"
)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,

    /// Override the listener bind address (e.g. "127.0.0.1:8000").
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    config.apply_env();
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_origin = %config.upstream.origin,
        default_credential_configured = config.credentials.default_key.is_some(),
        strict_format = config.credentials.strict_format,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
