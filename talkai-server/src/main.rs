//! TalkAI Bridge - Headless Daemon
//!
//! A pure Rust HTTP server that exposes an OpenAI-compatible API
//! (GET /v1/models, POST /v1/chat/completions) backed by the TalkAI
//! conversational endpoint.
//!
//! Access via: http://localhost:8001/v1

#![allow(clippy::print_stdout, reason = "CLI subcommands output to stdout")]

use anyhow::Result;
use clap::Parser;
use talkai_core::catalog::ModelCatalog;
use talkai_core::{keys, upstream, AppState, GatewayServer, TalkAiClient};
use talkai_types::{AuthConfig, GatewayConfig, UpstreamConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::GenerateKey) => {
            println!("{}", keys::mint_client_key());
            Ok(())
        }
        Some(Commands::Serve) | None => serve(cli).await,
    }
}

async fn serve(cli: Cli) -> Result<()> {
    info!("🚀 TalkAI Bridge starting on port {}...", cli.port);

    if let Err(e) = keys::ensure_outbound_key_file(&cli.keys_file) {
        warn!("Could not bootstrap {}: {}", cli.keys_file.display(), e);
    }

    let outbound_key = match keys::load_outbound_key(&cli.keys_file) {
        Ok(Some(key)) => {
            info!("Loaded TalkAI API key from {}", cli.keys_file.display());
            Some(key)
        }
        Ok(None) => {
            warn!("{} holds no keys - requests to TalkAI will be unauthenticated", cli.keys_file.display());
            None
        }
        Err(e) => {
            warn!("{} - requests to TalkAI will be unauthenticated", e);
            None
        }
    };

    let inbound_keys = keys::load_inbound_keys_from_env();

    let catalog = ModelCatalog::load(&cli.models_file);
    info!("📋 Serving {} model(s) on /v1/models", catalog.len());

    let config = GatewayConfig {
        host: cli.host,
        port: cli.port,
        auth: AuthConfig::new(inbound_keys),
        upstream: UpstreamConfig {
            base_url: upstream::resolve_base_url(None),
            outbound_key,
            ..UpstreamConfig::default()
        },
    };

    let client = TalkAiClient::new(&config.upstream)
        .map_err(|e| anyhow::anyhow!("Failed to build upstream client: {}", e))?;

    info!("🌐 API available at http://{}/v1", config.listen_addr());

    let state = AppState::new(config, catalog, client);
    GatewayServer::new(state)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
