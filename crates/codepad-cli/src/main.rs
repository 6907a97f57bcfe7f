//! `codepad` binary entrypoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codepad_config::load_config;
use codepad_inference::{InferenceGateway, TogetherClient};
use codepad_server::CodepadServer;
use codepad_store::InMemoryProjectStore;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Respect `RUST_LOG` if set; otherwise default to info.
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let config = cli.apply(config);

    let client = TogetherClient::new(config.inference.clone())
        .context("failed to build inference client")?;
    tracing::info!(model = %config.inference.model, "inference gateway ready");

    let server = CodepadServer::new(
        Arc::new(InMemoryProjectStore::new()),
        InferenceGateway::new(Arc::new(client)),
        config.server,
    );

    server.start().await.context("server error")?;

    Ok(())
}
