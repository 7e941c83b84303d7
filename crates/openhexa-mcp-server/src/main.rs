use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use openhexa_mcp_server::server::Server;
use runtime::{read_config, read_config_from_env, setup_logging};
use tracing::info;

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "OpenHEXA MCP Server - explore and manage OpenHEXA workspaces from an AI agent",
)]
struct Args {
    /// Path to the config file.
    ///
    /// Without it the server is configured from the environment only
    /// (HEXA_SERVER_URL, HEXA_TOKEN and OPENHEXA_MCP_* variables).
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = match args.config {
        Some(path) => read_config(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?,
        None => read_config_from_env().context("Failed to read config from the environment")?,
    };

    // Dropping the guard stops the file writer
    let _guard = setup_logging(&config)?;

    info!(
        "OpenHEXA MCP Server v{} // Licensed under MIT",
        std::env!("CARGO_PKG_VERSION")
    );

    Ok(Server::builder()
        .transport(config.transport)
        .openhexa(config.openhexa.connect()?)
        .build()
        .start()
        .await?)
}
