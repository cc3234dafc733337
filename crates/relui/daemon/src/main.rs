//! relui daemon - release workflow front end
//!
//! The daemon provides:
//! - An HTML front end listing workflow runs
//! - Run creation from configured workflow templates
//! - Task start requests published to the dispatch topic

use clap::Parser;
use relui_daemon::{DaemonConfig, DaemonError, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// relui daemon CLI
#[derive(Parser)]
#[command(name = "reluid")]
#[command(about = "relui daemon - release workflow front end", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "RELUI_CONFIG")]
    config: Option<String>,

    /// Listen address, overriding the configuration
    #[arg(short, long, env = "RELUI_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level, overriding the configuration
    #[arg(long, env = "RELUI_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "RELUI_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "Starting relui daemon"
    );

    // Create and run server
    let server = Server::new(config).await?;
    server.run().await?;
    Ok(())
}
