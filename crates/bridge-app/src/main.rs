//! Wallet-custody bridge - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Bridge between wallet pairing sessions and a custody signing backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BRIDGE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    bridge_telemetry::init_logging()?;

    info!("Starting wallet-custody bridge v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > BRIDGE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("BRIDGE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = bridge_app::AppConfig::from_file(&config_path)?;
    info!(chain = %config.chain, listen_port = config.listen_port, "Configuration loaded");

    let app = bridge_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
