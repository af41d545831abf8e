use anyhow::Result;
use clap::Parser;
use pairlink_server::{
    DEFAULT_PORT, DEFAULT_PUBLIC_DIR, MemorySessionRegistry, RelayConfig, serve,
};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pairlink")]
#[command(about = "WebRTC signaling relay pairing a receiver with one sender per room")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Directory with the front-end pages.
    #[arg(long, env = "PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    public_dir: PathBuf,
}

impl From<Cli> for RelayConfig {
    fn from(cli: Cli) -> Self {
        RelayConfig {
            host: cli.host,
            port: cli.port,
            public_dir: cli.public_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::from(Cli::parse());
    if !config.public_dir.is_dir() {
        warn!(
            "Public directory {} does not exist; only WebSocket signaling will work",
            config.public_dir.display()
        );
    }

    info!("Starting signaling relay on port {}", config.port);
    serve(&config, Box::new(MemorySessionRegistry::new()), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
