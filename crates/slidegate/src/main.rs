//! Slidegate daemon - serves the deck builder and proxies its AI calls

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use slidegate::config::Config;
use slidegate::error::Result;
use slidegate::server::GatewayServer;

/// Slidegate - local HTTP gateway for a presentation builder
#[derive(Parser)]
#[command(name = "slidegate")]
#[command(about = "Local HTTP gateway between a slide-deck builder and the Gemini API")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(long, short = 'p', global = true)]
    pub port: Option<u16>,

    /// Directory with the built client bundle
    #[arg(long, global = true)]
    pub static_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the gateway (default command)
    #[command(name = "serve")]
    Serve,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Serve) => {
            let mut config = load_config(cli.config)?;
            config.apply_process_env();
            if let Some(port) = cli.port {
                config.server.port = port;
            }
            if let Some(dir) = cli.static_dir {
                config.server.static_dir = dir;
            }
            serve(config).await
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slidegate=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        tracing::info!("Loading config from: {}", path.display());
        return Config::from_file(&path);
    }

    let default_paths = [
        dirs::home_dir().map(|h| h.join(".slidegate").join("config.toml")),
        dirs::config_dir().map(|c| c.join("slidegate").join("config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return Config::from_file(path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting Slidegate");
    tracing::debug!(
        listen = %format!("{}:{}", config.server.host, config.server.port),
        base_url = %config.provider.base_url,
        api_version = %config.provider.api_version,
        "Config loaded"
    );

    GatewayServer::new(config).serve().await?;

    tracing::info!("Slidegate stopped");
    Ok(())
}
