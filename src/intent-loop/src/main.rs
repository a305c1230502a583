//! Intent Loop Simulator — campaign intent-loop simulation service.
//!
//! Main entry point that loads configuration, builds the store, and starts
//! the API server.

use clap::Parser;
use intent_api::{ApiServer, SimulatorStore};
use intent_core::AppConfig;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "intent-loop")]
#[command(about = "Campaign intent-loop simulation service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "INTENT_LOOP__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "INTENT_LOOP__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Start with an empty store instead of seeded demo simulations
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intent_loop=info,intent_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Intent Loop Simulator starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if cli.no_seed {
        config.simulation.seed_demo_data = false;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        seed_demo_data = config.simulation.seed_demo_data,
        "Configuration loaded"
    );

    let store = Arc::new(SimulatorStore::new(config.simulation.clone()));
    let server = ApiServer::new(config.clone(), store);

    if config.metrics.enabled {
        if let Err(e) = server.start_metrics().await {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    server.start_http().await
}
