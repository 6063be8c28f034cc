//! VCF Collector - Main entry point

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vcf_collector::server::{run_server, AppState};
use vcf_collector::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting VCF Collector on port {} (target: {} contacts, snapshot: {})",
        config.port, config.target, config.contacts_file
    );

    let state = AppState::new(config).await;
    info!("Current contacts: {}", state.ledger.count().await);

    run_server(state).await?;

    info!("VCF Collector shutdown complete");
    Ok(())
}
