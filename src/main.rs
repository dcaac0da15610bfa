use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use txrelaysim::{config_loader, orchestrator};

/// Peer topology and role initializer for transaction relay simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory for the peer registry and edge list
    #[arg(short, long, default_value = "txrelaysim_output")]
    output: PathBuf,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Load before logging starts so the configured level applies
    let mut config = config_loader::load_config(&args.config)?;

    let default_level = config.general.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Configuration file: {:?}", args.config);
    info!("Output directory: {:?}", args.output);

    config_loader::apply_seed_override(&mut config, args.seed)?;

    let network = orchestrator::generate_peer_registry(&config, &args.output)?;

    info!(
        "Peer initialization completed: {} nodes, {} outbound connections",
        network.len(),
        network.edges().len()
    );
    Ok(())
}
