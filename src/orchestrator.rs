//! Peer initialization orchestrator.
//!
//! This module runs the single initialization pass: role assignment
//! followed by connection building, both drawing from one seeded generator
//! in a fixed order, so the same configuration always yields the same
//! network.

use color_eyre::eyre::WrapErr;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::config::Config;
use crate::registry::{write_edge_list, write_registry};
use crate::topology::{assign_roles, connect_peers, DegreeTargets, InitError, PeerNetwork};

/// Build the network with a generator seeded from `general.random_seed`
pub fn initialize_peers(config: &Config) -> Result<PeerNetwork, InitError> {
    let mut rng = StdRng::seed_from_u64(config.general.random_seed);
    initialize_peers_with_rng(config, &mut rng)
}

/// Build the network drawing from `rng`
///
/// Nothing is returned unless every node reached its out-degree target.
pub fn initialize_peers_with_rng<R: Rng + ?Sized>(
    config: &Config,
    rng: &mut R,
) -> Result<PeerNetwork, InitError> {
    config.validate()?;

    let init = &config.peer_initializer;
    let mut nodes = assign_roles(config.general.network_size, init, rng)?;
    connect_peers(&mut nodes, DegreeTargets::from_config(init), rng)?;

    let network = PeerNetwork::new(init.protocol.clone(), nodes);
    let summary = network.summary();
    info!(
        "Initialized '{}' network: {} nodes, {} reachable, {} black holes, {} reconciling, {} legacy, {} connections",
        network.protocol,
        summary.nodes,
        summary.reachable,
        summary.black_holes,
        summary.reconciling,
        summary.legacy,
        summary.edges
    );
    Ok(network)
}

/// Initialize the network and write its registry files into `output_dir`
pub fn generate_peer_registry(config: &Config, output_dir: &Path) -> color_eyre::eyre::Result<PeerNetwork> {
    let network = initialize_peers(config)?;

    std::fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;
    write_registry(&network, config.general.random_seed, output_dir)?;
    write_edge_list(&network, output_dir)?;

    Ok(network)
}
