//! Role assignment for every node of the network.
//!
//! Reachable nodes and black holes are picked by rejection sampling over
//! `[1, N-1]`. Reconciliation support is handed out by ascending id: the
//! first `reconciling` non-origin nodes get it, the rest relay the legacy
//! way.

use log::{debug, info};
use rand::Rng;

use super::error::InitError;
use super::sampler::NodeSampler;
use super::types::{Node, RelayParams, ReconciliationParams, ORIGIN_NODE};
use crate::config::{PeerInitializerConfig, ValidationError};

/// Build the node table and assign reachability, black holes and relay
/// parameters.
///
/// Node 0 is the origin and keeps its default record. Counts are checked
/// against the network size before the first draw, so an infeasible
/// request fails with [`InitError::Configuration`] instead of sampling
/// forever.
pub fn assign_roles<R: Rng + ?Sized>(
    network_size: usize,
    config: &PeerInitializerConfig,
    rng: &mut R,
) -> Result<Vec<Node>, InitError> {
    let counts = config.role_counts(network_size)?;
    let sampler = NodeSampler::new(network_size).ok_or_else(|| {
        ValidationError::InvalidGeneral(format!("no peers to sample in a network of {}", network_size))
    })?;

    let mut nodes: Vec<Node> = (0..network_size)
        .map(|id| if id == ORIGIN_NODE { Node::origin() } else { Node::new(id) })
        .collect();

    let mut remaining = counts.reachable;
    while remaining > 0 {
        let node = &mut nodes[sampler.draw(rng)];
        if !node.reachable {
            node.reachable = true;
            remaining -= 1;
        }
    }
    info!("Reachable nodes: {}", counts.reachable);

    let mut remaining = counts.black_holes;
    while remaining > 0 {
        let node = &mut nodes[sampler.draw(rng)];
        if !node.reachable && !node.black_hole {
            node.black_hole = true;
            remaining -= 1;
        }
    }
    info!("Black holes: {}", counts.black_holes);

    let legacy = RelayParams {
        in_flood_limit_percent: 100.0,
        out_flood_limit_percent: 100.0,
        in_relay_delay: config.in_relay_delay_legacy_peer,
        out_relay_delay: config.out_relay_delay_legacy_peer,
    };

    if counts.reconciling == 0 {
        for node in nodes.iter_mut().skip(1) {
            node.relay = legacy;
        }
        debug!("No reconciling nodes, {} legacy nodes", network_size - 1);
        return Ok(nodes);
    }

    let settings = config.reconciliation_settings()?;
    let recon = RelayParams {
        in_flood_limit_percent: settings.in_flood_percent,
        out_flood_limit_percent: settings.out_flood_percent,
        in_relay_delay: config.in_relay_delay_recon_peer,
        out_relay_delay: config.out_relay_delay_recon_peer,
    };
    let reconciliation = ReconciliationParams {
        interval: settings.interval,
        default_q: settings.default_q,
    };

    for node in nodes.iter_mut().skip(1) {
        if node.id <= counts.reconciling {
            node.relay = recon;
            node.reconciliation = Some(reconciliation);
        } else {
            node.relay = legacy;
        }
    }
    debug!(
        "Reconciling nodes: 1..={}, legacy nodes: {}",
        counts.reconciling,
        network_size - 1 - counts.reconciling
    );

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn init_config() -> PeerInitializerConfig {
        PeerInitializerConfig {
            protocol: "peer".to_string(),
            reachable_count: 3,
            private_black_holes_percent: 0,
            out_peers_legacy: 2,
            out_peers_recon: 3,
            in_relay_delay_recon_peer: Duration::from_millis(10),
            out_relay_delay_recon_peer: Duration::from_millis(20),
            in_relay_delay_legacy_peer: Duration::from_secs(2),
            out_relay_delay_legacy_peer: Duration::from_secs(1),
            reconcile_percent: 50,
            reconciliation_interval: Some(Duration::from_secs(1)),
            default_q: Some(0.25),
            out_flood_peers_percent: Some(10.0),
            in_flood_peers_percent: Some(20.0),
        }
    }

    #[test]
    fn test_reachable_count_is_exact() {
        let config = init_config();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let nodes = assign_roles(10, &config, &mut rng).unwrap();
            let reachable = nodes.iter().skip(1).filter(|n| n.reachable).count();
            assert_eq!(reachable, 3, "seed {}", seed);
            assert!(nodes[0].reachable);
        }
    }

    #[test]
    fn test_black_holes_are_unreachable() {
        let mut config = init_config();
        config.reachable_count = 20;
        config.private_black_holes_percent = 50;
        let mut rng = StdRng::seed_from_u64(5);
        let nodes = assign_roles(100, &config, &mut rng).unwrap();

        let black_holes: Vec<_> = nodes.iter().filter(|n| n.black_hole).collect();
        // (100 - 20) * 50 / 100
        assert_eq!(black_holes.len(), 40);
        assert!(black_holes.iter().all(|n| !n.reachable && !n.is_origin()));
    }

    #[test]
    fn test_reconciling_nodes_are_lowest_ids() {
        let config = init_config();
        let mut rng = StdRng::seed_from_u64(11);
        let nodes = assign_roles(10, &config, &mut rng).unwrap();

        let reconciling: Vec<_> = nodes
            .iter()
            .filter(|n| n.reconcile_enabled())
            .map(|n| n.id)
            .collect();
        assert_eq!(reconciling, vec![1, 2, 3, 4, 5]);

        let recon = &nodes[1];
        assert_eq!(recon.relay.in_flood_limit_percent, 20.0);
        assert_eq!(recon.relay.out_flood_limit_percent, 10.0);
        assert_eq!(recon.relay.in_relay_delay, Duration::from_millis(10));
        assert_eq!(recon.relay.out_relay_delay, Duration::from_millis(20));
        assert_eq!(
            recon.reconciliation,
            Some(ReconciliationParams {
                interval: Duration::from_secs(1),
                default_q: 0.25,
            })
        );

        let legacy = &nodes[6];
        assert!(!legacy.reconcile_enabled());
        assert_eq!(legacy.relay.in_flood_limit_percent, 100.0);
        assert_eq!(legacy.relay.out_flood_limit_percent, 100.0);
        assert_eq!(legacy.relay.in_relay_delay, Duration::from_secs(2));
        assert_eq!(legacy.relay.out_relay_delay, Duration::from_secs(1));

        assert!(!nodes[0].reconcile_enabled());
    }

    #[test]
    fn test_all_legacy_without_reconciliation_parameters() {
        let mut config = init_config();
        config.reconcile_percent = 0;
        config.reconciliation_interval = None;
        config.default_q = None;
        let mut rng = StdRng::seed_from_u64(1);
        let nodes = assign_roles(10, &config, &mut rng).unwrap();
        assert!(nodes.iter().all(|n| !n.reconcile_enabled()));
        assert!(nodes
            .iter()
            .skip(1)
            .all(|n| n.relay.in_relay_delay == Duration::from_secs(2)));
    }

    #[test]
    fn test_infeasible_reachable_count() {
        let mut config = init_config();
        config.reachable_count = 10;
        let mut rng = StdRng::seed_from_u64(1);
        let result = assign_roles(5, &config, &mut rng);
        assert_eq!(
            result,
            Err(InitError::Configuration(ValidationError::ReachableCountTooLarge {
                requested: 10,
                available: 4,
            }))
        );
    }

    #[test]
    fn test_same_seed_same_roles() {
        let mut config = init_config();
        config.reachable_count = 30;
        config.private_black_holes_percent = 25;
        let first = assign_roles(200, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = assign_roles(200, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }
}
