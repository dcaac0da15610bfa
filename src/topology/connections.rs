//! Peer connection building.
//!
//! Every non-origin node, in ascending id order, opens outbound
//! connections to uniformly drawn reachable peers until it reaches the
//! out-degree target of its role. A pair of nodes is linked at most once,
//! whichever side initiated, and each link is recorded on both ends with
//! the relay mode the owner should use toward the other side.

use log::{debug, info};
use rand::Rng;

use super::adjacency::AdjacencyTracker;
use super::error::InitError;
use super::sampler::NodeSampler;
use super::types::{Node, NodeId};
use crate::config::PeerInitializerConfig;

/// Draws allowed per committed connection, as a multiple of the id range.
///
/// The candidate pool is checked before drawing, so this only bounds the
/// rejection loop; a feasible node exhausts it with probability below
/// `e^-64`.
pub const DRAW_BUDGET_FACTOR: usize = 64;

/// Out-degree target of each role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeTargets {
    pub legacy: usize,
    pub recon: usize,
}

impl DegreeTargets {
    pub fn from_config(config: &PeerInitializerConfig) -> Self {
        Self {
            legacy: config.out_peers_legacy,
            recon: config.out_peers_recon,
        }
    }

    /// Outbound connections `node` must open
    pub fn for_node(&self, node: &Node) -> usize {
        if node.is_origin() {
            0
        } else if node.reconcile_enabled() {
            self.recon
        } else {
            self.legacy
        }
    }
}

/// Reachable peers `node` is not linked to yet, given `reachable_total`
/// reachable non-origin nodes
fn candidate_pool(
    nodes: &[Node],
    tracker: &AdjacencyTracker,
    reachable_total: usize,
    node: NodeId,
) -> usize {
    let own = usize::from(nodes[node].reachable);
    let linked = tracker.count_linked(node, |peer| nodes[peer].reachable);
    reachable_total - own - linked
}

/// Connect every non-origin node to its role's number of reachable peers.
///
/// Candidates are drawn from `[1, N-1]` and rejected when they are the node
/// itself, unreachable, or already linked. The returned tracker holds every
/// committed link.
///
/// Fails with [`InitError::TopologyInfeasible`] as soon as a node's target
/// exceeds the reachable peers it could still link to, or when a node runs
/// out of draws. On error `nodes` holds the connections committed so far
/// and should be discarded.
pub fn connect_peers<R: Rng + ?Sized>(
    nodes: &mut [Node],
    targets: DegreeTargets,
    rng: &mut R,
) -> Result<AdjacencyTracker, InitError> {
    let mut tracker = AdjacencyTracker::new(nodes.len());
    let Some(sampler) = NodeSampler::new(nodes.len()) else {
        return Ok(tracker);
    };
    let draw_budget = DRAW_BUDGET_FACTOR * sampler.range_len();
    let reachable_total = nodes.iter().skip(1).filter(|n| n.reachable).count();

    for i in 1..nodes.len() {
        let target = targets.for_node(&nodes[i]);
        if target == 0 {
            continue;
        }

        let mut pool = candidate_pool(nodes, &tracker, reachable_total, i);
        if pool < target {
            return Err(InitError::TopologyInfeasible {
                node: i,
                remaining: target,
                pool,
            });
        }

        let mut remaining = target;
        while remaining > 0 {
            let infeasible = InitError::TopologyInfeasible {
                node: i,
                remaining,
                pool,
            };

            let mut draws = 0;
            let j = loop {
                if draws == draw_budget {
                    return Err(infeasible);
                }
                draws += 1;

                let Some(j) = sampler.draw_excluding(rng, i) else {
                    return Err(infeasible);
                };
                if nodes[j].reachable && !tracker.has(i, j) {
                    break j;
                }
            };

            tracker.add(i, j);
            let initiator_reconciles = nodes[i].reconcile_enabled();
            let target_reconciles = nodes[j].reconcile_enabled();
            nodes[i].add_peer(j, true, target_reconciles);
            nodes[j].add_peer(i, false, initiator_reconciles);

            remaining -= 1;
            pool -= 1;
        }

        debug!(
            "Node {} connected to {} outbound peers ({} links in total)",
            i,
            target,
            tracker.degree(i)
        );
    }

    info!(
        "Initialized peers: {} connections across {} nodes",
        tracker.link_count(),
        nodes.len()
    );
    Ok(tracker)
}
