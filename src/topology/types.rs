//! Topology type definitions.
//!
//! Nodes live in one flat table indexed by [`NodeId`]. Role assignment and
//! connection building address nodes only through their index, and every
//! connection stores the peer's index rather than a reference to it.

use serde::Serialize;
use std::time::Duration;

/// Index of a node in the network table
pub type NodeId = usize;

/// The always-present node excluded from role assignment and never used as
/// a connection target
pub const ORIGIN_NODE: NodeId = 0;

/// Per-direction relay parameters of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelayParams {
    /// Percentage of inbound peers a transaction is flooded to
    pub in_flood_limit_percent: f64,
    /// Percentage of outbound peers a transaction is flooded to
    pub out_flood_limit_percent: f64,
    #[serde(with = "humantime_serde")]
    pub in_relay_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub out_relay_delay: Duration,
}

impl RelayParams {
    /// Flood to every peer with no relay delay
    pub fn flood_all() -> Self {
        Self {
            in_flood_limit_percent: 100.0,
            out_flood_limit_percent: 100.0,
            in_relay_delay: Duration::ZERO,
            out_relay_delay: Duration::ZERO,
        }
    }
}

/// Parameters only reconciling nodes carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconciliationParams {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub default_q: f64,
}

/// One side of a link, recorded on the node that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub peer: NodeId,
    /// True on the side that initiated the connection
    pub outbound: bool,
    /// Whether `peer` runs reconciliation, deciding the relay mode toward it
    pub peer_reconcile_capable: bool,
}

/// One simulated peer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub reachable: bool,
    pub black_hole: bool,
    pub relay: RelayParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<ReconciliationParams>,
    pub connections: Vec<Connection>,
}

impl Node {
    /// A node with no role yet: unreachable, honest, flooding to everyone
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            reachable: false,
            black_hole: false,
            relay: RelayParams::flood_all(),
            reconciliation: None,
            connections: Vec::new(),
        }
    }

    /// The origin node, implicitly reachable
    pub fn origin() -> Self {
        Self {
            reachable: true,
            ..Self::new(ORIGIN_NODE)
        }
    }

    pub fn is_origin(&self) -> bool {
        self.id == ORIGIN_NODE
    }

    pub fn reconcile_enabled(&self) -> bool {
        self.reconciliation.is_some()
    }

    pub fn out_degree(&self) -> usize {
        self.connections.iter().filter(|c| c.outbound).count()
    }

    pub fn in_degree(&self) -> usize {
        self.connections.iter().filter(|c| !c.outbound).count()
    }

    /// Record a connection on this node's side
    pub fn add_peer(&mut self, peer: NodeId, outbound: bool, peer_reconcile_capable: bool) {
        self.connections.push(Connection {
            peer,
            outbound,
            peer_reconcile_capable,
        });
    }
}

/// A directed edge from the initiating node to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Role and degree counts of an initialized network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    /// Reachable nodes, not counting the origin
    pub reachable: usize,
    pub black_holes: usize,
    pub reconciling: usize,
    pub legacy: usize,
    pub edges: usize,
}

/// Fully initialized node table handed to the relay protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerNetwork {
    /// Relay protocol the role records belong to
    pub protocol: String,
    pub nodes: Vec<Node>,
}

impl PeerNetwork {
    pub fn new(protocol: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            protocol: protocol.into(),
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Non-origin nodes, in ascending id order
    pub fn peers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.is_origin())
    }

    pub fn reachable_count(&self) -> usize {
        self.peers().filter(|n| n.reachable).count()
    }

    pub fn black_hole_count(&self) -> usize {
        self.peers().filter(|n| n.black_hole).count()
    }

    pub fn reconciling_count(&self) -> usize {
        self.peers().filter(|n| n.reconcile_enabled()).count()
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, Node::out_degree)
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, Node::in_degree)
    }

    /// Every outbound edge, grouped by source in ascending id order and in
    /// commit order within each source
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.connections
                    .iter()
                    .filter(|c| c.outbound)
                    .map(move |c| Edge {
                        source: node.id,
                        target: c.peer,
                    })
            })
            .collect()
    }

    pub fn summary(&self) -> NetworkSummary {
        let reconciling = self.reconciling_count();
        NetworkSummary {
            nodes: self.len(),
            reachable: self.reachable_count(),
            black_holes: self.black_hole_count(),
            reconciling,
            legacy: self.peers().count() - reconciling,
            edges: self.edges().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_pair() -> PeerNetwork {
        let mut nodes = vec![Node::origin(), Node::new(1), Node::new(2)];
        nodes[2].reachable = true;
        nodes[1].reconciliation = Some(ReconciliationParams {
            interval: Duration::from_secs(1),
            default_q: 0.25,
        });
        nodes[1].add_peer(2, true, false);
        nodes[2].add_peer(1, false, true);
        PeerNetwork::new("peer", nodes)
    }

    #[test]
    fn test_origin_node() {
        let origin = Node::origin();
        assert!(origin.is_origin());
        assert!(origin.reachable);
        assert!(!origin.black_hole);
        assert!(!origin.reconcile_enabled());
        assert!(origin.connections.is_empty());
    }

    #[test]
    fn test_degrees_and_edges() {
        let network = linked_pair();
        assert_eq!(network.out_degree(1), 1);
        assert_eq!(network.in_degree(1), 0);
        assert_eq!(network.out_degree(2), 0);
        assert_eq!(network.in_degree(2), 1);
        assert_eq!(network.out_degree(42), 0);
        assert_eq!(network.edges(), vec![Edge { source: 1, target: 2 }]);
    }

    #[test]
    fn test_summary_excludes_origin() {
        let summary = linked_pair().summary();
        assert_eq!(
            summary,
            NetworkSummary {
                nodes: 3,
                reachable: 1,
                black_holes: 0,
                reconciling: 1,
                legacy: 1,
                edges: 1,
            }
        );
    }
}
