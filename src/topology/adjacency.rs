//! Undirected link bookkeeping used while building connections.

use std::collections::HashSet;

use super::types::NodeId;

/// Per-node set of already linked peers
///
/// Links are stored in both directions, so `has(i, j) == has(j, i)` always
/// holds. Self-links are never stored.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTracker {
    peers: Vec<HashSet<NodeId>>,
}

impl AdjacencyTracker {
    pub fn new(network_size: usize) -> Self {
        Self {
            peers: vec![HashSet::new(); network_size],
        }
    }

    /// Whether `i` and `j` are linked, in either direction
    pub fn has(&self, i: NodeId, j: NodeId) -> bool {
        self.peers.get(i).is_some_and(|set| set.contains(&j))
            || self.peers.get(j).is_some_and(|set| set.contains(&i))
    }

    /// Link `i` and `j` in both directions.
    ///
    /// Returns `false` and leaves the tracker untouched when `i == j`, when
    /// either id is out of range, or when the link already exists.
    pub fn add(&mut self, i: NodeId, j: NodeId) -> bool {
        if i == j || i >= self.peers.len() || j >= self.peers.len() || self.has(i, j) {
            return false;
        }
        self.peers[i].insert(j);
        self.peers[j].insert(i);
        true
    }

    /// Number of peers linked to `i`
    pub fn degree(&self, i: NodeId) -> usize {
        self.peers.get(i).map_or(0, HashSet::len)
    }

    /// Number of peers linked to `i` for which `filter` holds
    pub fn count_linked<F: Fn(NodeId) -> bool>(&self, i: NodeId, filter: F) -> usize {
        self.peers
            .get(i)
            .map_or(0, |set| set.iter().filter(|&&j| filter(j)).count())
    }

    /// Number of undirected links
    pub fn link_count(&self) -> usize {
        self.peers.iter().map(HashSet::len).sum::<usize>() / 2
    }
}
