//! # Peer Registry Module
//!
//! This module writes the initialized network to disk so the relay protocol
//! and the event scheduler can load it without re-running initialization.
//!
//! ## Registry Files
//!
//! **Peer Registry** (`peer_registry.json`):
//! - Protocol name and seed the network was built with
//! - Role counts (reachable, black holes, reconciling, legacy)
//! - Every node record: roles, relay parameters, and its side of each
//!   connection
//!
//! **Edge List** (`edges.csv`):
//! - One row per outbound connection, in build order
//! - Columns: `source,target,source_reconciles,target_reconciles`
//!
//! ## Example Registry Structure
//!
//! ```json
//! {
//!   "protocol": "peer",
//!   "random_seed": 42,
//!   "summary": { "nodes": 3, "reachable": 1, "black_holes": 0,
//!                "reconciling": 1, "legacy": 1, "edges": 1 },
//!   "nodes": [
//!     {
//!       "id": 1,
//!       "reachable": false,
//!       "black_hole": false,
//!       "relay": { "in_flood_limit_percent": 10.0, "out_flood_limit_percent": 10.0,
//!                  "in_relay_delay": "0s", "out_relay_delay": "0s" },
//!       "reconciliation": { "interval": "1s", "default_q": 0.25 },
//!       "connections": [ { "peer": 2, "outbound": true, "peer_reconcile_capable": false } ]
//!     }
//!   ]
//! }
//! ```

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::topology::{NetworkSummary, Node, PeerNetwork};

pub const PEER_REGISTRY_FILE: &str = "peer_registry.json";
pub const EDGE_LIST_FILE: &str = "edges.csv";

/// Serialized form of an initialized network
#[derive(Serialize, Debug)]
pub struct PeerRegistry<'a> {
    pub protocol: &'a str,
    pub random_seed: u64,
    pub summary: NetworkSummary,
    pub nodes: &'a [Node],
}

impl<'a> PeerRegistry<'a> {
    pub fn new(network: &'a PeerNetwork, random_seed: u64) -> Self {
        Self {
            protocol: &network.protocol,
            random_seed,
            summary: network.summary(),
            nodes: &network.nodes,
        }
    }
}

/// Write `peer_registry.json` into `output_dir`
pub fn write_registry(network: &PeerNetwork, random_seed: u64, output_dir: &Path) -> Result<PathBuf> {
    let registry_path = output_dir.join(PEER_REGISTRY_FILE);
    let registry_json = serde_json::to_string_pretty(&PeerRegistry::new(network, random_seed))?;
    std::fs::write(&registry_path, registry_json)
        .wrap_err_with(|| format!("Failed to write peer registry '{}'", registry_path.display()))?;
    info!("Wrote peer registry: {:?}", registry_path);
    Ok(registry_path)
}

/// Render the outbound edges as CSV
pub fn edge_list_csv(network: &PeerNetwork) -> String {
    let reconciles = |id| network.node(id).is_some_and(Node::reconcile_enabled);
    let rows: String = network
        .edges()
        .into_iter()
        .map(|edge| {
            format!(
                "{},{},{},{}\n",
                edge.source,
                edge.target,
                reconciles(edge.source),
                reconciles(edge.target)
            )
        })
        .collect();
    format!("source,target,source_reconciles,target_reconciles\n{}", rows)
}

/// Write `edges.csv` into `output_dir`
pub fn write_edge_list(network: &PeerNetwork, output_dir: &Path) -> Result<PathBuf> {
    let edges_path = output_dir.join(EDGE_LIST_FILE);
    std::fs::write(&edges_path, edge_list_csv(network))
        .wrap_err_with(|| format!("Failed to write edge list '{}'", edges_path.display()))?;
    info!("Wrote edge list: {:?}", edges_path);
    Ok(edges_path)
}
