//! Errors raised while initializing the peer network.

use super::types::NodeId;
use crate::config::ValidationError;

/// Why a network could not be initialized
///
/// Initialization is all-or-nothing: either error aborts the run and no
/// partially connected network is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InitError {
    /// The requested role counts cannot be met by the network size
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// A node's out-degree target exceeds the reachable peers it can still
    /// connect to
    #[error(
        "Topology infeasible: node {node} still needs {remaining} outbound connection(s) \
         but only {pool} reachable, unconnected candidate(s) remain"
    )]
    TopologyInfeasible {
        node: NodeId,
        remaining: usize,
        pool: usize,
    },
}
