//! Network topology module.
//!
//! This module assigns structural roles to every simulated node and builds
//! the connection graph between them, before any simulated traffic flows.

pub mod adjacency;
pub mod connections;
pub mod error;
pub mod roles;
pub mod sampler;
pub mod types;

// Re-export key types and functions for easier access
pub use adjacency::AdjacencyTracker;
pub use connections::{connect_peers, DegreeTargets};
pub use error::InitError;
pub use roles::assign_roles;
pub use sampler::NodeSampler;
pub use types::{Connection, Edge, NetworkSummary, Node, NodeId, PeerNetwork, ORIGIN_NODE};
