//! # TxRelaySim - Peer initializer for transaction relay simulations
//!
//! This library builds the initial overlay network of a peer-to-peer
//! transaction relay simulation: which nodes accept inbound connections,
//! which ones silently drop what they receive, which ones relay through set
//! reconciliation instead of flooding, and who connects to whom.
//!
//! ## Overview
//!
//! Initialization is one synchronous pass run before any simulated traffic:
//!
//! 1. **Roles**: `reachable_count` nodes are drawn as reachable, a share of
//!    the remaining ones become black holes, and the lowest ids get the
//!    reconciliation role with its relay parameters.
//! 2. **Connections**: every node opens its role's number of outbound
//!    connections to distinct reachable peers.
//!
//! Node 0 is the origin node. It takes no part in either step.
//!
//! ## Architecture
//!
//! - `config`: Configuration structures and YAML parsing
//! - `config_loader`: Configuration file loading and overrides
//! - `topology`: Role assignment, node sampling and connection building
//! - `orchestrator`: The seeded initialization pass
//! - `registry`: JSON/CSV output for downstream components
//! - `utils`: Parameter validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use txrelaysim::{config_loader, orchestrator};
//!
//! let config = config_loader::load_config(Path::new("config.yaml"))?;
//! let network = orchestrator::initialize_peers(&config)?;
//! println!("{} outbound connections", network.edges().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   network_size: 1000
//!   random_seed: 42
//!   log_level: info
//!
//! peer_initializer:
//!   protocol: "peer"
//!   reachable_count: 100
//!   private_black_holes_percent: 0
//!   out_peers_legacy: 8
//!   out_peers_recon: 8
//!   in_relay_delay_recon_peer: "0ms"
//!   out_relay_delay_recon_peer: "0ms"
//!   in_relay_delay_legacy_peer: "2s"
//!   out_relay_delay_legacy_peer: "1s"
//!   reconcile_percent: 50
//!   reconciliation_interval: "1s"
//!   default_q: 0.25
//!   out_flood_peers_percent: 10
//!   in_flood_peers_percent: 10
//! ```
//!
//! ## Error Handling
//!
//! Initialization returns [`topology::InitError`], separating infeasible
//! configurations from infeasible degree targets. File handling and the
//! binary use `color_eyre` for error reports with context.

pub mod config;
pub mod config_loader;
pub mod orchestrator;
pub mod registry;
pub mod topology;
pub mod utils;
