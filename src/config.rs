use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::validation::{
    validate_default_q, validate_flood_percent, validate_network_size, validate_percent,
};

/// Upper bound accepted for every `*_percent` field
pub const MAX_PERCENT: u32 = 100;

/// Top-level simulation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub general: GeneralConfig,
    pub peer_initializer: PeerInitializerConfig,
}

impl Config {
    /// Validate the configuration
    ///
    /// Every count the peer initializer derives from a percentage is checked
    /// here against the network size, so an infeasible request is rejected
    /// before the first random draw.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let network_size = self.general.network_size;
        validate_network_size(network_size).map_err(ValidationError::InvalidGeneral)?;

        let init = &self.peer_initializer;
        if init.protocol.trim().is_empty() {
            return Err(ValidationError::InvalidPeerInitializer(
                "protocol cannot be empty".to_string(),
            ));
        }

        validate_percent("private_black_holes_percent", init.private_black_holes_percent)
            .map_err(ValidationError::InvalidPeerInitializer)?;
        validate_percent("reconcile_percent", init.reconcile_percent)
            .map_err(ValidationError::InvalidPeerInitializer)?;

        init.role_counts(network_size)?;

        if init.reconcile_percent > 0 {
            init.reconciliation_settings()?;
        }

        Ok(())
    }
}

/// Settings shared by the whole simulation run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Number of simulated nodes, including the origin node 0
    pub network_size: usize,
    /// Seed for the generator driving every random draw during initialization
    #[serde(default)]
    pub random_seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Peer initializer parameters, named as in the simulator's config files
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PeerInitializerConfig {
    /// Name of the relay protocol slot the role records are produced for
    pub protocol: String,
    pub reachable_count: usize,
    #[serde(default)]
    pub private_black_holes_percent: u32,
    pub out_peers_legacy: usize,
    pub out_peers_recon: usize,
    #[serde(with = "humantime_serde")]
    pub in_relay_delay_recon_peer: Duration,
    #[serde(with = "humantime_serde")]
    pub out_relay_delay_recon_peer: Duration,
    #[serde(with = "humantime_serde")]
    pub in_relay_delay_legacy_peer: Duration,
    #[serde(with = "humantime_serde")]
    pub out_relay_delay_legacy_peer: Duration,
    pub reconcile_percent: u32,
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub reconciliation_interval: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_q: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_flood_peers_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_flood_peers_percent: Option<f64>,
}

/// Node counts derived from the percentages of a [`PeerInitializerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCounts {
    pub reachable: usize,
    pub black_holes: usize,
    pub reconciling: usize,
}

/// Reconciliation parameters, all present once validated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciliationSettings {
    pub interval: Duration,
    pub default_q: f64,
    pub in_flood_percent: f64,
    pub out_flood_percent: f64,
}

impl PeerInitializerConfig {
    /// Resolve the reachable, black-hole and reconciling node counts for a
    /// network of `network_size` nodes.
    ///
    /// The origin node 0 never takes part in the draws, so only
    /// `network_size - 1` ids are available to each role.
    pub fn role_counts(&self, network_size: usize) -> Result<RoleCounts, ValidationError> {
        validate_network_size(network_size).map_err(ValidationError::InvalidGeneral)?;
        let candidates = network_size - 1;

        if self.reachable_count > candidates {
            return Err(ValidationError::ReachableCountTooLarge {
                requested: self.reachable_count,
                available: candidates,
            });
        }

        let black_holes = (network_size - self.reachable_count)
            * self.private_black_holes_percent as usize
            / MAX_PERCENT as usize;
        let unreachable = candidates - self.reachable_count;
        if black_holes > unreachable {
            return Err(ValidationError::BlackHoleCountTooLarge {
                requested: black_holes,
                available: unreachable,
            });
        }

        let reconciling = (network_size * self.reconcile_percent as usize
            / MAX_PERCENT as usize)
            .min(candidates);

        Ok(RoleCounts {
            reachable: self.reachable_count,
            black_holes,
            reconciling,
        })
    }

    /// Collect the reconciliation parameters, failing on the first missing
    /// or out-of-range value.
    pub fn reconciliation_settings(&self) -> Result<ReconciliationSettings, ValidationError> {
        let missing = |name: &str| {
            ValidationError::InvalidReconciliation(format!(
                "{} is required when reconcile_percent > 0",
                name
            ))
        };

        let interval = self
            .reconciliation_interval
            .ok_or_else(|| missing("reconciliation_interval"))?;
        if interval.is_zero() {
            return Err(ValidationError::InvalidReconciliation(
                "reconciliation_interval must be positive".to_string(),
            ));
        }

        let default_q = self.default_q.ok_or_else(|| missing("default_q"))?;
        validate_default_q(default_q).map_err(ValidationError::InvalidReconciliation)?;

        let in_flood_percent = self
            .in_flood_peers_percent
            .ok_or_else(|| missing("in_flood_peers_percent"))?;
        validate_flood_percent("in_flood_peers_percent", in_flood_percent)
            .map_err(ValidationError::InvalidReconciliation)?;

        let out_flood_percent = self
            .out_flood_peers_percent
            .ok_or_else(|| missing("out_flood_peers_percent"))?;
        validate_flood_percent("out_flood_peers_percent", out_flood_percent)
            .map_err(ValidationError::InvalidReconciliation)?;

        Ok(ReconciliationSettings {
            interval,
            default_q,
            in_flood_percent,
            out_flood_percent,
        })
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid peer initializer configuration: {0}")]
    InvalidPeerInitializer(String),
    #[error("Invalid reconciliation configuration: {0}")]
    InvalidReconciliation(String),
    #[error("reachable_count {requested} exceeds the {available} non-origin nodes in the network")]
    ReachableCountTooLarge { requested: usize, available: usize },
    #[error("{requested} black holes requested but only {available} nodes are unreachable")]
    BlackHoleCountTooLarge { requested: usize, available: usize },
}
