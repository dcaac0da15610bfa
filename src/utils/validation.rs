//! Configuration validation utilities.
//!
//! This module provides validation functions for individual peer
//! initializer parameters. Cross-field feasibility checks live on
//! [`crate::config::PeerInitializerConfig::role_counts`].

/// Smallest network the initializer can work with: the origin plus one peer
pub const MIN_NETWORK_SIZE: usize = 2;

/// Validate the number of simulated nodes
///
/// Node 0 is the origin and never takes part in role assignment, so at
/// least one more node is needed for any draw to be possible.
///
/// # Examples
/// ```
/// use txrelaysim::utils::validation::validate_network_size;
///
/// assert!(validate_network_size(2).is_ok());
/// assert!(validate_network_size(1).is_err());
/// ```
pub fn validate_network_size(network_size: usize) -> Result<(), String> {
    if network_size < MIN_NETWORK_SIZE {
        return Err(format!(
            "network_size must be at least {} (origin node plus one peer), got {}",
            MIN_NETWORK_SIZE, network_size
        ));
    }
    Ok(())
}

/// Validate an integer percentage
///
/// # Arguments
/// * `name` - Parameter name used in the error message
/// * `percent` - The value to check
///
/// # Returns
/// * `Ok(())` if `percent` is within 0-100
/// * `Err(String)` naming the parameter otherwise
pub fn validate_percent(name: &str, percent: u32) -> Result<(), String> {
    if percent > 100 {
        return Err(format!("{} must be within 0-100, got {}", name, percent));
    }
    Ok(())
}

/// Validate a flood limit percentage
///
/// # Examples
/// ```
/// use txrelaysim::utils::validation::validate_flood_percent;
///
/// assert!(validate_flood_percent("in_flood_peers_percent", 12.5).is_ok());
/// assert!(validate_flood_percent("in_flood_peers_percent", -1.0).is_err());
/// assert!(validate_flood_percent("in_flood_peers_percent", f64::NAN).is_err());
/// ```
pub fn validate_flood_percent(name: &str, percent: f64) -> Result<(), String> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(format!("{} must be within 0-100, got {}", name, percent));
    }
    Ok(())
}

/// Validate the reconciliation `q` coefficient
///
/// `q` scales the set difference estimate of a reconciliation round and is
/// accepted within [0, 1].
pub fn validate_default_q(default_q: f64) -> Result<(), String> {
    if !default_q.is_finite() || !(0.0..=1.0).contains(&default_q) {
        return Err(format!("default_q must be within [0, 1], got {}", default_q));
    }
    log::debug!("Validated reconciliation q coefficient: {}", default_q);
    Ok(())
}
