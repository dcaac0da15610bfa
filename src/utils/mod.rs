//! Shared utilities: parameter validation.

pub mod validation;

pub use validation::{validate_default_q, validate_flood_percent, validate_network_size, validate_percent};
