//! Configuration module for smooth-motion.
//!
//! Provides types for loading and validating machine limits and planner
//! tuning from TOML files (with `std` feature) or pre-parsed data.

mod limits;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::{MachineConfig, MachineLimits, SmoothingConfig, SolverConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
