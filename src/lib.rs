//! # smooth-motion
//!
//! Jerk-limited S-curve motion planning with arc corner smoothing for
//! multi-axis machines (3 spatial + 3 rotary + 1 auxiliary axis).
//!
//! ## Features
//!
//! - **7-segment profiles**: jerk-up, hold, jerk-down, cruise, jerk-down,
//!   hold, jerk-up, with jerk, acceleration and speed always within limits
//! - **Corner fillets**: sharp direction changes are blended with circular
//!   arcs that preserve the 7-axis displacement totals
//! - **Limit projection**: per-axis machine limits are projected onto each
//!   move's direction, sampled along arcs
//! - **Configuration-driven**: machine limits and planner tuning in TOML files
//! - **no_std compatible**: the planning core works without the standard library
//! - **Bounded solving**: every solve carries an iteration budget and an
//!   optional cancellation flag
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smooth_motion::{MachineConfig, Move, SegmentSolver, Vector};
//!
//! // Load machine limits and tuning from TOML
//! let config: MachineConfig = smooth_motion::load_config("machine.toml")?;
//!
//! // Describe a move and solve its segment times
//! let solver = SegmentSolver::new(config.solver.options());
//! let m = Move::line(Vector::from_slice(&[120.0, 0.0, 0.0]), 0.0, 50.0, &config.limits)?;
//! let plan = m.plan(&solver)?;
//!
//! // Forward-integrate the plan for the executor
//! let end = plan.end_state(0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables the heap-backed path smoothing pipeline for no_std
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod trajectory;

// Re-exports for ergonomic API
pub use config::{validate_config, MachineConfig, MachineLimits, SmoothingConfig, SolverConfig};
pub use error::{Error, Result};
pub use geometry::{fillet_7d, Arc, CornerBlend, Point, Vector};
pub use motion::{
    integrate, integrate_to_list, CancelFlag, KinematicState, LimitEnvelope, SegmentPlan,
    SegmentSolver, SolverOptions,
};
pub use trajectory::{smooth_corner, Move, MoveGeometry};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use trajectory::smooth_path;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;
