//! Machine limit configuration and planner tuning.

use serde::Deserialize;

use crate::geometry::AXES;

/// Per-axis kinematic limits of the machine.
///
/// Axis order: 3 spatial, 3 rotary, 1 auxiliary. Units are whatever the
/// machine uses per axis (mm or degrees); the planner only combines limits
/// along a single move direction, never across unit systems.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MachineLimits {
    /// Maximum jerk per axis
    pub max_jerk: [f64; AXES],
    /// Maximum acceleration per axis
    pub max_accel: [f64; AXES],
    /// Maximum speed per axis
    pub max_speed: [f64; AXES],
}

impl MachineLimits {
    /// Limits with the same value on every axis.
    pub const fn uniform(jerk: f64, accel: f64, speed: f64) -> Self {
        Self {
            max_jerk: [jerk; AXES],
            max_accel: [accel; AXES],
            max_speed: [speed; AXES],
        }
    }
}

impl Default for MachineLimits {
    fn default() -> Self {
        Self::uniform(100_000.0, 10_000.0, 1_000.0)
    }
}

/// Corner smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SmoothingConfig {
    /// Maximum sagitta: distance from a corner to its blending arc
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// Centripetal acceleration bound used for arc speed caps
    #[serde(default = "default_centripetal_accel")]
    pub max_centripetal_accel: f64,
}

fn default_precision() -> f64 {
    0.1
}

fn default_centripetal_accel() -> f64 {
    10_000.0
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            max_centripetal_accel: default_centripetal_accel(),
        }
    }
}

/// Segment-time solver tuning from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SolverConfig {
    /// Acceptable position error of a solved profile
    #[serde(default = "default_tolerance")]
    pub pos_tolerance: f64,
    /// Acceptable exit-velocity error of a solved profile
    #[serde(default = "default_tolerance")]
    pub vel_tolerance: f64,
    /// Initial adaptive step; derived from the move when absent
    #[serde(default)]
    pub initial_step: Option<f64>,
    /// Hard bound on solver iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_max_iterations() -> u32 {
    1_000_000
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pos_tolerance: default_tolerance(),
            vel_tolerance: default_tolerance(),
            initial_step: None,
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverConfig {
    /// Convert to runtime solver options.
    pub fn options(&self) -> crate::motion::SolverOptions {
        crate::motion::SolverOptions {
            pos_tolerance: self.pos_tolerance,
            vel_tolerance: self.vel_tolerance,
            initial_step: self.initial_step,
            max_iterations: self.max_iterations,
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MachineConfig {
    /// Per-axis kinematic limits
    #[serde(default)]
    pub limits: MachineLimits,
    /// Corner smoothing parameters
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    /// Solver tuning
    #[serde(default)]
    pub solver: SolverConfig,
}
