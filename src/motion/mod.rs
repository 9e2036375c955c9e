//! Motion planning core for smooth-motion.
//!
//! Provides limit projection, the jerk-limited segment-time solver and the
//! closed-form profile integrator.

mod envelope;
mod integrator;
mod segments;
mod solver;

pub use envelope::{LimitEnvelope, ARC_SAMPLES};
pub use integrator::{integrate, integrate_to_list, sample, KinematicState};
pub use segments::{SegmentPlan, SEGMENTS};
pub use solver::{minimum_ramp_distance, CancelFlag, SegmentSolver, SolverOptions};
