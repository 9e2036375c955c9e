//! Projection of per-axis machine limits onto a move's direction.
//!
//! A move engages each axis in proportion to its unit direction component, so
//! the tightest scalar limit along the move is `axis_limit / |component|`,
//! minimized across engaged axes. Straight moves have one direction; arcs are
//! sampled along their sweep.

use libm::sqrt;

use crate::config::MachineLimits;
use crate::error::GeometryError;
use crate::geometry::{Arc, Vector, AXES};

/// Number of tangent samples taken along an arc.
pub const ARC_SAMPLES: usize = 10;

/// Direction components below this engage no axis and impose no constraint.
const DIRECTION_EPSILON: f64 = 1e-12;

/// Scalar kinematic limits resolved for one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitEnvelope {
    /// Maximum jerk along the move
    pub max_jerk: f64,
    /// Maximum acceleration along the move
    pub max_accel: f64,
    /// Maximum speed along the move
    pub max_speed: f64,
}

impl LimitEnvelope {
    /// Build an envelope from explicit scalar limits.
    pub const fn new(max_jerk: f64, max_accel: f64, max_speed: f64) -> Self {
        Self {
            max_jerk,
            max_accel,
            max_speed,
        }
    }

    /// Resolve the envelope for a straight displacement.
    ///
    /// The direction is constant, so the per-axis projection is evaluated
    /// once on the full 7-axis unit direction.
    pub fn for_line(
        displacement: &Vector,
        machine: &MachineLimits,
    ) -> Result<Self, GeometryError> {
        let dir = displacement.unit()?;
        Ok(Self::project(&dir.components(), machine))
    }

    /// Resolve the envelope for an arc.
    ///
    /// The tangent rotates along the sweep, so the projection is sampled at
    /// [`ARC_SAMPLES`] evenly spaced parameters and minimized. The speed is
    /// additionally capped by the centripetal bound `sqrt(max_accel·radius)`.
    pub fn for_arc(arc: &Arc, machine: &MachineLimits) -> Result<Self, GeometryError> {
        let mut envelope = Self::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        for i in 0..ARC_SAMPLES {
            let p = i as f64 / (ARC_SAMPLES - 1) as f64;
            let dir = arc.dir(p)?;
            envelope = envelope.tightened(&Self::project(&dir.components(), machine));
        }
        envelope.max_speed = envelope
            .max_speed
            .min(sqrt(envelope.max_accel * arc.radius()));
        Ok(envelope)
    }

    fn project(direction: &[f64; AXES], machine: &MachineLimits) -> Self {
        let mut envelope = Self::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        for axis in 0..AXES {
            let share = direction[axis].abs();
            if share < DIRECTION_EPSILON {
                continue;
            }
            envelope.max_jerk = envelope.max_jerk.min(machine.max_jerk[axis] / share);
            envelope.max_accel = envelope.max_accel.min(machine.max_accel[axis] / share);
            envelope.max_speed = envelope.max_speed.min(machine.max_speed[axis] / share);
        }
        envelope
    }

    fn tightened(&self, other: &Self) -> Self {
        Self {
            max_jerk: self.max_jerk.min(other.max_jerk),
            max_accel: self.max_accel.min(other.max_accel),
            max_speed: self.max_speed.min(other.max_speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_aligned_line_takes_axis_limits() {
        let machine = MachineLimits::default();
        let env =
            LimitEnvelope::for_line(&Vector::from_slice(&[10.0, 0.0, 0.0]), &machine).unwrap();
        assert_eq!(env.max_jerk, machine.max_jerk[0]);
        assert_eq!(env.max_accel, machine.max_accel[0]);
        assert_eq!(env.max_speed, machine.max_speed[0]);
    }

    #[test]
    fn test_diagonal_line_scales_by_direction_share() {
        let machine = MachineLimits::default();
        let env =
            LimitEnvelope::for_line(&Vector::from_slice(&[1.0, 1.0, 0.0]), &machine).unwrap();
        // Each axis carries 1/sqrt(2) of the path rate.
        let expected = machine.max_speed[0] * sqrt(2.0);
        assert!((env.max_speed - expected).abs() < 1e-9);
    }

    #[test]
    fn test_slowest_axis_governs() {
        let mut machine = MachineLimits::default();
        machine.max_speed[1] = 10.0;
        let env =
            LimitEnvelope::for_line(&Vector::from_slice(&[1.0, 1.0, 0.0]), &machine).unwrap();
        assert!((env.max_speed - 10.0 * sqrt(2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rotary_axis_constrains_mixed_move() {
        let mut machine = MachineLimits::default();
        machine.max_speed[3] = 1.0;
        let v = Vector::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let env = LimitEnvelope::for_line(&v, &machine).unwrap();
        // The rotary axis carries 1/sqrt(2) of the move and is 1000x slower.
        assert!((env.max_speed - sqrt(2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_displacement_rejected() {
        let machine = MachineLimits::default();
        let result = LimitEnvelope::for_line(&Vector::ZERO, &machine);
        assert_eq!(result, Err(GeometryError::ZeroLength));
    }

    #[test]
    fn test_arc_envelope_applies_centripetal_cap() {
        let machine = MachineLimits::default();
        let arc = Arc::new(
            Vector::from_slice(&[1.0, 1.0, 0.0]),
            Vector::from_slice(&[1.0, 0.0, 0.0]),
        )
        .unwrap();
        let env = LimitEnvelope::for_arc(&arc, &machine).unwrap();
        // radius 1/sqrt(2): centripetal cap far below the machine speed limit
        let cap = sqrt(env.max_accel * arc.radius());
        assert!((env.max_speed - cap).abs() < 1e-9);
        assert!(env.max_speed < machine.max_speed[0]);
    }
}
