//! Moves: a displacement annotated with boundary speeds and resolved limits.
//!
//! A [`Move`] is created by the upstream path producer, consumed once by the
//! smoothing and solving pipeline, and discarded after a plan is emitted.
//! Nothing here holds cross-move state.

use crate::config::MachineLimits;
use crate::error::{Error, Result};
use crate::geometry::{Arc, Vector};
use crate::motion::{CancelFlag, LimitEnvelope, SegmentPlan, SegmentSolver};

/// The geometric shape of a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveGeometry {
    /// Straight displacement
    Line(Vector),
    /// Circular arc displacement
    Arc(Arc),
}

/// One commanded displacement with target boundary speeds and the kinematic
/// limits resolved for its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    geometry: MoveGeometry,
    entry_speed: f64,
    exit_speed: f64,
    envelope: LimitEnvelope,
}

impl Move {
    /// Create a straight move, resolving its limit envelope.
    pub fn line(
        displacement: Vector,
        entry_speed: f64,
        exit_speed: f64,
        machine: &MachineLimits,
    ) -> Result<Self> {
        let envelope = LimitEnvelope::for_line(&displacement, machine)?;
        Ok(Self {
            geometry: MoveGeometry::Line(displacement),
            entry_speed,
            exit_speed,
            envelope,
        })
    }

    /// Create an arc move, resolving its limit envelope (including the
    /// centripetal speed cap).
    pub fn arc(arc: Arc, entry_speed: f64, exit_speed: f64, machine: &MachineLimits) -> Result<Self> {
        let envelope = LimitEnvelope::for_arc(&arc, machine)?;
        Ok(Self {
            geometry: MoveGeometry::Arc(arc),
            entry_speed,
            exit_speed,
            envelope,
        })
    }

    /// The move's geometry.
    pub fn geometry(&self) -> &MoveGeometry {
        &self.geometry
    }

    /// Target speed entering the move.
    pub fn entry_speed(&self) -> f64 {
        self.entry_speed
    }

    /// Target speed leaving the move.
    pub fn exit_speed(&self) -> f64 {
        self.exit_speed
    }

    /// The kinematic limits resolved for this move.
    pub fn envelope(&self) -> &LimitEnvelope {
        &self.envelope
    }

    /// Spatial path length of the move.
    pub fn length(&self) -> f64 {
        match &self.geometry {
            MoveGeometry::Line(v) => v.len(),
            MoveGeometry::Arc(a) => a.len(),
        }
    }

    /// Full actuation magnitude: spatial travel combined with the rotary and
    /// auxiliary components. This is the distance handed to the solver.
    pub fn magnitude(&self) -> f64 {
        match &self.geometry {
            MoveGeometry::Line(v) => v.norm(),
            MoveGeometry::Arc(a) => a.norm(),
        }
    }

    /// This move with a different entry speed.
    pub fn with_entry_speed(mut self, speed: f64) -> Self {
        self.entry_speed = speed;
        self
    }

    /// This move with a different exit speed.
    pub fn with_exit_speed(mut self, speed: f64) -> Self {
        self.exit_speed = speed;
        self
    }

    /// Solve the 7-segment plan for this move.
    pub fn plan(&self, solver: &SegmentSolver) -> Result<SegmentPlan> {
        solver
            .solve(self.magnitude(), &self.envelope, self.entry_speed, self.exit_speed)
            .map_err(Error::from)
    }

    /// Like [`Move::plan`], aborting early if `cancel` is raised.
    pub fn plan_cancellable(&self, solver: &SegmentSolver, cancel: &CancelFlag) -> Result<SegmentPlan> {
        solver
            .solve_cancellable(
                self.magnitude(),
                &self.envelope,
                self.entry_speed,
                self.exit_speed,
                cancel,
            )
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_move_resolves_envelope() {
        let machine = MachineLimits::default();
        let m = Move::line(Vector::from_slice(&[10.0, 0.0, 0.0]), 0.0, 0.0, &machine).unwrap();
        assert_eq!(m.envelope().max_speed, machine.max_speed[0]);
        assert_eq!(m.length(), 10.0);
        assert_eq!(m.magnitude(), 10.0);
    }

    #[test]
    fn test_magnitude_includes_auxiliary_axis() {
        let machine = MachineLimits::default();
        let v = Vector::new([3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0]);
        let m = Move::line(v, 0.0, 0.0, &machine).unwrap();
        assert_eq!(m.length(), 3.0);
        assert_eq!(m.magnitude(), 5.0);
    }

    #[test]
    fn test_zero_move_rejected() {
        let machine = MachineLimits::default();
        let result = Move::line(Vector::ZERO, 0.0, 0.0, &machine);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_round_trips() {
        let machine = MachineLimits::default();
        let solver = SegmentSolver::default();
        let m = Move::line(Vector::from_slice(&[200.0, 0.0, 0.0]), 0.0, 0.0, &machine).unwrap();
        let plan = m.plan(&solver).unwrap();
        let end = plan.end_state(0.0);
        assert!((end.position - 200.0).abs() <= 0.01);
        assert!(end.velocity.abs() <= 0.01);
    }

    #[test]
    fn test_arc_move_speed_cap() {
        let machine = MachineLimits::default();
        let arc = Arc::new(
            Vector::from_slice(&[5.0, 5.0, 0.0]),
            Vector::from_slice(&[1.0, 0.0, 0.0]),
        )
        .unwrap();
        let m = Move::arc(arc, 0.0, 0.0, &machine).unwrap();
        // Envelope speed must not exceed the centripetal bound for radius 5.
        assert!(m.envelope().max_speed <= libm::sqrt(m.envelope().max_accel * 5.0) + 1e-9);
    }
}
