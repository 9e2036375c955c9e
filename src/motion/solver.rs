//! Jerk-limited 7-segment time solver.
//!
//! Given a distance, a resolved [`LimitEnvelope`] and boundary speeds, the
//! solver finds the seven segment durations whose forward integration lands on
//! the target position and exit velocity within tolerance, without exceeding
//! the acceleration or speed limit anywhere in the profile.
//!
//! The jerk polarity of each ramp is fixed up front from a trapezoidal
//! estimate of the cruise speed. Two nested phases then iterate with an
//! adaptive step: the velocity phase tunes the exit ramp (falling back to the
//! entry ramp when the exit ramp is pinned), and the position phase tunes the
//! entry ramp and cruise time, re-aligning velocity after every adjustment.
//! Whenever a phase's error changes sign its step halves; a step underflow
//! before tolerance is a convergence failure. Every iteration also checks the
//! caller's iteration budget and cancellation flag, so a pathological solve
//! cannot spin forever.

use core::sync::atomic::{AtomicBool, Ordering};

use libm::sqrt;

use crate::error::{SolverError, SolverPhase};

use super::envelope::LimitEnvelope;
use super::integrator::{integrate, KinematicState};
use super::segments::SegmentPlan;

/// Step floor, as a fraction of the initial step. Reaching it means the
/// damped bisection can no longer move the error across its tolerance.
const MIN_STEP_RATIO: f64 = 1e-15;

/// Relative speed headroom below which an entry-ramp knob counts as pinned.
const HEADROOM_EPSILON: f64 = 1e-12;

/// Cooperative cancellation flag for aborting a running solve.
///
/// Share one flag between the solving task and a supervisor; the solver
/// checks it once per iteration and returns [`SolverError::Cancelled`] after
/// it is raised.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    /// Create a flag in the not-cancelled state.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Request cancellation of any solve holding this flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tuning parameters for the segment-time solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Acceptable position error of the integrated profile
    pub pos_tolerance: f64,
    /// Acceptable exit-velocity error of the integrated profile
    pub vel_tolerance: f64,
    /// Initial adaptive step; `None` derives it from the move's duration scale
    pub initial_step: Option<f64>,
    /// Hard bound on solver iterations across both phases
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            pos_tolerance: 0.01,
            vel_tolerance: 0.01,
            initial_step: None,
            max_iterations: 1_000_000,
        }
    }
}

/// The jerk-limited segment-time solver.
///
/// Stateless between calls: each solve is independent and side-effect-free,
/// so batches of moves may be solved concurrently from separate tasks.
#[derive(Debug, Clone, Default)]
pub struct SegmentSolver {
    options: SolverOptions,
}

impl SegmentSolver {
    /// Create a solver with the given options.
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    /// The solver's tuning parameters.
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Solve the segment times for one move.
    ///
    /// `distance` is the path length to travel, `vin`/`vout` the boundary
    /// speeds. See [`SolverError`] for the failure taxonomy; `PathTooShort`
    /// and `Convergence` are expected, recoverable outcomes.
    pub fn solve(
        &self,
        distance: f64,
        envelope: &LimitEnvelope,
        vin: f64,
        vout: f64,
    ) -> Result<SegmentPlan, SolverError> {
        self.solve_inner(distance, envelope, vin, vout, None)
    }

    /// Like [`SegmentSolver::solve`], aborting early if `cancel` is raised.
    pub fn solve_cancellable(
        &self,
        distance: f64,
        envelope: &LimitEnvelope,
        vin: f64,
        vout: f64,
        cancel: &CancelFlag,
    ) -> Result<SegmentPlan, SolverError> {
        self.solve_inner(distance, envelope, vin, vout, Some(cancel))
    }

    fn solve_inner(
        &self,
        distance: f64,
        envelope: &LimitEnvelope,
        vin: f64,
        vout: f64,
        cancel: Option<&CancelFlag>,
    ) -> Result<SegmentPlan, SolverError> {
        let LimitEnvelope {
            max_jerk: mj,
            max_accel: ma,
            max_speed: mv,
        } = *envelope;
        if !(mj > 0.0) || !(ma > 0.0) || !(mv > 0.0) {
            return Err(SolverError::InvalidEnvelope {
                jerk: mj,
                accel: ma,
                speed: mv,
            });
        }
        if !(distance > 0.0) {
            return Err(SolverError::NonPositiveDistance(distance));
        }
        let tpe = self.options.pos_tolerance;
        let tve = self.options.vel_tolerance;
        if !(tpe > 0.0) {
            return Err(SolverError::NonPositiveTolerance(tpe));
        }
        if !(tve > 0.0) {
            return Err(SolverError::NonPositiveTolerance(tve));
        }
        for v in [vin, vout] {
            if !(0.0..=mv).contains(&v) {
                return Err(SolverError::SpeedExceedsLimit {
                    requested: v,
                    max: mv,
                });
            }
        }

        let minimum = minimum_ramp_distance(envelope, vin, vout);
        if minimum > distance + tpe {
            return Err(SolverError::PathTooShort {
                requested: distance,
                minimum,
            });
        }

        // Trapezoidal cruise estimate fixes the ramp polarities up front.
        let cruise = sqrt((2.0 * ma * distance + vin * vin + vout * vout) / 2.0).min(mv);
        let entry_sign = if cruise >= vin { 1.0 } else { -1.0 };
        let exit_sign = if cruise >= vout { 1.0 } else { -1.0 };

        // Characteristic durations of the three regimes set the step scale.
        let scale = ma / mj + mv / ma + distance / mv;
        let step = self.options.initial_step.unwrap_or(scale / 100.0);

        let mut solve = Solve {
            plan: SegmentPlan::empty(mj, entry_sign, exit_sign),
            distance,
            vin,
            vout,
            mj,
            ma,
            mv,
            tpe,
            tve,
            velocity_step: StepControl::new(step),
            position_step: StepControl::new(step),
            iterations: 0,
            max_iterations: self.options.max_iterations,
            cancel,
        };
        solve.run()
    }
}

/// Minimum distance covered by the fastest jerk-limited ramp from `vin` to
/// `vout` with no cruise segment. Distances below this are unsolvable.
pub fn minimum_ramp_distance(envelope: &LimitEnvelope, vin: f64, vout: f64) -> f64 {
    let mj = envelope.max_jerk;
    let ma = envelope.max_accel;
    let dv = (vout - vin).abs();
    let sign = if vout >= vin { 1.0 } else { -1.0 };
    let ramp = sqrt(dv / mj).min(ma / mj);
    let hold = ((dv - mj * ramp * ramp) / ma).max(0.0);
    let ts = [ramp, hold, ramp, 0.0, 0.0, 0.0, 0.0];
    let js = [sign * mj, 0.0, -sign * mj, 0.0, 0.0, 0.0, 0.0];
    integrate(&ts, &js, vin).position
}

/// Adaptive step with damped bisection: halves whenever the controlled error
/// changes sign, underflows to `None` at the step floor.
struct StepControl {
    step: f64,
    floor: f64,
    prev_positive: Option<bool>,
}

impl StepControl {
    fn new(step: f64) -> Self {
        Self {
            step,
            floor: step * MIN_STEP_RATIO,
            prev_positive: None,
        }
    }

    fn update(&mut self, error: f64) -> Option<f64> {
        let positive = error >= 0.0;
        if let Some(prev) = self.prev_positive {
            if prev != positive {
                self.step /= 2.0;
            }
        }
        self.prev_positive = Some(positive);
        (self.step > self.floor).then_some(self.step)
    }
}

struct Solve<'a> {
    plan: SegmentPlan,
    distance: f64,
    vin: f64,
    vout: f64,
    mj: f64,
    ma: f64,
    mv: f64,
    tpe: f64,
    tve: f64,
    velocity_step: StepControl,
    position_step: StepControl,
    iterations: u32,
    max_iterations: u32,
    cancel: Option<&'a CancelFlag>,
}

impl Solve<'_> {
    fn run(&mut self) -> Result<SegmentPlan, SolverError> {
        loop {
            self.align_velocity()?;
            let state = self.integrate();
            let pe = self.distance - state.position;
            let ve = self.vout - state.velocity;
            if pe.abs() <= self.tpe && ve.abs() <= self.tve {
                return Ok(self.plan);
            }
            self.tick()?;
            let step = self.position_step.update(pe).ok_or(SolverError::Convergence {
                phase: SolverPhase::Position,
                position_error: pe,
                velocity_error: ve,
            })?;
            if pe > 0.0 {
                self.grow_entry(step);
            } else {
                self.shrink_entry(step);
            }
        }
    }

    /// Phase A: drive the integrated exit velocity to `vout` ± tolerance.
    fn align_velocity(&mut self) -> Result<(), SolverError> {
        loop {
            let state = self.integrate();
            let ve = self.vout - state.velocity;
            if ve.abs() <= self.tve {
                return Ok(());
            }
            self.tick()?;
            let pe = self.distance - state.position;
            let step = self.velocity_step.update(ve).ok_or(SolverError::Convergence {
                phase: SolverPhase::Velocity,
                position_error: pe,
                velocity_error: ve,
            })?;
            if ve * self.plan.exit_sign < 0.0 {
                self.grow_exit(step);
            } else if self.plan.hold_out > 0.0 {
                self.plan.hold_out = (self.plan.hold_out - step).max(0.0);
            } else if self.plan.ramp_out > 0.0 {
                self.plan.ramp_out = (self.plan.ramp_out - step).max(0.0);
            } else if ve * self.plan.entry_sign > 0.0 {
                // Exit ramp exhausted: the cruise speed itself is off target.
                self.grow_entry(step);
            } else {
                self.shrink_entry(step);
            }
        }
    }

    fn integrate(&self) -> KinematicState {
        integrate(&self.plan.durations(), &self.plan.jerks(), self.vin)
    }

    fn tick(&mut self) -> Result<(), SolverError> {
        if let Some(cancel) = self.cancel {
            if cancel.is_cancelled() {
                return Err(SolverError::Cancelled);
            }
        }
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(SolverError::IterationBudget {
                limit: self.max_iterations,
            });
        }
        Ok(())
    }

    /// Speed reached after the entry ramp pair and hold.
    fn cruise_velocity(&self) -> f64 {
        let t0 = self.plan.ramp_in;
        self.vin + self.plan.entry_sign * self.mj * t0 * (t0 + self.plan.hold_in)
    }

    /// Velocity budget the entry ramp may still consume before hitting the
    /// speed ceiling (accelerating entry) or zero speed (decelerating entry).
    fn entry_headroom(&self) -> f64 {
        let v3 = self.cruise_velocity();
        if self.plan.entry_sign > 0.0 {
            self.mv - v3
        } else {
            v3
        }
    }

    /// Total speed budget of the entry ramp from `vin` to its bound.
    fn entry_budget(&self) -> f64 {
        if self.plan.entry_sign > 0.0 {
            self.mv - self.vin
        } else {
            self.vin
        }
    }

    fn grow_entry(&mut self, step: f64) {
        let accel_cap = self.ma / self.mj;
        let headroom = self.entry_headroom() > self.mv * HEADROOM_EPSILON;
        if self.plan.ramp_in < accel_cap && headroom {
            let budget = self.entry_budget();
            let hold = self.plan.hold_in;
            let speed_cap = (-hold + sqrt(hold * hold + 4.0 * budget / self.mj)) / 2.0;
            self.plan.ramp_in = (self.plan.ramp_in + step).min(accel_cap).min(speed_cap);
        } else if self.plan.ramp_in > 0.0 && headroom {
            let budget = self.entry_budget();
            let t0 = self.plan.ramp_in;
            let speed_cap = budget / (self.mj * t0) - t0;
            self.plan.hold_in = (self.plan.hold_in + step).min(speed_cap.max(0.0));
        } else {
            self.plan.cruise += step;
        }
    }

    fn shrink_entry(&mut self, step: f64) {
        if self.plan.cruise > 0.0 {
            self.plan.cruise = (self.plan.cruise - step).max(0.0);
        } else if self.plan.hold_in > 0.0 {
            self.plan.hold_in = (self.plan.hold_in - step).max(0.0);
        } else {
            self.plan.ramp_in = (self.plan.ramp_in - step).max(0.0);
        }
    }

    fn grow_exit(&mut self, step: f64) {
        // Speed budget of the exit ramp: down to zero speed when it
        // decelerates, up to the ceiling when it accelerates.
        let v3 = self.cruise_velocity();
        let budget = if self.plan.exit_sign > 0.0 {
            v3
        } else {
            self.mv - v3
        };
        let budget = budget.max(0.0);
        let accel_cap = self.ma / self.mj;
        if self.plan.ramp_out < accel_cap {
            let hold = self.plan.hold_out;
            let speed_cap = (-hold + sqrt(hold * hold + 4.0 * budget / self.mj)) / 2.0;
            self.plan.ramp_out = (self.plan.ramp_out + step).min(accel_cap).min(speed_cap);
        } else if self.plan.ramp_out > 0.0 {
            let t4 = self.plan.ramp_out;
            let speed_cap = budget / (self.mj * t4) - t4;
            self.plan.hold_out = (self.plan.hold_out + step).min(speed_cap.max(0.0));
        }
    }
}
