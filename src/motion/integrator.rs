//! Closed-form forward integration of a jerk profile.
//!
//! Each of the 7 segments holds a constant jerk, so acceleration, velocity and
//! position at its end follow in closed form:
//! `a = j·t + a₀`, `v = j·t²/2 + a₀·t + v₀`, `p = j·t³/6 + a₀·t²/2 + v₀·t + p₀`.
//! Chaining the 7 segments is O(7), deterministic, and cannot fail for any
//! real inputs.

use crate::motion::segments::SEGMENTS;

/// Kinematic state at a point in time: acceleration, velocity, position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Acceleration
    pub accel: f64,
    /// Velocity
    pub velocity: f64,
    /// Position
    pub position: f64,
}

impl KinematicState {
    /// State at the start of a profile entered with velocity `vin`.
    #[inline]
    pub fn entry(vin: f64) -> Self {
        Self {
            accel: 0.0,
            velocity: vin,
            position: 0.0,
        }
    }

    /// Advance this state through `t` seconds of constant jerk `j`.
    pub fn advance(&self, jerk: f64, t: f64) -> Self {
        let t2 = t * t;
        Self {
            accel: jerk * t + self.accel,
            velocity: jerk * t2 / 2.0 + self.accel * t + self.velocity,
            position: jerk * t2 * t / 6.0 + self.accel * t2 / 2.0 + self.velocity * t
                + self.position,
        }
    }
}

/// Integrate a full 7-segment jerk profile from entry velocity `vin`.
///
/// Returns the state at the end of the last segment.
pub fn integrate(durations: &[f64; SEGMENTS], jerks: &[f64; SEGMENTS], vin: f64) -> KinematicState {
    let mut state = KinematicState::entry(vin);
    for (t, j) in durations.iter().zip(jerks.iter()) {
        state = state.advance(*j, *t);
    }
    state
}

/// Integrate a profile and return all 8 boundary states: the entry state plus
/// the state after each of the 7 segments.
pub fn integrate_to_list(
    durations: &[f64; SEGMENTS],
    jerks: &[f64; SEGMENTS],
    vin: f64,
) -> [KinematicState; SEGMENTS + 1] {
    let mut states = [KinematicState::entry(vin); SEGMENTS + 1];
    for i in 0..SEGMENTS {
        states[i + 1] = states[i].advance(jerks[i], durations[i]);
    }
    states
}

/// Sample the profile state at time `t` from its start.
///
/// Times before the start return the entry state; times past the end return
/// the final state.
pub fn sample(
    durations: &[f64; SEGMENTS],
    jerks: &[f64; SEGMENTS],
    vin: f64,
    t: f64,
) -> KinematicState {
    let mut state = KinematicState::entry(vin);
    if t <= 0.0 {
        return state;
    }
    let mut elapsed = 0.0;
    for (dt, j) in durations.iter().zip(jerks.iter()) {
        if t < elapsed + dt {
            return state.advance(*j, t - elapsed);
        }
        state = state.advance(*j, *dt);
        elapsed += dt;
    }
    state
}
