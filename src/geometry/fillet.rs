//! Corner smoothing between consecutive displacement vectors.
//!
//! [`fillet_7d`] replaces a sharp corner between two 7-axis moves with a
//! trimmed-vector / arc / trimmed-vector triple. The trim scales every axis of
//! each input by the same factor, and the arc chord's rotary components are
//! chosen so the triple reproduces the untrimmed pair's 7-axis totals. The
//! auxiliary axis instead carries the length-weighted mean auxiliary rate of
//! the two trimmed segments over the arc, keeping deposition rate continuous
//! through the corner.

use core::f64::consts::PI;

use libm::{acos, sin, sqrt, tan};

use crate::error::GeometryError;

use super::arc::Arc;
use super::point::Vector;

/// 1 − |cos| threshold below which two directions count as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Share of the incoming length the trim may consume.
const INCOMING_TRIM_SHARE: f64 = 0.9;

/// Share of the outgoing length the trim may consume.
const OUTGOING_TRIM_SHARE: f64 = 0.5;

/// A smoothed corner: trimmed incoming vector, blending arc, trimmed outgoing
/// vector, with the arc's geometric speed cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerBlend {
    /// Incoming displacement, shortened by the trim
    pub trimmed_in: Vector,
    /// Arc bridging the two trim points, tangent to the incoming direction
    pub arc: Arc,
    /// Outgoing displacement, shortened by the trim
    pub trimmed_out: Vector,
    /// Radius of the blending arc
    pub radius: f64,
    /// Centripetal speed cap `sqrt(max_centripetal_accel · radius)`
    pub speed_cap: f64,
}

/// Smooth the corner between two consecutive displacement vectors.
///
/// `precision` is the maximum sagitta: the distance from the original corner
/// to the blending arc. The radius is additionally bounded so the trim never
/// consumes more than 90% of the incoming vector or half of the outgoing one.
///
/// Returns `Ok(None)` when the spatial directions are parallel or antiparallel:
/// there is no corner to smooth and the caller keeps the inputs unchanged.
///
/// # Errors
///
/// [`GeometryError::InvalidPrecision`] / [`GeometryError::InvalidCentripetalAccel`]
/// for non-positive parameters, [`GeometryError::ZeroLength`] when either input
/// has no spatial extent.
pub fn fillet_7d(
    incoming: &Vector,
    outgoing: &Vector,
    precision: f64,
    max_centripetal_accel: f64,
) -> Result<Option<CornerBlend>, GeometryError> {
    if !(precision > 0.0) {
        return Err(GeometryError::InvalidPrecision(precision));
    }
    if !(max_centripetal_accel > 0.0) {
        return Err(GeometryError::InvalidCentripetalAccel(max_centripetal_accel));
    }
    let len_in = incoming.len();
    let len_out = outgoing.len();
    if len_in < PARALLEL_EPSILON || len_out < PARALLEL_EPSILON {
        return Err(GeometryError::ZeroLength);
    }

    let cos_turn = (incoming.dot3(outgoing) / (len_in * len_out)).clamp(-1.0, 1.0);
    if 1.0 - cos_turn.abs() < PARALLEL_EPSILON {
        return Ok(None);
    }
    let turn = acos(cos_turn);
    let alpha = PI - turn;

    let half_sin = sin(alpha / 2.0);
    let half_tan = tan(alpha / 2.0);
    let sagitta_radius = precision * half_sin / (1.0 - half_sin);
    let incoming_radius = INCOMING_TRIM_SHARE * len_in * half_tan;
    let outgoing_radius = OUTGOING_TRIM_SHARE * len_out * half_tan;
    let radius = sagitta_radius.min(incoming_radius).min(outgoing_radius);
    let trim = radius / half_tan;

    let trimmed_in = *incoming * ((len_in - trim) / len_in);
    let trimmed_out = *outgoing * ((len_out - trim) / len_out);

    // Chord: the trim vector mirrored into the corner bisector.
    let chord_len = 2.0 * trim * half_sin;
    let start_dir = incoming.spatial_unit()?;
    let axis = incoming.cross3(outgoing);
    let chord_spatial =
        (Vector::from_slice(&start_dir) * chord_len).rotate3(&axis, (PI - alpha) / 2.0)?;

    let mut chord = chord_spatial.components();
    for i in 3..6 {
        chord[i] = incoming[i] + outgoing[i] - trimmed_in[i] - trimmed_out[i];
    }
    let arc_len = radius * turn;
    let aux_rate =
        (trimmed_in.auxiliary() + trimmed_out.auxiliary()) / (trimmed_in.len() + trimmed_out.len());
    chord[6] = aux_rate * arc_len;

    let arc = Arc::new(Vector::new(chord), *incoming)?;
    let speed_cap = sqrt(max_centripetal_accel * radius);

    Ok(Some(CornerBlend {
        trimmed_in,
        arc,
        trimmed_out,
        radius,
        speed_cap,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(c: &[f64]) -> Vector {
        Vector::from_slice(c)
    }

    #[test]
    fn test_right_angle_scenario() {
        // 90° corner with legs of 10: outgoing bound caps the radius at 5,
        // trimming 5 from each leg.
        let blend = fillet_7d(&v(&[10.0, 0.0, 0.0]), &v(&[0.0, 10.0, 0.0]), 3.0, 10_000.0)
            .unwrap()
            .unwrap();
        assert_eq!(blend.trimmed_in, v(&[5.0, 0.0, 0.0]));
        assert_eq!(blend.trimmed_out, v(&[0.0, 5.0, 0.0]));
        assert_eq!(blend.arc.vector(), v(&[5.0, 5.0, 0.0]));
        assert!((blend.radius - 5.0).abs() < 1e-9);
        assert!((blend.speed_cap - sqrt(10_000.0 * 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sharp_corner_uses_sagitta_radius() {
        // Sharp corner with long legs: the sagitta bound is the smallest.
        let blend = fillet_7d(&v(&[100.0, 0.0, 0.0]), &v(&[0.0, 100.0, 0.0]), 3.0, 10_000.0)
            .unwrap()
            .unwrap();
        let s = sin(PI / 4.0);
        assert!((blend.radius - 3.0 * s / (1.0 - s)).abs() < 1e-9);
    }

    #[test]
    fn test_shallow_corner_trims_half_outgoing() {
        // Nearly straight continuation: the outgoing-length bound binds and
        // the trim consumes half the outgoing vector.
        let t1 = v(&[10.0, 0.0, 0.0]);
        let t2 = v(&[10.0, -1.0, 0.0]);
        let blend = fillet_7d(&t1, &t2, 3.0, 10_000.0).unwrap().unwrap();
        let alpha = PI - t1.angle_between3(&t2);
        assert!((blend.radius - OUTGOING_TRIM_SHARE * t2.len() * tan(alpha / 2.0)).abs() < 1e-9);
        assert!((blend.trimmed_out.len() - t2.len() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_spatial_closure() {
        let t1 = v(&[10.0, 0.0, -10.0]);
        let t2 = v(&[0.0, -10.0, 10.0]);
        let blend = fillet_7d(&t1, &t2, 3.0, 10_000.0).unwrap().unwrap();
        let total = blend.trimmed_in + blend.arc.vector() + blend.trimmed_out;
        let expected = t1 + t2;
        for i in 0..3 {
            assert!((total[i] - expected[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rotary_closure_is_exact() {
        let t1 = Vector::new([10.0, 0.0, 0.0, 2.0, -1.0, 0.5, 0.0]);
        let t2 = Vector::new([0.0, 10.0, 0.0, 1.0, 3.0, -0.5, 0.0]);
        let blend = fillet_7d(&t1, &t2, 3.0, 10_000.0).unwrap().unwrap();
        let total = blend.trimmed_in + blend.arc.vector() + blend.trimmed_out;
        let expected = t1 + t2;
        for i in 3..6 {
            assert!((total[i] - expected[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_auxiliary_keeps_mean_rate() {
        let t1 = Vector::new([10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let t2 = Vector::new([0.0, 10.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let blend = fillet_7d(&t1, &t2, 3.0, 10_000.0).unwrap().unwrap();
        let rate = (blend.trimmed_in.auxiliary() + blend.trimmed_out.auxiliary())
            / (blend.trimmed_in.len() + blend.trimmed_out.len());
        let expected = rate * blend.arc.len();
        assert!((blend.arc.vector().auxiliary() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_inputs_untouched() {
        let result = fillet_7d(&v(&[10.0, 0.0, 0.0]), &v(&[5.0, 0.0, 0.0]), 3.0, 10_000.0);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_antiparallel_inputs_untouched() {
        let result = fillet_7d(&v(&[10.0, 0.0, 0.0]), &v(&[-5.0, 0.0, 0.0]), 3.0, 10_000.0);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_invalid_parameters() {
        let a = v(&[10.0, 0.0, 0.0]);
        let b = v(&[0.0, 10.0, 0.0]);
        assert_eq!(
            fillet_7d(&a, &b, 0.0, 10_000.0),
            Err(GeometryError::InvalidPrecision(0.0))
        );
        assert_eq!(
            fillet_7d(&a, &b, 3.0, -1.0),
            Err(GeometryError::InvalidCentripetalAccel(-1.0))
        );
    }
}
