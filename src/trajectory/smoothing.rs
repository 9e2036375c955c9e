//! Corner smoothing across consecutive moves.
//!
//! Applies [`fillet_7d`] to pairs of straight moves and re-caps the speeds at
//! the blend so the arc respects its centripetal bound. Smoothing is strictly
//! local to each corner; whole-path look-ahead is a downstream concern.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

use crate::config::{MachineLimits, SmoothingConfig};
use crate::error::{Error, Result};
use crate::geometry::fillet_7d;

use super::moves::{Move, MoveGeometry};

/// Smooth the corner between two consecutive moves.
///
/// Returns `Ok(None)` when there is nothing to smooth: either move is already
/// an arc, or the two directions are parallel/antiparallel. Otherwise returns
/// the trimmed incoming move, the blending arc move and the trimmed outgoing
/// move. The speed at the blend is capped by the arc's centripetal bound, its
/// resolved envelope, and the boundary speeds of the original pair.
pub fn smooth_corner(
    incoming: &Move,
    outgoing: &Move,
    smoothing: &SmoothingConfig,
    machine: &MachineLimits,
) -> Result<Option<[Move; 3]>> {
    let (v1, v2) = match (incoming.geometry(), outgoing.geometry()) {
        (MoveGeometry::Line(a), MoveGeometry::Line(b)) => (a, b),
        _ => return Ok(None),
    };
    let blend = match fillet_7d(v1, v2, smoothing.precision, smoothing.max_centripetal_accel)? {
        Some(blend) => blend,
        None => return Ok(None),
    };

    let arc_move = Move::arc(blend.arc, 0.0, 0.0, machine)?;
    let cap = blend
        .speed_cap
        .min(incoming.entry_speed())
        .min(outgoing.exit_speed())
        .min(arc_move.envelope().max_speed);

    let trimmed_in = Move::line(blend.trimmed_in, incoming.entry_speed(), cap, machine)?;
    let arc_move = arc_move.with_entry_speed(cap).with_exit_speed(cap);
    let trimmed_out = Move::line(blend.trimmed_out, cap, outgoing.exit_speed(), machine)?;

    Ok(Some([trimmed_in, arc_move, trimmed_out]))
}

/// Smooth every corner of an ordered move sequence.
///
/// Corners whose geometry degenerates (zero-length trims, colinear tangents)
/// are left sharp rather than failing the whole path; configuration errors
/// still propagate.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn smooth_path(
    moves: &[Move],
    smoothing: &SmoothingConfig,
    machine: &MachineLimits,
) -> Result<Vec<Move>> {
    let mut out = Vec::with_capacity(moves.len() * 2);
    let mut iter = moves.iter();
    let mut pending = match iter.next() {
        Some(first) => *first,
        None => return Ok(out),
    };
    for next in iter {
        match smooth_corner(&pending, next, smoothing, machine) {
            Ok(Some([trimmed_in, arc_move, trimmed_out])) => {
                out.push(trimmed_in);
                out.push(arc_move);
                pending = trimmed_out;
            }
            Ok(None) | Err(Error::Geometry(_)) => {
                out.push(pending);
                pending = *next;
            }
            Err(e) => return Err(e),
        }
    }
    out.push(pending);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;

    fn machine() -> MachineLimits {
        MachineLimits::default()
    }

    fn smoothing() -> SmoothingConfig {
        SmoothingConfig {
            precision: 3.0,
            max_centripetal_accel: 10_000.0,
        }
    }

    fn line(c: &[f64], entry: f64, exit: f64) -> Move {
        Move::line(Vector::from_slice(c), entry, exit, &machine()).unwrap()
    }

    #[test]
    fn test_corner_blend_caps_speed() {
        let a = line(&[10.0, 0.0, 0.0], 500.0, 500.0);
        let b = line(&[0.0, 10.0, 0.0], 500.0, 500.0);
        let [t_in, arc, t_out] = smooth_corner(&a, &b, &smoothing(), &machine())
            .unwrap()
            .unwrap();
        // The blend speed is the centripetal cap for radius 5 at accel 10000,
        // well under the commanded 500.
        assert!(arc.entry_speed() < 500.0);
        assert_eq!(arc.entry_speed(), arc.exit_speed());
        assert_eq!(t_in.exit_speed(), arc.entry_speed());
        assert_eq!(t_out.entry_speed(), arc.exit_speed());
        // Outer boundary speeds survive
        assert_eq!(t_in.entry_speed(), 500.0);
        assert_eq!(t_out.exit_speed(), 500.0);
    }

    #[test]
    fn test_parallel_moves_not_smoothed() {
        let a = line(&[10.0, 0.0, 0.0], 100.0, 100.0);
        let b = line(&[20.0, 0.0, 0.0], 100.0, 100.0);
        let result = smooth_corner(&a, &b, &smoothing(), &machine()).unwrap();
        assert!(result.is_none());
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_smooth_path_inserts_arcs() {
        let moves = [
            line(&[10.0, 0.0, 0.0], 100.0, 100.0),
            line(&[0.0, 10.0, 0.0], 100.0, 100.0),
            line(&[-10.0, 0.0, 0.0], 100.0, 100.0),
        ];
        let smoothed = smooth_path(&moves, &smoothing(), &machine()).unwrap();
        // Two corners: line arc line arc line
        assert_eq!(smoothed.len(), 5);
        assert!(matches!(smoothed[1].geometry(), MoveGeometry::Arc(_)));
        assert!(matches!(smoothed[3].geometry(), MoveGeometry::Arc(_)));
        // Spatial totals are preserved across the whole path
        let mut total = [0.0; 3];
        for m in &smoothed {
            let v = match m.geometry() {
                MoveGeometry::Line(v) => *v,
                MoveGeometry::Arc(a) => a.vector(),
            };
            for (t, c) in total.iter_mut().zip(v.spatial()) {
                *t += c;
            }
        }
        assert!((total[0] - 0.0).abs() < 1e-6);
        assert!((total[1] - 10.0).abs() < 1e-6);
        assert!(total[2].abs() < 1e-6);
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_smooth_path_keeps_straight_runs() {
        let moves = [
            line(&[10.0, 0.0, 0.0], 100.0, 100.0),
            line(&[20.0, 0.0, 0.0], 100.0, 100.0),
        ];
        let smoothed = smooth_path(&moves, &smoothing(), &machine()).unwrap();
        assert_eq!(smoothed.len(), 2);
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_empty_path() {
        let smoothed = smooth_path(&[], &smoothing(), &machine()).unwrap();
        assert!(smoothed.is_empty());
    }
}
