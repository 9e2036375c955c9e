//! Circular arc displacement.
//!
//! An [`Arc`] is stored as its chord (the straight 7-axis displacement from
//! start to end) plus `sdir`, the unit spatial tangent at the start point.
//! Radius, sweep angle and arc length all derive from those two. The tail
//! components (rotary and auxiliary axes) ride along the chord and are
//! interpolated linearly over the sweep.

use core::f64::consts::PI;

use libm::{acos, sin, sqrt, tan};

use crate::error::GeometryError;

use super::point::{Point, Vector};

/// Sine threshold below which chord and tangent count as colinear.
const COLINEAR_EPSILON: f64 = 1e-9;

/// A circular arc between two points, tangent-continuous at its start.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    vector: Vector,
    sdir: [f64; 3],
}

impl Arc {
    /// Build an arc from its chord vector and start tangent direction.
    ///
    /// `sdir` is normalized; only its spatial part is used. Fails when the
    /// chord has no spatial extent or is colinear with the tangent (the
    /// radius would be undefined).
    pub fn new(vector: Vector, sdir: Vector) -> Result<Self, GeometryError> {
        let sdir = sdir.spatial_unit()?;
        if vector.len() < COLINEAR_EPSILON {
            return Err(GeometryError::ZeroLength);
        }
        let arc = Self { vector, sdir };
        let half_angle = arc.chord().angle_between3(&arc.sdir_vector());
        if sin(half_angle).abs() < COLINEAR_EPSILON {
            return Err(GeometryError::ColinearTangents);
        }
        Ok(arc)
    }

    /// Build an arc from a chord, a rotation axis and a radius.
    ///
    /// The start tangent is derived by rotating the chord's unit direction by
    /// `acos(chord_len/(2·radius)) − π/2` about `axis`. Fails when the chord
    /// is longer than the arc diameter.
    pub fn from_vector_axis_radius(
        vector: Vector,
        axis: &Vector,
        radius: f64,
    ) -> Result<Self, GeometryError> {
        let chord_len = vector.len();
        if chord_len > 2.0 * radius {
            return Err(GeometryError::ChordExceedsDiameter {
                chord: chord_len,
                diameter: 2.0 * radius,
            });
        }
        let gamma = acos(chord_len / (2.0 * radius)) - PI / 2.0;
        let sdir = vector.rotate3(axis, gamma)?;
        Self::new(vector, sdir)
    }

    /// The chord as a spatial-only vector.
    pub fn chord(&self) -> Vector {
        Vector::from_slice(&self.vector.spatial())
    }

    /// Spatial chord length.
    pub fn chord_len(&self) -> f64 {
        self.vector.len()
    }

    /// The full chord displacement, including rotary and auxiliary components.
    pub fn vector(&self) -> Vector {
        self.vector
    }

    /// The unit start tangent.
    pub fn sdir(&self) -> [f64; 3] {
        self.sdir
    }

    fn sdir_vector(&self) -> Vector {
        Vector::from_slice(&self.sdir)
    }

    /// Sweep angle in radians: twice the angle between chord and start tangent.
    pub fn angle(&self) -> f64 {
        2.0 * self.chord().angle_between3(&self.sdir_vector())
    }

    /// Arc radius derived from chord length and sweep angle.
    pub fn radius(&self) -> f64 {
        let half_angle = self.chord().angle_between3(&self.sdir_vector());
        (self.chord_len() / (2.0 * sin(half_angle))).abs()
    }

    /// Spatial arc length (radius · sweep angle).
    pub fn len(&self) -> f64 {
        self.radius() * self.angle()
    }

    /// Full-magnitude norm: hypot of the arc length and the tail components.
    ///
    /// The straight-move counterpart is [`Vector::norm`]; both measure total
    /// actuation, not spatial travel.
    pub fn norm(&self) -> f64 {
        let c = self.vector.components();
        let mut s = self.len() * self.len();
        for v in &c[3..] {
            s += v * v;
        }
        sqrt(s)
    }

    /// Unit tangent direction at fraction `p ∈ [0, 1]` of the arc.
    pub fn dir(&self, p: f64) -> Result<Vector, GeometryError> {
        let axis = self.sdir_vector().cross3(&self.chord());
        let rotated = self.sdir_vector().rotate3(&axis, self.angle() * p)?;
        rotated.unit()
    }

    /// The point at fraction `p ∈ [0, 1]` of arc length from the start.
    ///
    /// The spatial part sweeps the circle; the tail components interpolate
    /// linearly with `p`.
    pub fn eval(&self, p: f64) -> Result<Point, GeometryError> {
        let axis = self.sdir_vector().cross3(&self.chord());
        let center = self.sdir_vector().rotate3(&axis, PI / 2.0)? * self.radius();
        let swept = (-center).rotate3(&axis, self.angle() * p)?;
        let spatial = swept + center;
        let tail = self.vector * p;
        let mut c = tail.components();
        let s = spatial.components();
        c[0] = s[0];
        c[1] = s[1];
        c[2] = s[2];
        Ok(Point::new(c))
    }

    /// Fillet two joined displacement vectors with an arc of radius `radius`.
    ///
    /// Returns the trimmed incoming vector, the blending arc and the trimmed
    /// outgoing vector. All 7 axes of each input are scaled by the same trim
    /// factor, so the triple reconstructs the exact 7-axis total of the
    /// untrimmed pair. Fails when the trim length exceeds either input.
    pub fn fillet(
        t1: &Vector,
        t2: &Vector,
        radius: f64,
    ) -> Result<(Vector, Self, Vector), GeometryError> {
        let len1 = t1.len();
        let len2 = t2.len();
        if len1 < COLINEAR_EPSILON || len2 < COLINEAR_EPSILON {
            return Err(GeometryError::ZeroLength);
        }
        let alpha = PI - t1.angle_between3(t2);
        let trim = radius / tan(alpha / 2.0);
        if trim > len1 || trim > len2 {
            return Err(GeometryError::TrimExceedsLength {
                trim,
                incoming: len1,
                outgoing: len2,
            });
        }
        let trimmed_in = *t1 * ((len1 - trim) / len1);
        let trimmed_out = *t2 * ((len2 - trim) / len2);
        let chord = (*t1 + *t2 * (trim / len2)) - trimmed_in;
        let arc = Self::new(chord, trimmed_in)?;
        Ok((trimmed_in, arc, trimmed_out))
    }

    /// Fillet two joined vectors given a maximum corner-to-arc distance.
    ///
    /// The sagitta converts to a radius via `r = d·sin(α/2)/(1 − sin(α/2))`
    /// with α the supplementary angle between the inputs.
    pub fn fillet_by_distance(
        t1: &Vector,
        t2: &Vector,
        sagitta: f64,
    ) -> Result<(Vector, Self, Vector), GeometryError> {
        let alpha = PI - t1.angle_between3(t2);
        let s = sin(alpha / 2.0);
        let radius = sagitta * s / (1.0 - s);
        Self::fillet(t1, t2, radius)
    }
}

impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector
            && Vector::from_slice(&self.sdir) == Vector::from_slice(&other.sdir)
    }
}
