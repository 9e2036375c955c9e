//! Geometry kernel: 7-axis points, displacement vectors and circular arcs.
//!
//! Pure value types and their algebra. No machine state, no I/O.

mod arc;
mod fillet;
mod point;

pub use arc::Arc;
pub use fillet::{fillet_7d, CornerBlend};
pub use point::{Point, Vector, AXES, EQ_EPSILON};
