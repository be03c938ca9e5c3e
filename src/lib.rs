//! Point in path hit testing for paths made of lines and quadratic bezier curves.
//!
//! Main features:
//!  - Nonzero point containment with boundary points treated as inside
//!  - Path construction from commands, builder or TrueType style glyph contours
//!  - Path loading from JSON (`serde` feature)
//!
#![deny(warnings)]

mod contain;
mod curve;
mod geometry;
mod glyph;
mod path;
mod ray;
mod utils;

pub use contain::{Containment, crossing_count, is_inside_path, point_containment};
pub use curve::{Curve, CurveExtremities, CurveRoots, Line, Quad, Segment};
pub use geometry::{BBox, EPSILON, Point, Scalar, scalar_fmt};
pub use glyph::ContourPoint;
#[cfg(feature = "serde")]
pub use path::Error;
pub use path::{Path, PathBuilder, PathCmd, PathSegmentIter};
pub use ray::{RayCross, RayCrossing, RayHit, crossing_bbox};
pub use utils::ArrayIter;
use utils::quadratic_solve;
