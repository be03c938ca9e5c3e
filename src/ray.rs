//! Intersection of path segments with a horizontal ray
//!
//! The ray starts at the test point and is directed toward increasing `x`. A segment
//! crosses the ray when exactly one of its ends lies strictly above the ray (half-open
//! rule), so a vertex shared by two segments is never counted twice. Curves are split at
//! their `y` extremity and the rule is applied to each monotonic piece. Independently of
//! that rule the test point lying exactly on a segment is always reported, as a hit
//! located at the test point itself.
use crate::{ArrayIter, BBox, Curve, Line, Point, Quad, Scalar, Segment};

/// Point at which a segment meets the ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Point,
    /// `-1` if the segment (or its monotonic piece) goes toward increasing `y` at the hit,
    /// `1` if it goes the other way, `0` for touches and segments lying on the ray
    pub winding: i32,
}

impl RayHit {
    fn new(point: Point, winding: i32) -> Self {
        Self { point, winding }
    }
}

/// Hits of a segment with the ray, at most two of them
pub type RayCrossing = ArrayIter<[Option<RayHit>; 2]>;

/// Intersection with a horizontal ray
pub trait RayCross {
    /// Find points at which the ray starting at `point` meets the curve
    ///
    /// Only hits with `x >= point.x()` are reported.
    fn ray_cross(&self, point: Point) -> RayCrossing;
}

/// Winding of a crossing with a piece going from `y0` to `y1`
fn winding(y0: Scalar, y1: Scalar) -> i32 {
    if y1 > y0 { -1 } else { 1 }
}

impl RayCross for Line {
    /// Returns both ends of the line if it lies on the ray, regardless of their `x`.
    fn ray_cross(&self, point: Point) -> RayCrossing {
        let mut result = RayCrossing::new();
        let Line([p0, p1]) = *self;
        let Point([px, py]) = point;
        let (y0, y1) = (p0.y() - py, p1.y() - py);
        if y0 == 0.0 && y1 == 0.0 {
            result.push(RayHit::new(p0, 0));
            result.push(RayHit::new(p1, 0));
            return result;
        }
        let crosses = (y0 > 0.0) != (y1 > 0.0);
        let x = if y0 == 0.0 {
            p0.x()
        } else if y1 == 0.0 {
            p1.x()
        } else if crosses {
            let t = y0 / (y0 - y1);
            p0.x() + t * (p1.x() - p0.x())
        } else {
            return result;
        };
        if x == px || (crosses && x > px) {
            let winding = if crosses { winding(y0, y1) } else { 0 };
            result.push(RayHit::new(Point::new(x, py), winding));
        }
        result
    }
}

impl RayCross for Quad {
    /// Returns the test point alone if it lies on the curve, otherwise one crossing per
    /// monotonic piece of the curve. A curve lying flat on the ray reports only a touch
    /// (when the test point is on it), never its ends.
    fn ray_cross(&self, point: Point) -> RayCrossing {
        let mut result = RayCrossing::new();
        let Quad([p0, p1, p2]) = *self;
        // move the ray to the positive half of `x` axis
        let quad = Quad([p0 - point, p1 - point, p2 - point]);
        let Quad([q0, q1, q2]) = quad;

        if q0.y() == 0.0 && q1.y() == 0.0 && q2.y() == 0.0 {
            // curve lies on the ray
            let bbox = quad.bbox(None);
            if bbox.min().x() <= 0.0 && 0.0 <= bbox.max().x() {
                result.push(RayHit::new(point, 0));
            }
            return result;
        }

        let touches = (q0.y() == 0.0 && q0.x() == 0.0)
            || (q2.y() == 0.0 && q2.x() == 0.0)
            || quad.roots().any(|t| quad.at(t).x() == 0.0);
        if touches {
            result.push(RayHit::new(point, 0));
            return result;
        }

        let pieces = match quad.y_extremity() {
            Some(te) => {
                let (head, tail) = quad.split_at(te);
                [Some(head), Some(tail)]
            }
            None => [Some(quad), None],
        };
        for piece in pieces.into_iter().flatten() {
            let Quad([a, _, b]) = piece;
            if (a.y() > 0.0) == (b.y() > 0.0) {
                continue;
            }
            let x = piece.at(piece_crossing(&piece)).x();
            if x > 0.0 {
                let hit = Point::new(point.x() + x, point.y());
                result.push(RayHit::new(hit, winding(a.y(), b.y())));
            }
        }
        result
    }
}

impl RayCross for Segment {
    fn ray_cross(&self, point: Point) -> RayCrossing {
        match self {
            Segment::Line(line) => line.ray_cross(point),
            Segment::Quad(quad) => quad.ray_cross(point),
        }
    }
}

/// Find parameter at which monotonic piece of the curve crosses `x` axis
///
/// Ends of the piece must be on the opposite sides of `x` axis (or one of them on it).
fn piece_crossing(piece: &Quad) -> Scalar {
    let Quad([a, _, b]) = *piece;
    if a.y() == 0.0 {
        return 0.0;
    }
    if b.y() == 0.0 {
        return 1.0;
    }
    match piece.roots().next() {
        Some(t) => t,
        // root was rounded out of the piece, it is at the end closest to the axis
        None if a.y().abs() < b.y().abs() => 0.0,
        None => 1.0,
    }
}

/// Bounding box of the hit points, `None` if there are no hits
pub fn crossing_bbox(crossing: &RayCrossing) -> Option<BBox> {
    crossing.clone().fold(None, |bbox: Option<BBox>, hit| {
        Some(BBox::new(hit.point, hit.point).union_opt(bbox))
    })
}
