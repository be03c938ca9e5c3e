//! Point in path test
//!
//! Casts a horizontal ray from the point toward increasing `x` and accumulates signed
//! crossings of the ray with the segments of the path, which is the nonzero fill rule
//! collapsed to a boolean. Points on the boundary of the path are considered to be inside,
//! such points stop the traversal as soon as they are detected.
use crate::{Line, Path, Point, Quad, RayCross, RayCrossing, Segment, crossing_bbox};
use std::ops::ControlFlow;

/// Position of a point relative to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    Outside,
    Inside,
    /// Point lies exactly on one of the segments
    Boundary,
}

impl Containment {
    /// Boundary is considered to be a part of the path
    pub fn is_inside(self) -> bool {
        !matches!(self, Containment::Outside)
    }
}

/// Determine if the point is inside of the path or on its boundary
pub fn is_inside_path(path: &Path, point: Point) -> bool {
    point_containment(path, point).is_inside()
}

/// Classify point relative to the path
pub fn point_containment(path: &Path, point: Point) -> Containment {
    match crossing_count(path, point) {
        None => Containment::Boundary,
        Some(0) => Containment::Outside,
        Some(_) => Containment::Inside,
    }
}

/// Signed number of crossings of the path with the ray casted from the point
///
/// Crossing going toward increasing `y` decrements the counter, the other way increments
/// it. Returns `None` if the point is on the boundary of the path, in which case the path
/// is not traversed any further.
pub fn crossing_count(path: &Path, point: Point) -> Option<i32> {
    let mut counter = 0;
    for segment in path.segments() {
        match segment_crossing(segment, point) {
            ControlFlow::Continue(delta) => counter += delta,
            ControlFlow::Break(()) => {
                tracing::trace!(?point, ?segment, "[contain] point is on the boundary");
                return None;
            }
        }
    }
    tracing::trace!(?point, counter, "[contain] ray crossings");
    Some(counter)
}

impl Path {
    /// Determine if the point is inside of the path or on its boundary
    pub fn contains(&self, point: impl Into<Point>) -> bool {
        is_inside_path(self, point.into())
    }

    /// Classify point relative to the path
    pub fn containment(&self, point: impl Into<Point>) -> Containment {
        point_containment(self, point.into())
    }
}

/// Contribution of a single segment to the crossing counter, breaks on boundary
fn segment_crossing(segment: Segment, point: Point) -> ControlFlow<(), i32> {
    match segment {
        Segment::Line(line) => line_crossing(line, point),
        Segment::Quad(quad) => quad_crossing(quad, point),
    }
}

fn line_crossing(line: Line, point: Point) -> ControlFlow<(), i32> {
    let crossing = line.ray_cross(point);
    match crossing.len() {
        // line lies on the ray
        2 => match crossing_bbox(&crossing) {
            Some(bbox) if bbox.min().x() <= point.x() && point.x() <= bbox.max().x() => {
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(0),
        },
        _ => hits_crossing(crossing, point),
    }
}

fn quad_crossing(quad: Quad, point: Point) -> ControlFlow<(), i32> {
    // two crossings of the same curve come from its two monotonic pieces and cancel out
    hits_crossing(quad.ray_cross(point), point)
}

/// Sum of windings of the hits, breaks if any of them is at the test point
fn hits_crossing(mut crossing: RayCrossing, point: Point) -> ControlFlow<(), i32> {
    crossing.try_fold(0, |delta, hit| {
        if hit.point.x() == point.x() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(delta + hit.winding)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve, Scalar};

    fn square() -> Path {
        Path::builder()
            .move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .line_to((10.0, 10.0))
            .line_to((0.0, 10.0))
            .close()
            .build()
    }

    #[test]
    fn test_square() {
        let path = square();
        assert!(is_inside_path(&path, Point::new(5.0, 5.0)));
        assert!(!is_inside_path(&path, Point::new(15.0, 5.0)));
        assert!(!is_inside_path(&path, Point::new(-1.0, -1.0)));
        assert_eq!(crossing_count(&path, Point::new(5.0, 5.0)), Some(-1));
        assert_eq!(crossing_count(&path, Point::new(-5.0, 5.0)), Some(0));
    }

    #[test]
    fn test_boundary() {
        let path = square();
        // edge
        assert!(path.contains((10.0, 5.0)));
        assert_eq!(path.containment((10.0, 5.0)), Containment::Boundary);
        // vertices
        assert_eq!(path.containment((0.0, 0.0)), Containment::Boundary);
        assert_eq!(path.containment((10.0, 10.0)), Containment::Boundary);
        assert_eq!(path.containment((0.0, 10.0)), Containment::Boundary);
        // horizontal edge
        assert_eq!(path.containment((5.0, 10.0)), Containment::Boundary);
        // closing edge
        assert_eq!(path.containment((0.0, 3.0)), Containment::Boundary);
        assert_eq!(path.containment((5.0, 5.0)), Containment::Inside);
        assert_eq!(path.containment((5.0, 10.5)), Containment::Outside);
    }

    #[test]
    fn test_horizontal_overlap() {
        // U shape, with horizontal edge at y=5 spanning x in [2, 8]
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .line_to((10.0, 10.0))
            .line_to((8.0, 10.0))
            .line_to((8.0, 5.0))
            .line_to((2.0, 5.0))
            .line_to((2.0, 10.0))
            .line_to((0.0, 10.0))
            .close()
            .build();
        assert_eq!(path.containment((5.0, 5.0)), Containment::Boundary);
        assert_eq!(path.containment((9.0, 5.0)), Containment::Inside);
        assert_eq!(path.containment((5.0, 6.0)), Containment::Outside);

        // the same edge does not force anything outside of its span
        let path = Path::builder()
            .move_to((2.0, 0.0))
            .line_to((8.0, 0.0))
            .line_to((8.0, 5.0))
            .line_to((2.0, 5.0))
            .close()
            .build();
        assert_eq!(path.containment((5.0, 5.0)), Containment::Boundary);
        assert_eq!(path.containment((9.0, 5.0)), Containment::Outside);
        assert_eq!(path.containment((1.0, 5.0)), Containment::Outside);
    }

    #[test]
    fn test_curve() {
        // right side bows outward, reaching x=15 at y=5
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .quad_to((20.0, 5.0), (10.0, 10.0))
            .line_to((0.0, 10.0))
            .close()
            .build();
        assert!(path.contains((14.0, 5.0)));
        assert!(!path.contains((16.0, 5.0)));
        assert!(path.contains((12.0, 2.5)));
        assert!(path.contains((12.0, 7.5)));
        assert!(!path.contains((14.0, 1.0)));
        assert_eq!(path.containment((15.0, 5.0)), Containment::Boundary);
        assert_eq!(path.containment((10.0, 10.0)), Containment::Boundary);
    }

    #[test]
    fn test_curve_double_crossing() {
        // top side dips down to y=10 in the middle
        let dip = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((30.0, 0.0))
            .line_to((30.0, 20.0))
            .quad_to((15.0, 0.0), (0.0, 20.0))
            .close()
            .build();
        let flat = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((30.0, 0.0))
            .line_to((30.0, 20.0))
            .line_to((0.0, 20.0))
            .close()
            .build();
        // the curve is crossed twice, it does not contribute anything
        let quad = Quad::new((30.0, 20.0), (15.0, 0.0), (0.0, 20.0));
        assert_eq!(quad.ray_cross(Point::new(2.0, 15.0)).len(), 2);
        assert_eq!(quad_crossing(quad, Point::new(2.0, 15.0)), ControlFlow::Continue(0));
        for point in [Point::new(2.0, 15.0), Point::new(-5.0, 15.0)] {
            assert_eq!(crossing_count(&dip, point), crossing_count(&flat, point));
        }
        assert!(dip.contains((2.0, 15.0)));
        assert!(dip.contains((28.0, 15.0)));
        assert!(!dip.contains((5.0, 15.0)));
        assert!(!dip.contains((15.0, 15.0)));
        assert!(!dip.contains((-5.0, 15.0)));
        assert!(dip.contains((15.0, 5.0)));
    }

    #[test]
    fn test_curve_start_on_ray() {
        // quarter round corner starting at the level of the test point
        let path = Path::builder()
            .move_to((0.0, -10.0))
            .line_to((10.0, -10.0))
            .line_to((10.0, 0.0))
            .quad_to((10.0, 10.0), (0.0, 10.0))
            .close()
            .build();
        assert!(path.contains((5.0, 0.0)));
        assert_eq!(crossing_count(&path, Point::new(-5.0, 0.0)), Some(0));
        assert!(!path.contains((-5.0, 0.0)));
        assert!(!path.contains((12.0, 0.0)));
    }

    #[test]
    fn test_curve_crossed_behind_point() {
        // the ray meets the curve twice at some heights, one of the crossings is to the left
        let path = arch();
        assert_eq!(crossing_count(&path, Point::new(0.0, 0.0)), Some(0));
        assert!(!path.contains((0.0, 0.0)));
        assert!(!path.contains((0.0, 1e-9)));
        assert!(!path.contains((5.0, 3.0)));
        assert!(!path.contains((-5.0, 0.0)));
        assert!(path.contains((0.0, 20.0)));
        assert!(path.contains((5.0, 10.0)));
        assert_eq!(crossing_count(&path, Point::new(-5.0, 5.0)), Some(-1));
        assert_eq!(path.containment((10.0, 0.0)), Containment::Boundary);
    }

    #[test]
    fn test_holes() {
        let outer = [(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0)];
        let inner = [(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0)];
        let polygon = |builder: &mut crate::PathBuilder, points: &[(Scalar, Scalar)]| {
            builder.move_to(points[0]);
            for point in &points[1..] {
                builder.line_to(*point);
            }
            builder.close();
        };

        // opposite direction, inner square is a hole
        let mut builder = Path::builder();
        polygon(&mut builder, &outer);
        let mut inner_rev = inner;
        inner_rev.reverse();
        polygon(&mut builder, &inner_rev);
        let path = builder.build();
        assert!(!path.contains((15.0, 15.0)));
        assert!(path.contains((5.0, 15.0)));
        assert!(path.contains((25.0, 15.0)));
        assert!(path.contains((10.0, 15.0)));

        // the same direction, winding is 2 inside of the inner square
        let mut builder = Path::builder();
        polygon(&mut builder, &outer);
        polygon(&mut builder, &inner);
        let path = builder.build();
        assert!(path.contains((15.0, 15.0)));
        assert_eq!(crossing_count(&path, Point::new(15.0, 15.0)), Some(-2));
        assert!(!path.reverse().contains((35.0, 15.0)));
        assert_eq!(crossing_count(&path.reverse(), Point::new(15.0, 15.0)), Some(2));
    }

    #[test]
    fn test_degenerate() {
        assert!(!Path::empty().contains((0.0, 0.0)));
        // zero length segments and coincident control points
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((0.0, 0.0))
            .quad_to((0.0, 0.0), (10.0, 0.0))
            .quad_to((10.0, 10.0), (10.0, 10.0))
            .line_to((0.0, 10.0))
            .close()
            .build();
        assert!(path.contains((5.0, 5.0)));
        assert!(!path.contains((-5.0, 5.0)));
        assert!(path.contains((0.0, 0.0)));
        // unclosed path never panics
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((10.0, 10.0))
            .build();
        assert_eq!(crossing_count(&path, Point::new(0.0, 5.0)), Some(-1));
        assert!(!path.contains((20.0, 5.0)));
        assert_eq!(path.containment((5.0, 5.0)), Containment::Boundary);
    }

    #[test]
    fn test_idempotent() {
        let path = square();
        let points = [(5.0, 5.0), (10.0, 5.0), (15.0, 5.0), (-1.0, -1.0)];
        let first: Vec<_> = points.iter().map(|p| path.containment(*p)).collect();
        for _ in 0..3 {
            let again: Vec<_> = points.iter().map(|p| path.containment(*p)).collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_parallel() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Path>();
        assert_send_sync::<Segment>();

        let path = glyph_o();
        let points: Vec<_> = Rng::new(7).points(&path, 256);
        let reference: Vec<_> = points.iter().map(|p| path.contains(*p)).collect();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| points.iter().map(|p| path.contains(*p)).collect::<Vec<_>>()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), reference);
            }
        });
    }

    /// Rounded "O" made of quads, the counter goes in the opposite direction
    fn glyph_o() -> Path {
        let mut builder = Path::builder();
        builder
            .move_to((50.0, 0.0))
            .quad_to((100.0, 0.0), (100.0, 60.0))
            .quad_to((100.0, 120.0), (50.0, 120.0))
            .quad_to((0.0, 120.0), (0.0, 60.0))
            .quad_to((0.0, 0.0), (50.0, 0.0))
            .close()
            .move_to((50.0, 20.0))
            .quad_to((20.0, 20.0), (20.0, 60.0))
            .quad_to((20.0, 100.0), (50.0, 100.0))
            .quad_to((80.0, 100.0), (80.0, 60.0))
            .quad_to((80.0, 20.0), (50.0, 20.0))
            .close();
        builder.build()
    }

    /// Blob with curves crossed twice by horizontal rays and an overlapping contour
    fn glyph_blob() -> Path {
        let mut builder = Path::builder();
        builder
            .move_to((0.0, 0.0))
            .line_to((60.0, 0.0))
            .quad_to((90.0, 40.0), (60.0, 80.0))
            .quad_to((30.0, 20.0), (0.0, 80.0))
            .quad_to((-20.0, 40.0), (0.0, 0.0))
            .close()
            .move_to((40.0, 30.0))
            .quad_to((100.0, 50.0), (40.0, 70.0))
            .line_to((40.0, 30.0))
            .close();
        builder.build()
    }

    /// Arch whose bottom side is a curve going up and then down to the level of its start
    fn arch() -> Path {
        Path::builder()
            .move_to((-10.0, -10.0))
            .quad_to((0.0, 20.0), (10.0, 0.0))
            .line_to((10.0, 30.0))
            .line_to((-10.0, 30.0))
            .close()
            .build()
    }

    /// Skewed lens made of two curves, with a square hole cut through one of them
    fn lens() -> Path {
        let mut builder = Path::builder();
        builder
            .move_to((0.0, 0.0))
            .quad_to((80.0, 90.0), (40.0, -20.0))
            .quad_to((-30.0, 40.0), (0.0, 0.0))
            .close()
            .move_to((20.0, 10.0))
            .line_to((20.0, 30.0))
            .line_to((40.0, 30.0))
            .line_to((40.0, 10.0))
            .close();
        builder.build()
    }

    /// Xorshift generator, good enough to scatter test points
    struct Rng(u64);

    impl Rng {
        fn new(seed: u64) -> Self {
            Self(seed.wrapping_mul(0x9E3779B97F4A7C15) | 1)
        }

        fn next(&mut self) -> Scalar {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 11) as Scalar / (1u64 << 53) as Scalar
        }

        /// Random points in the bounding box of the path grown by 10%
        fn points(&mut self, path: &Path, count: usize) -> Vec<Point> {
            let bbox = path.bbox().unwrap();
            let (w, h) = (bbox.width() * 1.2, bbox.height() * 1.2);
            let origin = bbox.min() - Point::new(bbox.width() * 0.1, bbox.height() * 0.1);
            (0..count)
                .map(|_| origin + Point::new(self.next() * w, self.next() * h))
                .collect()
        }
    }

    /// Path converted to a polygon with many short lines
    fn tessellate(path: &Path) -> Vec<Line> {
        const STEPS: usize = 256;
        path.segments()
            .flat_map(|segment| {
                let steps = match segment {
                    Segment::Line(_) => 1,
                    Segment::Quad(_) => STEPS,
                };
                (0..steps).map(move |i| {
                    let t0 = i as Scalar / steps as Scalar;
                    let t1 = (i + 1) as Scalar / steps as Scalar;
                    Line::new(segment.at(t0), segment.at(t1))
                })
            })
            .collect()
    }

    /// Plain winding number of the polygon around the point
    fn polygon_winding(lines: &[Line], p: Point) -> i32 {
        let mut winding = 0;
        for Line([p0, p1]) in lines {
            let side = (p1.x() - p0.x()) * (p.y() - p0.y()) - (p.x() - p0.x()) * (p1.y() - p0.y());
            if p0.y() <= p.y() {
                if p1.y() > p.y() && side > 0.0 {
                    winding += 1;
                }
            } else if p1.y() <= p.y() && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    fn polygon_distance(lines: &[Line], p: Point) -> Scalar {
        lines
            .iter()
            .map(|Line([p0, p1])| {
                let d = *p1 - *p0;
                let len = d.x() * d.x() + d.y() * d.y();
                let t = if len == 0.0 {
                    0.0
                } else {
                    (((p.x() - p0.x()) * d.x() + (p.y() - p0.y()) * d.y()) / len).clamp(0.0, 1.0)
                };
                let q = *p0 + t * d - p;
                q.x().hypot(q.y())
            })
            .fold(Scalar::INFINITY, Scalar::min)
    }

    #[test]
    fn test_against_polygon() {
        let paths = [glyph_o(), glyph_blob(), square(), arch(), lens()];
        for (seed, path) in (1..).zip(paths) {
            let lines = tessellate(&path);
            let mut checked = 0;
            for point in Rng::new(seed).points(&path, 2000) {
                if polygon_distance(&lines, point) < 0.01 {
                    continue;
                }
                checked += 1;
                let expected = polygon_winding(&lines, point) != 0;
                assert_eq!(path.contains(point), expected, "point: {:?}", point);
            }
            assert!(checked > 1900);
        }
    }

    #[test]
    fn test_outside_bbox() {
        for (seed, path) in [(4, glyph_o()), (5, glyph_blob())] {
            let bbox = path.bbox().unwrap();
            let mut rng = Rng::new(seed);
            for point in rng.points(&path, 2000) {
                if !bbox.contains(point) {
                    assert!(!path.contains(point), "point: {:?}", point);
                }
            }
            // on the lines of the bounding box sides
            let max = bbox.max();
            for i in 0..=20 {
                let y = bbox.min().y() + bbox.height() * i as Scalar / 20.0;
                assert!(!path.contains((bbox.min().x() - 1.0, y)));
                assert!(!path.contains((max.x() + 1.0, y)));
            }
        }
    }
}
