//! Paths from TrueType style glyph contours
//!
//! A contour is a closed loop of points, each either on the curve or a control point of a
//! quadratic segment. Two consecutive control points imply an on-curve point half way
//! between them.
use crate::{Path, PathBuilder, Point};

/// Point of a glyph contour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContourPoint {
    pub point: Point,
    /// Whether the point lies on the curve or it is a control point
    pub on_curve: bool,
}

impl ContourPoint {
    /// On-curve point
    pub fn on(point: impl Into<Point>) -> Self {
        Self {
            point: point.into(),
            on_curve: true,
        }
    }

    /// Control (off-curve) point
    pub fn off(point: impl Into<Point>) -> Self {
        Self {
            point: point.into(),
            on_curve: false,
        }
    }
}

impl Path {
    /// Build path from the glyph contours, each contour becomes a closed sub-path
    pub fn from_contours<'a, C>(contours: C) -> Path
    where
        C: IntoIterator<Item = &'a [ContourPoint]>,
    {
        let mut builder = PathBuilder::new();
        for contour in contours {
            builder.contour(contour);
        }
        builder.build()
    }
}

impl PathBuilder {
    /// Add closed sub-path described by the glyph contour
    ///
    /// Empty contour is ignored.
    pub fn contour(&mut self, points: &[ContourPoint]) -> &mut Self {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self,
        };
        // contour starts at the first on-curve point, or at the implied point between
        // the last and the first points if all of them are control points
        let (start, rest) = match points.iter().position(|p| p.on_curve) {
            Some(index) => {
                let (head, tail) = points.split_at(index + 1);
                (points[index].point, tail.iter().chain(head))
            }
            None => (last.point.mid(first.point), points[..0].iter().chain(points)),
        };

        self.move_to(start);
        let mut control: Option<Point> = None;
        for p in rest {
            match (p.on_curve, control) {
                (true, None) => {
                    self.line_to(p.point);
                }
                (true, Some(c)) => {
                    self.quad_to(c, p.point);
                    control = None;
                }
                (false, None) => control = Some(p.point),
                (false, Some(c)) => {
                    self.quad_to(c, c.mid(p.point));
                    control = Some(p.point);
                }
            }
        }
        if let Some(c) = control {
            self.quad_to(c, start);
        }
        self.close()
    }
}
