use crate::{BBox, Curve, Line, Point, Quad, Segment};
use std::fmt;

/// Single drawing command of a path
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCmd {
    /// Start new subpath at the point
    MoveTo(Point),
    /// Line from the current position to the point
    LineTo(Point),
    /// Quadratic bezier curve from the current position, with control point and end point
    QuadTo(Point, Point),
    /// Close current subpath with the line to its start
    Close,
}

/// Ordered list of drawing commands.
///
/// Commands are resolved against the current position, which starts at the origin.
/// Each subpath is expected to be closed, either explicitly with `PathCmd::Close` or by
/// returning to its start point, but this is never validated.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cmds.is_empty() {
            return write!(f, "Empty");
        }
        for cmd in self.cmds.iter() {
            match cmd {
                PathCmd::MoveTo(p) => writeln!(f, "M{:?}", p)?,
                PathCmd::LineTo(p) => writeln!(f, "L{:?}", p)?,
                PathCmd::QuadTo(p1, p2) => writeln!(f, "Q{:?} {:?}", p1, p2)?,
                PathCmd::Close => writeln!(f, "Z")?,
            }
        }
        Ok(())
    }
}

impl Path {
    /// Create path from the list of commands
    pub fn new(cmds: Vec<PathCmd>) -> Self {
        Self { cmds }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Convenience method to create `PathBuilder`
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Iterator over drawable segments of the path in order
    ///
    /// Segments are produced lazily, so dropping the iterator early stops the traversal.
    pub fn segments(&self) -> PathSegmentIter<'_> {
        PathSegmentIter::new(self)
    }

    pub fn segments_count(&self) -> usize {
        self.segments().count()
    }

    /// Bounding box of the path, `None` if the path has no segments
    pub fn bbox(&self) -> Option<BBox> {
        self.segments()
            .fold(None, |bbox: Option<BBox>, segment| Some(segment.bbox(bbox)))
    }

    /// Same path with the direction of each subpath reversed
    pub fn reverse(&self) -> Self {
        let mut cmds = Vec::with_capacity(self.cmds.len());
        let mut subpath: Vec<Segment> = Vec::new();
        let mut position = Point::default();
        let mut start = position;
        for cmd in self.cmds.iter() {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    reverse_subpath(&mut cmds, &mut subpath, false);
                    position = p;
                    start = p;
                }
                PathCmd::LineTo(p) => {
                    subpath.push(Line::new(position, p).into());
                    position = p;
                }
                PathCmd::QuadTo(p1, p2) => {
                    subpath.push(Quad::new(position, p1, p2).into());
                    position = p2;
                }
                PathCmd::Close => {
                    if position != start {
                        subpath.push(Line::new(position, start).into());
                    }
                    reverse_subpath(&mut cmds, &mut subpath, true);
                    position = start;
                }
            }
        }
        reverse_subpath(&mut cmds, &mut subpath, false);
        Path::new(cmds)
    }
}

/// Emit commands of the reversed subpath, leaving `subpath` empty
fn reverse_subpath(cmds: &mut Vec<PathCmd>, subpath: &mut Vec<Segment>, closed: bool) {
    let Some(last) = subpath.last() else {
        return;
    };
    cmds.push(PathCmd::MoveTo(last.end()));
    for segment in subpath.drain(..).rev() {
        match segment.reverse() {
            Segment::Line(Line([_, p1])) => cmds.push(PathCmd::LineTo(p1)),
            Segment::Quad(Quad([_, p1, p2])) => cmds.push(PathCmd::QuadTo(p1, p2)),
        }
    }
    if closed {
        cmds.push(PathCmd::Close);
    }
}

impl IntoIterator for Path {
    type Item = PathCmd;
    type IntoIter = <Vec<PathCmd> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathCmd;
    type IntoIter = <&'a Vec<PathCmd> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

impl Extend<PathCmd> for Path {
    fn extend<T: IntoIterator<Item = PathCmd>>(&mut self, iter: T) {
        self.cmds.extend(iter)
    }
}

impl FromIterator<PathCmd> for Path {
    fn from_iter<T: IntoIterator<Item = PathCmd>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Iterator over segments of the path, created by `Path::segments`
pub struct PathSegmentIter<'a> {
    path: &'a Path,
    /// index of the next command
    cmd: usize,
    /// current position
    position: Point,
    /// start of the current subpath
    start: Point,
}

impl<'a> PathSegmentIter<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            cmd: 0,
            position: Point::new(0.0, 0.0),
            start: Point::new(0.0, 0.0),
        }
    }
}

impl Iterator for PathSegmentIter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cmd = self.path.cmds.get(self.cmd)?;
            self.cmd += 1;
            match *cmd {
                PathCmd::MoveTo(p) => {
                    self.position = p;
                    self.start = p;
                }
                PathCmd::LineTo(p) => {
                    let line = Line::new(self.position, p);
                    self.position = p;
                    return Some(line.into());
                }
                PathCmd::QuadTo(p1, p2) => {
                    let quad = Quad::new(self.position, p1, p2);
                    self.position = p2;
                    return Some(quad.into());
                }
                PathCmd::Close => {
                    let position = std::mem::replace(&mut self.position, self.start);
                    if position != self.start {
                        return Some(Line::new(position, self.start).into());
                    }
                }
            }
        }
    }
}

/// Path builder similar to Canvas/Cairo interface.
#[derive(Clone, Default)]
pub struct PathBuilder {
    position: Point,
    start: Point,
    cmds: Vec<PathCmd>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build path
    pub fn build(&mut self) -> Path {
        let PathBuilder { cmds, .. } = std::mem::take(self);
        Path::new(cmds)
    }

    /// Move current position, starting new subpath
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        self.position = p;
        self.start = p;
        self.cmds.push(PathCmd::MoveTo(p));
        self
    }

    /// Close current subpath
    pub fn close(&mut self) -> &mut Self {
        self.position = self.start;
        self.cmds.push(PathCmd::Close);
        self
    }

    /// Add line from the current position to the specified point
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        self.position = p;
        self.cmds.push(PathCmd::LineTo(p));
        self
    }

    /// Add quadratic bezier curve
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        let p2 = p2.into();
        self.position = p2;
        self.cmds.push(PathCmd::QuadTo(p1.into(), p2));
        self
    }

    /// Current position of the builder
    pub fn position(&self) -> Point {
        self.position
    }
}

#[cfg(feature = "serde")]
impl Path {
    /// Load path from its JSON representation, a list of commands
    pub fn load_json(input: impl std::io::Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(input)?)
    }
}

/// Error produced while loading a path
#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
}

#[cfg(feature = "serde")]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for Error {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

#[cfg(feature = "serde")]
impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}
