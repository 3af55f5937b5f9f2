//! The raw path data structure.

use crate::math::{point, Box2D, Point};
use crate::PathEvent;

use alloc::vec::Vec;
use core::fmt;

/// The verb stream stored by [RawPath](struct.RawPath.html).
///
/// The number of points consumed by each verb is determined by the verb
/// itself: `Begin` and `LineTo` take one, `QuadraticTo` two, `CubicTo`
/// three, `Close` and `End` none.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    Begin,
    LineTo,
    QuadraticTo,
    CubicTo,
    Close,
    End,
}

/// A simple path data structure: a buffer of verbs and a buffer of points.
///
/// ```ascii
///  ________________________________________
/// |       |        |         |       |     |
/// | Begin | LineTo |QuadraticTo| ... |Close|
/// |_______|________|_________|_______|_____|
///  ________________________________________
/// |         |       |        |       |
/// |start x,y| to x,y|ctrl x,y| to x,y| ...
/// |_________|_______|________|_______|_
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RawPath {
    points: Vec<Point>,
    verbs: Vec<Verb>,
}

impl RawPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        RawPath {
            points: Vec::new(),
            verbs: Vec::new(),
        }
    }

    /// Creates a [Builder](struct.Builder.html) to construct a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Iterates over the entire path as a sequence of events.
    pub fn iter(&self) -> Iter {
        Iter {
            points: &self.points,
            verbs: &self.verbs,
            point_idx: 0,
            verb_idx: 0,
            first: point(0.0, 0.0),
            current: point(0.0, 0.0),
        }
    }

    /// A conservative axis-aligned bounding box of the path.
    ///
    /// Control points are included, so the box can be larger than the
    /// curves themselves but never smaller.
    pub fn bounding_box(&self) -> Box2D {
        if self.points.is_empty() {
            return Box2D::zero();
        }
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Box2D { min, max }
    }
}

impl fmt::Debug for RawPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'l> IntoIterator for &'l RawPath {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;
    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// Builds a [RawPath](struct.RawPath.html).
///
/// Sub-paths are delimited by `move_to`/`close`. A segment issued without a
/// sub-path in progress starts one at the current position (initially the
/// origin), and `build` terminates any sub-path left open.
#[derive(Clone, Default)]
pub struct Builder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    in_subpath: bool,
    current: Point,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            points: Vec::new(),
            verbs: Vec::new(),
            in_subpath: false,
            current: point(0.0, 0.0),
        }
    }

    pub fn with_capacity(num_points: usize, num_verbs: usize) -> Self {
        Builder {
            points: Vec::with_capacity(num_points),
            verbs: Vec::with_capacity(num_verbs),
            in_subpath: false,
            current: point(0.0, 0.0),
        }
    }

    pub fn move_to(&mut self, to: Point) {
        self.end_if_needed();
        self.points.push(to);
        self.verbs.push(Verb::Begin);
        self.in_subpath = true;
        self.current = to;
    }

    pub fn line_to(&mut self, to: Point) {
        self.begin_if_needed();
        self.points.push(to);
        self.verbs.push(Verb::LineTo);
        self.current = to;
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.begin_if_needed();
        self.points.push(ctrl);
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);
        self.current = to;
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.begin_if_needed();
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
        self.current = to;
    }

    pub fn close(&mut self) {
        if self.in_subpath {
            self.verbs.push(Verb::Close);
            self.in_subpath = false;
        }
    }

    pub fn build(mut self) -> RawPath {
        self.end_if_needed();
        RawPath {
            points: self.points,
            verbs: self.verbs,
        }
    }

    fn begin_if_needed(&mut self) {
        if !self.in_subpath {
            let at = self.current;
            self.move_to(at);
        }
    }

    fn end_if_needed(&mut self) {
        if self.in_subpath {
            self.verbs.push(Verb::End);
            self.in_subpath = false;
        }
    }
}

/// An iterator of `PathEvent`s over a [RawPath](struct.RawPath.html).
#[derive(Clone)]
pub struct Iter<'l> {
    points: &'l [Point],
    verbs: &'l [Verb],
    point_idx: usize,
    verb_idx: usize,
    first: Point,
    current: Point,
}

impl<'l> Iter<'l> {
    fn next_point(&mut self) -> Point {
        let p = self.points[self.point_idx];
        self.point_idx += 1;
        p
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if self.verb_idx >= self.verbs.len() {
            return None;
        }
        let verb = self.verbs[self.verb_idx];
        self.verb_idx += 1;
        match verb {
            Verb::Begin => {
                let at = self.next_point();
                self.first = at;
                self.current = at;
                Some(PathEvent::Begin { at })
            }
            Verb::LineTo => {
                let from = self.current;
                let to = self.next_point();
                self.current = to;
                Some(PathEvent::Line { from, to })
            }
            Verb::QuadraticTo => {
                let from = self.current;
                let ctrl = self.next_point();
                let to = self.next_point();
                self.current = to;
                Some(PathEvent::Quadratic { from, ctrl, to })
            }
            Verb::CubicTo => {
                let from = self.current;
                let ctrl1 = self.next_point();
                let ctrl2 = self.next_point();
                let to = self.next_point();
                self.current = to;
                Some(PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                })
            }
            Verb::Close => Some(PathEvent::End {
                last: self.current,
                first: self.first,
                close: true,
            }),
            Verb::End => Some(PathEvent::End {
                last: self.current,
                first: self.first,
                close: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn simple_path() {
        let mut builder = RawPath::builder();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
        builder.cubic_bezier_to(point(2.0, 2.0), point(1.0, 2.0), point(0.0, 2.0));
        builder.close();
        let path = builder.build();

        let events: std::vec::Vec<PathEvent> = path.iter().collect();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], PathEvent::Begin { at: point(0.0, 0.0) });
        assert_eq!(
            events[1],
            PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(1.0, 0.0)
            }
        );
        assert_eq!(
            events[4],
            PathEvent::End {
                last: point(0.0, 2.0),
                first: point(0.0, 0.0),
                close: true,
            }
        );
    }

    #[test]
    fn open_subpath_gets_ended() {
        let mut builder = RawPath::builder();
        builder.move_to(point(1.0, 1.0));
        builder.line_to(point(2.0, 1.0));
        builder.move_to(point(5.0, 5.0));
        builder.line_to(point(6.0, 5.0));
        let path = builder.build();

        let events: std::vec::Vec<PathEvent> = path.iter().collect();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[2],
            PathEvent::End {
                last: point(2.0, 1.0),
                first: point(1.0, 1.0),
                close: false,
            }
        );
        assert_eq!(
            events[5],
            PathEvent::End {
                last: point(6.0, 5.0),
                first: point(5.0, 5.0),
                close: false,
            }
        );
    }

    #[test]
    fn segment_without_move_to() {
        let mut builder = RawPath::builder();
        builder.line_to(point(1.0, 0.0));
        builder.line_to(point(1.0, 1.0));
        builder.close();
        let path = builder.build();

        let events: std::vec::Vec<PathEvent> = path.iter().collect();
        assert_eq!(events[0], PathEvent::Begin { at: point(0.0, 0.0) });
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn bounding_box() {
        let mut builder = RawPath::builder();
        builder.move_to(point(1.0, -1.0));
        builder.quadratic_bezier_to(point(4.0, 3.0), point(2.0, 2.0));
        let path = builder.build();

        let aabb = path.bounding_box();
        assert_eq!(aabb.min, point(1.0, -1.0));
        assert_eq!(aabb.max, point(4.0, 3.0));

        assert_eq!(RawPath::new().bounding_box(), Box2D::zero());
    }
}
