//! Linearization of path curves into contours.
//!
//! Quadratic and cubic béziers are subdivided recursively until the control
//! points deviate from the chord by less than the flattening tolerance.
//! Cubics additionally carry a point budget derived from a conservative
//! flatness estimate, halved at each subdivision level, which bounds the
//! recursion on adversarial curves. Curves that do not touch the clip
//! bounds are collapsed to a single segment: the contour must stay closed,
//! but off-screen geometry does not need a faithful approximation.

use crate::math::{Box2D, Point};
use crate::mesh::{MeshArena, VertexList};
use stencil_path::{PathEvent, RawPath};

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

const MAX_POINTS_PER_CURVE: i32 = 1 << 12;

/// Converts a path into one circular-list-to-be contour per sub-path.
///
/// Returns the contours and whether the path contained only line segments.
pub(crate) fn path_to_contours(
    arena: &mut MeshArena,
    path: &RawPath,
    tolerance: f32,
    clip_bounds: Box2D,
) -> (Vec<VertexList>, bool) {
    let tolerance_sqd = tolerance * tolerance;
    let mut contours = Vec::new();
    let mut contour = VertexList::new();
    let mut is_linear = true;

    for event in path.iter() {
        match event {
            PathEvent::Begin { at } => {
                append_point(arena, at, &mut contour);
            }
            PathEvent::Line { to, .. } => {
                append_point(arena, to, &mut contour);
            }
            PathEvent::Quadratic { from, ctrl, to } => {
                is_linear = false;
                if curve_outside(&[from, ctrl, to], &clip_bounds) {
                    append_point(arena, to, &mut contour);
                } else {
                    let budget = point_budget(ctrl_distance(&[from, ctrl, to]), tolerance);
                    append_quadratic(arena, [from, ctrl, to], tolerance_sqd, &mut contour, budget);
                }
            }
            PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                is_linear = false;
                let pts = [from, ctrl1, ctrl2, to];
                if curve_outside(&pts, &clip_bounds) {
                    append_point(arena, to, &mut contour);
                } else {
                    let budget = point_budget(ctrl_distance(&pts), tolerance);
                    append_cubic(arena, pts, tolerance_sqd, &mut contour, budget);
                }
            }
            PathEvent::End { .. } => {
                // Both explicit and implicit closes produce a closed
                // contour; fills ignore the distinction.
                if !contour.is_empty() {
                    contours.push(contour);
                }
                contour = VertexList::new();
            }
        }
    }
    debug_assert!(contour.is_empty());

    (contours, is_linear)
}

fn append_point(arena: &mut MeshArena, p: Point, contour: &mut VertexList) {
    let v = arena.make_vertex(p, 255);
    contour.append(arena, v);
}

fn append_quadratic(
    arena: &mut MeshArena,
    p: [Point; 3],
    tolerance_sqd: f32,
    contour: &mut VertexList,
    points_left: i32,
) {
    let d = distance_to_segment_sqd(p[1], p[0], p[2]);
    if points_left < 2 || d < tolerance_sqd || !d.is_finite() {
        append_point(arena, p[2], contour);
        return;
    }
    let ab = midpoint(p[0], p[1]);
    let bc = midpoint(p[1], p[2]);
    let abc = midpoint(ab, bc);
    let points_left = points_left >> 1;
    append_quadratic(arena, [p[0], ab, abc], tolerance_sqd, contour, points_left);
    append_quadratic(arena, [abc, bc, p[2]], tolerance_sqd, contour, points_left);
}

fn append_cubic(
    arena: &mut MeshArena,
    p: [Point; 4],
    tolerance_sqd: f32,
    contour: &mut VertexList,
    points_left: i32,
) {
    let d1 = distance_to_segment_sqd(p[1], p[0], p[3]);
    let d2 = distance_to_segment_sqd(p[2], p[0], p[3]);
    if points_left < 2 || (d1 < tolerance_sqd && d2 < tolerance_sqd) || !d1.is_finite() || !d2.is_finite() {
        append_point(arena, p[3], contour);
        return;
    }
    let ab = midpoint(p[0], p[1]);
    let bc = midpoint(p[1], p[2]);
    let cd = midpoint(p[2], p[3]);
    let abc = midpoint(ab, bc);
    let bcd = midpoint(bc, cd);
    let abcd = midpoint(abc, bcd);
    let points_left = points_left >> 1;
    append_cubic(arena, [p[0], ab, abc, abcd], tolerance_sqd, contour, points_left);
    append_cubic(arena, [abcd, bcd, cd, p[3]], tolerance_sqd, contour, points_left);
}

/// Conservative bound on the number of points needed to flatten a curve
/// whose control points are at most `d` away from the chord.
fn point_budget(d: f32, tolerance: f32) -> i32 {
    if !d.is_finite() {
        return MAX_POINTS_PER_CURVE;
    }
    if d <= tolerance {
        return 1;
    }
    let estimate = (d / tolerance).sqrt().ceil();
    if !estimate.is_finite() {
        return MAX_POINTS_PER_CURVE;
    }
    let mut pow2 = 1;
    while pow2 < estimate as i32 && pow2 < MAX_POINTS_PER_CURVE {
        pow2 <<= 1;
    }
    pow2
}

fn ctrl_distance(pts: &[Point]) -> f32 {
    let first = pts[0];
    let last = pts[pts.len() - 1];
    let mut d: f32 = 0.0;
    for p in &pts[1..pts.len() - 1] {
        d = d.max(distance_to_segment_sqd(*p, first, last));
    }
    d.sqrt()
}

fn curve_outside(pts: &[Point], clip: &Box2D) -> bool {
    let mut min = pts[0];
    let mut max = pts[0];
    for p in &pts[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    min.x > clip.max.x || max.x < clip.min.x || min.y > clip.max.y || max.y < clip.min.y
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

fn distance_to_segment_sqd(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let len_sqd = ab.square_length();
    if len_sqd == 0.0 {
        return ap.square_length();
    }
    let t = (ap.dot(ab) / len_sqd).max(0.0).min(1.0);
    let proj = a + ab * t;
    (p - proj).square_length()
}

fn collinear(p0: Point, p1: Point, p2: Point) -> bool {
    let d = (p1.x as f64 - p0.x as f64) * (p2.y as f64 - p0.y as f64)
        - (p1.y as f64 - p0.y as f64) * (p2.x as f64 - p0.x as f64);
    d == 0.0
}

/// Removes coincident, non-finite and (optionally) collinear vertices from
/// the contours. Collinear vertices are kept when the triangulation needs
/// to preserve the original edges, i.e. while collecting grout.
pub(crate) fn sanitize_contours(
    arena: &mut MeshArena,
    contours: &mut [VertexList],
    preserve_collinear: bool,
) {
    for contour in contours.iter_mut() {
        if contour.head.is_none() {
            continue;
        }
        let mut prev = contour.tail;
        let mut v = contour.head;
        while v.is_some() {
            let next = arena[v].next;
            let next_wrap = if next.is_some() { next } else { contour.head };
            let p = arena[v].point;
            if p == arena[prev].point {
                contour.remove(arena, v);
            } else if !p.x.is_finite() || !p.y.is_finite() {
                contour.remove(arena, v);
            } else if !preserve_collinear
                && next_wrap != v
                && collinear(arena[prev].point, p, arena[next_wrap].point)
            {
                contour.remove(arena, v);
            } else {
                prev = v;
            }
            v = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use stencil_path::RawPath;

    fn contour_points(arena: &MeshArena, contour: &VertexList) -> std::vec::Vec<Point> {
        let mut points = std::vec::Vec::new();
        let mut v = contour.head;
        while v.is_some() {
            points.push(arena[v].point);
            v = arena[v].next;
        }
        points
    }

    fn big_clip() -> Box2D {
        Box2D {
            min: point(-1000.0, -1000.0),
            max: point(1000.0, 1000.0),
        }
    }

    #[test]
    fn lines_only() {
        let mut builder = RawPath::builder();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.line_to(point(1.0, 1.0));
        builder.close();
        let path = builder.build();

        let mut arena = MeshArena::new();
        let (contours, is_linear) = path_to_contours(&mut arena, &path, 0.1, big_clip());
        assert!(is_linear);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contour_points(&arena, &contours[0]),
            alloc::vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]
        );
    }

    #[test]
    fn quadratic_meets_tolerance() {
        let mut builder = RawPath::builder();
        builder.move_to(point(0.0, 0.0));
        builder.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));
        builder.close();
        let path = builder.build();

        let mut arena = MeshArena::new();
        let tolerance = 0.25;
        let (contours, is_linear) = path_to_contours(&mut arena, &path, tolerance, big_clip());
        assert!(!is_linear);
        let points = contour_points(&arena, &contours[0]);
        assert!(points.len() > 4);

        // Every flattened vertex must lie within `tolerance` of the curve.
        // Sample the curve densely and check the nearest sample.
        for p in &points {
            let mut best = f32::MAX;
            for i in 0..=1000 {
                let t = i as f32 / 1000.0;
                let mt = 1.0 - t;
                let x = mt * mt * 0.0 + 2.0 * mt * t * 50.0 + t * t * 100.0;
                let y = mt * mt * 0.0 + 2.0 * mt * t * 100.0 + t * t * 0.0;
                let dx = p.x - x;
                let dy = p.y - y;
                best = best.min(dx * dx + dy * dy);
            }
            assert!(best.sqrt() < tolerance + 0.01, "{:?} is off the curve", p);
        }
    }

    #[test]
    fn offscreen_curve_collapses_to_segment() {
        let mut builder = RawPath::builder();
        builder.move_to(point(0.0, 0.0));
        builder.cubic_bezier_to(
            point(5000.0, 2000.0),
            point(6000.0, 2000.0),
            point(5000.0, 0.0),
        );
        builder.close();
        let path = builder.build();

        let clip = Box2D {
            min: point(2000.0, -10.0),
            max: point(3000.0, 10.0),
        };
        let mut arena = MeshArena::new();
        let (contours, _) = path_to_contours(&mut arena, &path, 0.1, clip);
        // The curve's control box is entirely above the clip, so it
        // flattens to its endpoint.
        assert_eq!(
            contour_points(&arena, &contours[0]),
            alloc::vec![point(0.0, 0.0), point(5000.0, 0.0)]
        );
    }

    #[test]
    fn sanitize_removes_coincident_and_collinear() {
        let mut arena = MeshArena::new();
        let mut contour = VertexList::new();
        for &p in &[
            point(0.0, 0.0),
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(2.0, 0.0),
            point(2.0, 2.0),
        ] {
            let v = arena.make_vertex(p, 255);
            contour.append(&mut arena, v);
        }
        let mut contours = [contour];
        sanitize_contours(&mut arena, &mut contours, false);
        assert_eq!(
            contour_points(&arena, &contours[0]),
            alloc::vec![point(0.0, 0.0), point(2.0, 0.0), point(2.0, 2.0)]
        );

        // With collinear preservation only the duplicate goes away.
        let mut arena = MeshArena::new();
        let mut contour = VertexList::new();
        for &p in &[
            point(0.0, 0.0),
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(2.0, 0.0),
            point(2.0, 2.0),
        ] {
            let v = arena.make_vertex(p, 255);
            contour.append(&mut arena, v);
        }
        let mut contours = [contour];
        sanitize_contours(&mut arena, &mut contours, true);
        assert_eq!(contour_points(&arena, &contours[0]).len(), 4);
    }
}
