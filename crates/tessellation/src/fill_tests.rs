use crate::geometry_builder::TriangleVertex;
use crate::grout::GroutTriangleList;
use crate::math::{point, Point};
use crate::path::RawPath;
use crate::{
    FillOptions, FillRule, TriangulationError, Triangulator, UnsupportedParameter,
};

use alloc::vec::Vec;
use core::f32::consts::PI;
use std::collections::HashMap;

fn polygon(points: &[Point]) -> RawPath {
    let mut builder = RawPath::builder();
    builder.move_to(points[0]);
    for p in &points[1..] {
        builder.line_to(*p);
    }
    builder.close();
    builder.build()
}

fn triangulate(
    path: &RawPath,
    options: &FillOptions,
) -> (Vec<TriangleVertex>, crate::Triangulation, GroutTriangleList) {
    let mut buffer: Vec<TriangleVertex> = Vec::new();
    let mut triangulator = Triangulator::new();
    let result = triangulator.triangulate(path, options, &mut buffer).unwrap();
    assert_eq!(result.vertex_count, buffer.len());
    assert_eq!(buffer.len() % 3, 0);
    (buffer, result, triangulator.take_grout())
}

fn triangles(buffer: &[TriangleVertex]) -> Vec<[Point; 3]> {
    buffer
        .chunks(3)
        .map(|tri| {
            [
                point(tri[0].x, tri[0].y),
                point(tri[1].x, tri[1].y),
                point(tri[2].x, tri[2].y),
            ]
        })
        .collect()
}

fn signed_area(tri: &[Point; 3]) -> f64 {
    let ax = tri[1].x as f64 - tri[0].x as f64;
    let ay = tri[1].y as f64 - tri[0].y as f64;
    let bx = tri[2].x as f64 - tri[0].x as f64;
    let by = tri[2].y as f64 - tri[0].y as f64;
    (ax * by - ay * bx) * 0.5
}

fn polygon_area(points: &[Point]) -> f64 {
    let mut area = 0.0;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        area += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    area * 0.5
}

fn point_in_triangle(p: Point, tri: &[Point; 3]) -> bool {
    let sign = |a: Point, b: Point| -> f32 {
        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
    };
    let d0 = sign(tri[0], tri[1]);
    let d1 = sign(tri[1], tri[2]);
    let d2 = sign(tri[2], tri[0]);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

fn covered(tris: &[[Point; 3]], p: Point) -> bool {
    tris.iter().any(|tri| point_in_triangle(p, tri))
}

/// Accumulates the directed-edge 1-chain of a set of triangles: each edge
/// p -> q counts +1 and cancels against q -> p.
fn add_edges(chain: &mut HashMap<([u32; 2], [u32; 2]), i64>, tris: &[[Point; 3]]) {
    let key = |p: Point| [p.x.to_bits(), p.y.to_bits()];
    for tri in tris {
        for i in 0..3 {
            let p = key(tri[i]);
            let q = key(tri[(i + 1) % 3]);
            if let Some(opposite) = chain.get_mut(&(q, p)) {
                *opposite -= 1;
                if *opposite == 0 {
                    chain.remove(&(q, p));
                }
                continue;
            }
            *chain.entry((p, q)).or_insert(0) += 1;
        }
    }
}

#[test]
fn fill_unit_square() {
    let square = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let path = polygon(&square);
    let options = FillOptions::non_zero().with_path_id(42);
    let (buffer, result, grout) = triangulate(&path, &options);

    assert_eq!(result.vertex_count, 6);
    assert!(result.is_linear);
    assert!(grout.is_empty());
    for vertex in &buffer {
        assert_eq!(vertex.path_id, 42);
        assert_eq!(vertex.weight, 1);
    }

    let tris = triangles(&buffer);
    let total: f64 = tris.iter().map(signed_area).sum();
    assert!((total.abs() - 1.0).abs() < 1e-6);
    // Both triangles wind the same way.
    assert_eq!(
        tris.iter().filter(|t| signed_area(t) > 0.0).count(),
        if signed_area(&tris[0]) > 0.0 { 2 } else { 0 }
    );
    // The emitted triangles cover exactly the square boundary.
    let mut chain = HashMap::new();
    add_edges(&mut chain, &tris);
    assert_eq!(chain.len(), 4);

    assert!(covered(&tris, point(0.5, 0.5)));
    assert!(covered(&tris, point(0.01, 0.99)));
    assert!(!covered(&tris, point(1.5, 0.5)));
}

#[test]
fn fill_bowtie() {
    // A self-intersecting quad. The two diagonals cross at (0.5, 0.5),
    // leaving a left and a right lobe with windings of opposite signs and
    // two uncovered center regions.
    let bowtie = [
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
        point(0.0, 1.0),
    ];
    let path = polygon(&bowtie);

    for options in &[FillOptions::even_odd(), FillOptions::non_zero()] {
        let (buffer, result, _) = triangulate(&path, options);
        assert_eq!(result.vertex_count, 6, "{:?}", options.fill_rule);
        let tris = triangles(&buffer);

        // Lobes are covered...
        assert!(covered(&tris, point(0.1, 0.5)));
        assert!(covered(&tris, point(0.9, 0.5)));
        // ...the center regions are not.
        assert!(!covered(&tris, point(0.5, 0.25)));
        assert!(!covered(&tris, point(0.5, 0.75)));

        let total: f64 = tris.iter().map(|t| signed_area(t).abs()).sum();
        assert!((total - 0.5).abs() < 1e-6);
    }
}

#[test]
fn fill_circle_64() {
    let mut points = Vec::new();
    for i in 0..64 {
        let angle = i as f32 / 64.0 * 2.0 * PI;
        points.push(point(angle.cos() * 100.0, angle.sin() * 100.0));
    }
    let path = polygon(&points);
    let (buffer, result, _) = triangulate(&path, &FillOptions::non_zero());

    assert_eq!(result.vertex_count, 62 * 3);
    let tris = triangles(&buffer);
    let areas: Vec<f64> = tris.iter().map(signed_area).collect();
    // Consistent orientation all the way around.
    assert!(areas.iter().all(|a| *a > 0.0) || areas.iter().all(|a| *a < 0.0));
    let total: f64 = areas.iter().sum();
    assert!(
        (total.abs() - polygon_area(&points).abs()).abs() < 1e-3,
        "triangle area {} vs polygon area {}",
        total,
        polygon_area(&points)
    );
}

#[test]
fn shared_edge_contours_produce_no_grout() {
    // Two overlapping contours sharing an edge exactly: the coincident
    // vertices and edges merge instead of splitting, so the sweep records
    // no grout.
    let mut builder = RawPath::builder();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.line_to(point(0.0, 2.0));
    builder.close();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.line_to(point(0.5, 0.5));
    builder.close();
    let path = builder.build();

    let options = FillOptions::even_odd().with_grout();
    let (buffer, _, grout) = triangulate(&path, &options);
    assert!(grout.is_empty());

    // Both contours wind the same way, so the doubly-wound inner triangle
    // drops out under even-odd.
    let tris = triangles(&buffer);
    assert!(!covered(&tris, point(0.3, 0.1)));
    assert!(covered(&tris, point(0.25, 1.0)));
    assert!(!covered(&tris, point(1.5, 1.5)));

    // Non-zero keeps the whole outer triangle.
    let (buffer, _, _) = triangulate(&path, &FillOptions::non_zero());
    let tris = triangles(&buffer);
    assert!(covered(&tris, point(0.3, 0.1)));
    assert!(covered(&tris, point(0.25, 1.0)));
}

#[test]
fn triangulation_is_deterministic() {
    // A pentagram: five crossings for the sweep to resolve.
    let mut points = Vec::new();
    for i in 0..5 {
        let angle = (2 * i) as f32 / 5.0 * 2.0 * PI + 0.1;
        points.push(point(angle.cos() * 100.0 + 0.3, angle.sin() * 100.0 + 0.7));
    }
    let path = polygon(&points);
    let options = FillOptions::even_odd().with_grout();

    let (first, _, first_grout) = triangulate(&path, &options);
    let (second, _, second_grout) = triangulate(&path, &options);
    assert_eq!(first, second);
    assert_eq!(first_grout.count(), second_grout.count());
    let pairs = first_grout.iter().zip(second_grout.iter());
    for (a, b) in pairs {
        assert_eq!(a, b);
    }
}

#[test]
fn sweep_direction_invariance() {
    // An L shape, much wider than tall, and its transpose. The wide one is
    // swept horizontally, the tall one vertically; both cover the same
    // amount of area.
    let wide = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 2.0),
        point(8.0, 2.0),
        point(8.0, 1.0),
        point(0.0, 1.0),
    ];
    let tall: Vec<Point> = wide.iter().map(|p| point(p.y, p.x)).collect();

    let (wide_buffer, _, _) = triangulate(&polygon(&wide), &FillOptions::non_zero());
    let (tall_buffer, _, _) = triangulate(&polygon(&tall), &FillOptions::non_zero());

    let wide_area: f64 = triangles(&wide_buffer)
        .iter()
        .map(|t| signed_area(t).abs())
        .sum();
    let tall_area: f64 = triangles(&tall_buffer)
        .iter()
        .map(|t| signed_area(t).abs())
        .sum();
    assert!((wide_area - 12.0).abs() < 1e-5, "wide area {}", wide_area);
    assert!((tall_area - 12.0).abs() < 1e-5, "tall area {}", tall_area);
}

#[test]
fn grout_restores_original_boundary() {
    // The fill triangles plus the grout triangles must reduce, as a
    // directed-edge chain, to exactly the original polygon boundary. This
    // is what makes a curve pass, grout, and inner triangulation sum to
    // the same stencil coverage as a winding-rule fan.
    let bowtie = [
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
        point(0.0, 1.0),
    ];
    let path = polygon(&bowtie);
    let options = FillOptions::non_zero().with_grout();
    let (buffer, _, grout) = triangulate(&path, &options);
    assert_eq!(grout.count(), 2);

    let mut chain = HashMap::new();
    add_edges(&mut chain, &triangles(&buffer));
    let grout_tris: Vec<[Point; 3]> = grout.iter().copied().collect();
    add_edges(&mut chain, &grout_tris);

    let key = |p: Point| [p.x.to_bits(), p.y.to_bits()];
    let mut expected = HashMap::new();
    for i in 0..bowtie.len() {
        let p = bowtie[i];
        let q = bowtie[(i + 1) % bowtie.len()];
        expected.insert((key(p), key(q)), 1i64);
    }
    assert_eq!(chain, expected);
}

#[test]
fn overlapping_squares_winding_two() {
    let mut builder = RawPath::builder();
    for offset in &[0.0, 1.0] {
        builder.move_to(point(0.0 + offset, 0.0 + offset));
        builder.line_to(point(0.0 + offset, 2.0 + offset));
        builder.line_to(point(2.0 + offset, 2.0 + offset));
        builder.line_to(point(2.0 + offset, 0.0 + offset));
        builder.close();
    }
    let path = builder.build();

    let non_zero = FillOptions::non_zero().with_grout();
    let (nz_buffer, _, nz_grout) = triangulate(&path, &non_zero);
    let nz_tris = triangles(&nz_buffer);
    // The union is covered, including the doubly-wound overlap.
    assert!(covered(&nz_tris, point(0.5, 0.5)));
    assert!(covered(&nz_tris, point(1.5, 1.5)));
    assert!(covered(&nz_tris, point(2.5, 2.5)));
    assert!(!covered(&nz_tris, point(2.5, 0.5)));

    let even_odd = FillOptions::even_odd().with_grout();
    let (eo_buffer, _, eo_grout) = triangulate(&path, &even_odd);
    let eo_tris = triangles(&eo_buffer);
    // The overlap has winding two, which even-odd excludes.
    assert!(covered(&eo_tris, point(0.5, 0.5)));
    assert!(!covered(&eo_tris, point(1.5, 1.5)));
    assert!(covered(&eo_tris, point(2.5, 2.5)));

    // The edge crossings produced grout either way, and the doubly-wound
    // region produced supplemental grout only when it was emitted.
    assert!(!eo_grout.is_empty());
    assert!(nz_grout.count() > eo_grout.count());
}

#[test]
fn clockwise_fill_rule() {
    let forward = [
        point(0.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
    ];
    let reversed: Vec<Point> = forward.iter().rev().copied().collect();

    let options = FillOptions::non_zero().with_fill_rule(FillRule::Clockwise);
    let (buffer, result, _) = triangulate(&polygon(&forward), &options);
    assert_eq!(result.vertex_count, 6);
    assert!(covered(&triangles(&buffer), point(0.5, 0.5)));

    let (_, result, _) = triangulate(&polygon(&reversed), &options);
    assert_eq!(result.vertex_count, 0);

    // Non-zero accepts both orientations.
    let (_, result, _) = triangulate(&polygon(&reversed), &FillOptions::non_zero());
    assert_eq!(result.vertex_count, 6);
}

#[test]
fn degenerate_paths() {
    let empty = RawPath::new();
    let (_, result, _) = triangulate(&empty, &FillOptions::default());
    assert_eq!(result.vertex_count, 0);
    assert!(result.is_linear);

    let mut builder = RawPath::builder();
    builder.move_to(point(1.0, 1.0));
    builder.close();
    let (_, result, _) = triangulate(&builder.build(), &FillOptions::default());
    assert_eq!(result.vertex_count, 0);

    let line = polygon(&[point(0.0, 0.0), point(1.0, 0.0)]);
    let (_, result, _) = triangulate(&line, &FillOptions::default());
    assert_eq!(result.vertex_count, 0);

    let collinear = polygon(&[point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)]);
    let (_, result, _) = triangulate(&collinear, &FillOptions::default());
    assert_eq!(result.vertex_count, 0);
}

#[test]
fn nan_tolerance_is_rejected() {
    let path = polygon(&[point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0)]);
    let mut buffer: Vec<TriangleVertex> = Vec::new();
    let mut triangulator = Triangulator::new();
    assert_eq!(
        triangulator.triangulate(
            &path,
            &FillOptions::tolerance(f32::NAN),
            &mut buffer
        ),
        Err(TriangulationError::UnsupportedParameter(
            UnsupportedParameter::ToleranceIsNaN
        )),
    );
}

#[test]
fn quadratic_fill_is_not_linear() {
    let mut builder = RawPath::builder();
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(50.0, 80.0), point(100.0, 0.0));
    builder.close();
    let path = builder.build();

    let (buffer, result, _) = triangulate(&path, &FillOptions::tolerance(0.1));
    assert!(!result.is_linear);
    assert!(result.vertex_count >= 3);
    let tris = triangles(&buffer);
    // A point well inside the curved region.
    assert!(covered(&tris, point(50.0, 20.0)));
    assert!(!covered(&tris, point(50.0, -5.0)));
}

#[test]
fn fill_rule_options() {
    assert_eq!(FillOptions::default().fill_rule, FillRule::NonZero);
    assert_eq!(FillOptions::even_odd().fill_rule, FillRule::EvenOdd);
    let options = FillOptions::tolerance(0.5)
        .with_path_id(7)
        .with_reversed_triangles()
        .with_grout();
    assert_eq!(options.tolerance, 0.5);
    assert_eq!(options.path_id, 7);
    assert!(options.reverse_triangles);
    assert!(options.collect_grout);
}

#[test]
fn reversed_triangles_flip_orientation() {
    let square = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let path = polygon(&square);
    let (forward, _, _) = triangulate(&path, &FillOptions::non_zero());
    let (reversed, _, _) =
        triangulate(&path, &FillOptions::non_zero().with_reversed_triangles());

    let forward_total: f64 = triangles(&forward).iter().map(signed_area).sum();
    let reversed_total: f64 = triangles(&reversed).iter().map(signed_area).sum();
    assert!((forward_total + reversed_total).abs() < 1e-9);
    assert!(forward_total.abs() > 0.5);
}
