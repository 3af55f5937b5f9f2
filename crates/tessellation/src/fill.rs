//! # Path triangulator
//!
//! Converts arbitrary filled paths, including self-intersecting ones, into
//! a triangle stream suitable for GPU rasterization.
//!
//! There are six stages:
//!
//! 1. Linearize the path contours into piecewise linear segments
//!    (see the `flatten` module).
//! 2. Build a mesh of edges connecting the vertices.
//! 3. Sort the vertices along the sweep direction.
//! 4. Simplify the mesh by inserting new vertices at intersecting edges.
//! 5. Decompose the simplified mesh into monotone polygons.
//! 6. Fan-triangulate the monotone polygons into a
//!    [GeometrySink](../geometry_builder/trait.GeometrySink.html).
//!
//! The vertex sorting in stage 3 is a merge sort, since it plays well with
//! the linked list of vertices and with the need to splice in new vertices
//! when intersections are found.
//!
//! Stages 4 and 5 maintain an active edge list: all edges the sweep line
//! currently crosses, sorted left-to-right at the point where both edges
//! are active. The most involved stage is the simplification. It is a
//! Bentley-Ottmann line sweep, but floating point error means computed
//! intersection points are inexact and may violate the mesh topology or
//! the active edge list ordering. The sweep accommodates this in two ways:
//!
//! - Intersections can leave a shortened edge unordered with respect to
//!   its neighbours at the top or bottom vertex. Such edges are merged
//!   (`merge_collinear_edges`).
//! - Intersections can make an edge violate the left-to-right ordering of
//!   the active edge list. This is detected and answered by rewinding the
//!   sweep to the vertex before the violation (`rewind`,
//!   `rewind_if_necessary`).
//!
//! Stages 5 and 6 follow Fournier & Montuno, "Triangulating Simple
//! Polygons and Equivalent Problems", also a line sweep. A linked list
//! stands in for the paper's 2-3 tree: lookups are O(N) but rare, while
//! insertions and removals, which dominate, are O(1).
//!
//! The sweep direction is chosen from the aspect ratio of the path bounds.
//! Tall paths sort vertices by increasing y and secondarily increasing x;
//! wide paths sort by increasing x and secondarily *decreasing* y, which
//! rotates the frame 90 degrees counterclockwise so that "left" and
//! "right" keep their meaning in the code.

use crate::error::{InternalError, TriangulationError, TriangulationResult, UnsupportedParameter};
use crate::flatten::{path_to_contours, sanitize_contours};
use crate::geometry_builder::{GeometrySink, TriangleVertex};
use crate::grout::GroutTriangleList;
use crate::math::{Box2D, Point};
use crate::mesh::{
    sort_mesh, Comparator, Direction, EdgeId, EdgeList, EdgeType, MeshArena, MonotonePolyId,
    PolyId, Side, VertexId, VertexList,
};
use stencil_path::{FillRule, RawPath};

#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            std::println!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            std::println!($fmt, $($arg)*);
        }
    );
}

#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => {};
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {};
}

/// Parameters for the triangulator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Maximum allowed distance to the path when flattening curves,
    /// in the same units as the path (typically pixels).
    ///
    /// Default value: `FillOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// The fill rule applied to the windings accumulated by the sweep.
    ///
    /// Default value: `NonZero`.
    pub fill_rule: FillRule,

    /// Overrides `fill_rule` during triangle emission only, leaving the
    /// decomposition itself untouched. Renderers use this to emit the same
    /// mesh under a different rule for a stencil pass.
    ///
    /// Default value: `None`.
    pub override_fill_rule: Option<FillRule>,

    /// Curves entirely outside these bounds are flattened to single
    /// segments. Defaults to the path's own bounding box.
    ///
    /// Default value: `None`.
    pub clip_bounds: Option<Box2D>,

    /// Stamped on every emitted vertex so a renderer batching many paths
    /// can route triangles to their fills.
    ///
    /// Default value: `0`.
    pub path_id: u16,

    /// Emits every triangle with the opposite orientation.
    ///
    /// Default value: `false`.
    pub reverse_triangles: bool,

    /// Collects grout triangles while simplifying the mesh. See the
    /// [grout](../grout/index.html) module.
    ///
    /// Enabling this also preserves collinear contour vertices, since the
    /// grout must account for every original edge.
    ///
    /// Default value: `false`.
    pub collect_grout: bool,
}

impl FillOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.1;
    /// Default fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::NonZero;

    pub const DEFAULT: Self = FillOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        fill_rule: Self::DEFAULT_FILL_RULE,
        override_fill_rule: None,
        clip_bounds: None,
        path_id: 0,
        reverse_triangles: false,
        collect_grout: false,
    };

    #[inline]
    pub fn non_zero() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub fn even_odd() -> Self {
        Self::DEFAULT.with_fill_rule(FillRule::EvenOdd)
    }

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    #[inline]
    pub const fn with_override_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.override_fill_rule = Some(fill_rule);
        self
    }

    #[inline]
    pub const fn with_clip_bounds(mut self, clip_bounds: Box2D) -> Self {
        self.clip_bounds = Some(clip_bounds);
        self
    }

    #[inline]
    pub const fn with_path_id(mut self, path_id: u16) -> Self {
        self.path_id = path_id;
        self
    }

    #[inline]
    pub const fn with_reversed_triangles(mut self) -> Self {
        self.reverse_triangles = true;
        self
    }

    #[inline]
    pub const fn with_grout(mut self) -> Self {
        self.collect_grout = true;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Summary of a completed triangulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Triangulation {
    /// Number of vertices pushed into the sink (a multiple of three).
    pub vertex_count: usize,
    /// True when the path contained no curves.
    pub is_linear: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SimplifyResult {
    Failed,
    AlreadySimple,
    FoundSelfIntersection,
}

/// The active edge list and the sweep's current vertex.
///
/// Bundled so the topology-repair helpers can either operate on the live
/// sweep or, during mesh construction when no sweep exists yet, on nothing.
struct Sweep {
    active: EdgeList,
    current: VertexId,
}

/// A context object that triangulates filled paths.
///
/// ## Example
///
/// ```
/// use stencil_path::RawPath;
/// use stencil_path::math::point;
/// use stencil_tessellation::{FillOptions, TriangleVertex, Triangulator};
///
/// let mut builder = RawPath::builder();
/// builder.move_to(point(0.0, 0.0));
/// builder.line_to(point(1.0, 0.0));
/// builder.line_to(point(1.0, 1.0));
/// builder.line_to(point(0.0, 1.0));
/// builder.close();
/// let path = builder.build();
///
/// let mut buffer: Vec<TriangleVertex> = Vec::new();
/// let mut triangulator = Triangulator::new();
/// let result = triangulator
///     .triangulate(&path, &FillOptions::default(), &mut buffer)
///     .unwrap();
/// assert_eq!(result.vertex_count, 6);
/// assert_eq!(buffer.len(), 6);
/// ```
pub struct Triangulator {
    arena: MeshArena,
    grout: GroutTriangleList,
    collect_grout: bool,
    log: bool,
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulator {
    pub fn new() -> Self {
        Triangulator {
            arena: MeshArena::new(),
            grout: GroutTriangleList::new(),
            collect_grout: false,
            log: false,
        }
    }

    /// Enables verbose logging of the sweep, for debugging.
    pub fn set_logging(&mut self, log: bool) {
        self.log = log;
    }

    /// Computes the triangulation of a filled path and writes the triangles
    /// to `sink`.
    ///
    /// On error no usable geometry was produced and the caller should skip
    /// the path. The internal storage is reclaimed either way, so the
    /// triangulator can be reused for the next path.
    pub fn triangulate<S: GeometrySink>(
        &mut self,
        path: &RawPath,
        options: &FillOptions,
        sink: &mut S,
    ) -> TriangulationResult {
        if options.tolerance.is_nan() {
            return Err(TriangulationError::UnsupportedParameter(
                UnsupportedParameter::ToleranceIsNaN,
            ));
        }
        self.arena.clear();
        self.grout = GroutTriangleList::new();
        self.collect_grout = options.collect_grout;

        let path_bounds = path.bounding_box();
        let clip_bounds = options.clip_bounds.unwrap_or(path_bounds);
        let direction = if path_bounds.width() > path_bounds.height() {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let c = Comparator::new(direction);

        let (mut contours, is_linear) =
            path_to_contours(&mut self.arena, path, options.tolerance, clip_bounds);
        let polys = match self.contours_to_polys(&mut contours, &c) {
            Ok(polys) => polys,
            Err(e) => {
                // No partial output: a failed triangulation leaves nothing
                // behind, grout included.
                self.grout = GroutTriangleList::new();
                return Err(e);
            }
        };

        let fill_rule = options.override_fill_rule.unwrap_or(options.fill_rule);
        let max_vertex_count = self.count_points(polys, fill_rule);
        if max_vertex_count > u32::MAX as u64 {
            return Err(InternalError::VertexCountOverflow.into());
        }
        sink.reserve(max_vertex_count as usize);
        let vertex_count = self.polys_to_triangles(
            polys,
            fill_rule,
            options.path_id,
            options.reverse_triangles,
            sink,
        );

        Ok(Triangulation {
            vertex_count,
            is_linear,
        })
    }

    /// Takes the grout triangles collected by the last triangulation,
    /// leaving an empty list behind.
    pub fn take_grout(&mut self) -> GroutTriangleList {
        core::mem::take(&mut self.grout)
    }

    fn contours_to_polys(
        &mut self,
        contours: &mut [VertexList],
        c: &Comparator,
    ) -> Result<PolyId, TriangulationError> {
        sanitize_contours(&mut self.arena, contours, self.collect_grout);
        let mut mesh = VertexList::new();
        self.contours_to_mesh(contours, &mut mesh, c);
        sort_mesh(&mut mesh, &mut self.arena, c);
        self.merge_coincident_vertices(&mut mesh, c);
        if self.simplify(&mut mesh, c) == SimplifyResult::Failed {
            return Err(InternalError::SimplificationFailed.into());
        }
        Ok(self.tessellate(&mesh, c))
    }

    // ------------------------------------------------------------------
    // Stage 2: mesh construction.
    // ------------------------------------------------------------------

    fn contours_to_mesh(
        &mut self,
        contours: &mut [VertexList],
        mesh: &mut VertexList,
        c: &Comparator,
    ) {
        for contour in contours.iter_mut() {
            if contour.head.is_none() {
                continue;
            }
            contour.close(&mut self.arena);
            let head = contour.head;
            let mut prev = contour.tail;
            let mut v = head;
            loop {
                let next = self.arena[v].next;
                self.make_connecting_edge(prev, v, EdgeType::Inner, c, 1);
                mesh.append(&mut self.arena, v);
                prev = v;
                v = next;
                if v == head {
                    break;
                }
            }
        }
    }

    fn make_edge(&mut self, prev: VertexId, next: VertexId, kind: EdgeType, c: &Comparator) -> EdgeId {
        debug_assert!(self.arena[prev].point != self.arena[next].point);
        let winding = if c.sweep_lt(self.arena[prev].point, self.arena[next].point) {
            1
        } else {
            -1
        };
        let (top, bottom) = if winding < 0 { (next, prev) } else { (prev, next) };
        self.arena.make_edge(top, bottom, winding, kind)
    }

    fn make_connecting_edge(
        &mut self,
        prev: VertexId,
        next: VertexId,
        kind: EdgeType,
        c: &Comparator,
        winding_scale: i32,
    ) -> Option<EdgeId> {
        if prev == next || self.arena[prev].point == self.arena[next].point {
            return None;
        }
        let e = self.make_edge(prev, next, kind, c);
        let top = self.arena[e].top;
        let bottom = self.arena[e].bottom;
        self.arena.insert_edge_below(e, top, c);
        self.arena.insert_edge_above(e, bottom, c);
        self.arena[e].winding *= winding_scale;
        self.merge_collinear_edges(e, None, c);
        Some(e)
    }

    // ------------------------------------------------------------------
    // Stage 3: vertex merging after the sort.
    // ------------------------------------------------------------------

    fn merge_coincident_vertices(&mut self, mesh: &mut VertexList, c: &Comparator) -> bool {
        if mesh.head.is_none() {
            return false;
        }
        let mut merged = false;
        let mut v = self.arena[mesh.head].next;
        while v.is_some() {
            let next = self.arena[v].next;
            let prev = self.arena[v].prev;
            if c.sweep_lt(self.arena[v].point, self.arena[prev].point) {
                // Out-of-order due to rounding; snap to the earlier point.
                self.arena[v].point = self.arena[prev].point;
            }
            if self.arena[v].point == self.arena[prev].point {
                self.merge_vertices(v, prev, mesh, c);
                merged = true;
            }
            v = next;
        }
        merged
    }

    fn merge_vertices(
        &mut self,
        src: VertexId,
        dst: VertexId,
        mesh: &mut VertexList,
        c: &Comparator,
    ) {
        tess_log!(
            self,
            "found coincident verts at {:?}; merging",
            self.arena[src].point
        );
        debug_assert!(self.arena[src].point == self.arena[dst].point);
        self.arena[dst].alpha = self.arena[dst].alpha.max(self.arena[src].alpha);
        let mut e = self.arena[src].first_edge_above;
        while e.is_some() {
            let next = self.arena[e].next_edge_above;
            self.set_bottom(e, dst, None, c);
            e = next;
        }
        let mut e = self.arena[src].first_edge_below;
        while e.is_some() {
            let next = self.arena[e].next_edge_below;
            self.set_top(e, dst, None, c);
            e = next;
        }
        mesh.remove(&mut self.arena, src);
        self.arena[dst].synthetic = true;
    }

    // ------------------------------------------------------------------
    // Topology repair shared by mesh construction and the simplify sweep.
    // ------------------------------------------------------------------

    /// Shortens `e` to start at `v`, recording the cut-off section as a
    /// grout triangle.
    fn set_top(&mut self, e: EdgeId, v: VertexId, mut sweep: Option<&mut Sweep>, c: &Comparator) {
        self.arena.remove_edge_below(e);
        if self.collect_grout {
            let a = self.arena[self.arena[e].top].point;
            let b = self.arena[self.arena[e].bottom].point;
            let x = self.arena[v].point;
            self.grout.append(a, b, x, self.arena[e].winding);
        }
        self.arena[e].top = v;
        self.arena.recompute_line(e);
        self.arena.insert_edge_below(e, v, c);
        self.rewind_if_necessary(e, sweep.as_deref_mut(), c);
        self.merge_collinear_edges(e, sweep, c);
    }

    /// Shortens `e` to end at `v`, recording the cut-off section as a
    /// grout triangle.
    fn set_bottom(&mut self, e: EdgeId, v: VertexId, mut sweep: Option<&mut Sweep>, c: &Comparator) {
        self.arena.remove_edge_above(e);
        if self.collect_grout {
            let a = self.arena[self.arena[e].top].point;
            let b = self.arena[self.arena[e].bottom].point;
            let x = self.arena[v].point;
            self.grout.append(a, b, x, self.arena[e].winding);
        }
        self.arena[e].bottom = v;
        self.arena.recompute_line(e);
        self.arena.insert_edge_above(e, v, c);
        self.rewind_if_necessary(e, sweep.as_deref_mut(), c);
        self.merge_collinear_edges(e, sweep, c);
    }

    /// Walks the sweep backwards to `dst`, restoring the active edge list
    /// to the state it had just before `dst` was processed. This is how the
    /// sweep recovers when a computed intersection point lands above the
    /// current position or breaks the active edge ordering.
    fn rewind(&mut self, sweep: Option<&mut Sweep>, dst: VertexId, c: &Comparator) {
        let sweep = match sweep {
            Some(sweep) => sweep,
            None => return,
        };
        if sweep.current.is_none()
            || sweep.current == dst
            || c.sweep_lt(self.arena[sweep.current].point, self.arena[dst].point)
        {
            return;
        }
        let mut v = sweep.current;
        let mut dst = dst;
        tess_log!(
            self,
            "rewinding active edges from {:?} to {:?}",
            self.arena[v].point,
            self.arena[dst].point
        );
        while v != dst {
            v = self.arena[v].prev;
            if v.is_none() {
                break;
            }
            let mut e = self.arena[v].first_edge_below;
            while e.is_some() {
                sweep.active.remove(&mut self.arena, e);
                e = self.arena[e].next_edge_below;
            }
            let mut left_edge = self.arena[v].left_enclosing_edge;
            let mut e = self.arena[v].first_edge_above;
            while e.is_some() {
                sweep.active.insert(&mut self.arena, e, left_edge);
                left_edge = e;
                let top = self.arena[e].top;
                let top_point = self.arena[top].point;
                if c.sweep_lt(top_point, self.arena[dst].point) {
                    let left = self.arena[top].left_enclosing_edge;
                    let right = self.arena[top].right_enclosing_edge;
                    if (left.is_some() && !self.arena.edge_is_left_of(left, top_point))
                        || (right.is_some() && !self.arena.edge_is_right_of(right, top_point))
                    {
                        dst = top;
                    }
                }
                e = self.arena[e].next_edge_above;
            }
        }
        sweep.current = v;
    }

    /// Rewinds if `e` is no longer ordered with respect to its neighbors in
    /// the active edge list.
    fn rewind_if_necessary(&mut self, e: EdgeId, sweep: Option<&mut Sweep>, c: &Comparator) {
        let sweep = match sweep {
            Some(sweep) => sweep,
            None => return,
        };
        let top = self.arena[e].top;
        let bottom = self.arena[e].bottom;
        let top_point = self.arena[top].point;
        let bottom_point = self.arena[bottom].point;

        let left = self.arena[e].left;
        if left.is_some() {
            let left_top = self.arena[left].top;
            let left_bottom = self.arena[left].bottom;
            let left_top_point = self.arena[left_top].point;
            let left_bottom_point = self.arena[left_bottom].point;
            if c.sweep_lt(left_top_point, top_point) && !self.arena.edge_is_left_of(left, top_point)
            {
                self.rewind(Some(&mut *sweep), left_top, c);
            } else if c.sweep_lt(top_point, left_top_point)
                && !self.arena.edge_is_right_of(e, left_top_point)
            {
                self.rewind(Some(&mut *sweep), top, c);
            } else if c.sweep_lt(left_bottom_point, bottom_point)
                && !self.arena.edge_is_left_of(left, bottom_point)
            {
                self.rewind(Some(&mut *sweep), left_top, c);
            } else if c.sweep_lt(bottom_point, left_bottom_point)
                && !self.arena.edge_is_right_of(e, left_bottom_point)
            {
                self.rewind(Some(&mut *sweep), top, c);
            }
        }

        let right = self.arena[e].right;
        if right.is_some() {
            let right_top = self.arena[right].top;
            let right_bottom = self.arena[right].bottom;
            let right_top_point = self.arena[right_top].point;
            let right_bottom_point = self.arena[right_bottom].point;
            if c.sweep_lt(right_top_point, top_point)
                && !self.arena.edge_is_right_of(right, top_point)
            {
                self.rewind(Some(&mut *sweep), right_top, c);
            } else if c.sweep_lt(top_point, right_top_point)
                && !self.arena.edge_is_left_of(e, right_top_point)
            {
                self.rewind(Some(&mut *sweep), top, c);
            } else if c.sweep_lt(right_bottom_point, bottom_point)
                && !self.arena.edge_is_right_of(right, bottom_point)
            {
                self.rewind(Some(&mut *sweep), right_top, c);
            } else if c.sweep_lt(bottom_point, right_bottom_point)
                && !self.arena.edge_is_left_of(e, right_bottom_point)
            {
                self.rewind(Some(&mut *sweep), top, c);
            }
        }
    }

    fn top_collinear(&self, left: EdgeId, right: EdgeId) -> bool {
        if left.is_none() || right.is_none() {
            return false;
        }
        let (lt, rt) = (self.arena[left].top, self.arena[right].top);
        if lt.is_none() || rt.is_none() {
            return false;
        }
        let left_top = self.arena[lt].point;
        let right_top = self.arena[rt].point;
        left_top == right_top
            || !self.arena.edge_is_left_of(left, right_top)
            || !self.arena.edge_is_right_of(right, left_top)
    }

    fn bottom_collinear(&self, left: EdgeId, right: EdgeId) -> bool {
        if left.is_none() || right.is_none() {
            return false;
        }
        let (lb, rb) = (self.arena[left].bottom, self.arena[right].bottom);
        if lb.is_none() || rb.is_none() {
            return false;
        }
        let left_bottom = self.arena[lb].point;
        let right_bottom = self.arena[rb].point;
        left_bottom == right_bottom
            || !self.arena.edge_is_left_of(left, right_bottom)
            || !self.arena.edge_is_right_of(right, left_bottom)
    }

    /// Merges `e` with any neighbor it has become collinear with in its
    /// above/below lists, until none remain.
    fn merge_collinear_edges(&mut self, e: EdgeId, mut sweep: Option<&mut Sweep>, c: &Comparator) {
        loop {
            let prev_above = self.arena[e].prev_edge_above;
            let next_above = self.arena[e].next_edge_above;
            let prev_below = self.arena[e].prev_edge_below;
            let next_below = self.arena[e].next_edge_below;
            if self.top_collinear(prev_above, e) {
                self.merge_edges_above(prev_above, e, sweep.as_deref_mut(), c);
            } else if self.top_collinear(e, next_above) {
                self.merge_edges_above(next_above, e, sweep.as_deref_mut(), c);
            } else if self.bottom_collinear(prev_below, e) {
                self.merge_edges_below(prev_below, e, sweep.as_deref_mut(), c);
            } else if self.bottom_collinear(e, next_below) {
                self.merge_edges_below(next_below, e, sweep.as_deref_mut(), c);
            } else {
                break;
            }
            if self.arena[e].top.is_none() || self.arena[e].bottom.is_none() {
                break;
            }
        }
        debug_assert!(!self.top_collinear(self.arena[e].prev_edge_above, e));
        debug_assert!(!self.top_collinear(e, self.arena[e].next_edge_above));
        debug_assert!(!self.bottom_collinear(self.arena[e].prev_edge_below, e));
        debug_assert!(!self.bottom_collinear(e, self.arena[e].next_edge_below));
    }

    /// Merges two collinear edges that end at the same vertex. The winding
    /// of the disappearing section is folded into the survivor.
    fn merge_edges_above(
        &mut self,
        e: EdgeId,
        other: EdgeId,
        mut sweep: Option<&mut Sweep>,
        c: &Comparator,
    ) {
        let e_top = self.arena[e].top;
        let other_top = self.arena[other].top;
        let e_top_point = self.arena[e_top].point;
        let other_top_point = self.arena[other_top].point;
        if e_top_point == other_top_point {
            tess_log!(
                self,
                "merging coincident above edges at {:?}",
                e_top_point
            );
            self.rewind(sweep.as_deref_mut(), e_top, c);
            self.arena[other].winding += self.arena[e].winding;
            self.arena.disconnect_edge(e);
            self.arena[e].top = VertexId::NONE;
            self.arena[e].bottom = VertexId::NONE;
        } else if c.sweep_lt(e_top_point, other_top_point) {
            self.rewind(sweep.as_deref_mut(), e_top, c);
            self.arena[other].winding += self.arena[e].winding;
            self.set_bottom(e, other_top, sweep, c);
        } else {
            self.rewind(sweep.as_deref_mut(), other_top, c);
            self.arena[e].winding += self.arena[other].winding;
            self.set_bottom(other, e_top, sweep, c);
        }
    }

    /// Merges two collinear edges that start at the same vertex.
    fn merge_edges_below(
        &mut self,
        e: EdgeId,
        other: EdgeId,
        mut sweep: Option<&mut Sweep>,
        c: &Comparator,
    ) {
        let e_top = self.arena[e].top;
        let e_bottom = self.arena[e].bottom;
        let other_top = self.arena[other].top;
        let other_bottom = self.arena[other].bottom;
        let e_bottom_point = self.arena[e_bottom].point;
        let other_bottom_point = self.arena[other_bottom].point;
        if e_bottom_point == other_bottom_point {
            tess_log!(
                self,
                "merging coincident below edges at {:?}",
                e_bottom_point
            );
            self.rewind(sweep.as_deref_mut(), e_top, c);
            self.arena[other].winding += self.arena[e].winding;
            self.arena.disconnect_edge(e);
            self.arena[e].top = VertexId::NONE;
            self.arena[e].bottom = VertexId::NONE;
        } else if c.sweep_lt(e_bottom_point, other_bottom_point) {
            self.rewind(sweep.as_deref_mut(), other_top, c);
            self.arena[e].winding += self.arena[other].winding;
            self.set_top(other, e_bottom, sweep, c);
        } else {
            self.rewind(sweep.as_deref_mut(), e_top, c);
            self.arena[other].winding += self.arena[e].winding;
            self.set_top(e, other_bottom, sweep, c);
        }
    }

    /// Splits `e` at vertex `v`, producing two edges that share `v`.
    ///
    /// `v` is normally inside the edge's sweep range, but rounding can put
    /// it above the top or below the bottom; in that case the split
    /// produces a winding-cancelling stub instead.
    fn split_edge(
        &mut self,
        e: EdgeId,
        v: VertexId,
        mut sweep: Option<&mut Sweep>,
        c: &Comparator,
    ) -> bool {
        if self.arena[e].top.is_none()
            || self.arena[e].bottom.is_none()
            || v == self.arena[e].top
            || v == self.arena[e].bottom
        {
            return false;
        }
        tess_log!(
            self,
            "splitting edge ({:?} -> {:?}) at {:?}",
            self.arena[self.arena[e].top].point,
            self.arena[self.arena[e].bottom].point,
            self.arena[v].point
        );
        let mut winding = self.arena[e].winding;
        let v_point = self.arena[v].point;
        let top_point = self.arena[self.arena[e].top].point;
        let bottom_point = self.arena[self.arena[e].bottom].point;
        let top;
        let bottom;
        if c.sweep_lt(v_point, top_point) {
            // v is above the edge: split off a winding-cancelling section
            // from the top.
            top = v;
            bottom = self.arena[e].top;
            winding *= -1;
            self.set_top(e, v, sweep.as_deref_mut(), c);
        } else if c.sweep_lt(bottom_point, v_point) {
            // v is below the edge.
            top = self.arena[e].bottom;
            bottom = v;
            winding *= -1;
            self.set_bottom(e, v, sweep.as_deref_mut(), c);
        } else {
            top = v;
            bottom = self.arena[e].bottom;
            self.set_bottom(e, v, sweep.as_deref_mut(), c);
        }
        let kind = self.arena[e].kind;
        let new_edge = self.arena.make_edge(top, bottom, winding, kind);
        let new_top = self.arena[new_edge].top;
        let new_bottom = self.arena[new_edge].bottom;
        self.arena.insert_edge_below(new_edge, new_top, c);
        self.arena.insert_edge_above(new_edge, new_bottom, c);
        self.merge_collinear_edges(new_edge, sweep, c);
        true
    }

    /// Handles two edges whose endpoints interleave without a computable
    /// crossing: one of the four endpoints must be on the wrong side of the
    /// other edge, and the edge gets split there.
    fn intersect_edge_pair(
        &mut self,
        left: EdgeId,
        right: EdgeId,
        sweep: &mut Sweep,
        c: &Comparator,
    ) -> bool {
        if self.arena[left].top.is_none()
            || self.arena[left].bottom.is_none()
            || self.arena[right].top.is_none()
            || self.arena[right].bottom.is_none()
        {
            return false;
        }
        if self.arena[left].top == self.arena[right].top
            || self.arena[left].bottom == self.arena[right].bottom
        {
            return false;
        }
        let left_top = self.arena[left].top;
        let left_bottom = self.arena[left].bottom;
        let right_top = self.arena[right].top;
        let right_bottom = self.arena[right].bottom;
        let left_top_point = self.arena[left_top].point;
        let left_bottom_point = self.arena[left_bottom].point;
        let right_top_point = self.arena[right_top].point;
        let right_bottom_point = self.arena[right_bottom].point;

        if c.sweep_lt(left_top_point, right_top_point) {
            if !self.arena.edge_is_left_of(left, right_top_point) {
                self.rewind(Some(sweep), right_top, c);
                return self.split_edge(left, right_top, Some(sweep), c);
            }
        } else if !self.arena.edge_is_right_of(right, left_top_point) {
            self.rewind(Some(sweep), left_top, c);
            return self.split_edge(right, left_top, Some(sweep), c);
        }
        if c.sweep_lt(right_bottom_point, left_bottom_point) {
            if !self.arena.edge_is_left_of(left, right_bottom_point) {
                self.rewind(Some(sweep), right_bottom, c);
                return self.split_edge(left, right_bottom, Some(sweep), c);
            }
        } else if !self.arena.edge_is_right_of(right, left_bottom_point) {
            self.rewind(Some(sweep), left_bottom, c);
            return self.split_edge(right, left_bottom, Some(sweep), c);
        }
        false
    }

    /// Finds an existing vertex at `p` in the sweep-sorted mesh near
    /// `reference`, or inserts a new synthetic one.
    fn make_sorted_vertex(
        &mut self,
        p: Point,
        mesh: &mut VertexList,
        reference: VertexId,
        c: &Comparator,
    ) -> VertexId {
        let mut prev = reference;
        while prev.is_some() && c.sweep_lt(p, self.arena[prev].point) {
            prev = self.arena[prev].prev;
        }
        let mut next = if prev.is_some() {
            self.arena[prev].next
        } else {
            mesh.head
        };
        while next.is_some() && c.sweep_lt(self.arena[next].point, p) {
            prev = next;
            next = self.arena[next].next;
        }
        if prev.is_some() && self.arena[prev].point == p {
            return prev;
        }
        if next.is_some() && self.arena[next].point == p {
            return next;
        }
        let v = self.arena.make_vertex(p, 255);
        self.arena[v].synthetic = true;
        mesh.insert(&mut self.arena, v, prev, next);
        v
    }

    /// Tests a pair of adjacent active edges for intersection and, if they
    /// cross, splits both at the intersection point.
    fn check_for_intersection(
        &mut self,
        left: EdgeId,
        right: EdgeId,
        sweep: &mut Sweep,
        mesh: &mut VertexList,
        c: &Comparator,
    ) -> bool {
        if left.is_none() || right.is_none() {
            return false;
        }
        if self.arena[left].top.is_none()
            || self.arena[left].bottom.is_none()
            || self.arena[right].top.is_none()
            || self.arena[right].bottom.is_none()
        {
            return false;
        }
        if let Some(p) = self.arena.intersect_edges(left, right) {
            tess_log!(self, "found intersection at {:?}", p);
            // If the intersection point is above the current vertex, find
            // the latest vertex at or above it to rewind to.
            let mut top = sweep.current;
            while top.is_some() && c.sweep_lt(p, self.arena[top].point) {
                top = self.arena[top].prev;
            }
            let v = if p == self.arena[self.arena[left].top].point {
                self.arena[left].top
            } else if p == self.arena[self.arena[left].bottom].point {
                self.arena[left].bottom
            } else if p == self.arena[self.arena[right].top].point {
                self.arena[right].top
            } else if p == self.arena[self.arena[right].bottom].point {
                self.arena[right].bottom
            } else {
                self.make_sorted_vertex(p, mesh, top, c)
            };
            let dst = if top.is_some() { top } else { v };
            self.rewind(Some(sweep), dst, c);
            self.split_edge(left, v, Some(sweep), c);
            self.split_edge(right, v, Some(sweep), c);
            return true;
        }
        self.intersect_edge_pair(left, right, sweep, c)
    }

    /// Finds the nearest active edges strictly left and strictly right of
    /// `v`. Edges passing through `v` (its own incident edges in
    /// particular) belong to neither side.
    fn find_enclosing_edges(&self, v: VertexId, active: &EdgeList) -> (EdgeId, EdgeId) {
        let p = self.arena[v].point;
        let mut prev = EdgeId::NONE;
        let mut next = active.head;
        while next.is_some() {
            let dist = self.arena.edge_dist(next, p);
            if dist < 0.0 {
                break;
            }
            if dist > 0.0 {
                prev = next;
            }
            next = self.arena[next].right;
        }
        (prev, next)
    }

    // ------------------------------------------------------------------
    // Stage 4: simplification.
    // ------------------------------------------------------------------

    fn simplify(&mut self, mesh: &mut VertexList, c: &Comparator) -> SimplifyResult {
        tess_log!(self, "simplifying complex polygons");
        let initial_edge_count = self.arena.edges.len();
        // Guard against pathological inputs that keep generating
        // intersections faster than the sweep resolves them.
        let max_edge_count = (initial_edge_count * 32).max(1 << 20);
        let mut sweep = Sweep {
            active: EdgeList::new(),
            current: VertexId::NONE,
        };
        let mut result = SimplifyResult::AlreadySimple;
        let mut v = mesh.head;
        while v.is_some() {
            if !self.arena[v].is_connected() {
                v = self.arena[v].next;
                continue;
            }
            sweep.current = v;
            loop {
                let cur = sweep.current;
                tess_log!(self, "\nsimplify vertex {:?}", self.arena[cur].point);
                let (left, right) = self.find_enclosing_edges(cur, &sweep.active);
                self.arena[cur].left_enclosing_edge = left;
                self.arena[cur].right_enclosing_edge = right;
                let mut restart = false;
                if self.arena[cur].first_edge_below.is_some() {
                    let mut e = self.arena[cur].first_edge_below;
                    while e.is_some() {
                        let next = self.arena[e].next_edge_below;
                        if self.check_for_intersection(left, e, &mut sweep, mesh, c)
                            || self.check_for_intersection(e, right, &mut sweep, mesh, c)
                        {
                            result = SimplifyResult::FoundSelfIntersection;
                            restart = true;
                            break;
                        }
                        e = next;
                    }
                } else if self.check_for_intersection(left, right, &mut sweep, mesh, c) {
                    result = SimplifyResult::FoundSelfIntersection;
                    restart = true;
                }
                if self.arena.edges.len() > max_edge_count {
                    return SimplifyResult::Failed;
                }
                if !restart {
                    break;
                }
            }
            let cur = sweep.current;
            let mut e = self.arena[cur].first_edge_above;
            while e.is_some() {
                let next = self.arena[e].next_edge_above;
                sweep.active.remove(&mut self.arena, e);
                e = next;
            }
            let mut left_edge = self.arena[cur].left_enclosing_edge;
            let mut e = self.arena[cur].first_edge_below;
            while e.is_some() {
                let next = self.arena[e].next_edge_below;
                sweep.active.insert(&mut self.arena, e, left_edge);
                left_edge = e;
                e = next;
            }
            v = self.arena[cur].next;
        }
        debug_assert!(sweep.active.is_empty());
        result
    }

    // ------------------------------------------------------------------
    // Stage 5: monotone decomposition.
    // ------------------------------------------------------------------

    fn mono_last_vertex(&self, m: MonotonePolyId) -> VertexId {
        self.arena[self.arena[m].last_edge].bottom
    }

    fn poly_last_vertex(&self, p: PolyId) -> VertexId {
        let tail = self.arena[p].tail;
        if tail.is_some() {
            self.mono_last_vertex(tail)
        } else {
            self.arena[p].first_vertex
        }
    }

    fn new_poly(&mut self, head: &mut PolyId, v: VertexId, winding: i32) -> PolyId {
        let poly = self.arena.make_poly(v, winding);
        self.arena[poly].next = *head;
        *head = poly;
        poly
    }

    /// Appends `e` to the monotone polygon's edge chain on its side.
    fn mono_add_edge(&mut self, m: MonotonePolyId, e: EdgeId) {
        let last = self.arena[m].last_edge;
        match self.arena[m].side {
            Side::Right => {
                debug_assert!(!self.arena[e].used_in_right_poly);
                self.arena[e].right_poly_prev = last;
                self.arena[e].right_poly_next = EdgeId::NONE;
                if last.is_some() {
                    self.arena[last].right_poly_next = e;
                } else {
                    self.arena[m].first_edge = e;
                }
                self.arena[m].last_edge = e;
                self.arena[e].used_in_right_poly = true;
            }
            Side::Left => {
                debug_assert!(!self.arena[e].used_in_left_poly);
                self.arena[e].left_poly_prev = last;
                self.arena[e].left_poly_next = EdgeId::NONE;
                if last.is_some() {
                    self.arena[last].left_poly_next = e;
                } else {
                    self.arena[m].first_edge = e;
                }
                self.arena[m].last_edge = e;
                self.arena[e].used_in_left_poly = true;
            }
        }
    }

    fn new_monotone_poly(&mut self, e: EdgeId, side: Side, winding: i32) -> MonotonePolyId {
        let m = self.arena.make_monotone_poly(side, winding);
        self.mono_add_edge(m, e);
        m
    }

    /// Grows polygon `p` by one edge along `side`. Returns the polygon the
    /// next edge on this side should be added to, which changes when the
    /// edge joins a pair of previously merged polygons.
    fn poly_add_edge(&mut self, p: PolyId, e: EdgeId, side: Side) -> PolyId {
        match side {
            Side::Right => {
                if self.arena[e].used_in_right_poly {
                    return p;
                }
            }
            Side::Left => {
                if self.arena[e].used_in_left_poly {
                    return p;
                }
            }
        }
        let partner = self.arena[p].partner;
        if partner.is_some() {
            self.arena[p].partner = PolyId::NONE;
            self.arena[partner].partner = PolyId::NONE;
        }
        let tail = self.arena[p].tail;
        if tail.is_none() {
            let winding = self.arena[p].winding;
            let m = self.new_monotone_poly(e, side, winding);
            self.arena[p].head = m;
            self.arena[p].tail = m;
            self.arena[p].count += 2;
            return p;
        }
        if self.arena[e].bottom == self.arena[self.arena[tail].last_edge].bottom {
            return p;
        }
        if side == self.arena[tail].side {
            self.mono_add_edge(tail, e);
            self.arena[p].count += 1;
            return p;
        }
        // The side flipped: connect with a synthetic edge and open a new
        // monotone span.
        let last_vertex = self.mono_last_vertex(tail);
        let bottom = self.arena[e].bottom;
        let connector = self
            .arena
            .make_edge(last_vertex, bottom, 1, EdgeType::Connector);
        self.mono_add_edge(tail, connector);
        self.arena[p].count += 1;
        if partner.is_some() {
            self.poly_add_edge(partner, connector, side);
            partner
        } else {
            let winding = self.arena[p].winding;
            let m = self.new_monotone_poly(connector, side, winding);
            self.arena[m].prev = tail;
            self.arena[tail].next = m;
            self.arena[p].tail = m;
            p
        }
    }

    /// Decomposes the simplified planar subdivision into monotone
    /// polygons, returning the head of the polygon list.
    fn tessellate(&mut self, mesh: &VertexList, _c: &Comparator) -> PolyId {
        tess_log!(self, "\ntessellating simple polygons");
        let mut active_edges = EdgeList::new();
        let mut polys = PolyId::NONE;
        let mut v = mesh.head;
        while v.is_some() {
            if !self.arena[v].is_connected() {
                v = self.arena[v].next;
                continue;
            }
            tess_log!(self, "vertex {:?}", self.arena[v].point);
            let (left_enclosing, right_enclosing) = self.find_enclosing_edges(v, &active_edges);
            let first_above = self.arena[v].first_edge_above;
            let last_above = self.arena[v].last_edge_above;
            let first_below = self.arena[v].first_edge_below;

            let mut left_poly;
            let mut right_poly;
            if first_above.is_some() {
                left_poly = self.arena[first_above].left_poly;
                right_poly = self.arena[last_above].right_poly;
            } else {
                left_poly = if left_enclosing.is_some() {
                    self.arena[left_enclosing].right_poly
                } else {
                    PolyId::NONE
                };
                right_poly = if right_enclosing.is_some() {
                    self.arena[right_enclosing].left_poly
                } else {
                    PolyId::NONE
                };
            }

            if first_above.is_some() {
                if left_poly.is_some() {
                    left_poly = self.poly_add_edge(left_poly, first_above, Side::Right);
                }
                if right_poly.is_some() {
                    right_poly = self.poly_add_edge(right_poly, last_above, Side::Left);
                }
                // Close off the polys between pairs of edges ending here.
                let mut e = first_above;
                while e != last_above {
                    let right_edge = self.arena[e].next_edge_above;
                    active_edges.remove(&mut self.arena, e);
                    let e_right_poly = self.arena[e].right_poly;
                    if e_right_poly.is_some() {
                        self.poly_add_edge(e_right_poly, e, Side::Left);
                    }
                    let right_left_poly = self.arena[right_edge].left_poly;
                    if right_left_poly.is_some() && right_left_poly != e_right_poly {
                        self.poly_add_edge(right_left_poly, e, Side::Right);
                    }
                    e = right_edge;
                }
                active_edges.remove(&mut self.arena, last_above);
                if first_below.is_none()
                    && left_poly.is_some()
                    && right_poly.is_some()
                    && left_poly != right_poly
                {
                    // Merge vertex: remember the pair so a later split can
                    // reconnect them.
                    debug_assert!(self.arena[left_poly].partner.is_none());
                    debug_assert!(self.arena[right_poly].partner.is_none());
                    self.arena[left_poly].partner = right_poly;
                    self.arena[right_poly].partner = left_poly;
                }
            }

            if first_below.is_some() {
                if first_above.is_none() && left_poly.is_some() && right_poly.is_some() {
                    // Split vertex inside one polygon (or between a merged
                    // pair): introduce a connecting edge.
                    if left_poly == right_poly {
                        let tail = self.arena[left_poly].tail;
                        if tail.is_some() && self.arena[tail].side == Side::Left {
                            let last = self.poly_last_vertex(left_poly);
                            let winding = self.arena[left_poly].winding;
                            left_poly = self.new_poly(&mut polys, last, winding);
                            self.arena[left_enclosing].right_poly = left_poly;
                        } else {
                            let last = self.poly_last_vertex(right_poly);
                            let winding = self.arena[right_poly].winding;
                            right_poly = self.new_poly(&mut polys, last, winding);
                            self.arena[right_enclosing].left_poly = right_poly;
                        }
                    }
                    let last = self.poly_last_vertex(left_poly);
                    let join = self.arena.make_edge(last, v, 1, EdgeType::Connector);
                    left_poly = self.poly_add_edge(left_poly, join, Side::Right);
                    right_poly = self.poly_add_edge(right_poly, join, Side::Left);
                }

                let mut left_edge = first_below;
                self.arena[left_edge].left_poly = left_poly;
                active_edges.insert(&mut self.arena, left_edge, left_enclosing);
                let mut right_edge = self.arena[left_edge].next_edge_below;
                while right_edge.is_some() {
                    active_edges.insert(&mut self.arena, right_edge, left_edge);
                    let mut winding = if self.arena[left_edge].left_poly.is_some() {
                        self.arena[self.arena[left_edge].left_poly].winding
                    } else {
                        0
                    };
                    winding += self.arena[left_edge].winding;
                    if winding != 0 {
                        let poly = self.new_poly(&mut polys, v, winding);
                        self.arena[left_edge].right_poly = poly;
                        self.arena[right_edge].left_poly = poly;
                    }
                    left_edge = right_edge;
                    right_edge = self.arena[right_edge].next_edge_below;
                }
                let last_below = self.arena[v].last_edge_below;
                self.arena[last_below].right_poly = right_poly;
            }
            v = self.arena[v].next;
        }
        polys
    }

    // ------------------------------------------------------------------
    // Stage 6: triangle emission.
    // ------------------------------------------------------------------

    fn count_points(&self, polys: PolyId, fill_rule: FillRule) -> u64 {
        let mut count: u64 = 0;
        let mut p = polys;
        while p.is_some() {
            let poly = &self.arena[p];
            if fill_rule.is_in(poly.winding) && poly.count >= 3 {
                count += (poly.count as u64 - 2) * 3;
            }
            p = poly.next;
        }
        count
    }

    fn polys_to_triangles<S: GeometrySink>(
        &mut self,
        polys: PolyId,
        fill_rule: FillRule,
        path_id: u16,
        reverse_triangles: bool,
        sink: &mut S,
    ) -> usize {
        let mut emitted = 0;
        let mut p = polys;
        while p.is_some() {
            if fill_rule.is_in(self.arena[p].winding) && self.arena[p].count >= 3 {
                emitted += self.emit_poly(p, path_id, reverse_triangles, sink);
            }
            p = self.arena[p].next;
        }
        emitted
    }

    fn emit_poly<S: GeometrySink>(
        &mut self,
        p: PolyId,
        path_id: u16,
        reverse_triangles: bool,
        sink: &mut S,
    ) -> usize {
        let mut emitted = 0;
        let mut m = self.arena[p].head;
        while m.is_some() {
            emitted += self.emit_monotone_poly(m, path_id, reverse_triangles, sink);
            m = self.arena[m].next;
        }
        emitted
    }

    /// Fan-triangulates one monotone polygon.
    ///
    /// Walks the vertex chain keeping a reflex chain: each convex turn
    /// emits a triangle and backtracks, each reflex turn pushes.
    fn emit_monotone_poly<S: GeometrySink>(
        &mut self,
        m: MonotonePolyId,
        path_id: u16,
        reverse_triangles: bool,
        sink: &mut S,
    ) -> usize {
        debug_assert!(self.arena[m].winding != 0);
        let side = self.arena[m].side;
        let winding = self.arena[m].winding;

        // Gather the chain into a vertex list ordered along the sweep.
        // This reuses the mesh links, which is fine: the mesh has been
        // fully decomposed by now, and every list below is rebuilt from
        // its edges alone.
        let mut vertices = VertexList::new();
        let mut e = self.arena[m].first_edge;
        let top = self.arena[e].top;
        vertices.append(&mut self.arena, top);
        let mut count = 1;
        while e.is_some() {
            let bottom = self.arena[e].bottom;
            match side {
                Side::Right => {
                    vertices.append(&mut self.arena, bottom);
                    e = self.arena[e].right_poly_next;
                }
                Side::Left => {
                    vertices.prepend(&mut self.arena, bottom);
                    e = self.arena[e].left_poly_next;
                }
            }
            count += 1;
        }

        let mut emitted = 0;
        let first = vertices.head;
        let mut v = self.arena[first].next;
        while v != vertices.tail {
            debug_assert!(v.is_some());
            let prev = self.arena[v].prev;
            let curr = v;
            let next = self.arena[v].next;
            if count == 3 {
                return emitted
                    + self.emit_triangle(prev, curr, next, winding, path_id, reverse_triangles, sink);
            }
            let prev_point = self.arena[prev].point;
            let curr_point = self.arena[curr].point;
            let next_point = self.arena[next].point;
            let ax = curr_point.x as f64 - prev_point.x as f64;
            let ay = curr_point.y as f64 - prev_point.y as f64;
            let bx = next_point.x as f64 - curr_point.x as f64;
            let by = next_point.y as f64 - curr_point.y as f64;
            if ax * by - ay * bx >= 0.0 {
                emitted +=
                    self.emit_triangle(prev, curr, next, winding, path_id, reverse_triangles, sink);
                self.arena[prev].next = next;
                self.arena[next].prev = prev;
                count -= 1;
                if prev == first {
                    v = next;
                } else {
                    v = prev;
                }
            } else {
                v = next;
            }
        }
        emitted
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_triangle<S: GeometrySink>(
        &mut self,
        prev: VertexId,
        curr: VertexId,
        next: VertexId,
        winding: i32,
        path_id: u16,
        reverse_triangles: bool,
        sink: &mut S,
    ) -> usize {
        let mut a = self.arena[prev].point;
        let b = self.arena[curr].point;
        let mut c_ = self.arena[next].point;
        if winding > 0 {
            // Wind the triangle the same direction as if the path had been
            // triangulated as a simple winding-rule fan.
            core::mem::swap(&mut a, &mut c_);
        }
        if self.collect_grout && winding.abs() > 1 {
            // The triangulation emits one triangle regardless of winding
            // magnitude; supplemental grout accounts for the rest of the
            // stencil sum.
            self.grout.append(a, b, c_, winding.abs() - 1);
        }
        if reverse_triangles {
            core::mem::swap(&mut a, &mut c_);
        }
        sink.push(TriangleVertex::new(a.x, a.y, 1, path_id));
        sink.push(TriangleVertex::new(b.x, b.y, 1, path_id));
        sink.push(TriangleVertex::new(c_.x, c_.y, 1, path_id));
        3
    }
}
