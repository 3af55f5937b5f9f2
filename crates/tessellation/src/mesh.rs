//! The planar mesh the triangulator sweeps over.
//!
//! Vertices and edges live in a [MeshArena](struct.MeshArena.html) and refer
//! to each other through 32 bit ids (`u32::MAX` is the null id). The arena
//! replaces the pointer soup a mesh like this is usually made of: entities
//! are never freed individually, links can form cycles freely, and the whole
//! mesh is released at once when a triangulation completes.
//!
//! Every vertex can be a member of two intrusive lists at the same time (the
//! contour list, whose links are later reused for the sweep-sorted list) and
//! owns two ordered lists of incident edges: the edges that end at it
//! ("edges above") and the edges that start at it ("edges below"). Edges
//! additionally carry links for the active edge list and for the two
//! monotone-polygon chains they can belong to.

use crate::math::Point;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

#[cfg(not(feature = "std"))]
use num_traits::Float;

const NULL_ID: u32 = u32::MAX;

macro_rules! declare_id {
    ($name:ident) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub(crate) struct $name(pub u32);

        impl $name {
            pub const NONE: $name = $name(NULL_ID);

            #[inline]
            pub fn is_some(self) -> bool {
                self.0 != NULL_ID
            }

            #[inline]
            pub fn is_none(self) -> bool {
                self.0 == NULL_ID
            }

            #[inline]
            pub fn idx(self) -> usize {
                self.0 as usize
            }
        }
    };
}

declare_id!(VertexId);
declare_id!(EdgeId);
declare_id!(MonotonePolyId);
declare_id!(PolyId);

/// The direction of the line sweep.
///
/// The direction is picked from the aspect ratio of the path bounds: paths
/// wider than tall are swept horizontally. The horizontal order sorts
/// secondarily by *decreasing* y, which amounts to rotating the plane 90
/// degrees counterclockwise rather than transposing it, so that edges to the
/// left of a sweep position stay "left" in the rotated frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Vertical,
    Horizontal,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Comparator {
    pub direction: Direction,
}

impl Comparator {
    pub fn new(direction: Direction) -> Self {
        Comparator { direction }
    }

    /// Returns true if `a` is swept strictly before `b`.
    #[inline]
    pub fn sweep_lt(&self, a: Point, b: Point) -> bool {
        match self.direction {
            Direction::Vertical => {
                if a.y == b.y {
                    a.x < b.x
                } else {
                    a.y < b.y
                }
            }
            Direction::Horizontal => {
                if a.x == b.x {
                    a.y > b.y
                } else {
                    a.x < b.x
                }
            }
        }
    }
}

/// A line in implicit form: `a*x + b*y + c = 0` for all points on the line.
///
/// Coefficients are stored in double precision to avoid catastrophic
/// cancellation in the left-of/right-of tests. A distance query is a degree 2
/// polynomial, so doubles make its sign exact for f32 inputs. Intersections
/// are degree 5 and stay inexact even in doubles; the sweep compensates by
/// rewinding whenever an intersection lands out of order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(p: Point, q: Point) -> Self {
        Line {
            a: q.y as f64 - p.y as f64,                               // a = dy
            b: p.x as f64 - q.x as f64,                               // b = -dx
            c: p.y as f64 * q.x as f64 - p.x as f64 * q.y as f64,     // c = cross(q, p)
        }
    }

    #[inline]
    pub fn dist(&self, p: Point) -> f64 {
        self.a * p.x as f64 + self.b * p.y as f64 + self.c
    }

    pub fn magnitude_sq(&self) -> f64 {
        self.a * self.a + self.b * self.b
    }

    pub fn normalize(&mut self) {
        let len = self.magnitude_sq().sqrt();
        if len == 0.0 {
            return;
        }
        let scale = 1.0 / len;
        self.a *= scale;
        self.b *= scale;
        self.c *= scale;
    }

    /// True when the normalized coefficients of two lines are so close that
    /// an intersection point would be numerically meaningless.
    pub fn nearly_parallel(&self, other: &Line) -> bool {
        (other.a - self.a).abs() < 0.00001 && (other.b - self.b).abs() < 0.00001
    }
}

/// The type of an edge: part of a contour, part of the antialiased outer
/// boundary, or a connector introduced while splitting a polygon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EdgeType {
    Inner,
    Outer,
    Connector,
}

/// Which side of a monotone polygon an edge chain is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

pub(crate) struct Vertex {
    pub point: Point,
    /// Linked list of contours, then sweep-sorted vertices.
    pub prev: VertexId,
    pub next: VertexId,
    /// Ordered list of edges ending at this vertex.
    pub first_edge_above: EdgeId,
    pub last_edge_above: EdgeId,
    /// Ordered list of edges starting at this vertex.
    pub first_edge_below: EdgeId,
    pub last_edge_below: EdgeId,
    /// Nearest active edges on either side, cached during the sweeps.
    pub left_enclosing_edge: EdgeId,
    pub right_enclosing_edge: EdgeId,
    /// Corresponding inner or outer vertex when tessellating antialiased
    /// boundaries. Unused by the plain fill pipeline.
    pub partner: VertexId,
    pub alpha: u8,
    /// True for vertices introduced by intersections or merges.
    pub synthetic: bool,
}

impl Vertex {
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.first_edge_above.is_some() || self.first_edge_below.is_some()
    }
}

/// A directed edge from a top vertex to a bottom vertex in sweep order.
///
/// `dist` can occasionally return a nonzero value for the edge's own
/// endpoints because the line coefficients are computed from rounded floats;
/// callers that need exactness query through the arena's `edge_dist`, which
/// coerces both endpoints to zero.
pub(crate) struct Edge {
    /// +1 when the edge points down the sweep, -1 when it points up.
    /// Accumulates when collinear edges merge.
    pub winding: i32,
    pub top: VertexId,
    pub bottom: VertexId,
    pub kind: EdgeType,
    /// Active edge list links.
    pub left: EdgeId,
    pub right: EdgeId,
    /// Membership in the bottom vertex's "edges above" list.
    pub prev_edge_above: EdgeId,
    pub next_edge_above: EdgeId,
    /// Membership in the top vertex's "edges below" list.
    pub prev_edge_below: EdgeId,
    pub next_edge_below: EdgeId,
    /// The polygons bordering this edge, if any.
    pub left_poly: PolyId,
    pub right_poly: PolyId,
    /// Membership in the left/right polygons' edge chains.
    pub left_poly_prev: EdgeId,
    pub left_poly_next: EdgeId,
    pub right_poly_prev: EdgeId,
    pub right_poly_next: EdgeId,
    pub used_in_left_poly: bool,
    pub used_in_right_poly: bool,
    pub line: Line,
}

/// A y-monotone polygon: one chain of edges on one side of a polygon.
pub(crate) struct MonotonePoly {
    pub side: Side,
    pub first_edge: EdgeId,
    pub last_edge: EdgeId,
    pub prev: MonotonePolyId,
    pub next: MonotonePolyId,
    pub winding: i32,
}

/// A polygon produced by the monotone decomposition: a chain of
/// [MonotonePoly](struct.MonotonePoly.html) spans sharing one winding.
pub(crate) struct Poly {
    pub first_vertex: VertexId,
    pub winding: i32,
    pub head: MonotonePolyId,
    pub tail: MonotonePolyId,
    pub next: PolyId,
    pub partner: PolyId,
    pub count: usize,
}

/// Bump storage for every entity of one triangulation.
///
/// Nothing is freed individually; ids stay valid until the arena is dropped.
pub(crate) struct MeshArena {
    pub verts: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub monos: Vec<MonotonePoly>,
    pub polys: Vec<Poly>,
}

impl Index<VertexId> for MeshArena {
    type Output = Vertex;
    #[inline]
    fn index(&self, id: VertexId) -> &Vertex {
        &self.verts[id.idx()]
    }
}

impl IndexMut<VertexId> for MeshArena {
    #[inline]
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.verts[id.idx()]
    }
}

impl Index<EdgeId> for MeshArena {
    type Output = Edge;
    #[inline]
    fn index(&self, id: EdgeId) -> &Edge {
        &self.edges[id.idx()]
    }
}

impl IndexMut<EdgeId> for MeshArena {
    #[inline]
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.idx()]
    }
}

impl Index<MonotonePolyId> for MeshArena {
    type Output = MonotonePoly;
    #[inline]
    fn index(&self, id: MonotonePolyId) -> &MonotonePoly {
        &self.monos[id.idx()]
    }
}

impl IndexMut<MonotonePolyId> for MeshArena {
    #[inline]
    fn index_mut(&mut self, id: MonotonePolyId) -> &mut MonotonePoly {
        &mut self.monos[id.idx()]
    }
}

impl Index<PolyId> for MeshArena {
    type Output = Poly;
    #[inline]
    fn index(&self, id: PolyId) -> &Poly {
        &self.polys[id.idx()]
    }
}

impl IndexMut<PolyId> for MeshArena {
    #[inline]
    fn index_mut(&mut self, id: PolyId) -> &mut Poly {
        &mut self.polys[id.idx()]
    }
}

impl MeshArena {
    pub fn new() -> Self {
        MeshArena {
            verts: Vec::new(),
            edges: Vec::new(),
            monos: Vec::new(),
            polys: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.verts.clear();
        self.edges.clear();
        self.monos.clear();
        self.polys.clear();
    }

    pub fn make_vertex(&mut self, point: Point, alpha: u8) -> VertexId {
        let id = VertexId(self.verts.len() as u32);
        self.verts.push(Vertex {
            point,
            prev: VertexId::NONE,
            next: VertexId::NONE,
            first_edge_above: EdgeId::NONE,
            last_edge_above: EdgeId::NONE,
            first_edge_below: EdgeId::NONE,
            last_edge_below: EdgeId::NONE,
            left_enclosing_edge: EdgeId::NONE,
            right_enclosing_edge: EdgeId::NONE,
            partner: VertexId::NONE,
            alpha,
            synthetic: false,
        });
        id
    }

    pub fn make_edge(
        &mut self,
        top: VertexId,
        bottom: VertexId,
        winding: i32,
        kind: EdgeType,
    ) -> EdgeId {
        debug_assert!(top != bottom);
        let line = Line::new(self[top].point, self[bottom].point);
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            winding,
            top,
            bottom,
            kind,
            left: EdgeId::NONE,
            right: EdgeId::NONE,
            prev_edge_above: EdgeId::NONE,
            next_edge_above: EdgeId::NONE,
            prev_edge_below: EdgeId::NONE,
            next_edge_below: EdgeId::NONE,
            left_poly: PolyId::NONE,
            right_poly: PolyId::NONE,
            left_poly_prev: EdgeId::NONE,
            left_poly_next: EdgeId::NONE,
            right_poly_prev: EdgeId::NONE,
            right_poly_next: EdgeId::NONE,
            used_in_left_poly: false,
            used_in_right_poly: false,
            line,
        });
        id
    }

    pub fn make_monotone_poly(&mut self, side: Side, winding: i32) -> MonotonePolyId {
        let id = MonotonePolyId(self.monos.len() as u32);
        self.monos.push(MonotonePoly {
            side,
            first_edge: EdgeId::NONE,
            last_edge: EdgeId::NONE,
            prev: MonotonePolyId::NONE,
            next: MonotonePolyId::NONE,
            winding,
        });
        id
    }

    pub fn make_poly(&mut self, first_vertex: VertexId, winding: i32) -> PolyId {
        let id = PolyId(self.polys.len() as u32);
        self.polys.push(Poly {
            first_vertex,
            winding,
            head: MonotonePolyId::NONE,
            tail: MonotonePolyId::NONE,
            next: PolyId::NONE,
            partner: PolyId::NONE,
            count: 0,
        });
        id
    }

    /// Signed distance of `p` to the edge's line, coercing points coincident
    /// with either endpoint to exactly zero. Converting a double intersection
    /// point back to f32 storage can construct a point that is no longer on
    /// the ideal line.
    #[inline]
    pub fn edge_dist(&self, e: EdgeId, p: Point) -> f64 {
        let edge = &self[e];
        if p == self[edge.top].point || p == self[edge.bottom].point {
            0.0
        } else {
            edge.line.dist(p)
        }
    }

    #[inline]
    pub fn edge_is_right_of(&self, e: EdgeId, p: Point) -> bool {
        self.edge_dist(e, p) < 0.0
    }

    #[inline]
    pub fn edge_is_left_of(&self, e: EdgeId, p: Point) -> bool {
        self.edge_dist(e, p) > 0.0
    }

    pub fn recompute_line(&mut self, e: EdgeId) {
        let line = Line::new(self[self[e].top].point, self[self[e].bottom].point);
        self[e].line = line;
    }

    /// Inserts `e` into `v`'s "edges above" list, keeping the list sorted
    /// left-to-right by edge tops.
    pub fn insert_edge_above(&mut self, e: EdgeId, v: VertexId, c: &Comparator) {
        let top = self[self[e].top].point;
        let bottom = self[self[e].bottom].point;
        if top == bottom || c.sweep_lt(bottom, top) {
            return;
        }
        let mut prev = EdgeId::NONE;
        let mut next = self[v].first_edge_above;
        while next.is_some() {
            if self.edge_is_right_of(next, top) {
                break;
            }
            prev = next;
            next = self[next].next_edge_above;
        }
        self[e].prev_edge_above = prev;
        self[e].next_edge_above = next;
        if prev.is_some() {
            self[prev].next_edge_above = e;
        } else {
            self[v].first_edge_above = e;
        }
        if next.is_some() {
            self[next].prev_edge_above = e;
        } else {
            self[v].last_edge_above = e;
        }
    }

    /// Inserts `e` into `v`'s "edges below" list, keeping the list sorted
    /// left-to-right by edge bottoms.
    pub fn insert_edge_below(&mut self, e: EdgeId, v: VertexId, c: &Comparator) {
        let top = self[self[e].top].point;
        let bottom = self[self[e].bottom].point;
        if top == bottom || c.sweep_lt(bottom, top) {
            return;
        }
        let mut prev = EdgeId::NONE;
        let mut next = self[v].first_edge_below;
        while next.is_some() {
            if self.edge_is_right_of(next, bottom) {
                break;
            }
            prev = next;
            next = self[next].next_edge_below;
        }
        self[e].prev_edge_below = prev;
        self[e].next_edge_below = next;
        if prev.is_some() {
            self[prev].next_edge_below = e;
        } else {
            self[v].first_edge_below = e;
        }
        if next.is_some() {
            self[next].prev_edge_below = e;
        } else {
            self[v].last_edge_below = e;
        }
    }

    /// Removes `e` from its bottom vertex's "edges above" list.
    pub fn remove_edge_above(&mut self, e: EdgeId) {
        let v = self[e].bottom;
        let prev = self[e].prev_edge_above;
        let next = self[e].next_edge_above;
        if prev.is_some() {
            self[prev].next_edge_above = next;
        } else if self[v].first_edge_above == e {
            self[v].first_edge_above = next;
        } else {
            return; // not a member
        }
        if next.is_some() {
            self[next].prev_edge_above = prev;
        } else {
            self[v].last_edge_above = prev;
        }
        self[e].prev_edge_above = EdgeId::NONE;
        self[e].next_edge_above = EdgeId::NONE;
    }

    /// Removes `e` from its top vertex's "edges below" list.
    pub fn remove_edge_below(&mut self, e: EdgeId) {
        let v = self[e].top;
        let prev = self[e].prev_edge_below;
        let next = self[e].next_edge_below;
        if prev.is_some() {
            self[prev].next_edge_below = next;
        } else if self[v].first_edge_below == e {
            self[v].first_edge_below = next;
        } else {
            return; // not a member
        }
        if next.is_some() {
            self[next].prev_edge_below = prev;
        } else {
            self[v].last_edge_below = prev;
        }
        self[e].prev_edge_below = EdgeId::NONE;
        self[e].next_edge_below = EdgeId::NONE;
    }

    pub fn disconnect_edge(&mut self, e: EdgeId) {
        self.remove_edge_above(e);
        self.remove_edge_below(e);
    }

    /// Computes the intersection of two edges, if any.
    ///
    /// The test is done in parametric form so that no division happens on
    /// the (common) non-intersecting path. Intersections at shared vertices
    /// or shared endpoint positions do not count, and nearly parallel edges
    /// are reported as non-intersecting since their intersection point
    /// cannot be computed reliably.
    pub fn intersect_edges(&self, e0: EdgeId, e1: EdgeId) -> Option<Point> {
        let a = &self[e0];
        let b = &self[e1];
        if a.top == b.top
            || a.bottom == b.bottom
            || a.top == b.bottom
            || a.bottom == b.top
        {
            return None;
        }
        let a_top = self[a.top].point;
        let a_bottom = self[a.bottom].point;
        let b_top = self[b.top].point;
        let b_bottom = self[b.bottom].point;
        if a_top == b_top || a_bottom == b_bottom || a_top == b_bottom || a_bottom == b_top {
            return None;
        }
        let mut la = a.line;
        let mut lb = b.line;
        la.normalize();
        lb.normalize();
        if la.nearly_parallel(&lb) {
            return None;
        }
        let denom = a.line.a * b.line.b - a.line.b * b.line.a;
        if denom == 0.0 {
            return None;
        }
        let dx = b_top.x as f64 - a_top.x as f64;
        let dy = b_top.y as f64 - a_top.y as f64;
        let s_numer = dy * b.line.b + dx * b.line.a;
        let t_numer = dy * a.line.b + dx * a.line.a;
        // If (s_numer / denom) or (t_numer / denom) is not in [0..1], exit
        // early without paying for the division.
        let out_of_range = if denom > 0.0 {
            s_numer < 0.0 || s_numer > denom || t_numer < 0.0 || t_numer > denom
        } else {
            s_numer > 0.0 || s_numer < denom || t_numer > 0.0 || t_numer < denom
        };
        if out_of_range {
            return None;
        }
        let s = s_numer / denom;
        debug_assert!((0.0..=1.0).contains(&s));
        let px = (a_top.x as f64 - s * a.line.b) as f32;
        let py = (a_top.y as f64 + s * a.line.a) as f32;
        if !px.is_finite() || !py.is_finite() {
            return None;
        }
        Some(Point::new(px, py))
    }
}

/// Head and tail of an intrusive vertex chain.
#[derive(Copy, Clone, Debug)]
pub(crate) struct VertexList {
    pub head: VertexId,
    pub tail: VertexId,
}

impl VertexList {
    pub fn new() -> Self {
        VertexList {
            head: VertexId::NONE,
            tail: VertexId::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn insert(&mut self, arena: &mut MeshArena, v: VertexId, prev: VertexId, next: VertexId) {
        arena[v].prev = prev;
        arena[v].next = next;
        if prev.is_some() {
            arena[prev].next = v;
        } else {
            self.head = v;
        }
        if next.is_some() {
            arena[next].prev = v;
        } else {
            self.tail = v;
        }
    }

    pub fn append(&mut self, arena: &mut MeshArena, v: VertexId) {
        let tail = self.tail;
        self.insert(arena, v, tail, VertexId::NONE);
    }

    pub fn prepend(&mut self, arena: &mut MeshArena, v: VertexId) {
        let head = self.head;
        self.insert(arena, v, VertexId::NONE, head);
    }

    pub fn append_list(&mut self, arena: &mut MeshArena, list: VertexList) {
        if list.head.is_none() {
            return;
        }
        if self.tail.is_some() {
            let tail = self.tail;
            arena[tail].next = list.head;
            arena[list.head].prev = tail;
        } else {
            self.head = list.head;
        }
        self.tail = list.tail;
    }

    pub fn remove(&mut self, arena: &mut MeshArena, v: VertexId) {
        let prev = arena[v].prev;
        let next = arena[v].next;
        if prev.is_some() {
            arena[prev].next = next;
        } else {
            self.head = next;
        }
        if next.is_some() {
            arena[next].prev = prev;
        } else {
            self.tail = prev;
        }
        arena[v].prev = VertexId::NONE;
        arena[v].next = VertexId::NONE;
    }

    /// Links the tail back to the head, making the chain circular.
    pub fn close(&mut self, arena: &mut MeshArena) {
        if self.head.is_some() && self.tail.is_some() {
            let (head, tail) = (self.head, self.tail);
            arena[tail].next = head;
            arena[head].prev = tail;
        }
    }
}

/// Head and tail of the active edge list.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EdgeList {
    pub head: EdgeId,
    pub tail: EdgeId,
}

impl EdgeList {
    pub fn new() -> Self {
        EdgeList {
            head: EdgeId::NONE,
            tail: EdgeId::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Inserts `e` to the right of `prev` (at the head if `prev` is none).
    pub fn insert(&mut self, arena: &mut MeshArena, e: EdgeId, prev: EdgeId) {
        let next = if prev.is_some() {
            arena[prev].right
        } else {
            self.head
        };
        arena[e].left = prev;
        arena[e].right = next;
        if prev.is_some() {
            arena[prev].right = e;
        } else {
            self.head = e;
        }
        if next.is_some() {
            arena[next].left = e;
        } else {
            self.tail = e;
        }
    }

    pub fn remove(&mut self, arena: &mut MeshArena, e: EdgeId) {
        let left = arena[e].left;
        let right = arena[e].right;
        if left.is_some() {
            arena[left].right = right;
        } else if self.head == e {
            self.head = right;
        } else {
            return; // not a member
        }
        if right.is_some() {
            arena[right].left = left;
        } else {
            self.tail = left;
        }
        arena[e].left = EdgeId::NONE;
        arena[e].right = EdgeId::NONE;
    }

    pub fn contains(&self, arena: &MeshArena, e: EdgeId) -> bool {
        arena[e].left.is_some() || arena[e].right.is_some() || self.head == e
    }
}

/// Stable merge sort over the intrusive vertex chain.
///
/// The merge re-links the existing chain, no allocation involved, which is
/// also what allows new vertices to be spliced in later when intersections
/// are found.
pub(crate) fn sort_mesh(mesh: &mut VertexList, arena: &mut MeshArena, c: &Comparator) {
    if mesh.head.is_none() || mesh.head == mesh.tail {
        return;
    }

    let (mut front, mut back) = split_mesh(mesh, arena);
    sort_mesh(&mut front, arena, c);
    sort_mesh(&mut back, arena, c);
    *mesh = sorted_merge(front, back, arena, c);
}

fn split_mesh(mesh: &VertexList, arena: &mut MeshArena) -> (VertexList, VertexList) {
    // Find the midpoint with fast/slow cursors.
    let mut fast = mesh.head;
    let mut slow = mesh.head;
    loop {
        fast = arena[fast].next;
        if fast.is_none() {
            break;
        }
        fast = arena[fast].next;
        if fast.is_none() {
            break;
        }
        slow = arena[slow].next;
    }
    let back_head = arena[slow].next;
    debug_assert!(back_head.is_some());
    arena[slow].next = VertexId::NONE;
    arena[back_head].prev = VertexId::NONE;
    (
        VertexList {
            head: mesh.head,
            tail: slow,
        },
        VertexList {
            head: back_head,
            tail: mesh.tail,
        },
    )
}

fn sorted_merge(
    mut front: VertexList,
    mut back: VertexList,
    arena: &mut MeshArena,
    c: &Comparator,
) -> VertexList {
    let mut result = VertexList::new();
    while front.head.is_some() && back.head.is_some() {
        let a = front.head;
        let b = back.head;
        // Take from the front list on ties to keep the sort stable.
        if c.sweep_lt(arena[b].point, arena[a].point) {
            back.remove(arena, b);
            result.append(arena, b);
        } else {
            front.remove(arena, a);
            result.append(arena, a);
        }
    }
    result.append_list(arena, front);
    result.append_list(arena, back);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    fn sorted_points(mesh: &VertexList, arena: &MeshArena) -> std::vec::Vec<Point> {
        let mut points = std::vec::Vec::new();
        let mut v = mesh.head;
        while v.is_some() {
            points.push(arena[v].point);
            v = arena[v].next;
        }
        points
    }

    #[test]
    fn vertex_list_ops() {
        let mut arena = MeshArena::new();
        let mut list = VertexList::new();
        let a = arena.make_vertex(point(0.0, 0.0), 255);
        let b = arena.make_vertex(point(1.0, 0.0), 255);
        let d = arena.make_vertex(point(2.0, 0.0), 255);

        list.append(&mut arena, b);
        list.prepend(&mut arena, a);
        list.append(&mut arena, d);
        assert_eq!(list.head, a);
        assert_eq!(list.tail, d);
        assert_eq!(arena[b].prev, a);
        assert_eq!(arena[b].next, d);

        list.remove(&mut arena, b);
        assert_eq!(arena[a].next, d);
        assert_eq!(arena[d].prev, a);

        list.remove(&mut arena, a);
        list.remove(&mut arena, d);
        assert!(list.is_empty());
    }

    #[test]
    fn sort_sorts_and_is_stable() {
        let mut arena = MeshArena::new();
        let mut mesh = VertexList::new();
        let pts = [
            point(1.0, 3.0),
            point(0.0, 1.0),
            point(2.0, 1.0),
            point(0.0, 1.0),
            point(5.0, 0.0),
        ];
        let mut ids = std::vec::Vec::new();
        for &p in &pts {
            let v = arena.make_vertex(p, 255);
            ids.push(v);
            mesh.append(&mut arena, v);
        }
        let c = Comparator::new(Direction::Vertical);
        sort_mesh(&mut mesh, &mut arena, &c);

        assert_eq!(
            sorted_points(&mesh, &arena),
            alloc::vec![
                point(5.0, 0.0),
                point(0.0, 1.0),
                point(0.0, 1.0),
                point(2.0, 1.0),
                point(1.0, 3.0),
            ]
        );
        // The two coincident vertices keep their insertion order.
        assert_eq!(arena[mesh.head].next, ids[1]);
        assert_eq!(arena[ids[1]].next, ids[3]);
    }

    #[test]
    fn horizontal_sweep_order() {
        let c = Comparator::new(Direction::Horizontal);
        assert!(c.sweep_lt(point(0.0, 0.0), point(1.0, 0.0)));
        // Ties in x break by decreasing y.
        assert!(c.sweep_lt(point(1.0, 5.0), point(1.0, 2.0)));
        assert!(!c.sweep_lt(point(1.0, 2.0), point(1.0, 5.0)));
    }

    #[test]
    fn line_distance_signs() {
        // A vertical line going down through x = 1: left of the line is
        // positive, right is negative.
        let line = Line::new(point(1.0, 0.0), point(1.0, 10.0));
        assert!(line.dist(point(0.0, 5.0)) > 0.0);
        assert!(line.dist(point(2.0, 5.0)) < 0.0);
        assert_eq!(line.dist(point(1.0, 7.5)), 0.0);
    }

    #[test]
    fn edge_dist_coerces_endpoints() {
        let mut arena = MeshArena::new();
        // Deliberately nasty coordinates so the line equation has rounding
        // error at the endpoints.
        let top = arena.make_vertex(point(0.1000001, 0.3333333), 255);
        let bottom = arena.make_vertex(point(7.7777777, 9.1111112), 255);
        let e = arena.make_edge(top, bottom, 1, EdgeType::Inner);
        assert_eq!(arena.edge_dist(e, arena[top].point), 0.0);
        assert_eq!(arena.edge_dist(e, arena[bottom].point), 0.0);
    }

    #[test]
    fn edge_intersection() {
        let mut arena = MeshArena::new();
        let a0 = arena.make_vertex(point(0.0, 0.0), 255);
        let a1 = arena.make_vertex(point(2.0, 2.0), 255);
        let b0 = arena.make_vertex(point(2.0, 0.0), 255);
        let b1 = arena.make_vertex(point(0.0, 2.0), 255);
        let e0 = arena.make_edge(a0, a1, 1, EdgeType::Inner);
        let e1 = arena.make_edge(b0, b1, 1, EdgeType::Inner);
        assert_eq!(arena.intersect_edges(e0, e1), Some(point(1.0, 1.0)));

        // Parallel edges do not intersect.
        let c0 = arena.make_vertex(point(5.0, 0.0), 255);
        let c1 = arena.make_vertex(point(7.0, 2.0), 255);
        let e2 = arena.make_edge(c0, c1, 1, EdgeType::Inner);
        assert_eq!(arena.intersect_edges(e0, e2), None);

        // Edges sharing an endpoint position do not intersect.
        let d0 = arena.make_vertex(point(0.0, 0.0), 255);
        let d1 = arena.make_vertex(point(-2.0, 2.0), 255);
        let e3 = arena.make_edge(d0, d1, 1, EdgeType::Inner);
        assert_eq!(arena.intersect_edges(e0, e3), None);
    }
}
