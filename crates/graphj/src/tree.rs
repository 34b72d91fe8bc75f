//! Layered tree layout: children hang below their parent, sibling subtrees are packed against
//! each other along their contours.
//!
//! Every subtree is a branch with a convex hull. A parent places its child branches side by side,
//! top-aligned, pushed together until `distance_in_generation` separates their hulls, then sits
//! `distance_between_generations` above them.
//!
//! Directed graphs are laid out as single-source DAGs by default: a vertex reached a second time
//! keeps its first placement and the extra edges are routed around the drawing afterwards.

use crate::error::{Error, Result};
use crate::layout2d::{self, Layout2D};
use crate::visibility::ShortestPathRouter;
use graphj_model::geom::{self, Point, Rect, Transform, Vector};
use graphj_model::path::clipped_path;
use graphj_model::{EdgeKey, Graph, Shape, Tree};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeControl {
    /// Straight lines between vertex centers.
    #[default]
    DirectLines,
    /// Orthogonal-ish lines that leave the parent, run along a bar halfway between the
    /// generations and drop down to each child.
    BendedLines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeOptions {
    /// Root vertex. The first vertex without incoming edges when unset or unknown.
    pub root: Option<String>,
    pub distance_in_generation: f64,
    pub distance_between_generations: f64,
    /// Where the parent sits between its first (0) and last (1) child.
    pub alignment_of_parent: f64,
    /// Pack the middle children from both sides instead of left to right only.
    pub balance_children: bool,
    /// Direction the tree grows in, in degrees clockwise from north. 180 grows downwards.
    pub orientation: f64,
    pub order_siblings_by_position: bool,
    /// Follow edge direction and tolerate vertices with several parents.
    pub single_source_dag: bool,
    pub edge_control: EdgeControl,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root: None,
            distance_in_generation: 20.0,
            distance_between_generations: 20.0,
            alignment_of_parent: 0.5,
            balance_children: false,
            orientation: 180.0,
            order_siblings_by_position: true,
            single_source_dag: true,
            edge_control: EdgeControl::DirectLines,
        }
    }
}

impl TreeOptions {
    pub fn set_alignment_of_parent(&mut self, alignment: f64) {
        self.alignment_of_parent = alignment.clamp(0.0, 1.0);
    }
}

fn projection(p: Point, radian: f64) -> f64 {
    let (sin, cos) = radian.sin_cos();
    sin * p.x - cos * p.y
}

fn along(radian: f64, distance: f64) -> Vector {
    geom::point_at(Point::origin(), radian, distance).to_vector()
}

fn translated(points: &[Point], by: Vector) -> Vec<Point> {
    points.iter().map(|&p| p + by).collect()
}

/// How far a vertex shape reaches from its center in direction `axis`; never negative.
fn reach(shape: &Shape, axis: f64) -> f64 {
    shape
        .outline()
        .into_iter()
        .map(|p| projection(p, axis))
        .fold(0.0, f64::max)
}

/// How far `a` can travel along `axis` before it hits `b`.
///
/// Hulls that would slide past each other (single points, slivers) fall back to the gap between
/// their projections on `axis`.
fn separation(a: &[Point], b: &[Point], axis: f64) -> f64 {
    let d = geom::distance_along(a, b, axis);
    if d.is_finite() {
        return d;
    }
    let a_max = a
        .iter()
        .map(|&p| projection(p, axis))
        .fold(f64::NEG_INFINITY, f64::max);
    let b_min = b
        .iter()
        .map(|&p| projection(p, axis))
        .fold(f64::INFINITY, f64::min);
    b_min - a_max
}

struct Branch {
    root: usize,
    members: Vec<usize>,
    hull: Vec<Point>,
}

impl Branch {
    /// The hull point reaching furthest against the growth direction.
    fn top(&self, axis: f64) -> Point {
        geom::max_extent(&self.hull, axis + PI).unwrap_or(Point::origin())
    }

    fn move_by<N, E, L: Layout2D + ?Sized>(
        &mut self,
        delta: Vector,
        graph: &Graph<N, E>,
        layout: &mut L,
    ) {
        if delta == Vector::zero() {
            return;
        }
        for &m in &self.members {
            let id = graph.node_id(m);
            let p = layout.position(id);
            layout.set_position(id, p + delta);
        }
        for p in &mut self.hull {
            *p += delta;
        }
    }
}

/// Which vertex hangs below which, plus the edges left over in a DAG.
struct Structure {
    preorder: Vec<usize>,
    children: Vec<Vec<usize>>,
    extra: Vec<EdgeKey>,
}

struct Frame {
    v: usize,
    candidates: Vec<usize>,
    next: usize,
}

fn resolve_root<N, E>(graph: &Graph<N, E>, root: Option<&str>) -> Result<usize> {
    if let Some(root) = root {
        if let Some(ix) = graph.node_ix(root) {
            return Ok(ix);
        }
        tracing::warn!(root, "unknown tree root, using the first source");
    }
    graph
        .sources()
        .first()
        .and_then(|v| graph.node_ix(v))
        .ok_or_else(|| Error::graph_shape("no vertex with in-degree zero"))
}

fn structure<N, E, L: Layout2D + ?Sized>(
    graph: &Graph<N, E>,
    layout: &L,
    root: usize,
    options: &TreeOptions,
    dag: bool,
) -> Result<Structure> {
    let n = graph.node_count();
    let lr = geom::radian(options.orientation) - FRAC_PI_2;

    let candidates = |v: usize, parent: Option<usize>| -> Vec<usize> {
        let id = graph.node_id(v);
        let adjacent = if dag {
            graph.successors(id)
        } else {
            graph.neighbors(id)
        };
        let mut out: Vec<usize> = adjacent
            .into_iter()
            .filter_map(|c| graph.node_ix(c))
            .filter(|&c| dag || Some(c) != parent)
            .collect();
        out.sort_unstable();
        out.dedup();
        if options.order_siblings_by_position {
            out.sort_by(|&a, &b| {
                let pa = projection(layout.position(graph.node_id(a)), lr);
                let pb = projection(layout.position(graph.node_id(b)), lr);
                pa.total_cmp(&pb)
            });
        }
        out
    };

    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut children = vec![Vec::new(); n];
    let mut preorder = vec![root];
    let mut extra = Vec::new();

    visited[root] = true;
    on_stack[root] = true;
    let mut stack = vec![Frame {
        v: root,
        candidates: candidates(root, None),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&c) = frame.candidates.get(frame.next) else {
            on_stack[frame.v] = false;
            stack.pop();
            continue;
        };
        frame.next += 1;
        let v = frame.v;

        if visited[c] {
            if on_stack[c] {
                return Err(Error::graph_shape(format!(
                    "graph contains a cycle through {} -> {}",
                    graph.node_id(v),
                    graph.node_id(c)
                )));
            }
            if !dag {
                return Err(Error::graph_shape(format!(
                    "undirected cycle through {} - {}",
                    graph.node_id(v),
                    graph.node_id(c)
                )));
            }
            extra.extend(graph.out_edges(graph.node_id(v), Some(graph.node_id(c))));
            continue;
        }

        visited[c] = true;
        on_stack[c] = true;
        preorder.push(c);
        children[v].push(c);
        stack.push(Frame {
            v: c,
            candidates: candidates(c, Some(v)),
            next: 0,
        });
    }

    let reached = visited.iter().filter(|&&seen| seen).count();
    if reached != n {
        return Err(Error::graph_shape(format!(
            "not a spanning tree: {reached} of {n} vertices reachable from {}",
            graph.node_id(root)
        )));
    }

    Ok(Structure {
        preorder,
        children,
        extra,
    })
}

fn place<N, E, L: Layout2D + ?Sized>(
    graph: &Graph<N, E>,
    layout: &mut L,
    v: usize,
    mut branches: Vec<Branch>,
    options: &TreeOptions,
) -> Branch {
    let id = graph.node_id(v);
    let axis = geom::radian(options.orientation);
    layout.set_transform(id, Transform::identity());

    if branches.is_empty() {
        let mut hull = geom::convex_hull(&layout2d::world_outline(layout, id));
        if hull.is_empty() {
            hull.push(layout.position(id));
        }
        return Branch {
            root: v,
            members: vec![v],
            hull,
        };
    }

    let n = branches.len();
    let gap = options.distance_in_generation;

    // left to right, relative to the first child
    let lr = axis - FRAC_PI_2;
    let first_top = branches[0].top(axis);
    let mut lr_deltas = vec![Vector::zero(); n];
    for i in 1..n {
        let base = first_top - branches[i].top(axis);
        let moved = translated(&branches[i].hull, base);
        let distance = (0..i)
            .map(|j| separation(&translated(&branches[j].hull, lr_deltas[j]), &moved, lr) - gap)
            .fold(f64::INFINITY, f64::min);
        lr_deltas[i] = base + along(lr, -distance);
    }
    branches[n - 1].move_by(lr_deltas[n - 1], graph, layout);

    // right to left, relative to the placed last child
    let rl_deltas = if n > 2 && options.balance_children {
        let rl = axis + FRAC_PI_2;
        let last_top = branches[n - 1].top(axis);
        let mut rl_deltas = vec![Vector::zero(); n];
        for i in (0..n - 1).rev() {
            let base = last_top - branches[i].top(axis);
            let moved = translated(&branches[i].hull, base);
            let distance = (i + 1..n)
                .map(|j| separation(&translated(&branches[j].hull, rl_deltas[j]), &moved, rl) - gap)
                .fold(f64::INFINITY, f64::min);
            rl_deltas[i] = base + along(rl, -distance);
        }
        rl_deltas
    } else {
        lr_deltas.clone()
    };

    for i in 1..n - 1 {
        branches[i].move_by(lr_deltas[i].lerp(rl_deltas[i], 0.5), graph, layout);
    }

    let up = axis + PI;
    let top = branches[0].top(axis);
    let first = layout.position(graph.node_id(branches[0].root));
    let last = layout.position(graph.node_id(branches[n - 1].root));
    let anchor = geom::lerp(first, last, options.alignment_of_parent.clamp(0.0, 1.0));
    let bar = geom::line_intersection_at(top, lr, anchor, up).unwrap_or(anchor);
    let shape = layout2d::transformed_shape(layout, id);
    let r = geom::point_at(bar, up, options.distance_between_generations + reach(&shape, axis));
    layout.set_position(id, r);
    tracing::trace!(vertex = id, x = r.x, y = r.y, children = n, "tree placement");

    let mut points: Vec<Point> = translated(&shape.outline(), r.to_vector());
    points.push(r);
    let mut members = vec![v];
    for branch in branches {
        points.extend(branch.hull);
        members.extend(branch.members);
    }
    Branch {
        root: v,
        members,
        hull: geom::convex_hull(&points),
    }
}

fn route_tree_edges<N, E, L: Layout2D + ?Sized>(
    graph: &Graph<N, E>,
    layout: &mut L,
    structure: &Structure,
    options: &TreeOptions,
) {
    let axis = geom::radian(options.orientation);
    let lr = axis - FRAC_PI_2;

    for &v in &structure.preorder {
        let id = graph.node_id(v);
        let from = layout.position(id);
        let bar = geom::point_at(
            from,
            axis,
            reach(layout.shape(id), axis) + options.distance_between_generations / 2.0,
        );
        for &c in &structure.children[v] {
            let cid = graph.node_id(c);
            for edge in graph.node_edges(id).into_iter().filter(|e| e.other(id) == Some(cid)) {
                let path = match options.edge_control {
                    EdgeControl::DirectLines => layout2d::straight_path(&edge, layout),
                    EdgeControl::BendedLines => {
                        let to = layout.position(cid);
                        let corner = geom::line_intersection_at(bar, lr, to, axis).unwrap_or(bar);
                        let path = clipped_path(
                            &[from, bar, corner, to],
                            from,
                            &layout2d::transformed_shape(layout, id),
                            to,
                            &layout2d::transformed_shape(layout, cid),
                        );
                        if edge.v == id { path } else { path.reversed() }
                    }
                };
                layout.set_path(&edge, path);
            }
        }
    }
}

/// Lays out `graph` as a tree and returns the convex hull around it.
///
/// Structural problems (no root, cycles, vertices the root can't reach) are reported before
/// anything is written to `layout`.
pub fn layout<N, E, L>(
    graph: &Graph<N, E>,
    layout: &mut L,
    bounds: Rect,
    options: &TreeOptions,
) -> Result<Shape>
where
    L: Layout2D + ?Sized,
{
    if graph.is_empty() {
        return Ok(Shape::Rectangle(bounds));
    }

    let dag = options.single_source_dag && graph.is_directed();
    let root = resolve_root(graph, options.root.as_deref())?;
    if !dag {
        Tree::new(graph, graph.node_id(root))?;
    }
    let structure = structure(graph, &*layout, root, options, dag)?;

    let mut branches: Vec<Option<Branch>> = (0..graph.node_count()).map(|_| None).collect();
    for &v in structure.preorder.iter().rev() {
        let below: Vec<Branch> = structure.children[v]
            .iter()
            .filter_map(|&c| branches[c].take())
            .collect();
        branches[v] = Some(place(graph, layout, v, below, options));
    }

    route_tree_edges(graph, layout, &structure, options);

    if !structure.extra.is_empty() {
        let clearance = options
            .distance_between_generations
            .min(options.distance_in_generation)
            / 4.0;
        ShortestPathRouter::new(clearance).route_all(&structure.extra, graph, layout)?;
    }

    tracing::debug!(
        root = graph.node_id(root),
        vertices = structure.preorder.len(),
        routed = structure.extra.len(),
        "tree layout"
    );

    let hull = branches[root].take().map(|b| b.hull).unwrap_or_default();
    Ok(Shape::Polygon(hull))
}
