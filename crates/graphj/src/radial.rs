//! Radial tree layout: the root sits in the middle, every generation on a ring around it.

use crate::error::Result;
use crate::layout2d::{self, Layout2D};
use graphj_model::geom::{self, Point, Rect, Transform, normalize_radian, point_at, radian_of};
use graphj_model::path::vector_end;
use graphj_model::{EdgeKey, Graph, Path, Shape, Tree};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialOptions {
    /// Vertex in the middle. The first vertex when unset or unknown.
    pub root: Option<String>,
    pub distance_between_generations: f64,
    /// Extra space between neighbouring vertices of one generation.
    pub distance_in_generation: f64,
    /// Grow `distance_between_generations` until no two vertices overlap.
    pub adjust_distances: bool,
    /// Spread children over the whole window of their parent instead of packing them centered.
    pub fan_out: bool,
    pub order_siblings_by_position: bool,
    pub rotate_shapes: bool,
    pub bend_arcs: bool,
    /// Number of generations an edge spans; 1 when absent.
    #[serde(skip)]
    pub edge_lengths: FxHashMap<EdgeKey, f64>,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            root: None,
            distance_between_generations: 60.0,
            distance_in_generation: 0.0,
            adjust_distances: false,
            fan_out: false,
            order_siblings_by_position: true,
            rotate_shapes: false,
            bend_arcs: false,
            edge_lengths: FxHashMap::default(),
        }
    }
}

impl RadialOptions {
    pub fn set_distance_between_generations(&mut self, distance: f64) {
        self.distance_between_generations = distance.max(1.0);
    }

    pub fn set_edge_length(&mut self, edge: EdgeKey, generations: f64) {
        self.edge_lengths.insert(edge, generations.max(1.0));
    }

    /// Generations spanned by `edge`, looked up in either direction.
    pub fn edge_length(&self, edge: &EdgeKey) -> f64 {
        let reversed = EdgeKey {
            v: edge.w.clone(),
            w: edge.v.clone(),
            name: edge.name.clone(),
        };
        self.edge_lengths
            .get(edge)
            .or_else(|| self.edge_lengths.get(&reversed))
            .copied()
            .unwrap_or(1.0)
            .max(1.0)
    }
}

fn resolve_root<'g, N, E>(graph: &'g Graph<N, E>, root: Option<&str>) -> Option<&'g str> {
    if let Some(root) = root {
        if let Some(ix) = graph.node_ix(root) {
            return Some(graph.node_id(ix));
        }
        tracing::warn!(root, "unknown radial root, using the first vertex");
    }
    graph.nodes().next()
}

fn edge_between<N, E>(graph: &Graph<N, E>, a: &str, b: &str) -> Option<EdgeKey> {
    graph
        .node_edges(a)
        .into_iter()
        .find(|k| k.other(a) == Some(b))
}

struct Recursion {
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    edge: Vec<Option<EdgeKey>>,
    generation: Vec<f64>,
    need: Vec<f64>,
    angle: Vec<f64>,
    preorder: Vec<usize>,
    root: usize,
}

/// Lays out a spanning tree on concentric rings around its root.
///
/// The root keeps its current position. Returns the circle enclosing all rings.
pub fn layout<N, E, L>(
    graph: &Graph<N, E>,
    layout: &mut L,
    bounds: Rect,
    options: &RadialOptions,
) -> Result<Shape>
where
    L: Layout2D + ?Sized,
{
    let Some(root) = resolve_root(graph, options.root.as_deref()) else {
        return Ok(Shape::Rectangle(bounds));
    };
    let tree = Tree::new(graph, root)?;

    let n = graph.node_count();
    let in_gen = options.distance_in_generation.max(0.0);
    let root_ix = graph.node_ix(root).unwrap_or_default();
    let mut r = Recursion {
        parent: vec![None; n],
        children: vec![Vec::new(); n],
        edge: vec![None; n],
        generation: vec![0.0; n],
        need: vec![0.0; n],
        angle: vec![0.0; n],
        preorder: Vec::with_capacity(n),
        root: root_ix,
    };

    for (v, p) in tree.preorder() {
        let Some(vi) = graph.node_ix(v) else { continue };
        r.preorder.push(vi);
        let Some(pi) = p.and_then(|p| graph.node_ix(p)) else {
            continue;
        };
        let key = edge_between(graph, graph.node_id(pi), v);
        let len = key.as_ref().map_or(1.0, |k| options.edge_length(k));
        r.parent[vi] = Some(pi);
        r.children[pi].push(vi);
        r.generation[vi] = r.generation[pi] + len;
        r.edge[vi] = key;
    }

    // Sizing, leaves first: the arc length a subtree needs, measured on its own ring.
    let diameter: Vec<f64> = (0..n)
        .map(|v| layout.shape(graph.node_id(v)).diameter())
        .collect();
    for &v in r.preorder.iter().rev() {
        let own = diameter[v] + in_gen;
        let below: f64 = if v == r.root {
            0.0
        } else {
            r.children[v]
                .iter()
                .map(|&c| r.need[c] * r.generation[v] / r.generation[c])
                .sum()
        };
        r.need[v] = own.max(below);
    }

    let mut distance = options.distance_between_generations.max(1.0);
    if options.adjust_distances {
        let around_root: f64 = r.children[r.root]
            .iter()
            .map(|&c| r.need[c] / r.generation[c])
            .sum::<f64>()
            / TAU;
        let widest = diameter.iter().copied().fold(0.0, f64::max);
        distance = distance.max(around_root).max(widest + in_gen);
    }

    let center = layout.position(root);
    layout.set_transform(root, Transform::identity());

    // Placement, parents first.
    let mut windows: Vec<(usize, f64, f64)> = vec![(r.root, -PI, PI)];
    while let Some((v, from, to)) = windows.pop() {
        let mut kids = r.children[v].clone();
        if kids.is_empty() {
            continue;
        }
        let mid = (from + to) / 2.0;
        if options.order_siblings_by_position {
            let behind = mid + PI;
            let key = |c: usize| {
                let at = layout.position(graph.node_id(c)) - center;
                normalize_radian(radian_of(at) - behind)
            };
            kids.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
        }

        let mut arcs: Vec<f64> = kids
            .iter()
            .map(|&c| r.need[c] / (r.generation[c] * distance))
            .collect();
        let mut total: f64 = arcs.iter().sum();
        if total <= 0.0 {
            arcs = vec![1.0; kids.len()];
            total = kids.len() as f64;
        }

        let mut share = (to - from) / total;
        let mut start = from;
        if share > 1.0 && !options.fan_out {
            start = mid - total / 2.0;
            share = 1.0;
        }

        for (&c, arc) in kids.iter().zip(arcs) {
            let width = arc * share;
            let angle = start + width / 2.0;
            let id = graph.node_id(c);
            r.angle[c] = angle;
            layout.set_position(id, point_at(center, angle, r.generation[c] * distance));
            let transform = if options.rotate_shapes {
                geom::rotation(angle)
            } else {
                Transform::identity()
            };
            layout.set_transform(id, transform);
            tracing::trace!(
                vertex = id,
                angle,
                radius = r.generation[c] * distance,
                "radial placement"
            );
            windows.push((c, start, start + width));
            start += width;
        }
    }

    for &v in &r.preorder {
        let (Some(p), Some(key)) = (r.parent[v], r.edge[v].as_ref()) else {
            continue;
        };
        let path = if options.bend_arcs && p != r.root {
            bent_path(graph, layout, &r, p, v, center, distance)
        } else {
            layout2d::straight_path(key, layout)
        };
        let path = if key.v == graph.node_id(p) {
            path
        } else {
            path.reversed()
        };
        layout.set_path(key, path);
    }

    let depth = r.generation.iter().copied().fold(0.0, f64::max);
    tracing::debug!(vertices = n, depth, distance, "radial layout");
    Ok(Shape::circle(center, depth * distance))
}

// parent -> out to the ring halfway between both generations -> along that ring -> in to child
fn bent_path<N, E, L: Layout2D + ?Sized>(
    graph: &Graph<N, E>,
    layout: &L,
    r: &Recursion,
    parent: usize,
    child: usize,
    center: Point,
    distance: f64,
) -> Path {
    let (pid, cid) = (graph.node_id(parent), graph.node_id(child));
    let middle = (r.generation[parent] + r.generation[child]) / 2.0 * distance;
    let from = r.angle[parent];
    let mut to = r.angle[child];
    while to - from > PI {
        to -= TAU;
    }
    while from - to > PI {
        to += TAU;
    }

    let (pp, cp) = (layout.position(pid), layout.position(cid));
    let out = point_at(center, from, middle);
    let back = point_at(center, to, middle);
    let start = vector_end(out, pp, pp, &layout2d::transformed_shape(layout, pid));
    let end = vector_end(back, cp, cp, &layout2d::transformed_shape(layout, cid));

    let mut path = Path::new(start);
    path.line_to(out);
    path.arc_to(center, middle, from, to);
    path.line_to(end);
    path
}
