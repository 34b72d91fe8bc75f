//! Circular layout: vertices that share an undirected cycle are placed on a common ring.

use crate::error::Result;
use crate::layout2d::{self, Layout2D};
use graphj_model::geom::{self, Point, Rect, Transform, point, point_at};
use graphj_model::{Graph, Shape};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircularOptions {
    /// Put every vertex on one ring instead of one ring per circle.
    pub single_circle: bool,
    /// Space added to each vertex's width and height when sizing the ring.
    pub padding: f64,
    /// Horizontal step between the centers of consecutive rings.
    pub circle_spacing: f64,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self {
            single_circle: true,
            padding: 12.0,
            circle_spacing: 160.0,
        }
    }
}

/// Vertex ids of one circle.
pub type Circle = Vec<String>;

struct Circles {
    // union-find over circle ids; a vertex starts in a circle of its own
    parent: Vec<usize>,
}

impl Circles {
    fn create(&mut self) -> usize {
        self.parent.push(self.parent.len());
        self.parent.len() - 1
    }

    fn find(&mut self, mut c: usize) -> usize {
        while self.parent[c] != c {
            self.parent[c] = self.parent[self.parent[c]];
            c = self.parent[c];
        }
        c
    }

    fn fold(&mut self, from: usize, into: usize) {
        let (from, into) = (self.find(from), self.find(into));
        if from != into {
            self.parent[from] = into;
        }
    }
}

struct Frame {
    vertex: usize,
    via: Option<usize>,
    next: usize,
}

/// Partitions the vertices into circles: sets of vertices joined by undirected cycles.
///
/// Circles are ordered by their first vertex in graph order; members keep graph order.
pub fn decompose<N, E>(graph: &Graph<N, E>, single_circle: bool) -> Vec<Circle> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    if single_circle {
        return vec![graph.node_ids()];
    }

    let mut circles = Circles { parent: Vec::with_capacity(n) };
    let mut circle_of: Vec<usize> = vec![usize::MAX; n];
    let mut on_path = vec![false; n];
    let mut stack: Vec<Frame> = Vec::new();

    for start in 0..n {
        if circle_of[start] != usize::MAX {
            continue;
        }
        circle_of[start] = circles.create();
        on_path[start] = true;
        stack.push(Frame {
            vertex: start,
            via: None,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let v = frame.vertex;
            let incident = graph.incident_edges(v);
            if frame.next == incident.len() {
                on_path[v] = false;
                stack.pop();
                continue;
            }
            let e = incident[frame.next];
            frame.next += 1;
            if frame.via == Some(e) {
                continue;
            }
            let (a, b) = graph.edge_endpoints(e);
            let w = if a == v { b } else { a };
            if w == v {
                continue;
            }

            if on_path[w] {
                // back edge: everything on the path above `w` joins w's circle
                let target = circle_of[w];
                for f in stack.iter().rev().take_while(|f| f.vertex != w) {
                    circles.fold(circle_of[f.vertex], target);
                }
                continue;
            }
            if circle_of[w] != usize::MAX {
                continue;
            }

            circle_of[w] = circles.create();
            on_path[w] = true;
            stack.push(Frame {
                vertex: w,
                via: Some(e),
                next: 0,
            });
        }
    }

    let mut grouped: IndexMap<usize, Circle> = IndexMap::new();
    for (v, &c) in circle_of.iter().enumerate() {
        let root = circles.find(c);
        grouped
            .entry(root)
            .or_default()
            .push(graph.node_id(v).to_string());
    }
    grouped.into_values().collect()
}

/// Lays out each circle on its own ring, rings side by side, and draws edges as straight lines.
///
/// Graphs with fewer than two vertices are left untouched and `bounds` is returned as is.
pub fn layout<N, E, L>(
    graph: &Graph<N, E>,
    layout: &mut L,
    bounds: Rect,
    options: &CircularOptions,
) -> Result<Shape>
where
    L: Layout2D + ?Sized,
{
    if graph.node_count() < 2 {
        return Ok(Shape::Rectangle(bounds));
    }

    let circles = decompose(graph, options.single_circle);
    tracing::debug!(
        circles = circles.len(),
        vertices = graph.node_count(),
        "circular layout"
    );

    let mut cx = 0.0;
    for circle in &circles {
        place_circle(layout, circle, point(cx, 0.0), options.padding);
        cx += options.circle_spacing;
    }

    layout2d::set_straight_paths(graph, layout);
    Ok(Shape::Rectangle(layout2d::bounds(graph, layout)))
}

fn place_circle<L: Layout2D + ?Sized>(
    layout: &mut L,
    circle: &[String],
    center: Point,
    padding: f64,
) {
    for v in circle {
        layout.set_transform(v, Transform::identity());
    }
    if let [only] = circle {
        layout.set_position(only, center);
        return;
    }

    let sizes: Vec<f64> = circle
        .iter()
        .map(|v| {
            let b = layout.shape(v).bounds();
            geom::length(b.width() + padding, b.height() + padding)
        })
        .collect();
    let circumference: f64 = sizes.iter().sum();
    if circumference <= 0.0 {
        for v in circle {
            layout.set_position(v, center);
        }
        return;
    }

    let diameters: Vec<f64> = circle.iter().map(|v| layout.shape(v).diameter()).collect();
    let arcs: Vec<f64> = sizes.iter().map(|s| TAU * s / circumference).collect();
    let radius = ring_radius(&diameters, &arcs, circumference, padding);

    let mut radian = 0.0;
    for (i, v) in circle.iter().enumerate() {
        let at = radian + arcs[i] / 2.0;
        layout.set_position(v, point_at(center, at, radius));
        tracing::trace!(vertex = %v, radian = at, radius, "placed on ring");
        radian += arcs[i];
    }
}

// `circumference / 2π`, grown only where two ring neighbours would end up closer than half their
// diameters plus `padding`.
fn ring_radius(diameters: &[f64], arcs: &[f64], circumference: f64, padding: f64) -> f64 {
    let n = diameters.len();
    let mut radius = circumference / TAU;
    for i in 0..n {
        let j = (i + 1) % n;
        let between = ((arcs[i] + arcs[j]) / 2.0).min(PI);
        let chord_factor = 2.0 * (between / 2.0).sin();
        let required = (diameters[i] + diameters[j]) / 2.0 + padding;
        if chord_factor > 0.0 && radius * chord_factor < required {
            radius = required / chord_factor;
            tracing::trace!(radius, "ring grown to keep neighbours apart");
        }
    }
    radius
}
