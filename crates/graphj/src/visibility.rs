//! Obstacle-avoiding edge routing over a visibility graph.
//!
//! Every vertex shape becomes a convex "hole". The visibility graph connects hole corners that
//! can see each other; Dijkstra over it yields the shortest route around all holes.
//!
//! Building the graph is `O(P² · E)` for `P` corner points and `E` hole edges, so this is the hot
//! path on dense drawings. [`ShortestPathRouter::route_all`] at least shares the hulls across a
//! batch of edges.

use crate::error::{Error, Result};
use crate::layout2d::{self, Layout2D};
use graphj_model::geom::{self, Point};
use graphj_model::path::clipped_path;
use graphj_model::{EdgeKey, Graph, Path};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const EPSILON: f64 = 1e-7;

fn point_key(p: Point) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

fn obstructs(hole: &[Point], from: Point, to: Point) -> bool {
    let n = hole.len();
    if n < 2 {
        return false;
    }
    (0..n).any(|i| {
        geom::segment_intersection(from, to, hole[i], hole[(i + 1) % n]).is_some_and(|p| {
            (p - from).length() > EPSILON && (p - to).length() > EPSILON
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    cost: f64,
    vertex: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on cost
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Corner points of all holes, connected where they see each other.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGraph {
    points: IndexMap<(u64, u64), Point>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl VisibilityGraph {
    /// Builds the graph for `holes`, each a polygon in layout coordinates.
    ///
    /// A hole's perimeter is always walkable. Corners of different holes are connected unless
    /// the line between them crosses some hole boundary away from its own end points.
    pub fn new(holes: &[Vec<Point>]) -> Self {
        let mut vg = Self::default();

        for hole in holes {
            let ix: Vec<usize> = hole.iter().map(|&p| vg.vertex(p)).collect();
            if ix.len() >= 2 {
                for i in 0..ix.len() {
                    vg.sees(ix[i], ix[(i + 1) % ix.len()]);
                }
            }
        }

        for (i, source) in holes.iter().enumerate() {
            for dest in &holes[i + 1..] {
                for &p in source {
                    for &q in dest {
                        if holes.iter().any(|h| obstructs(h, p, q)) {
                            continue;
                        }
                        let (a, b) = (vg.vertex(p), vg.vertex(q));
                        vg.sees(a, b);
                    }
                }
            }
        }

        vg
    }

    fn vertex(&mut self, p: Point) -> usize {
        let entry = self.points.entry(point_key(p));
        let ix = entry.index();
        entry.or_insert(p);
        if ix == self.adjacency.len() {
            self.adjacency.push(Vec::new());
        }
        ix
    }

    fn sees(&mut self, a: usize, b: usize) {
        if a == b || self.adjacency[a].iter().any(|&(n, _)| n == b) {
            return;
        }
        let d = (self.points[a] - self.points[b]).length();
        self.adjacency[a].push((b, d));
        self.adjacency[b].push((a, d));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, ix: usize) -> Point {
        self.points[ix]
    }

    /// The vertex exactly at `p`, if any.
    pub fn vertex_at(&self, p: Point) -> Option<usize> {
        self.points.get_index_of(&point_key(p))
    }

    pub fn neighbours(&self, ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[ix].iter().map(|&(n, _)| n)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Dijkstra from `from` to `to`; the points along the way, both ends included.
    pub fn shortest_path(&self, from: usize, to: usize) -> Option<Vec<Point>> {
        let n = self.points.len();
        if from >= n || to >= n {
            return None;
        }
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        dist[from] = 0.0;
        heap.push(State {
            cost: 0.0,
            vertex: from,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if vertex == to {
                break;
            }
            if cost > dist[vertex] {
                continue;
            }
            for &(next, w) in &self.adjacency[vertex] {
                let c = cost + w;
                if c < dist[next] {
                    dist[next] = c;
                    prev[next] = Some(vertex);
                    heap.push(State {
                        cost: c,
                        vertex: next,
                    });
                }
            }
        }

        if dist[to].is_infinite() {
            return None;
        }
        let mut out = vec![self.points[to]];
        let mut at = to;
        while let Some(p) = prev[at] {
            out.push(self.points[p]);
            at = p;
        }
        out.reverse();
        Some(out)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortestPathRouter {
    /// Clearance kept between a routed edge and the vertices it passes.
    pub edge_vertex_distance: f64,
}

impl Default for ShortestPathRouter {
    fn default() -> Self {
        Self {
            edge_vertex_distance: 4.0,
        }
    }
}

struct Obstacles {
    ids: Vec<String>,
    // convex hulls of the vertex shapes as drawn
    outlines: Vec<Vec<Point>>,
    // the same hulls grown by the clearance
    hulls: Vec<Vec<Point>>,
    // shapes that really overlap
    overlapping: Vec<(usize, usize)>,
    // shapes apart from each other whose clearance zones overlap
    crowded: Vec<(usize, usize)>,
}

fn holds(polygon: &[Point], start: Point, end: Point) -> bool {
    geom::point_in_polygon(start, polygon) || geom::point_in_polygon(end, polygon)
}

fn group_of(groups: &mut [usize], mut i: usize) -> usize {
    while groups[i] != i {
        groups[i] = groups[groups[i]];
        i = groups[i];
    }
    i
}

impl Obstacles {
    fn new<N, E, L: Layout2D + ?Sized>(graph: &Graph<N, E>, layout: &L, padding: f64) -> Self {
        let ids: Vec<String> = graph.node_ids();
        let outlines: Vec<Vec<Point>> = ids
            .iter()
            .map(|v| geom::convex_hull(&layout2d::world_outline(layout, v)))
            .collect();
        let hulls: Vec<Vec<Point>> = outlines
            .iter()
            .map(|outline| geom::expand_hull(outline, padding))
            .collect();
        let mut overlapping = Vec::new();
        let mut crowded = Vec::new();
        for i in 0..hulls.len() {
            for j in i + 1..hulls.len() {
                if geom::polygons_overlap(&outlines[i], &outlines[j]) {
                    overlapping.push((i, j));
                } else if geom::polygons_overlap(&hulls[i], &hulls[j]) {
                    crowded.push((i, j));
                }
            }
        }
        Self {
            ids,
            outlines,
            hulls,
            overlapping,
            crowded,
        }
    }

    // An edge endpoint within the clearance of a vertex only keeps that vertex's bare outline.
    fn obstacle(&self, i: usize, start: Point, end: Point) -> &[Point] {
        if holds(&self.hulls[i], start, end) {
            &self.outlines[i]
        } else {
            &self.hulls[i]
        }
    }

    fn route<L: Layout2D + ?Sized>(&self, edge: &EdgeKey, layout: &L) -> Result<Path> {
        let start = layout.position(&edge.v);
        let end = layout.position(&edge.w);
        let is_end = |i: usize| self.ids[i] == edge.v || self.ids[i] == edge.w;

        if let Some(&(i, j)) = self.overlapping.iter().find(|&&(i, j)| !is_end(i) && !is_end(j)) {
            return Err(Error::graph_shape(format!(
                "obstacles {} and {} overlap",
                self.ids[i], self.ids[j]
            )));
        }
        for (i, outline) in self.outlines.iter().enumerate() {
            if !is_end(i) && holds(outline, start, end) {
                return Err(Error::graph_shape(format!(
                    "edge {} -> {} starts or ends inside {}",
                    edge.v, edge.w, self.ids[i]
                )));
            }
        }

        // Crowded neighbours become one obstacle so no route squeezes between them.
        let mut groups: Vec<usize> = (0..self.ids.len()).collect();
        for &(i, j) in &self.crowded {
            if !is_end(i) && !is_end(j) {
                let (a, b) = (group_of(&mut groups, i), group_of(&mut groups, j));
                groups[a] = b;
            }
        }
        let mut members: IndexMap<usize, Vec<usize>> = IndexMap::new();
        for i in 0..self.ids.len() {
            if !is_end(i) {
                let g = group_of(&mut groups, i);
                members.entry(g).or_default().push(i);
            }
        }

        let mut holes: Vec<Vec<Point>> = vec![vec![start], vec![end]];
        for group in members.values() {
            if let [only] = group.as_slice() {
                holes.push(self.obstacle(*only, start, end).to_vec());
                continue;
            }
            let corners: Vec<Point> = group
                .iter()
                .flat_map(|&i| self.obstacle(i, start, end).iter().copied())
                .collect();
            let merged = geom::convex_hull(&corners);
            if holds(&merged, start, end) {
                holes.extend(group.iter().map(|&i| self.obstacle(i, start, end).to_vec()));
            } else {
                tracing::trace!(vertices = group.len(), "merged crowded obstacles");
                holes.push(merged);
            }
        }
        let vg = VisibilityGraph::new(&holes);

        let from = vg.vertex_at(start).ok_or(Error::Routing {
            x: start.x,
            y: start.y,
        })?;
        let to = vg
            .vertex_at(end)
            .ok_or(Error::Routing { x: end.x, y: end.y })?;
        let points = vg.shortest_path(from, to).ok_or(Error::Unreachable)?;

        Ok(clipped_path(
            &points,
            start,
            &layout2d::transformed_shape(layout, &edge.v),
            end,
            &layout2d::transformed_shape(layout, &edge.w),
        ))
    }
}

impl ShortestPathRouter {
    pub fn new(edge_vertex_distance: f64) -> Self {
        Self {
            edge_vertex_distance: edge_vertex_distance.max(0.0),
        }
    }

    /// The shortest path for `edge` around every other vertex of `graph`.
    pub fn route<N, E, L>(&self, edge: &EdgeKey, graph: &Graph<N, E>, layout: &L) -> Result<Path>
    where
        L: Layout2D + ?Sized,
    {
        Obstacles::new(graph, layout, self.edge_vertex_distance).route(edge, layout)
    }

    /// Routes `edge` and stores the path in `layout`.
    pub fn apply<N, E, L>(&self, edge: &EdgeKey, graph: &Graph<N, E>, layout: &mut L) -> Result<()>
    where
        L: Layout2D + ?Sized,
    {
        let path = self.route(edge, graph, layout)?;
        layout.set_path(edge, path);
        Ok(())
    }

    /// Routes several edges against one set of obstacle hulls. Nothing is written unless every
    /// edge could be routed.
    pub fn route_all<N, E, L>(
        &self,
        edges: &[EdgeKey],
        graph: &Graph<N, E>,
        layout: &mut L,
    ) -> Result<()>
    where
        L: Layout2D + ?Sized,
    {
        let obstacles = Obstacles::new(graph, layout, self.edge_vertex_distance);
        let paths = edges
            .iter()
            .map(|edge| obstacles.route(edge, layout))
            .collect::<Result<Vec<Path>>>()?;
        for (edge, path) in edges.iter().zip(paths) {
            layout.set_path(edge, path);
        }
        tracing::debug!(edges = edges.len(), obstacles = obstacles.hulls.len(), "routed edges");
        Ok(())
    }
}
