//! The mutable sink layouts read shapes from and write positions, transforms and paths into.

use graphj_model::geom::{self, Point, Rect, Transform};
use graphj_model::path::clipped_path;
use graphj_model::{EdgeKey, Graph, Path, Shape};
use rustc_hash::FxHashMap;

/// Per-vertex geometry and per-edge paths of one drawing of a graph.
///
/// Shapes are in vertex-local coordinates: a vertex occupies `shape`, transformed by
/// `transform`, then translated to `position`.
pub trait Layout2D {
    fn position(&self, vertex: &str) -> Point;
    fn set_position(&mut self, vertex: &str, position: Point);

    fn shape(&self, vertex: &str) -> &Shape;

    fn transform(&self, vertex: &str) -> Transform;
    fn set_transform(&mut self, vertex: &str, transform: Transform);

    fn path(&self, edge: &EdgeKey) -> Option<&Path>;
    fn set_path(&mut self, edge: &EdgeKey, path: Path);
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexGeometry {
    pub position: Point,
    pub shape: Shape,
    pub transform: Transform,
}

impl Default for VertexGeometry {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            shape: Shape::empty(),
            transform: Transform::identity(),
        }
    }
}

/// Hash map backed [`Layout2D`]. Vertices it doesn't know sit at the origin with an empty shape.
#[derive(Debug, Clone, Default)]
pub struct DefaultLayout {
    vertices: FxHashMap<String, VertexGeometry>,
    paths: FxHashMap<EdgeKey, Path>,
    empty: Shape,
}

impl DefaultLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertex(mut self, id: impl Into<String>, position: Point, shape: Shape) -> Self {
        self.vertices.insert(
            id.into(),
            VertexGeometry {
                position,
                shape,
                transform: Transform::identity(),
            },
        );
        self
    }

    pub fn set_shape(&mut self, vertex: &str, shape: Shape) {
        self.entry(vertex).shape = shape;
    }

    pub fn vertex(&self, id: &str) -> Option<&VertexGeometry> {
        self.vertices.get(id)
    }

    pub fn paths(&self) -> impl Iterator<Item = (&EdgeKey, &Path)> {
        self.paths.iter()
    }

    fn entry(&mut self, vertex: &str) -> &mut VertexGeometry {
        self.vertices.entry(vertex.to_string()).or_default()
    }
}

impl Layout2D for DefaultLayout {
    fn position(&self, vertex: &str) -> Point {
        self.vertices
            .get(vertex)
            .map_or(Point::origin(), |v| v.position)
    }

    fn set_position(&mut self, vertex: &str, position: Point) {
        self.entry(vertex).position = position;
    }

    fn shape(&self, vertex: &str) -> &Shape {
        self.vertices.get(vertex).map_or(&self.empty, |v| &v.shape)
    }

    fn transform(&self, vertex: &str) -> Transform {
        self.vertices
            .get(vertex)
            .map_or(Transform::identity(), |v| v.transform)
    }

    fn set_transform(&mut self, vertex: &str, transform: Transform) {
        self.entry(vertex).transform = transform;
    }

    fn path(&self, edge: &EdgeKey) -> Option<&Path> {
        self.paths.get(edge)
    }

    fn set_path(&mut self, edge: &EdgeKey, path: Path) {
        self.paths.insert(edge.clone(), path);
    }
}

/// The vertex shape with its transform applied, still relative to the vertex position.
pub fn transformed_shape<L: Layout2D + ?Sized>(layout: &L, vertex: &str) -> Shape {
    layout.shape(vertex).transformed(&layout.transform(vertex))
}

/// Outline of a vertex in layout coordinates.
pub fn world_outline<L: Layout2D + ?Sized>(layout: &L, vertex: &str) -> Vec<Point> {
    let offset = layout.position(vertex).to_vector();
    transformed_shape(layout, vertex)
        .outline()
        .into_iter()
        .map(|p| p + offset)
        .collect()
}

/// Union of all vertex outlines; the zero rectangle for an empty graph.
pub fn bounds<N, E, L: Layout2D + ?Sized>(graph: &Graph<N, E>, layout: &L) -> Rect {
    let points: Vec<Point> = graph
        .nodes()
        .flat_map(|v| world_outline(layout, v))
        .collect();
    geom::bounds_of(&points)
}

/// A straight line between the edge's vertex centers, clipped to both shapes.
pub fn straight_path<L: Layout2D + ?Sized>(edge: &EdgeKey, layout: &L) -> Path {
    let (a, b) = (layout.position(&edge.v), layout.position(&edge.w));
    clipped_path(
        &[a, b],
        a,
        &transformed_shape(layout, &edge.v),
        b,
        &transformed_shape(layout, &edge.w),
    )
}

pub fn set_straight_paths<N, E, L: Layout2D + ?Sized>(graph: &Graph<N, E>, layout: &mut L) {
    for edge in graph.edges() {
        let path = straight_path(edge, layout);
        layout.set_path(edge, path);
    }
}
