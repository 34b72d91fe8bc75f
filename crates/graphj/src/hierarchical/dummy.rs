use crate::layout2d::Layout2D;
use graphj_model::geom::{Point, Transform};
use graphj_model::{EdgeKey, Path, Shape};
use rustc_hash::FxHashMap;

/// Wraps the caller's layout so dummy cells get positions without ever reaching it.
///
/// Dummies have an empty shape and an identity transform; everything else is forwarded.
pub struct DummyAwareLayout<'a, L: ?Sized> {
    inner: &'a mut L,
    dummies: FxHashMap<String, Point>,
    empty: Shape,
}

impl<'a, L: Layout2D + ?Sized> DummyAwareLayout<'a, L> {
    pub fn new<'d>(inner: &'a mut L, dummies: impl IntoIterator<Item = &'d str>) -> Self {
        Self {
            inner,
            dummies: dummies
                .into_iter()
                .map(|id| (id.to_string(), Point::origin()))
                .collect(),
            empty: Shape::empty(),
        }
    }

    pub fn is_dummy(&self, vertex: &str) -> bool {
        self.dummies.contains_key(vertex)
    }
}

impl<L: Layout2D + ?Sized> Layout2D for DummyAwareLayout<'_, L> {
    fn position(&self, vertex: &str) -> Point {
        match self.dummies.get(vertex) {
            Some(p) => *p,
            None => self.inner.position(vertex),
        }
    }

    fn set_position(&mut self, vertex: &str, position: Point) {
        match self.dummies.get_mut(vertex) {
            Some(p) => *p = position,
            None => self.inner.set_position(vertex, position),
        }
    }

    fn shape(&self, vertex: &str) -> &Shape {
        if self.is_dummy(vertex) {
            &self.empty
        } else {
            self.inner.shape(vertex)
        }
    }

    fn transform(&self, vertex: &str) -> Transform {
        if self.is_dummy(vertex) {
            Transform::identity()
        } else {
            self.inner.transform(vertex)
        }
    }

    fn set_transform(&mut self, vertex: &str, transform: Transform) {
        if !self.is_dummy(vertex) {
            self.inner.set_transform(vertex, transform);
        }
    }

    fn path(&self, edge: &EdgeKey) -> Option<&Path> {
        self.inner.path(edge)
    }

    fn set_path(&mut self, edge: &EdgeKey, path: Path) {
        self.inner.set_path(edge, path);
    }
}
