//! Vertex shapes in local coordinates (relative to the vertex position).

use crate::geom::{self, Point, Rect, Transform, Vector, point, size};
use std::f64::consts::TAU;

/// Segments used to flatten an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rect),
    Ellipse { center: Point, radii: Vector },
    Polygon(Vec<Point>),
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl Shape {
    /// A zero-size rectangle at the origin.
    pub fn empty() -> Self {
        Self::Rectangle(Rect::zero())
    }

    /// A `width × height` rectangle centered on the origin.
    pub fn rect_centered(width: f64, height: f64) -> Self {
        Self::Rectangle(Rect::new(
            point(-width / 2.0, -height / 2.0),
            size(width, height),
        ))
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Ellipse {
            center,
            radii: geom::vector(radius, radius),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rectangle(r) => *r,
            Self::Ellipse { center, radii } => Rect::new(
                point(center.x - radii.x.abs(), center.y - radii.y.abs()),
                size(radii.x.abs() * 2.0, radii.y.abs() * 2.0),
            ),
            Self::Polygon(points) => geom::bounds_of(points),
        }
    }

    /// Corner points of the shape. Ellipses are flattened, starting north and running clockwise.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Self::Rectangle(r) => {
                let (min, max) = (r.min(), r.max());
                vec![min, point(max.x, min.y), max, point(min.x, max.y)]
            }
            Self::Ellipse { center, radii } => (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let r = i as f64 * TAU / ELLIPSE_SEGMENTS as f64;
                    point(center.x + r.sin() * radii.x, center.y - r.cos() * radii.y)
                })
                .collect(),
            Self::Polygon(points) => points.clone(),
        }
    }

    /// The shape under `transform`. Anything but a pure translation turns it into a polygon.
    pub fn transformed(&self, transform: &Transform) -> Shape {
        if *transform == Transform::identity() {
            return self.clone();
        }
        let (a, b, c, d) = (transform.m11, transform.m12, transform.m21, transform.m22);
        if a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0 {
            return self.translated(geom::vector(transform.m31, transform.m32));
        }
        Shape::Polygon(
            self.outline()
                .into_iter()
                .map(|p| transform.transform_point(p))
                .collect(),
        )
    }

    pub fn translated(&self, by: Vector) -> Shape {
        match self {
            Self::Rectangle(r) => Self::Rectangle(r.translate(by)),
            Self::Ellipse { center, radii } => Self::Ellipse {
                center: *center + by,
                radii: *radii,
            },
            Self::Polygon(points) => Self::Polygon(points.iter().map(|&p| p + by).collect()),
        }
    }

    pub fn max_distance_from_origin(&self) -> f64 {
        match self {
            Self::Ellipse { center, radii } if radii.x == radii.y => {
                center.to_vector().length() + radii.x.abs()
            }
            _ => self
                .outline()
                .iter()
                .map(|p| p.to_vector().length())
                .fold(0.0, f64::max),
        }
    }

    /// Twice the distance from the origin to the farthest outline point.
    pub fn diameter(&self) -> f64 {
        self.max_distance_from_origin() * 2.0
    }

    /// True when the outline collapses to a single point.
    pub fn is_empty(&self) -> bool {
        let outline = self.outline();
        outline.iter().all(|p| Some(p) == outline.first())
    }
}
