//! Edge paths: a start point followed by line and cubic segments, in absolute coordinates.

use crate::geom::{self, Point, point_at};
use crate::shape::Shape;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point),
    Cubic(Point, Point, Point),
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line(to) | Segment::Cubic(_, _, to) => to,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: Point,
    segments: Vec<Segment>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new(Point::origin())
    }
}

impl Path {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// A path through `points`; the empty path at the origin for no points.
    pub fn polyline(points: &[Point]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return Self::default();
        };
        let mut path = Self::new(first);
        for &p in rest {
            path.line_to(p);
        }
        path
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.segments.push(Segment::Line(to));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.segments.push(Segment::Cubic(c1, c2, to));
        self
    }

    /// Start point followed by every segment end point.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.segments.iter().map(Segment::end))
            .collect()
    }

    /// The same path walked from its end to its start.
    pub fn reversed(&self) -> Path {
        let mut out = Path::new(self.end());
        let mut prev = self.start;
        let mut backwards: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            backwards.push(match *segment {
                Segment::Line(_) => Segment::Line(prev),
                Segment::Cubic(c1, c2, _) => Segment::Cubic(c2, c1, prev),
            });
            prev = segment.end();
        }
        backwards.reverse();
        out.segments = backwards;
        out
    }

    /// Appends a circular arc around `center` from direction `from` to direction `to`.
    ///
    /// The arc runs clockwise when `to > from`. It is approximated with cubic pieces of at most
    /// a quarter turn; a line to the arc start is added when the path isn't already there.
    pub fn arc_to(&mut self, center: Point, radius: f64, from: f64, to: f64) -> &mut Self {
        let arc_start = point_at(center, from, radius);
        if (self.end() - arc_start).length() > 1e-9 {
            self.line_to(arc_start);
        }
        let sweep = to - from;
        if sweep == 0.0 || radius == 0.0 {
            return self;
        }
        let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f64;
        // Control point distance for a cubic approximating an arc of `step` radians.
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
        for i in 0..pieces {
            let a0 = from + step * i as f64;
            let a1 = a0 + step;
            let p0 = point_at(center, a0, radius);
            let p1 = point_at(center, a1, radius);
            // Tangent of a clockwise-positive angle points towards `a + π/2`.
            let c1 = point_at(p0, a0 + FRAC_PI_2, k);
            let c2 = point_at(p1, a1 + FRAC_PI_2, -k);
            self.cubic_to(c1, c2, p1);
        }
        self
    }
}

/// Where segment `from → to` first crosses the outline of `shape` placed at `at`; `to` if it
/// never does.
pub fn vector_end(from: Point, to: Point, at: Point, shape: &Shape) -> Point {
    let outline: Vec<Point> = shape
        .outline()
        .into_iter()
        .map(|p| p + at.to_vector())
        .collect();
    let n = outline.len();
    if n < 2 {
        return to;
    }
    (0..n)
        .filter_map(|i| geom::segment_intersection(from, to, outline[i], outline[(i + 1) % n]))
        .min_by(|a, b| (*a - from).length().total_cmp(&(*b - from).length()))
        .unwrap_or(to)
}

/// A polyline through `points` whose first and last segments are trimmed to the outlines of the
/// start and end vertex shapes.
pub fn clipped_path(
    points: &[Point],
    start_pos: Point,
    start_shape: &Shape,
    end_pos: Point,
    end_shape: &Shape,
) -> Path {
    let n = points.len();
    if n < 2 {
        return Path::polyline(points);
    }
    let mut clipped = points.to_vec();
    clipped[0] = vector_end(points[1], points[0], start_pos, start_shape);
    clipped[n - 1] = vector_end(points[n - 2], points[n - 1], end_pos, end_shape);
    Path::polyline(&clipped)
}
