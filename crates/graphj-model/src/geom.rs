//! Planar geometry helpers.
//!
//! Angles are radians measured clockwise from north (screen coordinates, y grows downwards):
//! radian `0` points up, `π/2` points right.

use std::f64::consts::{PI, TAU};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

const EPSILON: f64 = 1e-9;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Rotation by `radian`, clockwise on screen.
pub fn rotation(radian: f64) -> Transform {
    Transform::rotation(euclid::Angle::radians(radian))
}

pub fn radian(degree: f64) -> f64 {
    degree / 360.0 * TAU
}

pub fn length(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    point(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    lerp(a, b, 0.5)
}

/// The point `distance` away from `origin` in direction `radian`.
pub fn point_at(origin: Point, radian: f64, distance: f64) -> Point {
    point(
        origin.x + radian.sin() * distance,
        origin.y - radian.cos() * distance,
    )
}

/// Direction of `v`, normalized to `[0, 2π)`. The zero vector points north.
pub fn radian_of(v: Vector) -> f64 {
    // `0.0 - y` keeps the zero vector pointing north
    normalize_radian(v.x.atan2(0.0 - v.y))
}

pub fn normalize_radian(r: f64) -> f64 {
    let r = r.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - bx * ay
}

fn side(a: Point, b: Point, p: Point) -> f64 {
    cross(b.x - a.x, b.y - a.y, p.x - a.x, p.y - a.y)
}

/// Whether segments `a` and `b` touch or cross (endpoints included).
pub fn segments_touch(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    if side(a1, a2, b1) * side(a1, a2, b2) > 0.0 {
        return false;
    }
    side(b1, b2, a1) * side(b1, b2, a2) <= 0.0
}

/// Whether segments `a` and `b` cross at a point interior to both.
pub fn segments_cross_properly(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = side(a1, a2, b1);
    let d2 = side(a1, a2, b2);
    let d3 = side(b1, b2, a1);
    let d4 = side(b1, b2, a2);
    let opposite = |x: f64, y: f64| (x > EPSILON && y < -EPSILON) || (x < -EPSILON && y > EPSILON);
    opposite(d1, d2) && opposite(d3, d4)
}

/// Intersection of two finite segments; `None` when they are parallel or don't meet.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    if !segments_touch(a1, a2, b1, b2) {
        return None;
    }
    let (vax, vay) = (a2.x - a1.x, a2.y - a1.y);
    let (vbx, vby) = (b2.x - b1.x, b2.y - b1.y);
    let (vcx, vcy) = (b1.x - a1.x, b1.y - a1.y);

    let cp_ba = cross(vbx, vby, vax, vay);
    if cp_ba == 0.0 {
        return None;
    }
    let s = cross(vbx, vby, vcx, vcy) / cp_ba;
    Some(point(a1.x + s * vax, a1.y + s * vay))
}

/// Intersection of the infinite lines through `a1,a2` and `b1,b2`.
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let (la, lb, lc) = (a2.y - a1.y, a1.x - a2.x, a2.x * a1.y - a1.x * a2.y);
    let (ma, mb, mc) = (b2.y - b1.y, b1.x - b2.x, b2.x * b1.y - b1.x * b2.y);

    let denom = la * mb - ma * lb;
    if denom == 0.0 {
        return None;
    }
    Some(point((lb * mc - mb * lc) / denom, (ma * lc - la * mc) / denom))
}

/// Intersection of the line through `p` in direction `ra` with the line through `q` in
/// direction `rb`.
pub fn line_intersection_at(p: Point, ra: f64, q: Point, rb: f64) -> Option<Point> {
    line_intersection(p, point_at(p, ra, 1.0), q, point_at(q, rb, 1.0))
}

/// Convex hull (Andrew's monotone chain). Duplicates and collinear points are dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && side(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && side(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Grows a convex polygon by `padding` in every direction (octagonal approximation of the
/// Minkowski sum with a circle).
pub fn expand_hull(hull: &[Point], padding: f64) -> Vec<Point> {
    if padding <= 0.0 {
        return hull.to_vec();
    }
    let mut grown = Vec::with_capacity(hull.len() * 8);
    for &p in hull {
        for i in 0..8 {
            grown.push(point_at(p, i as f64 * PI / 4.0 + PI / 8.0, padding));
        }
    }
    convex_hull(&grown)
}

/// Bounding box of `points`; the zero rectangle for an empty slice.
pub fn bounds_of(points: &[Point]) -> Rect {
    Rect::from_points(points.iter().copied())
}

/// The point of `points` reaching furthest in direction `axis`.
pub fn max_extent(points: &[Point], axis: f64) -> Option<Point> {
    let (sin, cos) = axis.sin_cos();
    points
        .iter()
        .copied()
        .map(|p| (sin * p.x - cos * p.y, p))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}

fn closed_edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = polygon.len();
    let count = if n < 2 { 0 } else { n };
    (0..count).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// How far polygon `a` can travel in direction `axis` until it touches polygon `b`.
///
/// Negative when the two already overlap along that axis; `f64::INFINITY` when `a` would pass
/// `b` without touching it.
pub fn distance_along(a: &[Point], b: &[Point], axis: f64) -> f64 {
    let mut all: Vec<Point> = Vec::with_capacity(a.len() + b.len());
    all.extend_from_slice(a);
    all.extend_from_slice(b);
    let area = bounds_of(&all);
    let span = length(area.width(), area.height()) + 1.0;

    fn rays(from: &[Point], against: &[Point], axis: f64, span: f64, result: &mut f64) {
        let (sin, cos) = axis.sin_cos();
        let v = vector(sin * span, -cos * span);
        for &p in from {
            let (r1, r2) = (p + v, p - v);
            for (s1, s2) in closed_edges(against) {
                if let Some(i) = segment_intersection(r1, r2, s1, s2) {
                    *result = result.min(sin * (i.x - p.x) - cos * (i.y - p.y));
                }
            }
        }
    }

    let mut result = f64::INFINITY;
    rays(a, b, axis, span, &mut result);
    rays(b, a, axis + PI, span, &mut result);
    result
}

fn distance_to_segment(p: Point, s1: Point, s2: Point) -> f64 {
    let d = s2 - s1;
    let len2 = d.square_length();
    if len2 == 0.0 {
        return (p - s1).length();
    }
    let t = ((p - s1).dot(d) / len2).clamp(0.0, 1.0);
    (p - (s1 + d * t)).length()
}

/// Strict containment: points on the boundary are not inside.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if closed_edges(polygon).any(|(s1, s2)| distance_to_segment(p, s1, s2) < EPSILON) {
        return false;
    }
    let mut inside = false;
    for (s1, s2) in closed_edges(polygon) {
        if (s1.y > p.y) != (s2.y > p.y) {
            let x = s1.x + (p.y - s1.y) / (s2.y - s1.y) * (s2.x - s1.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn centroid(polygon: &[Point]) -> Option<Point> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (sx, sy) = polygon
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
    Some(point(sx / n, sy / n))
}

/// Whether two polygons share interior area. Touching boundaries don't count.
pub fn polygons_overlap(a: &[Point], b: &[Point]) -> bool {
    for (a1, a2) in closed_edges(a) {
        for (b1, b2) in closed_edges(b) {
            if segments_cross_properly(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    let inside = |points: &[Point], polygon: &[Point]| {
        points.iter().any(|&p| point_in_polygon(p, polygon))
            || centroid(points).is_some_and(|c| points.len() >= 3 && point_in_polygon(c, polygon))
    };
    inside(a, b) || inside(b, a)
}
