use graphj_model::path::{clipped_path, vector_end};
use graphj_model::{Path, Segment, Shape, Transform, point, vector};
use std::f64::consts::{FRAC_PI_2, PI};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn centered_rectangle_bounds_and_diameter() {
    let s = Shape::rect_centered(6.0, 8.0);
    let b = s.bounds();
    assert_eq!((b.min().x, b.min().y, b.width(), b.height()), (-3.0, -4.0, 6.0, 8.0));
    assert!(approx(s.diameter(), 10.0));
    assert_eq!(s.outline().len(), 4);
}

#[test]
fn circle_outline_and_distance() {
    let c = Shape::circle(point(0.0, 0.0), 5.0);
    assert!(approx(c.max_distance_from_origin(), 5.0));
    let outline = c.outline();
    assert_eq!(outline.len(), 32);
    assert!(approx(outline[0].x, 0.0) && approx(outline[0].y, -5.0));
}

#[test]
fn transforms_keep_or_replace_the_variant() {
    let s = Shape::rect_centered(2.0, 2.0);
    assert_eq!(s.transformed(&Transform::identity()), s);
    let ellipse = Shape::circle(point(1.0, 1.0), 3.0);
    assert_eq!(ellipse.transformed(&Transform::identity()), ellipse);

    let moved = s.transformed(&Transform::translation(5.0, 0.0));
    assert!(matches!(moved, Shape::Rectangle(_)));
    assert!(approx(moved.bounds().min().x, 4.0));

    let rotated = s.transformed(&Transform::rotation(euclid::Angle::radians(PI / 4.0)));
    let Shape::Polygon(points) = &rotated else {
        panic!("rotation should produce a polygon");
    };
    assert_eq!(points.len(), 4);
    assert!(approx(rotated.max_distance_from_origin(), 2f64.sqrt()));

    let shifted = Shape::circle(point(0.0, 0.0), 1.0).translated(vector(3.0, 4.0));
    assert!(approx(shifted.max_distance_from_origin(), 6.0));
}

#[test]
fn empty_shape_is_a_point() {
    assert!(Shape::empty().is_empty());
    assert!(!Shape::rect_centered(1.0, 1.0).is_empty());
}

#[test]
fn polyline_points_and_ends() {
    let path = Path::polyline(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]);
    assert_eq!(path.start(), point(0.0, 0.0));
    assert_eq!(path.end(), point(1.0, 1.0));
    assert_eq!(path.points().len(), 3);
    assert_eq!(path.segments()[0], Segment::Line(point(1.0, 0.0)));
}

#[test]
fn arcs_are_split_into_quarter_turns() {
    let mut path = Path::new(point(0.0, -10.0));
    path.arc_to(point(0.0, 0.0), 10.0, 0.0, PI);

    assert_eq!(path.segments().len(), 2);
    assert!(path.segments().iter().all(|s| matches!(s, Segment::Cubic(..))));
    let end = path.end();
    assert!(approx(end.x, 0.0) && approx(end.y, 10.0));

    let mut short = Path::new(point(0.0, 0.0));
    short.arc_to(point(0.0, 0.0), 10.0, 0.0, FRAC_PI_2);
    // a leading line to the arc start, then one cubic
    assert_eq!(short.segments().len(), 2);
    assert!(approx(short.end().x, 10.0) && approx(short.end().y, 0.0));
}

#[test]
fn clipped_path_stops_at_shape_boundaries() {
    let shape = Shape::rect_centered(10.0, 10.0);
    let a = point(0.0, 0.0);
    let b = point(100.0, 0.0);

    let path = clipped_path(&[a, b], a, &shape, b, &shape);
    assert!(approx(path.start().x, 5.0) && approx(path.start().y, 0.0));
    assert!(approx(path.end().x, 95.0) && approx(path.end().y, 0.0));

    // never crosses: falls back to the target point
    let end = vector_end(point(0.0, 0.0), point(1.0, 0.0), point(50.0, 50.0), &shape);
    assert_eq!(end, point(1.0, 0.0));
}
