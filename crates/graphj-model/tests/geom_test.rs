use graphj_model::geom::{
    bounds_of, convex_hull, distance_along, expand_hull, line_intersection,
    line_intersection_at, max_extent, point_at, point_in_polygon, polygons_overlap, radian,
    radian_of, segment_intersection,
};
use graphj_model::{point, vector};
use std::f64::consts::{FRAC_PI_2, PI};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn square(x: f64, y: f64, size: f64) -> Vec<graphj_model::Point> {
    vec![
        point(x, y),
        point(x + size, y),
        point(x + size, y + size),
        point(x, y + size),
    ]
}

#[test]
fn radians_start_north_and_turn_clockwise() {
    let o = point(0.0, 0.0);
    let north = point_at(o, 0.0, 10.0);
    let east = point_at(o, FRAC_PI_2, 10.0);
    assert!(approx(north.x, 0.0) && approx(north.y, -10.0));
    assert!(approx(east.x, 10.0) && approx(east.y, 0.0));

    assert!(approx(radian_of(vector(0.0, -1.0)), 0.0));
    assert!(approx(radian_of(vector(1.0, 0.0)), FRAC_PI_2));
    assert!(approx(radian_of(vector(0.0, 1.0)), PI));
    assert!(approx(radian_of(vector(-1.0, 0.0)), 3.0 * FRAC_PI_2));
    assert_eq!(radian_of(vector(0.0, 0.0)), 0.0);
    assert_eq!(radian_of(vector(-0.0, 0.0)), 0.0);
    assert!(approx(radian(180.0), PI));
}

#[test]
fn segment_intersection_requires_overlap() {
    let p = segment_intersection(
        point(0.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
        point(10.0, 0.0),
    )
    .unwrap();
    assert!(approx(p.x, 5.0) && approx(p.y, 5.0));

    assert!(
        segment_intersection(point(0.0, 0.0), point(1.0, 1.0), point(0.0, 10.0), point(10.0, 0.0))
            .is_none()
    );
    assert!(
        segment_intersection(point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0), point(1.0, 1.0))
            .is_none()
    );
}

#[test]
fn infinite_lines_meet_outside_their_segments() {
    let p = line_intersection(point(0.0, 0.0), point(1.0, 1.0), point(0.0, 10.0), point(1.0, 9.0))
        .unwrap();
    assert!(approx(p.x, 5.0) && approx(p.y, 5.0));

    let q = line_intersection_at(point(0.0, 0.0), FRAC_PI_2, point(5.0, 5.0), 0.0).unwrap();
    assert!(approx(q.x, 5.0) && approx(q.y, 0.0));
}

#[test]
fn convex_hull_drops_inner_and_duplicate_points() {
    let mut pts = square(0.0, 0.0, 10.0);
    pts.push(point(5.0, 5.0));
    pts.push(point(0.0, 0.0));
    pts.push(point(5.0, 0.0));

    let hull = convex_hull(&pts);
    assert_eq!(hull.len(), 4);
    for corner in square(0.0, 0.0, 10.0) {
        assert!(hull.contains(&corner));
    }
}

#[test]
fn expanded_hull_keeps_clearance() {
    let hull = convex_hull(&square(0.0, 0.0, 10.0));
    let grown = expand_hull(&hull, 4.0);
    let b = bounds_of(&grown);
    assert!(b.min().x < -3.0 && b.max().x > 13.0);
    assert!(point_in_polygon(point(-1.0, 5.0), &grown));
}

#[test]
fn max_extent_picks_the_furthest_point() {
    let pts = square(0.0, 0.0, 10.0);
    let east = max_extent(&pts, FRAC_PI_2).unwrap();
    assert!(approx(east.x, 10.0));
    let north = max_extent(&pts, 0.0).unwrap();
    assert!(approx(north.y, 0.0));
    assert!(max_extent(&[], 0.0).is_none());
}

#[test]
fn distance_along_measures_the_gap() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(25.0, 0.0, 10.0);
    assert!(approx(distance_along(&a, &b, FRAC_PI_2), 15.0));
    assert!(approx(distance_along(&b, &a, 3.0 * FRAC_PI_2), 15.0));

    let far = square(25.0, 100.0, 10.0);
    assert_eq!(distance_along(&a, &far, FRAC_PI_2), f64::INFINITY);
}

#[test]
fn overlap_ignores_touching_boundaries() {
    let a = square(0.0, 0.0, 10.0);
    assert!(polygons_overlap(&a, &square(5.0, 5.0, 10.0)));
    assert!(polygons_overlap(&a, &square(2.0, 2.0, 2.0)));
    assert!(polygons_overlap(&a, &a));
    assert!(!polygons_overlap(&a, &square(10.0, 0.0, 10.0)));
    assert!(!polygons_overlap(&a, &square(30.0, 0.0, 10.0)));
}
