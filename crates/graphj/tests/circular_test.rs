use graphj::circular::{self, CircularOptions};
use graphj::model::geom::{Rect, point, radian_of};
use graphj::model::{Graph, Shape};
use graphj::{DefaultLayout, Layout2D};
use std::f64::consts::TAU;

fn undirected(edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::undirected();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

fn boxes(g: &Graph, w: f64, h: f64) -> DefaultLayout {
    let mut layout = DefaultLayout::new();
    for v in g.nodes() {
        layout.set_shape(v, Shape::rect_centered(w, h));
    }
    layout
}

fn separate() -> CircularOptions {
    CircularOptions {
        single_circle: false,
        ..Default::default()
    }
}

#[test]
fn decompose_partitions_vertices_into_cycles() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);

    let circles = circular::decompose(&g, false);

    assert_eq!(
        circles,
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ]
    );
}

#[test]
fn decompose_keeps_a_single_cycle_together() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);

    let circles = circular::decompose(&g, false);

    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].len(), 4);
}

#[test]
fn decompose_splits_a_path_into_singletons() {
    let g = undirected(&[("a", "b"), ("b", "c")]);

    let circles = circular::decompose(&g, false);

    assert_eq!(circles.len(), 3);
    assert!(circles.iter().all(|c| c.len() == 1));
}

#[test]
fn parallel_edges_form_a_circle() {
    let mut g: Graph = Graph::undirected();
    g.set_edge_named("a", "b", Some("first"), None);
    g.set_edge_named("a", "b", Some("second"), None);
    g.set_edge("b", "c");

    let circles = circular::decompose(&g, false);

    assert_eq!(
        circles,
        vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
    );
}

#[test]
fn single_circle_puts_everything_on_one_ring() {
    let g = undirected(&[("a", "b"), ("b", "c")]);

    let circles = circular::decompose(&g, true);

    assert_eq!(circles, vec![g.node_ids()]);
}

#[test]
fn equal_vertices_are_spread_evenly() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let mut layout = boxes(&g, 10.0, 10.0);
    let options = CircularOptions {
        padding: 20.0,
        ..separate()
    };

    circular::layout(&g, &mut layout, Rect::zero(), &options).unwrap();

    let p: Vec<_> = ["a", "b", "c"].iter().map(|v| layout.position(v)).collect();
    let radius = 3.0 * 30.0_f64.hypot(30.0) / TAU;
    for q in &p {
        assert!((q.to_vector().length() - radius).abs() < 1e-9);
    }
    // 120° apart: all chords equal
    let ab = (p[0] - p[1]).length();
    let bc = (p[1] - p[2]).length();
    let ca = (p[2] - p[0]).length();
    assert!((ab - bc).abs() < 1e-9);
    assert!((bc - ca).abs() < 1e-9);
}

#[test]
fn unit_squares_sit_on_the_circumference_radius() {
    let g = undirected(&[("a", "b"), ("b", "c")]);
    let mut layout = boxes(&g, 1.0, 1.0);
    let options = CircularOptions {
        padding: 10.0,
        ..Default::default()
    };

    circular::layout(&g, &mut layout, Rect::zero(), &options).unwrap();

    let radius = 3.0 * 11.0_f64.hypot(11.0) / TAU;
    let angles: Vec<f64> = ["a", "b", "c"]
        .iter()
        .map(|v| {
            let at = layout.position(v).to_vector();
            assert!((at.length() - radius).abs() < 1e-9, "{v} at {at:?}");
            radian_of(at)
        })
        .collect();
    for (a, b) in [(0, 1), (1, 2)] {
        assert!((angles[b] - angles[a] - TAU / 3.0).abs() < 1e-9);
    }
}

#[test]
fn crowded_rings_grow_past_the_circumference_radius() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let mut layout = boxes(&g, 10.0, 10.0);

    circular::layout(&g, &mut layout, Rect::zero(), &separate()).unwrap();

    let diameter = Shape::rect_centered(10.0, 10.0).diameter();
    let a = layout.position("a");
    let b = layout.position("b");
    assert!(a.to_vector().length() > 3.0 * 22.0_f64.hypot(22.0) / TAU);
    assert!((a - b).length() >= diameter + 12.0 - 1e-9);
}

#[test]
fn ring_vertices_do_not_overlap() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let mut layout = DefaultLayout::new();
    layout.set_shape("a", Shape::rect_centered(120.0, 40.0));
    layout.set_shape("b", Shape::rect_centered(10.0, 10.0));
    layout.set_shape("c", Shape::rect_centered(10.0, 10.0));

    circular::layout(&g, &mut layout, Rect::zero(), &CircularOptions::default()).unwrap();

    let ids = ["a", "b", "c"];
    for i in 0..3 {
        for j in i + 1..3 {
            let a = layout.shape(ids[i]).bounds().translate(layout.position(ids[i]).to_vector());
            let b = layout.shape(ids[j]).bounds().translate(layout.position(ids[j]).to_vector());
            assert!(!a.intersects(&b), "{} overlaps {}", ids[i], ids[j]);
        }
    }
}

#[test]
fn circles_are_laid_out_side_by_side() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
    let mut layout = boxes(&g, 10.0, 10.0);

    circular::layout(&g, &mut layout, Rect::zero(), &separate()).unwrap();

    assert_eq!(layout.position("d"), point(160.0, 0.0));
    assert!(layout.path(&g.edge_keys()[3]).is_some());
}

#[test]
fn fewer_than_two_vertices_is_a_no_op() {
    let mut g: Graph = Graph::undirected();
    g.set_node("a", ());
    let mut layout = DefaultLayout::new().with_vertex("a", point(5.0, 5.0), Shape::empty());
    let bounds = Rect::new(point(1.0, 2.0), graphj::model::geom::size(3.0, 4.0));

    let shape = circular::layout(&g, &mut layout, bounds, &CircularOptions::default()).unwrap();

    assert_eq!(shape, Shape::Rectangle(bounds));
    assert_eq!(layout.position("a"), point(5.0, 5.0));
}
