use graphj::hierarchical::{self, HierarchicalOptions, assign_layers, order};
use graphj::model::geom::{Rect, point, size};
use graphj::model::{EdgeKey, Graph, Shape};
use graphj::{DefaultLayout, Error, Layout2D};

fn dag(edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::default();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

fn boxes(g: &Graph) -> DefaultLayout {
    let mut layout = DefaultLayout::new();
    for v in g.nodes() {
        layout.set_shape(v, Shape::rect_centered(20.0, 10.0));
    }
    layout
}

fn key(v: &str, w: &str) -> EdgeKey {
    EdgeKey::new(v, w, None::<String>)
}

#[test]
fn sources_go_on_top() {
    let g = dag(&[("a", "b"), ("a", "c")]);
    let mut layout = boxes(&g);

    let shape = hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default())
        .unwrap();

    let (a, b, c) = (layout.position("a"), layout.position("b"), layout.position("c"));
    assert_eq!(a, point(30.0, 5.0));
    assert_eq!(b, point(10.0, 35.0));
    assert_eq!(c, point(50.0, 35.0));
    assert_eq!(shape, Shape::Rectangle(Rect::new(point(0.0, 0.0), size(60.0, 40.0))));
}

#[test]
fn edges_leave_and_enter_through_the_bands() {
    let g = dag(&[("a", "b")]);
    let mut layout = boxes(&g);

    hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default()).unwrap();

    let path = layout.path(&key("a", "b")).unwrap();
    assert_eq!(path.start(), point(10.0, 10.0));
    assert_eq!(path.end(), point(10.0, 30.0));
}

#[test]
fn sinks_at_top_flip_the_layers() {
    let g = dag(&[("a", "b")]);
    let mut layout = boxes(&g);
    let options = HierarchicalOptions {
        sinks_at_bottom: false,
        ..Default::default()
    };

    let shape = hierarchical::layout(&g, &mut layout, Rect::zero(), &options).unwrap();

    assert!(layout.position("b").y < layout.position("a").y);
    let Shape::Rectangle(r) = shape else {
        panic!("expected a rectangle, got {shape:?}");
    };
    assert!(r.max_y() <= 0.0);
}

#[test]
fn long_edges_pass_every_layer() {
    let g = dag(&[("a", "b"), ("b", "c"), ("a", "c")]);
    let layout = boxes(&g);

    let la = assign_layers(&g, &layout).unwrap();

    assert_eq!(la.layer_count(), 3);
    assert_eq!(la.dummy_count(), 1);
    for edge in g.edges() {
        let layers = la.chain_layers(edge).unwrap();
        assert!(layers.windows(2).all(|w| w[1] == w[0] + 1), "{edge:?}: {layers:?}");
    }
    assert_eq!(la.chain_layers(&key("a", "c")), Some(vec![0, 1, 2]));
}

#[test]
fn dummies_never_reach_the_caller() {
    let g = dag(&[("a", "b"), ("b", "c"), ("a", "c")]);
    let mut layout = boxes(&g);

    hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default()).unwrap();

    assert!(layout.vertex("_d0").is_none());
    let path = layout.path(&key("a", "c")).unwrap();
    // start, the dummy's band entry and exit, end
    assert_eq!(path.points().len(), 4);
}

#[test]
fn dummy_ids_avoid_existing_vertices() {
    let g = dag(&[("_d0", "b"), ("b", "c"), ("_d0", "c")]);
    let la = assign_layers(&g, &DefaultLayout::new()).unwrap();

    assert_eq!(la.dummies().collect::<Vec<_>>(), vec!["_d0'"]);
}

#[test]
fn cycles_are_rejected_before_anything_moves() {
    let g = dag(&[("a", "b"), ("b", "a")]);
    let mut layout = DefaultLayout::new().with_vertex("a", point(1.0, 2.0), Shape::empty());

    let err = hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::GraphShape { .. }));
    assert_eq!(layout.position("a"), point(1.0, 2.0));
    assert!(layout.paths().next().is_none());
}

#[test]
fn crossing_reduction_untangles_a_twist() {
    let g = dag(&[("a", "d"), ("b", "c")]);
    let layout = DefaultLayout::new()
        .with_vertex("a", point(0.0, 0.0), Shape::empty())
        .with_vertex("b", point(10.0, 0.0), Shape::empty())
        .with_vertex("c", point(0.0, 10.0), Shape::empty())
        .with_vertex("d", point(10.0, 10.0), Shape::empty());

    let mut la = assign_layers(&g, &layout).unwrap();
    assert_eq!(order::cross_count(&la), 1);

    let crossings = order::reduce_crossings(&mut la, 4);

    assert_eq!(crossings, 0);
    assert_eq!(order::cross_count(&la), 0);
}

#[test]
fn layout_is_deterministic() {
    let g = dag(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("a", "d"), ("e", "c")]);
    let run = || {
        let mut layout = boxes(&g);
        hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default())
            .unwrap();
        g.nodes().map(|v| layout.position(v)).collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn all_vertices_fit_in_the_returned_bounds() {
    let g = dag(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("a", "d")]);
    let mut layout = boxes(&g);

    let shape = hierarchical::layout(&g, &mut layout, Rect::zero(), &HierarchicalOptions::default())
        .unwrap();

    let outer = shape.bounds().inflate(1e-9, 1e-9);
    for v in g.nodes() {
        let b = layout.shape(v).bounds().translate(layout.position(v).to_vector());
        assert!(outer.contains_rect(&b), "{v} at {b:?} outside {outer:?}");
    }
}

#[test]
fn empty_graph_returns_the_given_bounds() {
    let g: Graph = Graph::default();
    let bounds = Rect::new(point(1.0, 1.0), size(2.0, 2.0));

    let shape =
        hierarchical::layout(&g, &mut DefaultLayout::new(), bounds, &HierarchicalOptions::default())
            .unwrap();

    assert_eq!(shape, Shape::Rectangle(bounds));
}

#[test]
fn alignment_setter_clamps() {
    let mut options = HierarchicalOptions::default();
    options.set_alignment_of_layers(3.0);
    assert_eq!(options.alignment_of_layers, 1.0);
}
