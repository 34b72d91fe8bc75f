use graphj::model::geom::Rect;
use graphj::model::{Graph, Shape};
use graphj::{Algorithm, DefaultLayout, Layout2D, TreeOptions};

fn chain() -> (Graph, DefaultLayout) {
    let mut g = Graph::default();
    g.set_path(&["a", "b", "c"]);
    let mut layout = DefaultLayout::new();
    for v in ["a", "b", "c"] {
        layout.set_shape(v, Shape::rect_centered(10.0, 10.0));
    }
    (g, layout)
}

#[test]
fn every_algorithm_places_every_vertex() {
    let algorithms = [
        Algorithm::Circular(Default::default()),
        Algorithm::Radial(Default::default()),
        Algorithm::Hierarchical(Default::default()),
        Algorithm::Tree(TreeOptions::default()),
    ];

    for algorithm in &algorithms {
        let (g, mut layout) = chain();
        let shape = graphj::layout(&g, &mut layout, Rect::zero(), algorithm).unwrap();

        for edge in g.edges() {
            assert!(layout.path(edge).is_some(), "{algorithm:?}: {edge:?} has no path");
        }
        let ys: Vec<f64> = ["a", "b", "c"].iter().map(|v| layout.position(v).y).collect();
        let xs: Vec<f64> = ["a", "b", "c"].iter().map(|v| layout.position(v).x).collect();
        assert!(
            ys.iter().zip(&xs).skip(1).any(|(y, x)| *y != ys[0] || *x != xs[0]),
            "{algorithm:?} stacked everything on one point"
        );
        assert_ne!(shape.bounds(), Rect::zero(), "{algorithm:?}");
    }
}

#[test]
fn default_algorithm_is_hierarchical() {
    assert!(matches!(Algorithm::default(), Algorithm::Hierarchical(_)));
}
