use graphj_model::alg::{check_spanning_tree, components, is_acyclic, topological_order};
use graphj_model::{Graph, NotATree, Tree};

fn undirected(edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::undirected();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

#[test]
fn components_follow_graph_order() {
    let mut g = undirected(&[("a", "b"), ("c", "d")]);
    g.ensure_node("e");

    assert_eq!(
        components(&g),
        vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]
    );
}

#[test]
fn spanning_tree_checks() {
    assert_eq!(check_spanning_tree(&Graph::<(), ()>::default()), Ok(()));
    assert_eq!(check_spanning_tree(&undirected(&[("a", "b"), ("b", "c")])), Ok(()));
    assert_eq!(
        check_spanning_tree(&undirected(&[("a", "b"), ("b", "c"), ("c", "a")])),
        Err(NotATree::Cyclic)
    );
    assert_eq!(
        check_spanning_tree(&undirected(&[("a", "b"), ("c", "d")])),
        Err(NotATree::Disconnected)
    );
    assert_eq!(
        check_spanning_tree(&undirected(&[("a", "a")])),
        Err(NotATree::SelfLoop)
    );
}

#[test]
fn topological_order_rejects_cycles() {
    let mut g: Graph = Graph::default();
    g.set_path(&["a", "b", "c"]);
    assert_eq!(topological_order(&g), Some(vec![0, 1, 2]));

    g.set_edge("c", "a");
    assert!(!is_acyclic(&g));

    let mut looped: Graph = Graph::default();
    looped.set_edge("a", "a");
    assert!(!is_acyclic(&looped));
}

#[test]
fn tree_children_are_relative_to_root() {
    let g = undirected(&[("a", "b"), ("b", "c"), ("b", "d")]);
    let tree = Tree::new(&g, "b").unwrap();

    assert_eq!(tree.root(), "b");
    assert_eq!(tree.children("b", None), vec!["a", "c", "d"]);
    assert_eq!(tree.children("c", Some("b")), Vec::<&str>::new());

    let order: Vec<_> = tree.preorder().into_iter().map(|(v, _)| v).collect();
    assert_eq!(order, vec!["b", "a", "c", "d"]);
}

#[test]
fn tree_rejects_unknown_root_and_cycles() {
    let g = undirected(&[("a", "b")]);
    assert_eq!(
        Tree::new(&g, "x").unwrap_err(),
        NotATree::UnknownRoot("x".to_string())
    );

    let cyclic = undirected(&[("a", "b"), ("b", "c"), ("c", "a")]);
    assert_eq!(Tree::new(&cyclic, "a").unwrap_err(), NotATree::Cyclic);
}
