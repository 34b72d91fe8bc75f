//! Structural checks shared by the layout algorithms.

use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotATree {
    #[error("root {0} is not a vertex of the graph")]
    UnknownRoot(String),
    #[error("graph contains a self-loop")]
    SelfLoop,
    #[error("graph contains a cycle")]
    Cyclic,
    #[error("graph is not connected")]
    Disconnected,
}

/// Connected components, ignoring edge direction. Components are ordered by their first vertex
/// in graph order, members by discovery order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<String>> {
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<String>> = Vec::new();

    for root in 0..g.node_count() {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut component: Vec<String> = Vec::new();
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            component.push(g.node_id(v).to_string());
            for &e in g.incident_edges(v) {
                let (a, b) = g.edge_endpoints(e);
                let w = if a == v { b } else { a };
                if !seen[w] {
                    seen[w] = true;
                    stack.push(w);
                }
            }
        }
        out.push(component);
    }

    out
}

/// Checks that `g`, read as an undirected graph, is a single spanning tree.
/// An empty graph passes.
pub fn check_spanning_tree<N, E>(g: &Graph<N, E>) -> Result<(), NotATree> {
    if g.node_count() == 0 {
        return Ok(());
    }
    if g.edges().any(|e| e.is_self_loop()) {
        return Err(NotATree::SelfLoop);
    }
    let components = components(g).len();
    if components > 1 {
        return Err(NotATree::Disconnected);
    }
    if g.edge_count() != g.node_count() - 1 {
        return Err(NotATree::Cyclic);
    }
    Ok(())
}

/// True when following edges in their direction never returns to a vertex.
pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    topological_order(g).is_some()
}

/// Kahn's algorithm over vertex indices; `None` for graphs with a directed cycle (self-loops
/// included). Ties are broken by graph order.
pub fn topological_order<N, E>(g: &Graph<N, E>) -> Option<Vec<usize>> {
    let n = g.node_count();
    let mut indegree = vec![0usize; n];
    for e in 0..g.edge_count() {
        let (_, w) = g.edge_endpoints(e);
        indegree[w] += 1;
    }

    let mut ready: std::collections::VecDeque<usize> =
        (0..n).filter(|&v| indegree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(v) = ready.pop_front() {
        order.push(v);
        for &e in g.incident_edges(v) {
            let (a, w) = g.edge_endpoints(e);
            if a != v || w == v {
                continue;
            }
            indegree[w] -= 1;
            if indegree[w] == 0 {
                ready.push_back(w);
            }
        }
    }

    (order.len() == n).then_some(order)
}
