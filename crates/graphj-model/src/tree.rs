use crate::alg::{NotATree, check_spanning_tree};
use crate::graph::Graph;

/// A graph known to be a spanning tree, read from a designated root.
///
/// Parent/child relations follow the root regardless of edge direction.
#[derive(Debug)]
pub struct Tree<'g, N, E> {
    graph: &'g Graph<N, E>,
    root: &'g str,
}

impl<N, E> Clone for Tree<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for Tree<'_, N, E> {}

impl<'g, N, E> Tree<'g, N, E> {
    pub fn new(graph: &'g Graph<N, E>, root: &str) -> Result<Self, NotATree> {
        let Some(ix) = graph.node_ix(root) else {
            return Err(NotATree::UnknownRoot(root.to_string()));
        };
        check_spanning_tree(graph)?;
        Ok(Self {
            graph,
            root: graph.node_id(ix),
        })
    }

    pub fn root(&self) -> &'g str {
        self.root
    }

    pub fn graph(&self) -> &'g Graph<N, E> {
        self.graph
    }

    /// Neighbours of `v` other than `parent`.
    pub fn children(&self, v: &str, parent: Option<&str>) -> Vec<&'g str> {
        self.graph
            .neighbors(v)
            .into_iter()
            .filter(|&n| Some(n) != parent)
            .collect()
    }

    /// `(vertex, parent)` pairs in depth-first pre-order, starting at the root.
    pub fn preorder(&self) -> Vec<(&'g str, Option<&'g str>)> {
        let mut out = Vec::with_capacity(self.graph.node_count());
        let mut stack: Vec<(&'g str, Option<&'g str>)> = vec![(self.root, None)];
        while let Some((v, parent)) = stack.pop() {
            out.push((v, parent));
            for c in self.children(v, parent).into_iter().rev() {
                stack.push((c, Some(v)));
            }
        }
        out
    }
}
