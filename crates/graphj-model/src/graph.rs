//! The graph container used by every graphj layout.
//!
//! Vertices are keyed by string ids and carry an opaque content value `N`; edges are keyed by
//! [`EdgeKey`] and carry `E`. Storage is dense (`Vec` + index maps) so layout algorithms can work
//! on `usize` indices, while the public API speaks ids.
//!
//! Neighbour queries go through a per-vertex incidence list, so they are O(degree) instead of a
//! scan over all edges.

use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy)]
pub struct GraphOptions {
    pub directed: bool,
    pub multigraph: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: false,
        }
    }
}

/// Identity of an edge: start vertex `v`, end vertex `w` and an optional name that tells
/// parallel edges of a multigraph apart.
#[derive(Debug, Clone, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
    ) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: name.map(Into::into),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.v == vertex || self.w == vertex
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint at all.
    pub fn other(&self, vertex: &str) -> Option<&str> {
        if self.v == vertex {
            Some(self.w.as_str())
        } else if self.w == vertex {
            Some(self.v.as_str())
        } else {
            None
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w && self.name == other.name
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
        self.name.hash(state);
    }
}

#[derive(Clone, Copy, Hash)]
struct EdgeKeyView<'a> {
    v: &'a str,
    w: &'a str,
    name: Option<&'a str>,
}

impl<'a> hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'a> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    v_ix: usize,
    w_ix: usize,
    label: E,
}

#[derive(Debug, Clone)]
pub struct Graph<N = (), E = ()> {
    options: GraphOptions,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Edge indices touching each vertex, in insertion order. Self-loops appear once.
    incidence: Vec<Vec<usize>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E> Graph<N, E> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            incidence: Vec::new(),
        }
    }

    /// An undirected, multigraph-capable graph.
    pub fn undirected() -> Self {
        Self::new(GraphOptions {
            directed: false,
            multigraph: true,
        })
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn canonicalize_key(&self, mut key: EdgeKey) -> EdgeKey {
        if !self.options.directed && key.v > key.w {
            (key.v, key.w) = (key.w, key.v);
        }
        if !self.options.multigraph {
            key.name = None;
        }
        key
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self.incidence.push(Vec::new());
        self
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in &self.edges {
            f(&e.key, &e.label);
        }
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        let view = self.edge_key_view(v, w, name);
        self.edge_index.contains_key(&view)
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let view = self.edge_key_view(v, w, name);
        let idx = *self.edge_index.get(&view)?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let view = self.edge_key_view(v, w, name);
        let idx = *self.edge_index.get(&view)?;
        Some(&mut self.edges[idx].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        let idx = self.edge_ix(key)?;
        Some(&self.edges[idx].label)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let view = self.edge_key_view(v, w, name);
        let Some(idx) = self.edge_index.get(&view).copied() else {
            return false;
        };
        self.edges.remove(idx);
        self.rebuild_indices();
        true
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.get(id).copied() else {
            return false;
        };
        self.nodes.remove(idx);
        self.edges.retain(|e| e.v_ix != idx && e.w_ix != idx);
        self.rebuild_indices();
        true
    }

    fn rebuild_indices(&mut self) {
        self.node_index.clear();
        for (i, n) in self.nodes.iter().enumerate() {
            self.node_index.insert(n.id.clone(), i);
        }
        self.edge_index.clear();
        self.incidence = vec![Vec::new(); self.nodes.len()];
        for (i, e) in self.edges.iter_mut().enumerate() {
            // Endpoints always exist: edges of removed vertices were dropped above.
            let (Some(&v_ix), Some(&w_ix)) =
                (self.node_index.get(&e.key.v), self.node_index.get(&e.key.w))
            else {
                continue;
            };
            e.v_ix = v_ix;
            e.w_ix = w_ix;
            self.edge_index.insert(e.key.clone(), i);
            self.incidence[v_ix].push(i);
            if w_ix != v_ix {
                self.incidence[w_ix].push(i);
            }
        }
    }

    // ----- index level access -----

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, ix: usize) -> &str {
        &self.nodes[ix].id
    }

    pub fn edge_ix(&self, key: &EdgeKey) -> Option<usize> {
        let view = self.edge_key_view(&key.v, &key.w, key.name.as_deref());
        self.edge_index.get(&view).copied()
    }

    pub fn edge_key(&self, edge_ix: usize) -> &EdgeKey {
        &self.edges[edge_ix].key
    }

    /// `(start, end)` vertex indices of an edge.
    pub fn edge_endpoints(&self, edge_ix: usize) -> (usize, usize) {
        let e = &self.edges[edge_ix];
        (e.v_ix, e.w_ix)
    }

    /// Edge indices touching vertex `ix`, regardless of direction.
    pub fn incident_edges(&self, ix: usize) -> &[usize] {
        &self.incidence[ix]
    }

    // ----- neighbourhood -----

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.incidence[v_ix]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| e.v_ix == v_ix)
            .map(|e| e.key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.incidence[v_ix]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| e.w_ix == v_ix)
            .map(|e| e.key.v.as_str())
            .collect()
    }

    /// Adjacent vertices in either direction, deduplicated, never `v` itself.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        for &e in &self.incidence[v_ix] {
            let e = &self.edges[e];
            let other = if e.v_ix == v_ix { e.w_ix } else { e.v_ix };
            if other == v_ix {
                continue;
            }
            let other = self.nodes[other].id.as_str();
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let directed = self.options.directed;
        self.incidence[v_ix]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| {
                if e.v_ix == v_ix {
                    w.is_none_or(|w| e.key.w == w)
                } else {
                    !directed && w.is_none_or(|w| e.key.v == w)
                }
            })
            .map(|e| e.key.clone())
            .collect()
    }

    pub fn in_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        if !self.options.directed {
            return self.out_edges(v, w);
        }
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.incidence[v_ix]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| e.w_ix == v_ix && w.is_none_or(|w| e.key.v == w))
            .map(|e| e.key.clone())
            .collect()
    }

    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.incidence[v_ix]
            .iter()
            .map(|&e| self.edges[e].key.clone())
            .collect()
    }

    pub fn in_degree(&self, v: &str) -> usize {
        let Some(v_ix) = self.node_ix(v) else {
            return 0;
        };
        if !self.options.directed {
            return self.incidence[v_ix].len();
        }
        self.incidence[v_ix]
            .iter()
            .filter(|&&e| self.edges[e].w_ix == v_ix)
            .count()
    }

    /// Vertices without incoming edges. Every vertex of an undirected graph qualifies.
    pub fn sources(&self) -> Vec<&str> {
        if !self.options.directed {
            return self.nodes().collect();
        }
        self.nodes()
            .filter(|&n| self.in_degree(n) == 0)
            .collect()
    }

    /// Vertices without outgoing edges. Every vertex of an undirected graph qualifies.
    pub fn sinks(&self) -> Vec<&str> {
        if !self.options.directed {
            return self.nodes().collect();
        }
        self.nodes
            .iter()
            .enumerate()
            .filter(|(ix, _)| {
                !self.incidence[*ix]
                    .iter()
                    .any(|&e| self.edges[e].v_ix == *ix)
            })
            .map(|(_, n)| n.id.as_str())
            .collect()
    }
}

impl<N: Default, E> Graph<N, E> {
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }
}

impl<N: Default, E: Default> Graph<N, E> {
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts (or relabels) an edge, creating missing endpoints with default content.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let key = self.canonicalize_key(EdgeKey {
            v: v.into(),
            w: w.into(),
            name: name.map(Into::into),
        });

        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.ensure_node(key.v.clone());
        self.ensure_node(key.w.clone());
        let v_ix = self.node_index[&key.v];
        let w_ix = self.node_index[&key.w];

        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_default(),
        });
        self.edge_index.insert(key, idx);
        self.incidence[v_ix].push(idx);
        if w_ix != v_ix {
            self.incidence[w_ix].push(idx);
        }
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }
}
