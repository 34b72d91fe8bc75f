//! Longest-path layer assignment with dummy cells for edges spanning several layers.

use crate::error::{Error, Result};
use crate::layout2d::Layout2D;
use graphj_model::alg::topological_order;
use graphj_model::{EdgeKey, Graph};

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: String,
    pub layer: usize,
    pub dummy: bool,
}

/// Vertices and dummies arranged in ordered layers. Layer 0 holds the sources.
///
/// Every edge is a chain of cells, one per layer it passes, so after assignment consecutive
/// cells of a chain always sit in adjacent layers.
#[derive(Debug, Clone)]
pub struct LayerAssignment {
    pub(crate) cells: Vec<Cell>,
    pub(crate) layers: Vec<Vec<usize>>,
    pub(crate) chains: Vec<(EdgeKey, Vec<usize>)>,
    // neighbour cells in the next / previous layer, one entry per chain segment
    pub(crate) down: Vec<Vec<usize>>,
    pub(crate) up: Vec<Vec<usize>>,
}

impl LayerAssignment {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Cell ids of layer `i`, in order.
    pub fn layer(&self, i: usize) -> Vec<&str> {
        self.layers
            .get(i)
            .map(|l| l.iter().map(|&c| self.cells[c].id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn layer_of(&self, id: &str) -> Option<usize> {
        self.cells.iter().find(|c| c.id == id).map(|c| c.layer)
    }

    pub fn dummy_count(&self) -> usize {
        self.cells.iter().filter(|c| c.dummy).count()
    }

    pub fn dummies(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|c| c.dummy)
            .map(|c| c.id.as_str())
    }

    /// Layer index of every cell the edge passes, from start to end.
    pub fn chain_layers(&self, edge: &EdgeKey) -> Option<Vec<usize>> {
        self.chains
            .iter()
            .find(|(k, _)| k == edge)
            .map(|(_, chain)| chain.iter().map(|&c| self.cells[c].layer).collect())
    }

    /// Widest layer.
    pub fn width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn position_in_layer(&self) -> Vec<usize> {
        let mut pos = vec![0; self.cells.len()];
        for layer in &self.layers {
            for (i, &c) in layer.iter().enumerate() {
                pos[c] = i;
            }
        }
        pos
    }

    fn link(&mut self, from: usize, to: usize) {
        self.down[from].push(to);
        self.up[to].push(from);
    }

    fn add_cell(&mut self, id: String, layer: usize, dummy: bool) -> usize {
        self.cells.push(Cell { id, layer, dummy });
        self.down.push(Vec::new());
        self.up.push(Vec::new());
        self.cells.len() - 1
    }
}

fn dummy_id<N, E>(graph: &Graph<N, E>, n: usize) -> String {
    let mut id = format!("_d{n}");
    while graph.has_node(&id) {
        id.push('\'');
    }
    id
}

/// Assigns every vertex the length of the longest directed path ending at it and subdivides
/// long edges with dummies.
///
/// Cells are ordered in their layer by the current x position in `layout`; a dummy starts at the
/// x of its edge's end vertex.
pub fn assign_layers<N, E, L>(graph: &Graph<N, E>, layout: &L) -> Result<LayerAssignment>
where
    L: Layout2D + ?Sized,
{
    let Some(order) = topological_order(graph) else {
        return Err(Error::graph_shape("graph has to be acyclic"));
    };

    let n = graph.node_count();
    let mut layer_of = vec![0usize; n];
    for &v in &order {
        for &e in graph.incident_edges(v) {
            let (a, w) = graph.edge_endpoints(e);
            if a == v {
                layer_of[w] = layer_of[w].max(layer_of[v] + 1);
            }
        }
    }
    let layer_count = layer_of.iter().max().map_or(0, |m| m + 1);

    let mut la = LayerAssignment {
        cells: Vec::with_capacity(n),
        layers: vec![Vec::new(); layer_count],
        chains: Vec::with_capacity(graph.edge_count()),
        down: Vec::with_capacity(n),
        up: Vec::with_capacity(n),
    };

    let mut x: Vec<f64> = Vec::with_capacity(n);
    for v in 0..n {
        let id = graph.node_id(v);
        la.add_cell(id.to_string(), layer_of[v], false);
        x.push(layout.position(id).x);
    }

    for (layer, cells) in la.layers.iter_mut().enumerate() {
        cells.extend((0..n).filter(|&v| layer_of[v] == layer));
        cells.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    }

    let mut dummies = 0;
    for e in 0..graph.edge_count() {
        let (v, w) = graph.edge_endpoints(e);
        let mut chain = vec![v];
        for layer in layer_of[v] + 1..layer_of[w] {
            let id = dummy_id(graph, dummies);
            dummies += 1;
            let d = la.add_cell(id, layer, true);
            x.push(x[w]);
            let at = la.layers[layer]
                .iter()
                .position(|&c| x[c] > x[d])
                .unwrap_or(la.layers[layer].len());
            la.layers[layer].insert(at, d);
            chain.push(d);
        }
        chain.push(w);
        for pair in chain.windows(2) {
            la.link(pair[0], pair[1]);
        }
        la.chains.push((graph.edge_key(e).clone(), chain));
    }

    Ok(la)
}
