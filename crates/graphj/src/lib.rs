#![forbid(unsafe_code)]

//! Headless graph layout algorithms.
//!
//! Layouts read vertex shapes from a [`Layout2D`] sink and write positions, transforms and edge
//! paths back into it. The graph itself is never modified.

pub mod circular;
pub mod error;
pub mod hierarchical;
pub mod layout2d;
pub mod radial;
pub mod tree;
pub mod visibility;

pub use graphj_model as model;

pub use circular::CircularOptions;
pub use error::{Error, Result};
pub use hierarchical::HierarchicalOptions;
pub use layout2d::{DefaultLayout, Layout2D, VertexGeometry};
pub use radial::RadialOptions;
pub use tree::{EdgeControl, TreeOptions};
pub use visibility::{ShortestPathRouter, VisibilityGraph};

use graphj_model::geom::Rect;
use graphj_model::{Graph, Shape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "camelCase")]
pub enum Algorithm {
    /// Vertices sharing a cycle on a common ring.
    Circular(CircularOptions),
    /// Generations on concentric rings around a root.
    Radial(RadialOptions),
    /// Layered drawing of a DAG.
    Hierarchical(HierarchicalOptions),
    /// Children packed below their parent along the growth axis.
    Tree(TreeOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Hierarchical(HierarchicalOptions::default())
    }
}

/// Headless layout entry point. Returns the shape covering the drawing.
pub fn layout<N, E, L>(
    graph: &Graph<N, E>,
    layout: &mut L,
    bounds: Rect,
    algorithm: &Algorithm,
) -> Result<Shape>
where
    L: Layout2D + ?Sized,
{
    match algorithm {
        Algorithm::Circular(opts) => circular::layout(graph, layout, bounds, opts),
        Algorithm::Radial(opts) => radial::layout(graph, layout, bounds, opts),
        Algorithm::Hierarchical(opts) => hierarchical::layout(graph, layout, bounds, opts),
        Algorithm::Tree(opts) => tree::layout(graph, layout, bounds, opts),
    }
}
