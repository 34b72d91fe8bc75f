//! Layered (Sugiyama style) layout for directed acyclic graphs.
//!
//! Three phases: longest-path layering with dummy cells ([`layering`]), crossing reduction
//! ([`order`]) and compact coordinate assignment with edges routed through the dummies.

pub mod dummy;
pub mod layering;
pub mod order;
mod position;

pub use dummy::DummyAwareLayout;
pub use layering::{LayerAssignment, assign_layers};

use crate::error::Result;
use crate::layout2d::Layout2D;
use graphj_model::geom::Rect;
use graphj_model::{Graph, Shape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchicalOptions {
    pub distance_between_layers: f64,
    pub distance_between_vertices: f64,
    /// Stack layers downwards so sinks end up at the bottom; upwards otherwise.
    pub sinks_at_bottom: bool,
    /// Horizontal alignment of narrower layers: 0 left, 0.5 centered, 1 right.
    pub alignment_of_layers: f64,
    /// Attach edges to the band edge below/above a vertex instead of its center.
    pub pick_ports: bool,
    pub crossing_reduction_sweeps: usize,
}

impl Default for HierarchicalOptions {
    fn default() -> Self {
        Self {
            distance_between_layers: 20.0,
            distance_between_vertices: 20.0,
            sinks_at_bottom: true,
            alignment_of_layers: 0.5,
            pick_ports: true,
            crossing_reduction_sweeps: 4,
        }
    }
}

impl HierarchicalOptions {
    pub fn set_alignment_of_layers(&mut self, alignment: f64) {
        self.alignment_of_layers = alignment.clamp(0.0, 1.0);
    }
}

/// Lays out a directed acyclic graph in layers.
///
/// Fails with a graph shape error for cyclic input, before anything is written to `layout`.
/// Returns the rectangle covering all layers.
pub fn layout<N, E, L>(
    graph: &Graph<N, E>,
    layout: &mut L,
    bounds: Rect,
    options: &HierarchicalOptions,
) -> Result<Shape>
where
    L: Layout2D + ?Sized,
{
    if graph.is_empty() {
        return Ok(Shape::Rectangle(bounds));
    }

    let mut la = assign_layers(graph, layout)?;
    let crossings = order::reduce_crossings(&mut la, options.crossing_reduction_sweeps);
    tracing::debug!(
        layers = la.layer_count(),
        width = la.width(),
        dummies = la.dummy_count(),
        crossings,
        "layer assignment"
    );

    let mut sink = DummyAwareLayout::new(layout, la.dummies());
    let (rect, bands) = position::assign_positions(&la, &mut sink, options);
    position::route_edges(&la, &mut sink, &bands, options);

    Ok(Shape::Rectangle(rect))
}
