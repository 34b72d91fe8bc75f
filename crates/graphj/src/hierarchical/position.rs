//! Compact coordinate assignment and edge routing through the layer bands.

use super::HierarchicalOptions;
use super::layering::LayerAssignment;
use crate::layout2d::{self, Layout2D};
use graphj_model::geom::{Point, Rect, Transform, point, size};
use graphj_model::path::clipped_path;

/// Vertical extent of each layer: the band runs from `top[i]` to `top[i] + dir * height[i]`.
pub(crate) struct Bands {
    top: Vec<f64>,
    height: Vec<f64>,
    dir: f64,
}

impl Bands {
    fn near(&self, layer: usize) -> f64 {
        self.top[layer]
    }

    fn far(&self, layer: usize) -> f64 {
        self.top[layer] + self.dir * self.height[layer]
    }
}

fn gap(la: &LayerAssignment, left: usize, right: usize, distance: f64) -> f64 {
    if la.cells[left].dummy || la.cells[right].dummy {
        distance / 2.0
    } else {
        distance
    }
}

pub(crate) fn assign_positions<L: Layout2D + ?Sized>(
    la: &LayerAssignment,
    layout: &mut L,
    options: &HierarchicalOptions,
) -> (Rect, Bands) {
    let dir = if options.sinks_at_bottom { 1.0 } else { -1.0 };
    let alignment = options.alignment_of_layers.clamp(0.0, 1.0);
    let layers = la.layers.len();

    let cell_bounds: Vec<Rect> = la
        .cells
        .iter()
        .map(|c| layout.shape(&c.id).bounds())
        .collect();

    let mut bands = Bands {
        top: vec![0.0; layers],
        height: vec![0.0; layers],
        dir,
    };
    let mut widths = vec![0.0; layers];
    let mut total_width: f64 = 0.0;
    let mut total_height: f64 = 0.0;
    let mut y = 0.0;
    for (i, layer) in la.layers.iter().enumerate() {
        bands.top[i] = y;
        for (j, &c) in layer.iter().enumerate() {
            if j > 0 {
                widths[i] += gap(la, layer[j - 1], c, options.distance_between_vertices);
            }
            widths[i] += cell_bounds[c].width();
            bands.height[i] = bands.height[i].max(cell_bounds[c].height());
        }
        total_height += bands.height[i];
        total_width = total_width.max(widths[i]);
        y += dir * (options.distance_between_layers + bands.height[i]);
    }
    total_height += options.distance_between_layers * layers.saturating_sub(1) as f64;

    for (i, layer) in la.layers.iter().enumerate() {
        let mut x = (total_width - widths[i]) * alignment;
        let y = bands.top[i];
        let h = bands.height[i];
        for (j, &c) in layer.iter().enumerate() {
            let id = la.cells[c].id.as_str();
            layout.set_transform(id, Transform::identity());
            if j > 0 {
                x += gap(la, layer[j - 1], c, options.distance_between_vertices);
            }
            let r = cell_bounds[c];
            let position = if dir < 0.0 {
                point(x - r.min_x(), y - r.max_y() - (h - r.height()) / 2.0)
            } else {
                point(x - r.min_x(), y - r.min_y() + (h - r.height()) / 2.0)
            };
            layout.set_position(id, position);
            tracing::trace!(
                cell = id,
                layer = i,
                x = position.x,
                y = position.y,
                "layered placement"
            );
            x += r.width();
        }
    }

    let origin = point(0.0, if dir < 0.0 { -total_height } else { 0.0 });
    (Rect::new(origin, size(total_width, total_height)), bands)
}

/// Routes every edge through its chain: out of the start vertex's band, through each dummy's
/// band, into the end vertex's band. The ends are clipped to the vertex shapes.
pub(crate) fn route_edges<L: Layout2D + ?Sized>(
    la: &LayerAssignment,
    layout: &mut L,
    bands: &Bands,
    options: &HierarchicalOptions,
) {
    for (key, chain) in &la.chains {
        let (Some(&first), Some(&last)) = (chain.first(), chain.last()) else {
            continue;
        };
        let (start, end) = (&la.cells[first], &la.cells[last]);
        let start_pos = layout.position(&start.id);
        let end_pos = layout.position(&end.id);

        let mut points: Vec<Point> = Vec::with_capacity(chain.len() * 2);
        points.push(if options.pick_ports {
            point(start_pos.x, bands.far(start.layer))
        } else {
            start_pos
        });
        for &d in &chain[1..chain.len() - 1] {
            let layer = la.cells[d].layer;
            let x = layout.position(&la.cells[d].id).x;
            points.push(point(x, bands.near(layer)));
            points.push(point(x, bands.far(layer)));
        }
        points.push(if options.pick_ports {
            point(end_pos.x, bands.near(end.layer))
        } else {
            end_pos
        });
        points.dedup();

        let path = clipped_path(
            &points,
            start_pos,
            &layout2d::transformed_shape(layout, &start.id),
            end_pos,
            &layout2d::transformed_shape(layout, &end.id),
        );
        layout.set_path(key, path);
    }
}
