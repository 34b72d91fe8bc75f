//! Crossing reduction: barycenter sweeps plus adjacent transpositions.

use super::layering::LayerAssignment;

/// Edge crossings over all pairs of adjacent layers.
pub fn cross_count(la: &LayerAssignment) -> usize {
    let pos = la.position_in_layer();
    (1..la.layers.len())
        .map(|i| two_layer_cross_count(la, &pos, &la.layers[i - 1], la.layers[i].len()))
        .sum()
}

// Accumulator tree over the south layer (Barth, Jünger, Mutzel).
fn two_layer_cross_count(
    la: &LayerAssignment,
    pos: &[usize],
    north: &[usize],
    south_len: usize,
) -> usize {
    if south_len == 0 {
        return 0;
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = la.down[v].iter().map(|&w| pos[w]).collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south_len {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0;
    for entry in south_entries {
        let mut index = entry + first_index;
        tree[index] += 1;
        let mut weight_sum = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}

fn barycenter_sort(la: &mut LayerAssignment, layer: usize, downwards: bool) {
    let pos = la.position_in_layer();
    let neighbours = if downwards { &la.up } else { &la.down };
    let mut keyed: Vec<(f64, usize)> = la.layers[layer]
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let adj = &neighbours[c];
            let key = if adj.is_empty() {
                i as f64
            } else {
                adj.iter().map(|&a| pos[a] as f64).sum::<f64>() / adj.len() as f64
            };
            (key, c)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    la.layers[layer] = keyed.into_iter().map(|(_, c)| c).collect();
}

// Crossings among the edges of `u` and `v` into one neighbour layer when `u` is left of `v`.
fn pair_crossings(adj: &[Vec<usize>], pos: &[usize], u: usize, v: usize) -> usize {
    let mut n = 0;
    for &a in &adj[u] {
        for &b in &adj[v] {
            if pos[a] > pos[b] {
                n += 1;
            }
        }
    }
    n
}

/// Swaps neighbouring cells of `layer` while that lowers the crossings with both adjacent
/// layers.
fn transpose(la: &mut LayerAssignment, layer: usize) {
    let mut pos = la.position_in_layer();
    loop {
        let mut improved = false;
        for j in 0..la.layers[layer].len().saturating_sub(1) {
            let (u, v) = (la.layers[layer][j], la.layers[layer][j + 1]);
            let before = pair_crossings(&la.up, &pos, u, v) + pair_crossings(&la.down, &pos, u, v);
            let after = pair_crossings(&la.up, &pos, v, u) + pair_crossings(&la.down, &pos, v, u);
            if after < before {
                la.layers[layer].swap(j, j + 1);
                pos[u] = j + 1;
                pos[v] = j;
                improved = true;
            }
        }
        if !improved {
            break;
        }
    }
}

/// Reorders cells within layers to reduce crossings and returns the final crossing count.
///
/// Runs at most `sweeps` down+up sweeps, stops early once a sweep doesn't improve, and keeps the
/// best ordering seen.
pub fn reduce_crossings(la: &mut LayerAssignment, sweeps: usize) -> usize {
    let mut best = la.layers.clone();
    let mut best_cc = cross_count(la);

    for sweep in 0..sweeps {
        if best_cc == 0 {
            break;
        }
        for i in 1..la.layers.len() {
            barycenter_sort(la, i, true);
            transpose(la, i);
        }
        for i in (0..la.layers.len().saturating_sub(1)).rev() {
            barycenter_sort(la, i, false);
            transpose(la, i);
        }

        let cc = cross_count(la);
        tracing::trace!(sweep, crossings = cc, "crossing reduction sweep");
        if cc < best_cc {
            best_cc = cc;
            best.clone_from(&la.layers);
        } else {
            break;
        }
    }

    la.layers = best;
    best_cc
}
