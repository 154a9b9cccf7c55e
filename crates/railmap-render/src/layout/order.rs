//! Order nodes within each rank to reduce crossings.
//!
//! Starts from a DFS order and alternates downward/upward barycenter sweeps, keeping the best
//! ordering seen. Ties keep their current relative order, so the result is deterministic.

use super::graph::{Chain, LayerGraph};
use super::rank::max_rank;

pub(crate) fn run(g: &mut LayerGraph, chains: &[Chain], iterations: usize) -> Vec<Vec<usize>> {
    let n = g.nodes.len();
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); n];
    for chain in chains {
        for pair in chain.nodes.windows(2) {
            succs[pair[0]].push(pair[1]);
            preds[pair[1]].push(pair[0]);
        }
    }

    let mut layers = init_order(g, &succs);
    let mut best = layers.clone();
    let mut best_cc = crossings(&layers, &succs, n);

    for i in 0..iterations {
        if best_cc == 0 {
            break;
        }
        if i % 2 == 0 {
            for r in 1..layers.len() {
                let (fixed, free) = layers.split_at_mut(r);
                sweep(&mut free[0], &fixed[r - 1], &preds, n);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                let (free, fixed) = layers.split_at_mut(r + 1);
                sweep(&mut free[r], &fixed[0], &succs, n);
            }
        }

        let cc = crossings(&layers, &succs, n);
        if cc < best_cc {
            best_cc = cc;
            best = layers.clone();
        }
    }

    for layer in &best {
        for (i, &v) in layer.iter().enumerate() {
            g.nodes[v].order = i;
        }
    }
    best
}

fn init_order(g: &LayerGraph, succs: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let layer_count = max_rank(g).max(0) as usize + 1;
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    let mut visited = vec![false; g.nodes.len()];

    let mut start: Vec<usize> = (0..g.nodes.len()).collect();
    start.sort_by_key(|&v| g.nodes[v].rank);

    for v in start {
        let mut stack = vec![v];
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            layers[g.nodes[v].rank as usize].push(v);
            // Reverse so the first successor is visited first.
            stack.extend(succs[v].iter().rev().copied().filter(|&w| !visited[w]));
        }
    }
    layers
}

fn sweep(layer: &mut [usize], fixed: &[usize], neighbors: &[Vec<usize>], n: usize) {
    let mut pos = vec![0usize; n];
    for (i, &v) in fixed.iter().enumerate() {
        pos[v] = i;
    }

    let mut keyed: Vec<(f64, usize)> = layer
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let ns = &neighbors[v];
            let bc = if ns.is_empty() {
                i as f64
            } else {
                ns.iter().map(|&u| pos[u] as f64).sum::<f64>() / ns.len() as f64
            };
            (bc, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (slot, (_, v)) in layer.iter_mut().zip(keyed) {
        *slot = v;
    }
}

/// Counts pairwise crossings between every pair of adjacent layers.
pub(crate) fn crossings(layers: &[Vec<usize>], succs: &[Vec<usize>], n: usize) -> usize {
    let mut pos = vec![0usize; n];
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }

    let mut total = 0;
    for layer in layers {
        let segments: Vec<(usize, usize)> = layer
            .iter()
            .flat_map(|&v| succs[v].iter().map(move |&w| (v, w)))
            .map(|(v, w)| (pos[v], pos[w]))
            .collect();
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}
