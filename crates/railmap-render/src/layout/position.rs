//! Coordinate assignment.
//!
//! Ranks become columns (`LR`) or rows (`TB`). Along the cross axis each node is pulled to the
//! median of its predecessors and pushed further only as much as needed to keep `node_sep`
//! (or `edge_sep` between virtual nodes) to its neighbor, which keeps straight chains straight.

use super::graph::{Chain, LayerGraph};
use railmap_core::RankDir;

pub(crate) struct Spacing {
    pub node_sep: f64,
    pub edge_sep: f64,
    pub rank_sep: f64,
}

pub(crate) fn run(
    g: &mut LayerGraph,
    layers: &[Vec<usize>],
    chains: &[Chain],
    rank_dir: RankDir,
    spacing: &Spacing,
) {
    let rank_extent = |w: f64, h: f64| match rank_dir {
        RankDir::LR => w,
        RankDir::TB => h,
    };
    let cross_extent = |w: f64, h: f64| match rank_dir {
        RankDir::LR => h,
        RankDir::TB => w,
    };

    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); g.nodes.len()];
    for chain in chains {
        for pair in chain.nodes.windows(2) {
            preds[pair[1]].push(pair[0]);
        }
    }

    // Rank axis.
    let mut rank_pos = Vec::with_capacity(layers.len());
    let mut cursor = 0.0;
    for (r, layer) in layers.iter().enumerate() {
        let thickness = layer
            .iter()
            .map(|&v| rank_extent(g.nodes[v].width, g.nodes[v].height))
            .fold(0.0_f64, f64::max);
        if r > 0 {
            cursor += spacing.rank_sep;
        }
        rank_pos.push(cursor + thickness / 2.0);
        cursor += thickness;
    }

    // Cross axis.
    let mut cross = vec![0.0_f64; g.nodes.len()];
    for layer in layers {
        let mut prev: Option<usize> = None;
        for &v in layer {
            let ext = cross_extent(g.nodes[v].width, g.nodes[v].height);
            let min_pos = prev.map(|p| {
                let p_ext = cross_extent(g.nodes[p].width, g.nodes[p].height);
                let sep = separation(g.nodes[p].is_dummy(), g.nodes[v].is_dummy(), spacing);
                cross[p] + p_ext / 2.0 + sep + ext / 2.0
            });
            let desired = median(preds[v].iter().map(|&u| cross[u]));
            cross[v] = match (desired, min_pos) {
                (Some(d), Some(m)) => d.max(m),
                (Some(d), None) => d,
                (None, Some(m)) => m,
                (None, None) => ext / 2.0,
            };
            prev = Some(v);
        }
    }

    let min_cross = g
        .nodes
        .iter()
        .enumerate()
        .map(|(v, n)| cross[v] - cross_extent(n.width, n.height) / 2.0)
        .fold(f64::INFINITY, f64::min);
    let shift = if min_cross.is_finite() { -min_cross } else { 0.0 };

    for layer in layers {
        for &v in layer {
            let node = &mut g.nodes[v];
            let r = rank_pos[node.rank as usize];
            let c = cross[v] + shift;
            (node.x, node.y) = match rank_dir {
                RankDir::LR => (r, c),
                RankDir::TB => (c, r),
            };
        }
    }
}

fn separation(a_dummy: bool, b_dummy: bool, spacing: &Spacing) -> f64 {
    match (a_dummy, b_dummy) {
        (false, false) => spacing.node_sep,
        (true, true) => spacing.edge_sep,
        _ => (spacing.node_sep + spacing.edge_sep) / 2.0,
    }
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        Some(v[mid])
    } else {
        Some((v[mid - 1] + v[mid]) / 2.0)
    }
}
