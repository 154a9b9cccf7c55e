//! Longest-path ranking over the acyclic graph.

use super::graph::LayerGraph;

/// Assigns ranks so every edge spans at least its `minlen`. Ranks are normalized to start at 0;
/// stations with no lines sit on rank 0.
pub(crate) fn longest_path(g: &mut LayerGraph) {
    let n = g.nodes.len();
    let mut memo: Vec<Option<i32>> = vec![None; n];

    fn dfs(g: &LayerGraph, v: usize, memo: &mut [Option<i32>]) -> i32 {
        if let Some(rank) = memo[v] {
            return rank;
        }
        let mut rank: Option<i32> = None;
        for e in g.out_edges(v) {
            let edge = &g.edges[e];
            let candidate = dfs(g, edge.w, memo) - edge.minlen;
            rank = Some(rank.map_or(candidate, |cur| cur.min(candidate)));
        }
        let rank = rank.unwrap_or(0);
        memo[v] = Some(rank);
        rank
    }

    for v in 0..n {
        dfs(g, v, &mut memo);
    }

    let connected: Vec<bool> = (0..n).map(|v| g.has_edges(v)).collect();
    let min_rank = (0..n)
        .filter(|&v| connected[v])
        .filter_map(|v| memo[v])
        .min()
        .unwrap_or(0);

    for (v, node) in g.nodes.iter_mut().enumerate() {
        node.rank = if connected[v] {
            memo[v].unwrap_or(0) - min_rank
        } else {
            0
        };
    }
}

pub(crate) fn max_rank(g: &LayerGraph) -> i32 {
    g.nodes.iter().map(|n| n.rank).max().unwrap_or(0)
}
