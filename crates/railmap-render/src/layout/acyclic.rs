//! Break cycles by reversing a DFS feedback arc set.
//!
//! Nodes are visited in insertion order and out-edges in declaration order, so for a ring of
//! lines the edge that closes the ring is the one reversed.

use super::graph::LayerGraph;

/// Returns the indices of the reversed edges.
pub(crate) fn run(g: &mut LayerGraph) -> Vec<usize> {
    let fas = dfs_fas(g);
    for &e in &fas {
        let edge = &mut g.edges[e];
        std::mem::swap(&mut edge.v, &mut edge.w);
        edge.reversed = true;
    }
    fas
}

fn dfs_fas(g: &LayerGraph) -> Vec<usize> {
    let n = g.nodes.len();
    let mut fas = Vec::new();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];

    fn dfs(
        g: &LayerGraph,
        v: usize,
        visited: &mut [bool],
        on_stack: &mut [bool],
        fas: &mut Vec<usize>,
    ) {
        if visited[v] {
            return;
        }
        visited[v] = true;
        on_stack[v] = true;
        for e in g.out_edges(v) {
            let w = g.edges[e].w;
            if on_stack[w] {
                fas.push(e);
            } else {
                dfs(g, w, visited, on_stack, fas);
            }
        }
        on_stack[v] = false;
    }

    for v in 0..n {
        dfs(g, v, &mut visited, &mut on_stack, &mut fas);
    }
    fas.sort_unstable();
    fas
}
