//! Split edges spanning several ranks into chains of virtual nodes, one per crossed rank.

use super::graph::{Chain, LayerGraph, LayerNode};
use railmap_core::RankDir;

/// Returns one chain per edge, indexed like `g.edges`. Self-loops yield a single-node chain.
pub(crate) fn run(g: &mut LayerGraph, rank_dir: RankDir, edge_sep: f64) -> Vec<Chain> {
    let mut chains = Vec::with_capacity(g.edges.len());

    for e in 0..g.edges.len() {
        let edge = g.edges[e].clone();
        if edge.is_self_loop() {
            chains.push(Chain {
                nodes: vec![edge.v],
                label_node: None,
            });
            continue;
        }

        let v_rank = g.nodes[edge.v].rank;
        let w_rank = g.nodes[edge.w].rank;
        let mut dummies = Vec::new();
        for rank in v_rank + 1..w_rank {
            // Plain virtual nodes take no room along the rank axis.
            let (width, height) = match rank_dir {
                RankDir::LR => (0.0, edge_sep),
                RankDir::TB => (edge_sep, 0.0),
            };
            g.nodes.push(LayerNode::dummy(rank, width, height));
            dummies.push(g.nodes.len() - 1);
        }

        let label_node = match (edge.label, dummies.is_empty()) {
            (Some((width, height)), false) => {
                let d = dummies[dummies.len() / 2];
                g.nodes[d].width = width;
                g.nodes[d].height = height;
                Some(d)
            }
            _ => None,
        };

        let mut nodes = Vec::with_capacity(dummies.len() + 2);
        nodes.push(edge.v);
        nodes.extend(dummies);
        nodes.push(edge.w);
        chains.push(Chain { nodes, label_node });
    }

    chains
}
