//! Index-based working graph for the layered layout passes.

use railmap_core::Shape;

#[derive(Debug, Clone)]
pub(crate) struct LayerNode {
    /// `None` for virtual nodes inserted along long edges.
    pub id: Option<String>,
    pub shape: Option<Shape>,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
    pub x: f64,
    pub y: f64,
}

impl LayerNode {
    pub fn station(id: &str, shape: Shape, width: f64, height: f64) -> Self {
        Self {
            id: Some(id.to_string()),
            shape: Some(shape),
            width,
            height,
            rank: 0,
            order: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn dummy(rank: i32, width: f64, height: f64) -> Self {
        Self {
            id: None,
            shape: None,
            width,
            height,
            rank,
            order: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.id.is_none()
    }
}

/// One input line. `v -> w` follows the rank direction once cycles are broken.
#[derive(Debug, Clone)]
pub(crate) struct LayerEdge {
    pub v: usize,
    pub w: usize,
    pub minlen: i32,
    pub reversed: bool,
    /// Label box (width, height) in final orientation.
    pub label: Option<(f64, f64)>,
}

impl LayerEdge {
    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LayerGraph {
    pub nodes: Vec<LayerNode>,
    /// Indexed like the source graph's lines.
    pub edges: Vec<LayerEdge>,
}

impl LayerGraph {
    /// Edge indices leaving `v`, in insertion order, self-loops excluded.
    pub fn out_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.v == v && !e.is_self_loop())
            .map(|(i, _)| i)
    }

    pub fn has_edges(&self, v: usize) -> bool {
        self.edges
            .iter()
            .any(|e| !e.is_self_loop() && (e.v == v || e.w == v))
    }
}

/// The node path an edge occupies after normalization: `v`, the virtual nodes, then `w`.
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub nodes: Vec<usize>,
    pub label_node: Option<usize>,
}
