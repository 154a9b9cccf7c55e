#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for `railmap` metro maps.
//!
//! `layout_graph` turns a [`railmap_core::Graph`] into absolute positions; `svg::render_svg`
//! draws that layout. Nothing here touches the filesystem or spawns processes.

pub mod geom;
pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use crate::model::RailmapLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use railmap_core::Graph;
use std::sync::Arc;

pub use layout::layout_graph;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph: {message}")]
    InvalidGraph { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub font_size: f64,
    /// Gap between neighbors within a rank.
    pub node_sep: f64,
    /// Gap around virtual nodes of long edges.
    pub edge_sep: f64,
    /// Gap between ranks.
    pub rank_sep: f64,
    /// Blank border around the whole drawing.
    pub margin: f64,
    pub order_iterations: usize,
    pub cluster_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            font_size: 14.0,
            node_sep: 25.0,
            edge_sep: 10.0,
            rank_sep: 50.0,
            margin: 8.0,
            order_iterations: 8,
            cluster_padding: 8.0,
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("font_size", &self.font_size)
            .field("node_sep", &self.node_sep)
            .field("edge_sep", &self.edge_sep)
            .field("rank_sep", &self.rank_sep)
            .field("margin", &self.margin)
            .field("order_iterations", &self.order_iterations)
            .field("cluster_padding", &self.cluster_padding)
            .finish_non_exhaustive()
    }
}

/// Lays `graph` out and serializes the result.
pub fn layout_json(graph: &Graph, options: &LayoutOptions, pretty: bool) -> Result<String> {
    let layout: RailmapLayout = layout_graph(graph, options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&layout)?
    } else {
        serde_json::to_string(&layout)?
    };
    Ok(json)
}
