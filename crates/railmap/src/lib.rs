#![forbid(unsafe_code)]

//! `railmap` draws metro-map style architecture diagrams.
//!
//! Build a [`Graph`] with [`DiagramBuilder`] (or start from [`railway_ai_map`]), then hand it to
//! a [`RenderEngine`]. [`GraphvizEngine`] shells out to the Graphviz `dot` program; with the
//! `raster` feature, `render::NativeEngine` lays the map out and rasterizes it in-process.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`railmap::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization, and `render::NativeEngine`

pub use railmap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use railmap_render::model::RailmapLayout;
    pub use railmap_render::svg::SvgRenderOptions;
    pub use railmap_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use railmap_render::{LayoutOptions, layout_graph, layout_json};

    #[cfg(feature = "raster")]
    mod native;
    #[cfg(feature = "raster")]
    pub mod raster;

    #[cfg(feature = "raster")]
    pub use native::NativeEngine;

    use railmap_core::Graph;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Build(#[from] railmap_core::Error),
        #[error(transparent)]
        Render(#[from] railmap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Turns a graph name into an SVG `id` token: ASCII alphanumerics, `-` and `_` survive,
    /// everything else becomes `-`, and the result always starts with a letter.
    pub fn svg_id_for(name: &str) -> String {
        let mut out: String = name
            .trim()
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '-'
                }
            })
            .collect();
        if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.insert_str(0, "map-");
        }
        out
    }

    /// Layout + SVG in one call (executor-free).
    pub fn render_svg_sync(
        graph: &Graph,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_graph(graph, layout_options)?;
        Ok(railmap_render::svg::render_svg(graph, &layout, svg_options)?)
    }

    /// SVG for the built-in railway AI map.
    pub fn render_default_map_svg(svg_options: &SvgRenderOptions) -> Result<String> {
        let graph = railmap_core::railway_ai_map()?.finish();
        render_svg_sync(&graph, &LayoutOptions::default(), svg_options)
    }
}
