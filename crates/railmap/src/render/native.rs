use super::raster::{RasterOptions, svg_to_png};
use super::{LayoutOptions, SvgRenderOptions, render_svg_sync, svg_id_for};
use railmap_core::{Graph, RailmapConfig, RenderEngine, RenderError};

/// In-process engine: layered layout, SVG, then `resvg` rasterization. Needs no external
/// programs, and equal inputs produce byte-identical PNGs on the same machine.
#[derive(Debug, Clone, Default)]
pub struct NativeEngine {
    pub layout: LayoutOptions,
    pub svg: SvgRenderOptions,
    pub raster: RasterOptions,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raster scale and background taken from a run configuration.
    pub fn from_config(config: &RailmapConfig) -> Self {
        Self {
            raster: RasterOptions {
                scale: config.scale,
                background: config.background.clone(),
            },
            ..Self::default()
        }
    }

    pub fn render_svg(&self, graph: &Graph) -> Result<String, RenderError> {
        let svg_options = SvgRenderOptions {
            diagram_id: Some(
                self.svg
                    .diagram_id
                    .clone()
                    .unwrap_or_else(|| svg_id_for(&graph.name)),
            ),
            ..self.svg.clone()
        };
        render_svg_sync(graph, &self.layout, &svg_options).map_err(|err| RenderError::Layout {
            message: err.to_string(),
        })
    }
}

impl RenderEngine for NativeEngine {
    fn name(&self) -> &str {
        "native"
    }

    fn render_png(&self, graph: &Graph) -> Result<Vec<u8>, RenderError> {
        let svg = self.render_svg(graph)?;
        svg_to_png(&svg, &self.raster).map_err(|err| RenderError::Raster {
            message: err.to_string(),
        })
    }
}
