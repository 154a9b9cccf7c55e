use crate::dot::to_dot;
use crate::error::RenderError;
use crate::model::Graph;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Something that turns a [`Graph`] into encoded image bytes.
pub trait RenderEngine {
    fn name(&self) -> &str;

    fn render_png(&self, graph: &Graph) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Also write the DOT source to the un-suffixed output path.
    pub write_source: bool,
}

/// `<output_path>.<ext>`: the extension is appended, never substituted, so `map.v2` becomes
/// `map.v2.png`.
pub fn image_path(output_path: &Path, graph: &Graph) -> PathBuf {
    let mut raw: OsString = output_path.as_os_str().to_owned();
    raw.push(".");
    raw.push(graph.directives.format.extension());
    PathBuf::from(raw)
}

pub fn render_to_path(
    graph: &Graph,
    engine: &dyn RenderEngine,
    output_path: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, RenderError> {
    let target = image_path(output_path, graph);
    tracing::debug!(
        engine = engine.name(),
        stations = graph.stations.len(),
        lines = graph.lines.len(),
        "rendering graph"
    );

    let bytes = engine.render_png(graph)?;

    write_file(&target, &bytes)?;
    if options.write_source {
        if let Err(err) = write_file(output_path, to_dot(graph).as_bytes()) {
            let _ = std::fs::remove_file(&target);
            return Err(err);
        }
    }

    tracing::info!(path = %target.display(), bytes = bytes.len(), "wrote image");
    Ok(target)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    std::fs::write(path, bytes).map_err(|source| RenderError::Output {
        path: path.to_path_buf(),
        source,
    })
}
