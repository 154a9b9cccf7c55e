use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Where an identifier was already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    Main,
    Legend,
}

impl std::fmt::Display for IdScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdScope::Main => f.write_str("main graph"),
            IdScope::Legend => f.write_str("legend"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate station identifier `{id}` (already declared in the {scope})")]
    DuplicateIdentifier { id: String, scope: IdScope },

    #[error("line {from} -> {to} references unknown station `{id}`")]
    UnknownNode {
        id: String,
        from: String,
        to: String,
    },

    #[error("invalid color: {value:?}")]
    InvalidColor { value: String },

    #[error("line {from} -> {to} has invalid width {width}; expected a finite value > 0")]
    InvalidLineWidth { from: String, to: String, width: f64 },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render engine `{engine}` is unavailable: {source}")]
    EngineUnavailable {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    #[error("render engine `{engine}` failed: {message}")]
    EngineFailed { engine: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("layout failed: {message}")]
    Layout { message: String },

    #[error("rasterization failed: {message}")]
    Raster { message: String },
}
