use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_STEM: &str = "railsaarthiai_railway_map_with_legend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Native,
    Graphviz,
}

impl std::str::FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "graphviz" | "dot" => Ok(Self::Graphviz),
            other => Err(Error::Config {
                message: format!("unknown engine `{other}` (expected native|graphviz)"),
            }),
        }
    }
}

/// Run configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RailmapConfig {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub engine: EngineKind,
    pub graphviz_program: PathBuf,
    /// Raster scale factor for the native engine.
    pub scale: f32,
    /// CSS-ish background color for the native engine; `None` keeps the PNG transparent.
    pub background: Option<String>,
    /// Write the DOT source next to the image (at the un-suffixed output path).
    pub write_source: bool,
}

impl Default for RailmapConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            engine: EngineKind::Native,
            graphviz_program: PathBuf::from("dot"),
            scale: 1.0,
            background: Some("white".to_string()),
            write_source: true,
        }
    }
}

impl RailmapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|err| Error::Config {
            message: err.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::Config {
            message: format!("reading {}: {err}", path.display()),
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::Config {
                message: format!("scale must be a finite value > 0, got {}", self.scale),
            });
        }
        let stem = self.file_stem.trim();
        if stem.is_empty() || stem.contains(['/', '\\']) {
            return Err(Error::Config {
                message: format!("invalid file stem {:?}", self.file_stem),
            });
        }
        if let Some(background) = &self.background {
            let background = background.trim();
            if !background.eq_ignore_ascii_case("transparent") && Color::parse(background).is_err() {
                return Err(Error::Config {
                    message: format!(
                        "invalid background {background:?} (expected a color name, #rrggbb or transparent)"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Output path without the image extension (the engine appends it).
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.file_stem.trim())
    }
}
