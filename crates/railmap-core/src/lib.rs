#![forbid(unsafe_code)]

//! Metro-map diagram model (headless).
//!
//! Stations and lines are assembled with [`DiagramBuilder`], which enforces identifier
//! uniqueness across the main graph and the legend and rejects lines with unknown endpoints.
//! The resulting [`Graph`] is a plain value that any [`RenderEngine`] can turn into a PNG.

pub mod builder;
pub mod color;
pub mod config;
pub mod dot;
pub mod engine;
pub mod error;
pub mod graphviz;
pub mod legend;
pub mod model;
pub mod preset;

pub use builder::{Connection, DiagramBuilder};
pub use color::Color;
pub use config::{EngineKind, RailmapConfig};
pub use dot::to_dot;
pub use engine::{RenderEngine, RenderOptions, image_path, render_to_path};
pub use error::{Error, IdScope, RenderError, Result};
pub use graphviz::GraphvizEngine;
pub use legend::LEGEND_ENTRY_COUNT;
pub use model::{
    Graph, LayoutDirectives, Legend, Line, LineStyle, OutputFormat, RankDir, Shape, Station,
};
pub use preset::railway_ai_map;
