//! Graph description types.
//!
//! A [`Graph`] is a plain value: stations and lines in declaration order, an optional legend
//! cluster, and the global layout directives. It is produced by
//! [`DiagramBuilder`](crate::DiagramBuilder) and handed to a
//! [`RenderEngine`](crate::RenderEngine).

use crate::color::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Hexagon,
    Box,
    DoubleCircle,
}

impl Shape {
    pub fn as_dot(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Hexagon => "hexagon",
            Shape::Box => "box",
            Shape::DoubleCircle => "doublecircle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    TB,
    #[default]
    LR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
        }
    }
}

/// Global layout directives shared by every engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDirectives {
    pub rank_dir: RankDir,
    /// Maximum drawing size in inches (Graphviz `size`); drawings are scaled down, never up.
    pub size_inches: Option<f64>,
    pub format: OutputFormat,
}

impl Default for LayoutDirectives {
    fn default() -> Self {
        Self {
            rank_dir: RankDir::LR,
            size_inches: Some(12.0),
            format: OutputFormat::Png,
        }
    }
}

/// A labeled vertex ("station").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub label: String,
    /// `None` draws an unfilled outline.
    pub fill: Option<Color>,
    pub shape: Shape,
    pub outline: LineStyle,
}

impl Station {
    pub fn new(id: impl Into<String>, label: impl Into<String>, fill: Color, shape: Shape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fill: Some(fill),
            shape,
            outline: LineStyle::Solid,
        }
    }
}

/// A directed, styled edge ("line").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: String,
    pub to: String,
    pub color: Color,
    pub width: f64,
    pub label: Option<String>,
    pub style: LineStyle,
}

/// The legend cluster: display-only stations, never connected by lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Cluster name; Graphviz only boxes subgraphs named `cluster*`.
    pub name: String,
    pub title: String,
    pub title_font_size: f64,
    pub border: LineStyle,
    pub entries: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    pub directives: LayoutDirectives,
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
    pub legend: Option<Legend>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: LayoutDirectives::default(),
            stations: Vec::new(),
            lines: Vec::new(),
            legend: None,
        }
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn legend_entries(&self) -> &[Station] {
        self.legend.as_ref().map(|l| l.entries.as_slice()).unwrap_or(&[])
    }

    /// Main-graph stations followed by legend entries.
    pub fn all_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().chain(self.legend_entries())
    }
}
