use crate::color::Color;
use crate::engine::{RenderEngine, RenderOptions, render_to_path};
use crate::error::{Error, IdScope, Result};
use crate::legend;
use crate::model::{Graph, LayoutDirectives, Line, LineStyle, Shape, Station};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Styling for one line, validated by [`DiagramBuilder::connect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub color: Color,
    pub width: f64,
    pub label: Option<String>,
    pub style: LineStyle,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, color: Color, width: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            color,
            width,
            label: None,
            style: LineStyle::Solid,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }
}

/// Assembles a [`Graph`] while enforcing identifier uniqueness and edge endpoint existence.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    graph: Graph,
    ids: IndexMap<String, IdScope>,
}

impl DiagramBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(name),
            ids: IndexMap::new(),
        }
    }

    pub fn with_directives(mut self, directives: LayoutDirectives) -> Self {
        self.graph.directives = directives;
        self
    }

    pub fn add_station(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        color: Color,
        shape: Shape,
    ) -> Result<()> {
        self.add(Station::new(id, label, color, shape))
    }

    /// Adds a fully specified main-graph station.
    pub fn add(&mut self, station: Station) -> Result<()> {
        self.claim(&station.id, IdScope::Main)?;
        tracing::debug!(id = %station.id, shape = station.shape.as_dot(), "added station");
        self.graph.stations.push(station);
        Ok(())
    }

    pub fn connect(&mut self, connection: Connection) -> Result<()> {
        let Connection {
            from,
            to,
            color,
            width,
            label,
            style,
        } = connection;

        // Legend entries are display-only, so only main-graph stations are valid endpoints.
        let missing = [&from, &to]
            .into_iter()
            .find(|id| self.ids.get(id.as_str()) != Some(&IdScope::Main))
            .cloned();
        if let Some(id) = missing {
            return Err(Error::UnknownNode { id, from, to });
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidLineWidth { from, to, width });
        }

        tracing::debug!(%from, %to, color = color.as_dot(), "connected stations");
        self.graph.lines.push(Line {
            from,
            to,
            color,
            width,
            label,
            style,
        });
        Ok(())
    }

    /// Adds the fixed legend cluster. Fails if any legend identifier is already taken,
    /// including by an earlier call.
    pub fn build_legend(&mut self) -> Result<()> {
        for id in legend::legend_ids() {
            if let Some(&scope) = self.ids.get(id) {
                return Err(Error::DuplicateIdentifier {
                    id: id.to_string(),
                    scope,
                });
            }
        }

        let legend = legend::legend();
        for entry in &legend.entries {
            self.ids.insert(entry.id.clone(), IdScope::Legend);
        }
        tracing::debug!(entries = legend.entries.len(), "built legend");
        self.graph.legend = Some(legend);
        Ok(())
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn finish(self) -> Graph {
        self.graph
    }

    /// Renders to `<output_path>.png` and returns that path.
    pub fn render(
        &self,
        engine: &dyn RenderEngine,
        output_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.render_with(engine, output_path, &RenderOptions::default())
    }

    pub fn render_with(
        &self,
        engine: &dyn RenderEngine,
        output_path: impl AsRef<Path>,
        options: &RenderOptions,
    ) -> Result<PathBuf> {
        Ok(render_to_path(
            &self.graph,
            engine,
            output_path.as_ref(),
            options,
        )?)
    }

    fn claim(&mut self, id: &str, scope: IdScope) -> Result<()> {
        if let Some(&existing) = self.ids.get(id) {
            return Err(Error::DuplicateIdentifier {
                id: id.to_string(),
                scope: existing,
            });
        }
        self.ids.insert(id.to_string(), scope);
        Ok(())
    }
}
