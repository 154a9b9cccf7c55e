//! SVG emission for a laid-out metro map.
//!
//! The output only uses plain SVG 1.1 elements (no `<foreignObject>`, no CSS classes that carry
//! styling) so `resvg` renders it the same way a browser does.

use crate::layout::DOUBLE_CIRCLE_GAP;
use crate::model::{LayoutCluster, LayoutEdge, LayoutNode, LayoutPoint, RailmapLayout};
use crate::text::text_lines;
use crate::{Error, Result};
use indexmap::IndexSet;
use railmap_core::{Graph, LineStyle, Shape, Station};
use rustc_hash::FxHashMap;
use std::fmt::Write as _;

const STROKE: &str = "#000000";
const DASH_PATTERN: &str = "8,4";

pub const DEFAULT_FONT_FAMILY: &str = r#"Arial, Helvetica, "Liberation Sans", "DejaVu Sans", sans-serif"#;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `id`, also used to prefix marker ids.
    pub diagram_id: Option<String>,
    /// CSS font stack; keep a generic family last so rasterizers always find a face.
    pub font_family: String,
    pub font_size: f64,
    /// Pixels per inch used to resolve the graph's size hint.
    pub dpi: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 14.0,
            dpi: 96.0,
        }
    }
}

/// Scale applied to honor `size_inches`; never above 1.
pub fn size_hint_scale(graph: &Graph, layout: &RailmapLayout, dpi: f64) -> f64 {
    let Some(inches) = graph.directives.size_inches else {
        return 1.0;
    };
    let max_px = inches * dpi;
    if !(max_px > 0.0) || layout.width <= 0.0 || layout.height <= 0.0 {
        return 1.0;
    }
    (max_px / layout.width).min(max_px / layout.height).min(1.0)
}

pub fn render_svg(
    graph: &Graph,
    layout: &RailmapLayout,
    options: &SvgRenderOptions,
) -> Result<String> {
    let stations: FxHashMap<&str, &Station> =
        graph.all_stations().map(|s| (s.id.as_str(), s)).collect();
    let diagram_id = options.diagram_id.as_deref().unwrap_or("railmap");

    let scale = size_hint_scale(graph, layout, options.dpi);
    if scale < 1.0 {
        tracing::debug!(scale, "size hint scales the drawing down");
    }

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{}" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" role="graphics-document document" aria-roledescription="railmap">"#,
        escape_xml(diagram_id),
        fmt(layout.width * scale),
        fmt(layout.height * scale),
        fmt(layout.width),
        fmt(layout.height),
    );
    let _ = write!(&mut out, "<title>{}</title>", escape_xml(&graph.name));

    let colors: IndexSet<String> = graph.lines.iter().map(|l| l.color.to_hex()).collect();
    out.push_str("<defs>");
    for hex in &colors {
        let _ = write!(
            &mut out,
            r#"<marker id="{}" viewBox="0 0 10 10" refX="10" refY="5" markerUnits="strokeWidth" markerWidth="4" markerHeight="4" orient="auto"><path d="M0,0L10,5L0,10z" fill="{hex}"/></marker>"#,
            marker_id(diagram_id, hex),
        );
    }
    out.push_str("</defs>");

    out.push_str(r#"<g class="clusters">"#);
    for cluster in &layout.clusters {
        render_cluster(&mut out, cluster, graph, options);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="edgePaths">"#);
    for (edge, line) in layout.edges.iter().zip(&graph.lines) {
        let hex = line.color.to_hex();
        let _ = write!(
            &mut out,
            r#"<path id="{}" d="{}" fill="none" stroke="{hex}" stroke-width="{}""#,
            escape_xml(&edge.id),
            curve_basis_path_d(&edge.points),
            fmt(line.width),
        );
        if line.style == LineStyle::Dashed {
            let _ = write!(&mut out, r#" stroke-dasharray="{DASH_PATTERN}""#);
        }
        let _ = write!(
            &mut out,
            r#" marker-end="url(#{})"/>"#,
            marker_id(diagram_id, &hex)
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="edgeLabels">"#);
    for (edge, line) in layout.edges.iter().zip(&graph.lines) {
        if let (Some(label), Some(text)) = (&edge.label, line.label.as_deref()) {
            render_edge_label(&mut out, edge, label.x, label.y, text, options);
        }
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &layout.nodes {
        let Some(station) = stations.get(node.id.as_str()) else {
            return Err(Error::InvalidGraph {
                message: format!("layout node `{}` has no station", node.id),
            });
        };
        render_node(&mut out, node, station, options);
    }
    out.push_str("</g>");

    out.push_str("</svg>\n");
    Ok(out)
}

fn marker_id(diagram_id: &str, hex: &str) -> String {
    format!(
        "{}-arrow-{}",
        escape_xml(diagram_id),
        hex.trim_start_matches('#')
    )
}

fn render_cluster(
    out: &mut String,
    cluster: &LayoutCluster,
    graph: &Graph,
    options: &SvgRenderOptions,
) {
    let dashed = graph
        .legend
        .as_ref()
        .is_some_and(|l| l.name == cluster.id && l.border == LineStyle::Dashed);
    let font_size = graph
        .legend
        .as_ref()
        .map(|l| l.title_font_size)
        .unwrap_or(options.font_size);

    let _ = write!(
        out,
        r#"<g class="cluster" id="{}"><rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{STROKE}" stroke-width="1""#,
        escape_xml(&cluster.id),
        fmt(cluster.x - cluster.width / 2.0),
        fmt(cluster.y - cluster.height / 2.0),
        fmt(cluster.width),
        fmt(cluster.height),
    );
    if dashed {
        let _ = write!(out, r#" stroke-dasharray="{DASH_PATTERN}""#);
    }
    out.push_str("/>");
    write_text(
        out,
        cluster.title_label.x,
        cluster.title_label.y,
        &cluster.title,
        font_size,
        options,
    );
    out.push_str("</g>");
}

fn render_edge_label(
    out: &mut String,
    edge: &LayoutEdge,
    x: f64,
    y: f64,
    text: &str,
    options: &SvgRenderOptions,
) {
    let _ = write!(
        out,
        r#"<g class="edgeLabel" data-edge="{}">"#,
        escape_xml(&edge.id)
    );
    write_text(out, x, y, text, options.font_size, options);
    out.push_str("</g>");
}

fn render_node(out: &mut String, node: &LayoutNode, station: &Station, options: &SvgRenderOptions) {
    let fill = station
        .fill
        .as_ref()
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "none".to_string());
    let dash = match station.outline {
        LineStyle::Dashed => format!(r#" stroke-dasharray="{DASH_PATTERN}""#),
        LineStyle::Solid => String::new(),
    };
    let paint = format!(r#"fill="{fill}" stroke="{STROKE}" stroke-width="1"{dash}"#);

    let _ = write!(
        out,
        r#"<g class="node" id="node-{}" transform="translate({}, {})">"#,
        escape_xml(&node.id),
        fmt(node.x),
        fmt(node.y),
    );

    let (w, h) = (node.width, node.height);
    match node.shape {
        Shape::Circle => {
            let _ = write!(out, r#"<circle r="{}" {paint}/>"#, fmt(w.min(h) / 2.0));
        }
        Shape::DoubleCircle => {
            let r = w.min(h) / 2.0;
            let _ = write!(out, r#"<circle r="{}" {paint}/>"#, fmt(r));
            let _ = write!(
                out,
                r#"<circle r="{}" fill="none" stroke="{STROKE}" stroke-width="1"{dash}/>"#,
                fmt(r - DOUBLE_CIRCLE_GAP)
            );
        }
        Shape::Box => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {paint}/>"#,
                fmt(-w / 2.0),
                fmt(-h / 2.0),
                fmt(w),
                fmt(h),
            );
        }
        Shape::Hexagon => {
            let pts = crate::geom::hexagon_points(w, h)
                .iter()
                .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(out, r#"<polygon points="{pts}" {paint}/>"#);
        }
    }

    write_text(out, 0.0, 0.0, &station.label, options.font_size, options);
    out.push_str("</g>");
}

/// Centered multi-line text; one `<tspan>` per line.
fn write_text(out: &mut String, x: f64, y: f64, text: &str, font_size: f64, options: &SvgRenderOptions) {
    let lines = text_lines(text);
    let line_height = font_size * 1.2;
    let first_dy = -(lines.len() as f64 - 1.0) * line_height / 2.0;

    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" fill="{STROKE}">"#,
        fmt(x),
        fmt(y),
        escape_xml(&options.font_family),
        fmt(font_size),
    );
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { first_dy } else { line_height };
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            fmt(x),
            fmt(dy),
            escape_xml(line)
        );
    }
    out.push_str("</text>");
}

/// B-spline through the routed points (d3 `curveBasis`): starts and ends exactly on the
/// first and last point and passes near the virtual-node points in between.
pub fn curve_basis_path_d(points: &[LayoutPoint]) -> String {
    let mut out = String::new();
    let Some(first) = points.first() else {
        return out;
    };
    let _ = write!(&mut out, "M{},{}", fmt(first.x), fmt(first.y));
    if points.len() == 1 {
        return out;
    }
    if points.len() == 2 {
        let _ = write!(&mut out, "L{},{}", fmt(points[1].x), fmt(points[1].y));
        return out;
    }

    let (mut x0, mut y0) = (points[0].x, points[0].y);
    let (mut x1, mut y1) = (points[1].x, points[1].y);
    let _ = write!(
        &mut out,
        "L{},{}",
        fmt((5.0 * x0 + x1) / 6.0),
        fmt((5.0 * y0 + y1) / 6.0)
    );

    let emit = |out: &mut String, x0: f64, y0: f64, x1: f64, y1: f64, x: f64, y: f64| {
        let _ = write!(
            out,
            "C{},{},{},{},{},{}",
            fmt((2.0 * x0 + x1) / 3.0),
            fmt((2.0 * y0 + y1) / 3.0),
            fmt((x0 + 2.0 * x1) / 3.0),
            fmt((y0 + 2.0 * y1) / 3.0),
            fmt((x0 + 4.0 * x1 + x) / 6.0),
            fmt((y0 + 4.0 * y1 + y) / 6.0),
        );
    };

    for p in &points[2..] {
        emit(&mut out, x0, y0, x1, y1, p.x, p.y);
        (x0, y0, x1, y1) = (x1, y1, p.x, p.y);
    }
    emit(&mut out, x0, y0, x1, y1, x1, y1);
    let _ = write!(&mut out, "L{},{}", fmt(x1), fmt(y1));
    out
}

/// Compact, stable number formatting (at most 3 decimals, no trailing zeros).
pub fn fmt(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
