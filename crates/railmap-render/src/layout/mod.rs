//! Layered (Sugiyama-style) layout for metro maps.
//!
//! Pipeline: break cycles, rank by longest path, insert virtual nodes along long edges, order
//! ranks by barycenter sweeps, assign coordinates, then route edges through their virtual nodes.
//! The legend is laid out separately as a titled column placed before the first rank.

mod acyclic;
mod graph;
mod normalize;
mod order;
mod position;
mod rank;

use crate::geom::{self, Point, point};
use crate::model::{
    Bounds, LayoutCluster, LayoutEdge, LayoutLabel, LayoutNode, LayoutPoint, RailmapLayout,
};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, LayoutOptions, Result};
use graph::{LayerEdge, LayerGraph, LayerNode};
use railmap_core::{Graph, Legend, Shape};
use rustc_hash::FxHashMap;

/// Gap between the two rings of a double circle.
pub const DOUBLE_CIRCLE_GAP: f64 = 4.0;

const MIN_WIDTH: f64 = 72.0;
const MIN_HEIGHT: f64 = 48.0;
const LABEL_PADDING: f64 = 8.0;
const SELF_LOOP_REACH: f64 = 25.0;

pub fn layout_graph(graph: &Graph, options: &LayoutOptions) -> Result<RailmapLayout> {
    validate(graph)?;

    let measurer = options.text_measurer.as_ref();
    let style = TextStyle {
        font_family: None,
        font_size: options.font_size,
    };

    let mut g = LayerGraph::default();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for station in &graph.stations {
        let (w, h) = station_size(station.shape, &station.label, measurer, &style);
        index.insert(station.id.as_str(), g.nodes.len());
        g.nodes.push(LayerNode::station(&station.id, station.shape, w, h));
    }
    let station_count = g.nodes.len();

    for line in &graph.lines {
        let label = line.label.as_deref().map(|text| {
            let m = measurer.measure(text, &style);
            (m.width + LABEL_PADDING, m.height + LABEL_PADDING / 2.0)
        });
        g.edges.push(LayerEdge {
            v: index[line.from.as_str()],
            w: index[line.to.as_str()],
            // Labeled edges span two ranks so the label gets its own slot.
            minlen: if label.is_some() { 2 } else { 1 },
            reversed: false,
            label,
        });
    }

    let reversed = acyclic::run(&mut g);
    if !reversed.is_empty() {
        tracing::debug!(count = reversed.len(), "reversed edges to break cycles");
    }
    rank::longest_path(&mut g);
    let chains = normalize::run(&mut g, graph.directives.rank_dir, options.edge_sep);
    let layers = order::run(&mut g, &chains, options.order_iterations);
    position::run(
        &mut g,
        &layers,
        &chains,
        graph.directives.rank_dir,
        &position::Spacing {
            node_sep: options.node_sep,
            edge_sep: options.edge_sep,
            rank_sep: options.rank_sep,
        },
    );

    let mut nodes: Vec<LayoutNode> = g.nodes[..station_count]
        .iter()
        .map(|n| LayoutNode {
            id: n.id.clone().unwrap_or_default(),
            x: n.x,
            y: n.y,
            width: n.width,
            height: n.height,
            shape: n.shape.unwrap_or(Shape::Box),
            rank: Some(n.rank),
            order: Some(n.order),
        })
        .collect();

    let mut edges = Vec::with_capacity(graph.lines.len());
    for (i, (line, chain)) in graph.lines.iter().zip(&chains).enumerate() {
        let edge = &g.edges[i];
        let (points, label) = if edge.is_self_loop() {
            self_loop(&g.nodes[edge.v], edge.label)
        } else {
            route(&g, &chain.nodes, chain.label_node, edge.reversed)
        };
        edges.push(LayoutEdge {
            id: format!("L-{}-{}-{i}", line.from, line.to),
            from: line.from.clone(),
            to: line.to.clone(),
            points,
            label,
            reversed: edge.reversed,
        });
    }

    let mut clusters = Vec::new();
    if let Some(legend) = &graph.legend {
        let main = extent(&nodes, &edges, &[]);
        let (cluster, entries) = layout_legend(legend, main.as_ref(), measurer, &style, options);
        nodes.extend(entries);
        clusters.push(cluster);
    }

    let mut layout = RailmapLayout {
        nodes,
        edges,
        clusters,
        width: 0.0,
        height: 0.0,
    };
    fit_to_origin(&mut layout, options.margin);
    Ok(layout)
}

fn validate(graph: &Graph) -> Result<()> {
    let mut seen: FxHashMap<&str, ()> = FxHashMap::default();
    for station in graph.all_stations() {
        if seen.insert(station.id.as_str(), ()).is_some() {
            return Err(Error::InvalidGraph {
                message: format!("duplicate station id `{}`", station.id),
            });
        }
    }
    for line in &graph.lines {
        for id in [&line.from, &line.to] {
            if graph.station(id).is_none() {
                return Err(Error::InvalidGraph {
                    message: format!(
                        "line {} -> {} references unknown station `{id}`",
                        line.from, line.to
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Outer size of a station drawn with `shape` around `label`.
pub fn station_size(
    shape: Shape,
    label: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> (f64, f64) {
    let m = measurer.measure(label, style);
    let p = LABEL_PADDING;
    match shape {
        Shape::Box => (
            (m.width + 3.0 * p).max(MIN_WIDTH),
            (m.height + 2.0 * p).max(MIN_HEIGHT),
        ),
        Shape::Circle => {
            let d = (m.width.hypot(m.height) + p).max(MIN_HEIGHT);
            (d, d)
        }
        Shape::DoubleCircle => {
            let d = (m.width.hypot(m.height) + p).max(MIN_HEIGHT) + 2.0 * DOUBLE_CIRCLE_GAP;
            (d, d)
        }
        Shape::Hexagon => {
            let h = (m.height + 2.0 * p).max(MIN_HEIGHT);
            ((m.width + h / 2.0 + 2.0 * p).max(MIN_WIDTH), h)
        }
    }
}

/// Point where a line leaves (or enters) a node drawn with `shape`.
pub fn boundary_point(
    shape: Shape,
    center: Point,
    width: f64,
    height: f64,
    toward: Point,
) -> Point {
    match shape {
        Shape::Circle | Shape::DoubleCircle => {
            geom::intersect_circle(center, width.min(height) / 2.0, toward)
        }
        Shape::Box => geom::intersect_rect(center, width, height, toward),
        Shape::Hexagon => {
            geom::intersect_polygon(center, &geom::hexagon_points(width, height), toward)
        }
    }
}

fn node_boundary(n: &LayerNode, toward: Point) -> Point {
    let shape = n.shape.unwrap_or(Shape::Box);
    boundary_point(shape, point(n.x, n.y), n.width, n.height, toward)
}

fn route(
    g: &LayerGraph,
    chain: &[usize],
    label_node: Option<usize>,
    reversed: bool,
) -> (Vec<LayoutPoint>, Option<LayoutLabel>) {
    let first = &g.nodes[chain[0]];
    let last = &g.nodes[chain[chain.len() - 1]];
    let interior: Vec<Point> = chain[1..chain.len() - 1]
        .iter()
        .map(|&d| point(g.nodes[d].x, g.nodes[d].y))
        .collect();

    let start = node_boundary(
        first,
        interior.first().copied().unwrap_or(point(last.x, last.y)),
    );
    let end = node_boundary(
        last,
        interior.last().copied().unwrap_or(point(first.x, first.y)),
    );

    let mut points: Vec<LayoutPoint> = std::iter::once(start)
        .chain(interior)
        .chain(std::iter::once(end))
        .map(|p| LayoutPoint { x: p.x, y: p.y })
        .collect();
    if reversed {
        points.reverse();
    }

    let label = label_node.map(|d| {
        let n = &g.nodes[d];
        LayoutLabel {
            x: n.x,
            y: n.y,
            width: n.width,
            height: n.height,
        }
    });
    (points, label)
}

fn self_loop(n: &LayerNode, label: Option<(f64, f64)>) -> (Vec<LayoutPoint>, Option<LayoutLabel>) {
    let right = n.x + n.width / 2.0;
    let reach = right + SELF_LOOP_REACH;
    let top = point(n.x, n.y - n.height / 4.0);
    let bottom = point(n.x, n.y + n.height / 4.0);
    let start = node_boundary(n, point(reach, top.y));
    let end = node_boundary(n, point(reach, bottom.y));
    let points = [start, point(reach, top.y), point(reach, bottom.y), end]
        .iter()
        .map(|p| LayoutPoint { x: p.x, y: p.y })
        .collect();
    let label = label.map(|(width, height)| LayoutLabel {
        x: reach + width / 2.0,
        y: n.y,
        width,
        height,
    });
    (points, label)
}

fn layout_legend(
    legend: &Legend,
    main: Option<&Bounds>,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    options: &LayoutOptions,
) -> (LayoutCluster, Vec<LayoutNode>) {
    let padding = options.cluster_padding;
    let title_style = TextStyle {
        font_family: style.font_family.clone(),
        font_size: legend.title_font_size,
    };
    let title = measurer.measure(&legend.title, &title_style);

    let sizes: Vec<(f64, f64)> = legend
        .entries
        .iter()
        .map(|e| station_size(e.shape, &e.label, measurer, style))
        .collect();
    let column_width = sizes.iter().map(|s| s.0).fold(title.width, f64::max);
    let column_height = sizes.iter().map(|s| s.1).sum::<f64>()
        + options.node_sep * sizes.len().saturating_sub(1) as f64;

    let width = column_width + 2.0 * padding;
    let height = title.height + column_height + 3.0 * padding;

    // Sits left of the main graph, vertically centered on it.
    let (right, center_y) = match main {
        Some(b) => (b.min_x - options.rank_sep, (b.min_y + b.max_y) / 2.0),
        None => (width, height / 2.0),
    };
    let x = right - width / 2.0;
    let top = center_y - height / 2.0;

    let title_label = LayoutLabel {
        x,
        y: top + padding + title.height / 2.0,
        width: title.width,
        height: title.height,
    };

    let mut cursor = top + 2.0 * padding + title.height;
    let mut nodes = Vec::with_capacity(legend.entries.len());
    for (entry, (w, h)) in legend.entries.iter().zip(sizes) {
        nodes.push(LayoutNode {
            id: entry.id.clone(),
            x,
            y: cursor + h / 2.0,
            width: w,
            height: h,
            shape: entry.shape,
            rank: None,
            order: None,
        });
        cursor += h + options.node_sep;
    }

    let cluster = LayoutCluster {
        id: legend.name.clone(),
        x,
        y: top + height / 2.0,
        width,
        height,
        title: legend.title.clone(),
        title_label,
        padding,
        members: legend.entries.iter().map(|e| e.id.clone()).collect(),
    };
    (cluster, nodes)
}

fn extent(nodes: &[LayoutNode], edges: &[LayoutEdge], clusters: &[LayoutCluster]) -> Option<Bounds> {
    let boxes = nodes
        .iter()
        .map(|n| (n.x, n.y, n.width, n.height))
        .chain(clusters.iter().map(|c| (c.x, c.y, c.width, c.height)))
        .chain(
            edges
                .iter()
                .filter_map(|e| e.label.as_ref())
                .map(|l| (l.x, l.y, l.width, l.height)),
        );
    let corners = boxes.flat_map(|(x, y, w, h)| {
        [
            (x - w / 2.0, y - h / 2.0),
            (x + w / 2.0, y + h / 2.0),
        ]
    });
    let points = edges.iter().flat_map(|e| e.points.iter().map(|p| (p.x, p.y)));
    Bounds::from_points(corners.chain(points))
}

/// Translates everything so the drawing starts at (`margin`, `margin`) and records its size.
fn fit_to_origin(layout: &mut RailmapLayout, margin: f64) {
    let Some(b) = extent(&layout.nodes, &layout.edges, &layout.clusters) else {
        layout.width = 2.0 * margin;
        layout.height = 2.0 * margin;
        return;
    };
    let dx = margin - b.min_x;
    let dy = margin - b.min_y;

    for n in &mut layout.nodes {
        n.x += dx;
        n.y += dy;
    }
    for e in &mut layout.edges {
        for p in &mut e.points {
            p.x += dx;
            p.y += dy;
        }
        if let Some(l) = &mut e.label {
            l.x += dx;
            l.y += dy;
        }
    }
    for c in &mut layout.clusters {
        c.x += dx;
        c.y += dy;
        c.title_label.x += dx;
        c.title_label.y += dy;
    }

    layout.width = b.width() + 2.0 * margin;
    layout.height = b.height() + 2.0 * margin;
}
