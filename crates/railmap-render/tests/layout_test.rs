use railmap_core::{Color, Graph, LEGEND_ENTRY_COUNT, Line, LineStyle, RankDir, railway_ai_map};
use railmap_render::model::{LayoutNode, RailmapLayout};
use railmap_render::{Error, LayoutOptions, layout_graph, layout_json};

const CHAIN: [&str; 10] = [
    "data", "rules", "ml", "opt", "fusion", "sim", "ui", "api", "output", "feedback",
];

fn preset_layout() -> (Graph, RailmapLayout) {
    let graph = railway_ai_map().unwrap().finish();
    let layout = layout_graph(&graph, &LayoutOptions::default()).unwrap();
    (graph, layout)
}

fn node<'a>(layout: &'a RailmapLayout, id: &str) -> &'a LayoutNode {
    layout
        .node(id)
        .unwrap_or_else(|| panic!("missing node {id}"))
}

fn overlaps(a: &LayoutNode, b: &LayoutNode) -> bool {
    (a.x - b.x).abs() < (a.width + b.width) / 2.0 && (a.y - b.y).abs() < (a.height + b.height) / 2.0
}

#[test]
fn every_station_and_legend_entry_is_placed() {
    let (graph, layout) = preset_layout();
    assert_eq!(layout.nodes.len(), graph.stations.len() + LEGEND_ENTRY_COUNT);
    assert_eq!(layout.edges.len(), graph.lines.len());
    for station in graph.all_stations() {
        let n = node(&layout, &station.id);
        assert_eq!(n.shape, station.shape, "{}", station.id);
        assert!(n.width > 0.0 && n.height > 0.0);
    }
}

#[test]
fn ranks_follow_the_line_chain() {
    let (_, layout) = preset_layout();
    let ranks: Vec<i32> = CHAIN
        .iter()
        .map(|id| node(&layout, id).rank.unwrap())
        .collect();
    for pair in ranks.windows(2) {
        assert!(pair[0] < pair[1], "ranks not increasing: {ranks:?}");
    }
    // Left to right.
    for pair in CHAIN.windows(2) {
        assert!(node(&layout, pair[0]).x < node(&layout, pair[1]).x);
    }
}

#[test]
fn feedback_loop_is_reversed_but_still_points_at_data() {
    let (graph, layout) = preset_layout();
    let idx = graph
        .lines
        .iter()
        .position(|l| l.from == "feedback" && l.to == "data")
        .unwrap();
    let edge = &layout.edges[idx];
    assert!(edge.reversed);
    assert!(edge.label.is_some());
    assert!(edge.points.len() > 2);

    let feedback = node(&layout, "feedback");
    let data = node(&layout, "data");
    let first = edge.points.first().unwrap();
    let last = edge.points.last().unwrap();
    let dist = |n: &LayoutNode, x: f64, y: f64| (n.x - x).hypot(n.y - y);
    assert!(dist(feedback, first.x, first.y) <= feedback.width / 2.0 + 1e-6);
    assert!(dist(data, last.x, last.y) <= data.width / 2.0 + 1e-6);
}

#[test]
fn forward_lines_are_not_reversed() {
    let (graph, layout) = preset_layout();
    for (line, edge) in graph.lines.iter().zip(&layout.edges) {
        assert_eq!(edge.from, line.from);
        assert_eq!(edge.to, line.to);
        if line.style == LineStyle::Solid {
            assert!(!edge.reversed, "{} -> {}", line.from, line.to);
        }
    }
}

#[test]
fn nodes_do_not_overlap() {
    let (_, layout) = preset_layout();
    for (i, a) in layout.nodes.iter().enumerate() {
        for b in &layout.nodes[i + 1..] {
            assert!(!overlaps(a, b), "{} overlaps {}", a.id, b.id);
        }
    }
}

#[test]
fn legend_is_a_column_left_of_the_map() {
    let (graph, layout) = preset_layout();
    assert_eq!(layout.clusters.len(), 1);
    let cluster = &layout.clusters[0];
    assert_eq!(cluster.id, "cluster_legend");
    assert_eq!(cluster.title, "Legend");
    assert_eq!(cluster.members.len(), LEGEND_ENTRY_COUNT);

    let main_left = graph
        .stations
        .iter()
        .map(|s| {
            let n = node(&layout, &s.id);
            n.x - n.width / 2.0
        })
        .fold(f64::INFINITY, f64::min);
    assert!(cluster.x + cluster.width / 2.0 < main_left);

    let mut prev_y = f64::NEG_INFINITY;
    for id in &cluster.members {
        let n = node(&layout, id);
        assert!(n.rank.is_none());
        assert!(n.y > prev_y);
        assert!((n.x - cluster.x).abs() < 1e-9);
        assert!(n.y - n.height / 2.0 >= cluster.y - cluster.height / 2.0);
        assert!(n.y + n.height / 2.0 <= cluster.y + cluster.height / 2.0);
        prev_y = n.y;
    }
}

#[test]
fn drawing_starts_at_the_margin() {
    let (_, layout) = preset_layout();
    let margin = LayoutOptions::default().margin;
    for n in &layout.nodes {
        assert!(n.x - n.width / 2.0 >= margin - 1e-6, "{}", n.id);
        assert!(n.y - n.height / 2.0 >= margin - 1e-6, "{}", n.id);
        assert!(n.x + n.width / 2.0 <= layout.width - margin + 1e-6, "{}", n.id);
        assert!(n.y + n.height / 2.0 <= layout.height - margin + 1e-6, "{}", n.id);
    }
}

#[test]
fn top_to_bottom_grows_downward() {
    let mut graph = railway_ai_map().unwrap().finish();
    graph.directives.rank_dir = RankDir::TB;
    let layout = layout_graph(&graph, &LayoutOptions::default()).unwrap();
    assert!(node(&layout, "data").y < node(&layout, "rules").y);
    assert!(node(&layout, "api").y < node(&layout, "output").y);
}

#[test]
fn layout_is_deterministic() {
    let a = layout_json(&railway_ai_map().unwrap().finish(), &LayoutOptions::default(), false)
        .unwrap();
    let b = layout_json(&railway_ai_map().unwrap().finish(), &LayoutOptions::default(), false)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_endpoint_is_rejected() {
    let mut graph = railway_ai_map().unwrap().finish();
    graph.lines.push(Line {
        from: "data".to_string(),
        to: "nowhere".to_string(),
        color: Color::black(),
        width: 1.0,
        label: None,
        style: LineStyle::Solid,
    });
    let err = layout_graph(&graph, &LayoutOptions::default()).unwrap_err();
    assert!(
        matches!(&err, Error::InvalidGraph { message } if message.contains("nowhere")),
        "unexpected error: {err}"
    );
}

#[test]
fn duplicate_station_is_rejected() {
    let mut graph = railway_ai_map().unwrap().finish();
    let dup = graph.stations[0].clone();
    graph.stations.push(dup);
    assert!(matches!(
        layout_graph(&graph, &LayoutOptions::default()),
        Err(Error::InvalidGraph { .. })
    ));
}

#[test]
fn empty_graph_has_only_the_margin() {
    let graph = Graph::new("empty");
    let layout = layout_graph(&graph, &LayoutOptions::default()).unwrap();
    assert!(layout.nodes.is_empty());
    assert_eq!(layout.width, 2.0 * LayoutOptions::default().margin);
}
