use railmap_core::{Graph, LEGEND_ENTRY_COUNT, railway_ai_map};
use railmap_render::svg::{SvgRenderOptions, escape_xml, render_svg, size_hint_scale};
use railmap_render::{LayoutOptions, layout_graph};

fn preset_svg(options: &SvgRenderOptions) -> (Graph, String) {
    let graph = railway_ai_map().unwrap().finish();
    let layout = layout_graph(&graph, &LayoutOptions::default()).unwrap();
    let svg = render_svg(&graph, &layout, options).unwrap();
    (graph, svg)
}

#[test]
fn renders_every_station_and_line() {
    let (graph, svg) = preset_svg(&SvgRenderOptions::default());
    assert!(svg.starts_with("<svg id=\"railmap\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    for station in graph.all_stations() {
        assert!(
            svg.contains(&format!(r#"id="node-{}""#, station.id)),
            "missing {}",
            station.id
        );
    }
    assert_eq!(svg.matches(r#"<g class="node""#).count(), 10 + LEGEND_ENTRY_COUNT);
    assert_eq!(svg.matches("marker-end=").count(), graph.lines.len());
}

#[test]
fn one_arrow_marker_per_line_color() {
    let (_, svg) = preset_svg(&SvgRenderOptions::default());
    for hex in ["0000ff", "ff0000", "00ff00", "a020f0", "000000"] {
        assert!(
            svg.contains(&format!(r#"<marker id="railmap-arrow-{hex}""#)),
            "missing marker {hex}"
        );
    }
    assert_eq!(svg.matches("<marker ").count(), 5);
}

#[test]
fn shapes_match_station_kinds() {
    let (_, svg) = preset_svg(&SvgRenderOptions::default());
    // One hexagon in the map, one in the legend.
    assert_eq!(svg.matches("<polygon ").count(), 2);
    // `fusion`, the five line swatches and the legend border.
    assert_eq!(svg.matches("<rect x=").count(), 6 + 1);
    assert!(svg.contains(r##"fill="#20b2aa""##), "lightseagreen output station");
}

#[test]
fn feedback_loop_and_legend_border_are_dashed() {
    let (_, svg) = preset_svg(&SvgRenderOptions::default());
    assert!(svg.contains(r##"stroke="#000000" stroke-width="2" stroke-dasharray="8,4""##));
    assert!(svg.contains(r#"<g class="cluster" id="cluster_legend">"#));
    assert!(svg.contains(">Feedback Loop</tspan>"));
    assert!(svg.contains(">Legend</tspan>"));
}

#[test]
fn multi_line_labels_use_tspans() {
    let (_, svg) = preset_svg(&SvgRenderOptions::default());
    assert!(svg.contains(">Data Ingestion</tspan>"));
    assert!(svg.contains(">(Kafka, TimescaleDB)</tspan>"));
}

#[test]
fn size_hint_only_scales_down() {
    let graph = railway_ai_map().unwrap().finish();
    let layout = layout_graph(&graph, &LayoutOptions::default()).unwrap();
    let scale = size_hint_scale(&graph, &layout, 96.0);
    assert!(scale > 0.0 && scale <= 1.0);
    assert!(layout.width * scale <= 12.0 * 96.0 + 1e-6);

    let mut unbounded = graph.clone();
    unbounded.directives.size_inches = None;
    assert_eq!(size_hint_scale(&unbounded, &layout, 96.0), 1.0);

    let mut huge = graph;
    huge.directives.size_inches = Some(1000.0);
    assert_eq!(size_hint_scale(&huge, &layout, 96.0), 1.0);
}

#[test]
fn diagram_id_prefixes_markers() {
    let options = SvgRenderOptions {
        diagram_id: Some("map".to_string()),
        ..Default::default()
    };
    let (_, svg) = preset_svg(&options);
    assert!(svg.starts_with("<svg id=\"map\""));
    assert!(svg.contains(r#"marker-end="url(#map-arrow-0000ff)""#));
}

#[test]
fn output_is_deterministic() {
    let (_, a) = preset_svg(&SvgRenderOptions::default());
    let (_, b) = preset_svg(&SvgRenderOptions::default());
    assert_eq!(a, b);
}

#[test]
fn escape_xml_escapes_markup() {
    assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
}

#[test]
fn default_font_stack_falls_back_to_sans_serif() {
    let (_, svg) = preset_svg(&SvgRenderOptions::default());
    assert!(
        svg.contains(r#"font-family="Arial, Helvetica, &quot;Liberation Sans&quot;, &quot;DejaVu Sans&quot;, sans-serif""#)
    );
}
