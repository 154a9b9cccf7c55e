//! Graphviz DOT serialization.
//!
//! Output is deterministic: statements follow declaration order and attributes are emitted in
//! a fixed order, so the same graph always produces the same text.

use crate::model::{Graph, LineStyle, RankDir, Station};
use std::fmt::Write as _;

pub fn to_dot(graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(&mut out, "digraph {} {{", quote(&graph.name));

    let mut graph_attrs = vec![("rankdir", rank_dir(graph.directives.rank_dir).to_string())];
    if let Some(size) = graph.directives.size_inches {
        graph_attrs.push(("size", quote(&fmt_num(size))));
    }
    write_attr_stmt(&mut out, "\t", "graph", &graph_attrs);

    for station in &graph.stations {
        write_station(&mut out, "\t", station);
    }

    for line in &graph.lines {
        let mut attrs = Vec::new();
        if let Some(label) = &line.label {
            attrs.push(("label", quote(label)));
        }
        attrs.push(("color", quote(line.color.as_dot())));
        attrs.push(("penwidth", fmt_num(line.width)));
        if line.style == LineStyle::Dashed {
            attrs.push(("style", "dashed".to_string()));
        }
        let _ = write!(&mut out, "\t{} -> {}", quote(&line.from), quote(&line.to));
        write_attr_list(&mut out, &attrs);
        out.push('\n');
    }

    if let Some(legend) = &graph.legend {
        let _ = writeln!(&mut out, "\tsubgraph {} {{", quote(&legend.name));
        let mut attrs = vec![
            ("label", quote(&legend.title)),
            ("fontsize", fmt_num(legend.title_font_size)),
        ];
        if legend.border == LineStyle::Dashed {
            attrs.push(("style", "dashed".to_string()));
        }
        write_attr_stmt(&mut out, "\t\t", "graph", &attrs);
        for entry in &legend.entries {
            write_station(&mut out, "\t\t", entry);
        }
        out.push_str("\t}\n");
    }

    out.push_str("}\n");
    out
}

fn write_station(out: &mut String, indent: &str, station: &Station) {
    let mut attrs = vec![
        ("label", quote(&station.label)),
        ("shape", station.shape.as_dot().to_string()),
    ];

    let mut styles = Vec::new();
    if let Some(fill) = &station.fill {
        styles.push("filled");
        attrs.push(("fillcolor", quote(fill.as_dot())));
    }
    if station.outline == LineStyle::Dashed {
        styles.push("dashed");
    }
    if !styles.is_empty() {
        attrs.push(("style", quote(&styles.join(","))));
    }
    attrs.push(("fontcolor", "black".to_string()));

    let _ = write!(out, "{indent}{}", quote(&station.id));
    write_attr_list(out, &attrs);
    out.push('\n');
}

fn write_attr_stmt(out: &mut String, indent: &str, kind: &str, attrs: &[(&str, String)]) {
    let _ = write!(out, "{indent}{kind}");
    write_attr_list(out, attrs);
    out.push('\n');
}

fn write_attr_list(out: &mut String, attrs: &[(&str, String)]) {
    if attrs.is_empty() {
        return;
    }
    out.push_str(" [");
    for (i, (k, v)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{k}={v}");
    }
    out.push(']');
}

fn rank_dir(dir: RankDir) -> &'static str {
    match dir {
        RankDir::TB => "TB",
        RankDir::LR => "LR",
    }
}

/// Quotes a DOT ID. Newlines become the `\n` escape Graphviz uses for centered line breaks.
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

pub(crate) fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
