//! Fixed legend content.

use crate::color::Color;
use crate::model::{Legend, LineStyle, Shape, Station};

pub const LEGEND_CLUSTER_NAME: &str = "cluster_legend";
pub const LEGEND_TITLE: &str = "Legend";
pub const LEGEND_TITLE_FONT_SIZE: f64 = 20.0;

struct Entry {
    id: &'static str,
    label: &'static str,
    shape: Shape,
    fill: Option<&'static str>,
    outline: LineStyle,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "normal",
        label: "Normal Station",
        shape: Shape::Circle,
        fill: Some("white"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "decision",
        label: "Decision Hub",
        shape: Shape::Hexagon,
        fill: Some("white"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "terminal",
        label: "Terminal Station",
        shape: Shape::DoubleCircle,
        fill: Some("white"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "line1",
        label: "Blue Line = Data & Rules",
        shape: Shape::Box,
        fill: Some("lightblue"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "line2",
        label: "Red Line = ML & Optimization",
        shape: Shape::Box,
        fill: Some("lightcoral"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "line3",
        label: "Green Line = Simulation",
        shape: Shape::Box,
        fill: Some("lightgreen"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "line4",
        label: "Purple Line = API & Output",
        shape: Shape::Box,
        fill: Some("plum"),
        outline: LineStyle::Solid,
    },
    Entry {
        id: "line5",
        label: "Dashed = Feedback Loop",
        shape: Shape::Box,
        fill: None,
        outline: LineStyle::Dashed,
    },
];

/// Number of entries [`legend`] always produces.
pub const LEGEND_ENTRY_COUNT: usize = ENTRIES.len();

pub fn legend_ids() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|e| e.id)
}

pub fn legend() -> Legend {
    let entries = ENTRIES
        .iter()
        .map(|e| Station {
            id: e.id.to_string(),
            label: e.label.to_string(),
            // Every table color is an X11 name.
            fill: e.fill.and_then(|c| Color::parse(c).ok()),
            shape: e.shape,
            outline: e.outline,
        })
        .collect();

    Legend {
        name: LEGEND_CLUSTER_NAME.to_string(),
        title: LEGEND_TITLE.to_string(),
        title_font_size: LEGEND_TITLE_FONT_SIZE,
        border: LineStyle::Dashed,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_fill_is_a_known_color() {
        for entry in ENTRIES {
            if let Some(fill) = entry.fill {
                assert!(Color::parse(fill).is_ok(), "{}: unknown color {fill:?}", entry.id);
            }
        }
        let legend = legend();
        for (entry, station) in ENTRIES.iter().zip(&legend.entries) {
            assert_eq!(entry.fill.is_some(), station.fill.is_some(), "{}", entry.id);
        }
    }
}
