use crate::*;

fn color(name: &str) -> Color {
    Color::parse(name).unwrap()
}

fn two_stations() -> DiagramBuilder {
    let mut b = DiagramBuilder::new("t");
    b.add_station("data", "Data", color("lightblue"), Shape::Circle)
        .unwrap();
    b.add_station("rules", "Rules", color("lightgreen"), Shape::Box)
        .unwrap();
    b
}

#[test]
fn add_station_twice_is_a_duplicate() {
    let mut b = two_stations();
    let err = b
        .add_station("data", "Again", color("red"), Shape::Circle)
        .unwrap_err();
    assert!(
        matches!(
            &err,
            Error::DuplicateIdentifier { id, scope: IdScope::Main } if id == "data"
        ),
        "unexpected error: {err}"
    );
    assert_eq!(b.graph().stations.len(), 2);
}

#[test]
fn connect_rejects_unknown_source() {
    let mut b = two_stations();
    let err = b
        .connect(Connection::new("x", "data", color("blue"), 3.0))
        .unwrap_err();
    match err {
        Error::UnknownNode { id, from, to } => {
            assert_eq!(id, "x");
            assert_eq!(from, "x");
            assert_eq!(to, "data");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(b.graph().lines.is_empty());
}

#[test]
fn connect_rejects_unknown_target() {
    let mut b = two_stations();
    let err = b
        .connect(Connection::new("data", "nowhere", color("blue"), 3.0))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownNode { ref id, .. } if id == "nowhere"));
}

#[test]
fn connect_rejects_non_positive_width() {
    let mut b = two_stations();
    for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = b
            .connect(Connection::new("data", "rules", color("blue"), width))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLineWidth { .. }), "{width}");
    }
}

#[test]
fn connect_keeps_label_and_dash_style() {
    let mut b = two_stations();
    b.connect(
        Connection::new("rules", "data", Color::black(), 2.0)
            .label("Back")
            .dashed(),
    )
    .unwrap();
    let line = &b.graph().lines[0];
    assert_eq!(line.label.as_deref(), Some("Back"));
    assert_eq!(line.style, LineStyle::Dashed);
    assert_eq!(line.width, 2.0);
}

#[test]
fn legend_has_fixed_entry_count_regardless_of_main_graph() {
    let mut empty = DiagramBuilder::new("empty");
    empty.build_legend().unwrap();
    assert_eq!(empty.graph().legend_entries().len(), LEGEND_ENTRY_COUNT);

    let mut b = two_stations();
    b.build_legend().unwrap();
    assert_eq!(b.graph().legend_entries().len(), LEGEND_ENTRY_COUNT);

    let legend = b.graph().legend.as_ref().unwrap();
    assert_eq!(legend.name, "cluster_legend");
    assert_eq!(legend.title, "Legend");
    assert_eq!(legend.border, LineStyle::Dashed);
}

#[test]
fn legend_entries_all_resolve_their_colors() {
    let mut b = DiagramBuilder::new("legend");
    b.build_legend().unwrap();
    let entries = b.graph().legend_entries();
    let unfilled: Vec<&str> = entries
        .iter()
        .filter(|e| e.fill.is_none())
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(unfilled, vec!["line5"]);
    assert_eq!(entries[7].outline, LineStyle::Dashed);
}

#[test]
fn legend_ids_collide_with_main_stations() {
    let mut b = DiagramBuilder::new("t");
    b.add_station("normal", "Mine", color("white"), Shape::Circle)
        .unwrap();
    let err = b.build_legend().unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateIdentifier { ref id, scope: IdScope::Main } if id == "normal"
    ));
    assert!(b.graph().legend.is_none());
}

#[test]
fn main_station_cannot_reuse_legend_id() {
    let mut b = DiagramBuilder::new("t");
    b.build_legend().unwrap();
    let err = b
        .add_station("decision", "Hub", color("orange"), Shape::Hexagon)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateIdentifier { scope: IdScope::Legend, .. }
    ));
}

#[test]
fn building_the_legend_twice_fails() {
    let mut b = DiagramBuilder::new("t");
    b.build_legend().unwrap();
    assert!(matches!(
        b.build_legend().unwrap_err(),
        Error::DuplicateIdentifier { scope: IdScope::Legend, .. }
    ));
}

#[test]
fn legend_entries_are_not_valid_line_endpoints() {
    let mut b = two_stations();
    b.build_legend().unwrap();
    let err = b
        .connect(Connection::new("data", "line1", color("blue"), 1.0))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownNode { ref id, .. } if id == "line1"));
}

#[test]
fn finish_hands_over_the_graph() {
    let b = two_stations();
    let g = b.finish();
    assert_eq!(g.name, "t");
    assert_eq!(
        g.stations.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["data", "rules"]
    );
    assert!(g.station("rules").is_some());
    assert!(g.station("ml").is_none());
}

#[test]
fn colors_reject_unknown_names_and_accept_hex() {
    assert!(matches!(
        Color::parse("not-a-color"),
        Err(Error::InvalidColor { .. })
    ));
    let c = Color::parse("#FFaa00").unwrap();
    assert_eq!(c.to_hex(), "#ffaa00");
    assert_eq!(c.as_dot(), "#ffaa00");
    assert_eq!(Color::parse(" LightBlue ").unwrap().as_dot(), "lightblue");
}
