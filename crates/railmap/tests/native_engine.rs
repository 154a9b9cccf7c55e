use railmap::render::NativeEngine;
use railmap::render::raster::{RasterOptions, svg_to_png};
use railmap::{
    Color, Connection, DiagramBuilder, RenderEngine, RenderError, RenderOptions, Shape,
    railway_ai_map,
};

fn png_size(bytes: &[u8]) -> (u32, u32) {
    let decoder = png::Decoder::new(bytes);
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn renders_the_default_map_to_png() {
    let graph = railway_ai_map().unwrap().finish();
    let bytes = NativeEngine::new().render_png(&graph).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let (w, h) = png_size(&bytes);
    assert!(w > 0 && h > 0);
    assert!(w <= 12 * 96 && h <= 12 * 96, "size hint not honored: {w}x{h}");
}

#[test]
fn rendering_is_deterministic() {
    let engine = NativeEngine::new();
    let a = engine.render_png(&railway_ai_map().unwrap().finish()).unwrap();
    let b = engine.render_png(&railway_ai_map().unwrap().finish()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scale_grows_the_image() {
    let graph = railway_ai_map().unwrap().finish();
    let one = NativeEngine::new().render_png(&graph).unwrap();
    let two = NativeEngine {
        raster: RasterOptions {
            scale: 2.0,
            background: Some("white".to_string()),
        },
        ..NativeEngine::default()
    }
    .render_png(&graph)
    .unwrap();
    let (w1, _) = png_size(&one);
    let (w2, _) = png_size(&two);
    assert!(w2 >= 2 * w1 - 1 && w2 <= 2 * w1 + 1, "{w1} vs {w2}");
}

#[test]
fn builder_render_writes_png_and_source() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map");

    let mut builder = DiagramBuilder::new("small");
    builder
        .add_station("a", "A", Color::parse("lightblue").unwrap(), Shape::Circle)
        .unwrap();
    builder
        .add_station("b", "B", Color::parse("orange").unwrap(), Shape::Hexagon)
        .unwrap();
    builder
        .connect(Connection::new("a", "b", Color::parse("red").unwrap(), 3.0))
        .unwrap();
    builder.build_legend().unwrap();

    let target = builder.render(&NativeEngine::new(), &out).unwrap();
    assert_eq!(target, dir.path().join("map.png"));
    let bytes = std::fs::read(&target).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert!(!out.exists());

    builder
        .render_with(
            &NativeEngine::new(),
            &out,
            &RenderOptions { write_source: true },
        )
        .unwrap();
    let source = std::fs::read_to_string(&out).unwrap();
    assert!(source.starts_with("digraph \"small\" {"));
}

#[test]
fn invalid_scale_is_a_raster_error() {
    let engine = NativeEngine {
        raster: RasterOptions {
            scale: -1.0,
            background: None,
        },
        ..NativeEngine::default()
    };
    let err = engine
        .render_png(&railway_ai_map().unwrap().finish())
        .unwrap_err();
    assert!(matches!(err, RenderError::Raster { .. }), "{err}");
}

fn strip_text(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len());
    let mut rest = svg;
    while let Some(start) = rest.find("<text ") {
        out.push_str(&rest[..start]);
        let end = rest[start..]
            .find("</text>")
            .map(|i| start + i + "</text>".len())
            .unwrap();
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

#[test]
fn labels_are_drawn_into_the_png() {
    let engine = NativeEngine::new();
    let svg = engine
        .render_svg(&railway_ai_map().unwrap().finish())
        .unwrap();
    let bare = strip_text(&svg);
    assert!(!bare.contains("<text"));
    assert!(bare.len() < svg.len());

    let options = RasterOptions {
        scale: 1.0,
        background: Some("white".to_string()),
    };
    let with_text = svg_to_png(&svg, &options).unwrap();
    let without_text = svg_to_png(&bare, &options).unwrap();
    assert_eq!(png_size(&with_text), png_size(&without_text));
    assert_ne!(with_text, without_text, "no label reached the image");
}

#[test]
fn svg_text_ends_in_a_generic_font_family() {
    let svg = NativeEngine::new()
        .render_svg(&railway_ai_map().unwrap().finish())
        .unwrap();
    assert!(svg.contains(r#"font-family="Arial, Helvetica, "#));
    assert!(svg.contains(r#", sans-serif""#));
}
