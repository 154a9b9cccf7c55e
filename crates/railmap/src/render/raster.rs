use railmap_core::Color;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("invalid raster scale {0}; expected a finite value > 0")]
    InvalidScale(f32),
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill painted under the drawing; `None` (or an unparseable color) keeps it transparent.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RasterError::InvalidScale(scale));
    }

    let mut opt = usvg::Options::default();
    let fontdb = opt.fontdb_mut();
    fontdb.load_system_fonts();
    match available_sans_family(fontdb) {
        Some(family) => {
            fontdb.set_sans_serif_family(family.as_str());
            opt.font_family = family;
        }
        None => tracing::warn!("no system fonts found; text will not be drawn"),
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // `size` is the root width/height; usvg already maps the viewBox onto it.
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, "rasterized SVG");
    Ok(pixmap)
}

const PREFERRED_FAMILIES: &[&str] = &["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"];

/// First preferred family the database has a face for, else any loaded family.
fn available_sans_family(fontdb: &usvg::fontdb::Database) -> Option<String> {
    let loaded: Vec<&str> = fontdb
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();
    PREFERRED_FAMILIES
        .iter()
        .find_map(|want| loaded.iter().find(|name| name.eq_ignore_ascii_case(want)))
        .or_else(|| loaded.iter().min())
        .map(|name| name.to_string())
}

/// `transparent`, an X11 color name, or `#rrggbb`.
fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
        return Some(tiny_skia::Color::TRANSPARENT);
    }
    let [r, g, b] = Color::parse(text).ok()?.components();
    Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
}
