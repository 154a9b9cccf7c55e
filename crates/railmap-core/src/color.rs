//! Validated colors.
//!
//! Names resolve against the Graphviz default (X11) scheme rather than CSS, so `green` is
//! `#00ff00` and `purple` is `#a020f0`, matching what `dot` would draw.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// X11 color table (subset of Graphviz `color_names`), sorted by name.
const X11_COLORS: &[(&str, [u8; 3])] = &[
    ("beige", [245, 245, 220]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("brown", [165, 42, 42]),
    ("coral", [255, 127, 80]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkgreen", [0, 100, 0]),
    ("darkorange", [255, 140, 0]),
    ("darkred", [139, 0, 0]),
    ("gold", [255, 215, 0]),
    ("gray", [192, 192, 192]),
    ("green", [0, 255, 0]),
    ("grey", [192, 192, 192]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrod", [238, 221, 130]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("magenta", [255, 0, 255]),
    ("navy", [0, 0, 128]),
    ("orange", [255, 165, 0]),
    ("orchid", [218, 112, 214]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("purple", [160, 32, 240]),
    ("red", [255, 0, 0]),
    ("salmon", [250, 128, 114]),
    ("skyblue", [135, 206, 235]),
    ("steelblue", [70, 130, 180]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

fn lookup_x11(name: &str) -> Option<[u8; 3]> {
    X11_COLORS
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|i| X11_COLORS[i].1)
}

/// A color as written in the graph description plus its resolved RGB value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    spelling: String,
    rgb: [u8; 3],
}

impl Color {
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text.trim();
        let name = raw.to_ascii_lowercase();
        if let Some(rgb) = lookup_x11(&name) {
            return Ok(Self {
                spelling: name,
                rgb,
            });
        }

        if raw.starts_with('#') {
            if let Ok(c) = svgtypes::Color::from_str(raw) {
                if c.alpha == 255 {
                    let rgb = [c.red, c.green, c.blue];
                    return Ok(Self {
                        spelling: hex(rgb),
                        rgb,
                    });
                }
            }
        }

        Err(Error::InvalidColor {
            value: text.to_string(),
        })
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let rgb = [r, g, b];
        Self {
            spelling: hex(rgb),
            rgb,
        }
    }

    pub fn white() -> Self {
        Self::rgb_named("white")
    }

    pub fn black() -> Self {
        Self::rgb_named("black")
    }

    fn rgb_named(name: &'static str) -> Self {
        let rgb = lookup_x11(name).unwrap_or([0, 0, 0]);
        Self {
            spelling: name.to_string(),
            rgb,
        }
    }

    /// The spelling used in DOT output (an X11 name or `#rrggbb`).
    pub fn as_dot(&self) -> &str {
        &self.spelling
    }

    /// `#rrggbb`, for SVG attributes.
    pub fn to_hex(&self) -> String {
        hex(self.rgb)
    }

    pub fn components(&self) -> [u8; 3] {
        self.rgb
    }
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.spelling
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.spelling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x11_table_is_sorted_for_binary_search() {
        assert!(X11_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn x11_names_differ_from_css_where_graphviz_does() {
        assert_eq!(Color::parse("green").unwrap().to_hex(), "#00ff00");
        assert_eq!(Color::parse("purple").unwrap().to_hex(), "#a020f0");
        assert_eq!(Color::parse("lightgoldenrod").unwrap().to_hex(), "#eedd82");
    }
}
