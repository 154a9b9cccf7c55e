use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: every column of display width costs `char_width_factor * font_size`.
///
/// Zero factors fall back to the defaults, so `DeterministicTextMeasurer::default()` is usable.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub const DEFAULT_CHAR_WIDTH_FACTOR: f64 = 0.6;
    pub const DEFAULT_LINE_HEIGHT_FACTOR: f64 = 1.2;

    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size.max(1.0) * self.effective_line_height_factor()
    }

    fn effective_line_height_factor(&self) -> f64 {
        if self.line_height_factor == 0.0 {
            Self::DEFAULT_LINE_HEIGHT_FACTOR
        } else {
            self.line_height_factor
        }
    }
}

/// Splits a label into display lines. An empty label is one empty line.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|l| l.trim_end_matches('\r')).collect()
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            Self::DEFAULT_CHAR_WIDTH_FACTOR
        } else {
            self.char_width_factor
        };

        let lines = text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * self.line_height(font_size),
            line_count: lines.len(),
        }
    }
}
