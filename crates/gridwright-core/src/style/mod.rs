//! Cell styling types
//!
//! - [`Style`] - Visual attributes (font weight, colors)
//! - [`CellFormat`] - Style plus number format: the full attribute set applied to a cell
//! - [`FormatCache`] - Deduplicates formats so each distinct set is created once
//! - [`Color`] - Color representation

mod color;
mod pool;

pub use color::Color;
pub use pool::FormatCache;

/// Visual cell style
///
/// Number formats live on [`CellFormat`], since the same style is often
/// combined with several formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Bold font
    pub bold: bool,
    /// Italic font
    pub italic: bool,
    /// Font color (None = automatic)
    pub font_color: Option<Color>,
    /// Solid background fill (None = no fill)
    pub fill_color: Option<Color>,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Check if this style changes nothing
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }
}

/// Complete formatting for one cell: style plus number format
///
/// This is the canonical key of the format cache; two cells with equal
/// `CellFormat`s share one backend format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellFormat {
    /// Visual style
    pub style: Style,
    /// Number format code, e.g. `#,##0.00` (None = General)
    pub number_format: Option<String>,
}

impl CellFormat {
    /// Combine an optional style and an optional number format
    pub fn new(style: Option<&Style>, number_format: Option<&str>) -> Self {
        Self {
            style: style.cloned().unwrap_or_default(),
            number_format: number_format
                .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("General"))
                .map(str::to_string),
        }
    }

    /// Check if this is the backend's default format (nothing to apply)
    pub fn is_default(&self) -> bool {
        self.style.is_default() && self.number_format.is_none()
    }
}

impl From<Style> for CellFormat {
    fn from(style: Style) -> Self {
        Self {
            style,
            number_format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_is_default() {
        assert!(CellFormat::new(None, None).is_default());
        assert!(CellFormat::new(None, Some("General")).is_default());
        assert!(CellFormat::new(Some(&Style::new()), Some("")).is_default());
        assert!(!CellFormat::new(None, Some("0.00%")).is_default());
        assert!(!CellFormat::new(Some(&Style::new().bold(true)), None).is_default());
    }

    #[test]
    fn test_builder_chain() {
        let style = Style::new()
            .bold(true)
            .italic(true)
            .font_color(Color::RED)
            .fill_color(Color::rgb(0xEE, 0xEE, 0xEE));
        assert!(style.bold && style.italic);
        assert_eq!(style.font_color, Some(Color::RED));
        assert!(!style.is_default());
    }
}
