//! Layout options

use gridwright_core::Style;

/// Options controlling how a [`Layout`](crate::Layout) is written
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Narrowest width the auto-width pass sets (default: 5)
    pub min_column_width: f64,
    /// Widest width the auto-width pass sets (default: 60)
    pub max_column_width: f64,
    /// Added to the character count of the widest cell (default: 1.5)
    pub width_padding: f64,
    /// Run the auto-width pass at all (default: true)
    pub auto_width: bool,
    /// Style of table titles and header rows (default: bold)
    pub header_style: Option<Style>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_column_width: 5.0,
            max_column_width: 60.0,
            width_padding: 1.5,
            auto_width: true,
            header_style: Some(Style::new().bold(true)),
        }
    }
}

impl LayoutOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width bounds of the auto-width pass
    pub fn column_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    /// Set the padding added to measured content
    pub fn width_padding(mut self, padding: f64) -> Self {
        self.width_padding = padding;
        self
    }

    /// Enable or disable the auto-width pass
    pub fn auto_width(mut self, enabled: bool) -> Self {
        self.auto_width = enabled;
        self
    }

    /// Set the header style; `None` writes headers unstyled
    pub fn header_style(mut self, style: Option<Style>) -> Self {
        self.header_style = style;
        self
    }

    /// Width for a column whose widest cell has `chars` characters
    pub fn column_width(&self, chars: usize) -> f64 {
        (chars as f64 + self.width_padding)
            .min(self.max_column_width)
            .max(self.min_column_width)
    }
}
