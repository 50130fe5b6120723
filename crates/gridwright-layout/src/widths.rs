//! Per-sheet column width accumulator

use crate::options::LayoutOptions;
use std::collections::BTreeMap;

/// Widest rendered content seen per column, in characters
#[derive(Debug, Default)]
pub(crate) struct ColumnWidths {
    chars: BTreeMap<u16, usize>,
}

impl ColumnWidths {
    pub(crate) fn observe(&mut self, col: u16, text: &str) {
        let len = text.chars().count();
        let entry = self.chars.entry(col).or_insert(0);
        *entry = (*entry).max(len);
    }

    /// Clamped widths in column order
    pub(crate) fn resolve(&self, options: &LayoutOptions) -> Vec<(u16, f64)> {
        self.chars
            .iter()
            .map(|(&col, &chars)| (col, options.column_width(chars)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_maximum() {
        let mut widths = ColumnWidths::default();
        widths.observe(2, "short");
        widths.observe(2, "a much longer cell");
        widths.observe(0, "x");
        let resolved = widths.resolve(&LayoutOptions::default());
        assert_eq!(resolved, vec![(0, 5.0), (2, 19.5)]);
    }
}
