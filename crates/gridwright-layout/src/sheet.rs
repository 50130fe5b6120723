//! Per-sheet component placement

use crate::component::{Component, PlannedCell};

/// A component anchored at a 0-based position
#[derive(Debug, Clone)]
pub struct Placement {
    pub component: Component,
    pub row: u32,
    pub col: u32,
}

/// Components anchored on one named sheet
#[derive(Debug, Clone)]
pub struct SheetLayout {
    name: String,
    placements: Vec<Placement>,
    auto_width: bool,
}

impl SheetLayout {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placements: Vec::new(),
            auto_width: true,
        }
    }

    /// Anchor a component with its top-left cell at `(row, col)`
    pub fn add(&mut self, component: impl Into<Component>, row: u32, col: u32) -> &mut Self {
        self.placements.push(Placement {
            component: component.into(),
            row,
            col,
        });
        self
    }

    /// Builder form of [`SheetLayout::add`]
    pub fn with(mut self, component: impl Into<Component>, row: u32, col: u32) -> Self {
        self.add(component, row, col);
        self
    }

    /// Enable or disable automatic column widths for this sheet
    pub fn auto_width(mut self, enabled: bool) -> Self {
        self.auto_width = enabled;
        self
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placements in insertion order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Whether the auto-width pass applies to this sheet
    pub fn is_auto_width(&self) -> bool {
        self.auto_width
    }

    pub(crate) fn plan(&self) -> Vec<PlannedCell> {
        let mut cells = Vec::new();
        for placement in &self.placements {
            placement.component.place(
                u64::from(placement.row),
                u64::from(placement.col),
                &mut cells,
            );
        }
        cells
    }
}
