//! The layout orchestrator

use crate::component::CellKind;
use crate::error::{LayoutError, LayoutResult};
use crate::options::LayoutOptions;
use crate::reference_map::ReferenceMap;
use crate::sheet::SheetLayout;
use crate::widths::ColumnWidths;
use gridwright_core::{
    validate_sheet_name, CellAddress, CellFormat, CellLocation, FormatCache, Literal, Sink,
};
use gridwright_formula::{check_acyclic, CellContent, Renderer};
use std::sync::Arc;

/// Summary of one [`Layout::write`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Sheets created
    pub sheets: usize,
    /// Cells written (literals and formulas)
    pub cells: usize,
    /// Formula cells written
    pub formulas: usize,
    /// Distinct formats created
    pub formats: usize,
}

/// A cell of a sheet plan with its address checked against the grid
struct AddressedCell {
    row: u32,
    col: u16,
    kind: CellKind,
}

struct SheetPlan<'a> {
    sheet: &'a SheetLayout,
    cells: Vec<AddressedCell>,
}

/// Owns every sheet of a document and writes them through a [`Sink`].
///
/// Writing runs three passes:
/// 1. layout: every node gets a cell, recorded in a [`ReferenceMap`]
/// 2. write: cells are rendered and emitted in the same order, formats are deduplicated
/// 3. auto-width: column widths follow the widest rendered content
///
/// All state of a run lives in the run, so a layout can be written any
/// number of times.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    options: LayoutOptions,
    sheets: Vec<SheetLayout>,
}

impl Layout {
    /// Create an empty layout with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty layout with the given options
    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            sheets: Vec::new(),
        }
    }

    /// Options in effect
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Add a sheet; sheets are written in the order they are added.
    ///
    /// Fails on an invalid name or a name already in use (compared
    /// case-insensitively, like spreadsheet applications do).
    pub fn add_sheet(&mut self, sheet: SheetLayout) -> LayoutResult<()> {
        validate_sheet_name(sheet.name())?;
        let lower = sheet.name().to_lowercase();
        if self.sheets.iter().any(|s| s.name().to_lowercase() == lower) {
            return Err(LayoutError::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    /// Sheets in document order
    pub fn sheets(&self) -> &[SheetLayout] {
        &self.sheets
    }

    /// Find a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Run only the layout pass and return where every node lands
    pub fn resolve(&self) -> LayoutResult<ReferenceMap> {
        self.layout_pass().map(|(refs, _)| refs)
    }

    /// Lay out, render and emit the whole document, then close the sink.
    ///
    /// Pass `&mut sink` to keep the sink for inspection afterwards. On error
    /// the sink may hold a partial document.
    pub fn write<S: Sink>(&self, mut sink: S) -> LayoutResult<WriteReport> {
        let (refs, plans) = self.layout_pass()?;

        check_acyclic(plans.iter().flat_map(|plan| {
            plan.cells.iter().filter_map(|cell| match &cell.kind {
                CellKind::Node(v) => Some(v),
                CellKind::Label { .. } => None,
            })
        }))?;

        let mut report = WriteReport {
            sheets: plans.len(),
            ..WriteReport::default()
        };
        let mut formats: FormatCache<S::Format> = FormatCache::new();
        let mut written = Vec::with_capacity(plans.len());

        log::debug!("write pass: {} sheets", plans.len());
        for plan in &plans {
            let name = plan.sheet.name();
            let handle = sink.create_sheet(name).map_err(LayoutError::sink)?;
            let renderer = Renderer::new(&refs, name);
            let mut widths = ColumnWidths::default();

            for cell in &plan.cells {
                let (content, format) = self.cell_content(&renderer, &cell.kind)?;
                match &content {
                    CellContent::Literal(literal) if literal.is_empty() => {}
                    CellContent::Literal(literal) => {
                        sink.write_literal(&handle, cell.row, cell.col, literal)
                            .map_err(LayoutError::sink)?;
                        report.cells += 1;
                    }
                    CellContent::Formula(formula) => {
                        sink.write_formula(&handle, cell.row, cell.col, formula)
                            .map_err(LayoutError::sink)?;
                        report.cells += 1;
                        report.formulas += 1;
                    }
                }
                log::trace!(
                    "{}!{} <- {:?}",
                    name,
                    CellAddress::new(cell.row, cell.col),
                    content
                );

                let created = formats
                    .get_or_create(&format, |f| sink.create_format(f))
                    .map_err(LayoutError::sink)?;
                if let Some(handle_format) = created {
                    sink.apply_format(&handle, cell.row, cell.col, &handle_format)
                        .map_err(LayoutError::sink)?;
                }

                let text = content.display_text();
                if !text.is_empty() {
                    widths.observe(cell.col, &text);
                }
            }
            written.push((handle, widths));
        }
        report.formats = formats.len();

        if self.options.auto_width {
            log::debug!("auto-width pass");
            for (plan, (handle, widths)) in plans.iter().zip(&written) {
                if !plan.sheet.is_auto_width() {
                    continue;
                }
                for (col, width) in widths.resolve(&self.options) {
                    sink.set_column_width(handle, col, width)
                        .map_err(LayoutError::sink)?;
                }
            }
        }

        sink.close().map_err(LayoutError::sink)?;
        log::debug!(
            "wrote {} cells ({} formulas, {} formats)",
            report.cells,
            report.formulas,
            report.formats
        );
        Ok(report)
    }

    fn layout_pass(&self) -> LayoutResult<(ReferenceMap, Vec<SheetPlan<'_>>)> {
        log::debug!("layout pass: {} sheets", self.sheets.len());
        let mut refs = ReferenceMap::new();
        let mut plans = Vec::with_capacity(self.sheets.len());

        for sheet in &self.sheets {
            let sheet_name: Arc<str> = Arc::from(sheet.name());
            for placement in sheet.placements() {
                check_bounds(sheet, u64::from(placement.row), u64::from(placement.col))?;
            }

            let planned = sheet.plan();
            let mut cells = Vec::with_capacity(planned.len());
            for cell in planned {
                let address = check_bounds(sheet, cell.row, cell.col)?;
                if let CellKind::Node(value) = &cell.kind {
                    refs.assign(
                        value,
                        CellLocation::new(Arc::clone(&sheet_name), address.row, address.col),
                    )?;
                }
                cells.push(AddressedCell {
                    row: address.row,
                    col: address.col,
                    kind: cell.kind,
                });
            }
            log::debug!("sheet '{}': {} cells planned", sheet.name(), cells.len());
            plans.push(SheetPlan { sheet, cells });
        }
        Ok((refs, plans))
    }

    fn cell_content(
        &self,
        renderer: &Renderer<'_, ReferenceMap>,
        kind: &CellKind,
    ) -> LayoutResult<(CellContent, CellFormat)> {
        Ok(match kind {
            CellKind::Node(value) => (renderer.render_cell(value)?, value.cell_format()),
            CellKind::Label { text, header } => {
                let format = match (&self.options.header_style, header) {
                    (Some(style), true) => CellFormat::from(style.clone()),
                    _ => CellFormat::default(),
                };
                (CellContent::Literal(Literal::Text(text.clone())), format)
            }
        })
    }
}

fn check_bounds(sheet: &SheetLayout, row: u64, col: u64) -> LayoutResult<CellAddress> {
    CellAddress::checked(row, col).map_err(|_| LayoutError::LayoutOverflow {
        sheet: sheet.name().to_string(),
        row,
        col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use crate::stack::Stack;
    use crate::table::{ParameterTable, Table};
    use gridwright_core::{MemorySink, Style, MAX_ROWS};
    use gridwright_formula::{FormulaError, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cross_sheet_parameter_scenario() {
        let a = Value::new(500_000).parameter();
        let b = &a / 12;

        let mut layout = Layout::new();
        layout.add_sheet(SheetLayout::new("P").with(&a, 0, 0)).unwrap();
        layout.add_sheet(SheetLayout::new("C").with(b, 0, 1)).unwrap();

        let mut sink = MemorySink::new();
        let report = layout.write(&mut sink).unwrap();

        assert_eq!(sink.sheet_names(), vec!["P", "C"]);
        assert_eq!(sink.sheet("C").unwrap().formula("B1"), Some("=P!$A$1/12"));
        assert_eq!(
            sink.sheet("P").unwrap().literal("A1"),
            Some(&Literal::Number(500_000.0))
        );
        assert_eq!(
            report,
            WriteReport {
                sheets: 2,
                cells: 2,
                formulas: 1,
                formats: 0
            }
        );
        assert!(sink.is_closed());
    }

    #[test]
    fn test_duplicate_sheet_names() {
        let mut layout = Layout::new();
        layout.add_sheet(SheetLayout::new("Data")).unwrap();
        let err = layout.add_sheet(SheetLayout::new("data")).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateSheetName(ref n) if n == "data"));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut layout = Layout::new();
        let err = layout.add_sheet(SheetLayout::new("a/b")).unwrap_err();
        assert!(matches!(err, LayoutError::Core(_)));
    }

    #[test]
    fn test_node_placed_twice() {
        let v = Value::new(1);
        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(&v, 0, 0).with(&v, 5, 5))
            .unwrap();
        assert!(matches!(
            layout.resolve(),
            Err(LayoutError::AddressAlreadyAssigned { .. })
        ));
    }

    #[test]
    fn test_restart_is_allowed() {
        let a = Value::new(2);
        let b = &a * 3;
        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(&a, 0, 0).with(&b, 1, 0))
            .unwrap();

        let mut first = MemorySink::new();
        let mut second = MemorySink::new();
        layout.write(&mut first).unwrap();
        layout.write(&mut second).unwrap();
        assert_eq!(
            first.sheet("S").unwrap().formula("A2"),
            second.sheet("S").unwrap().formula("A2")
        );
    }

    #[test]
    fn test_overflow() {
        let s = Series::from_values([1, 2, 3]);
        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(s, MAX_ROWS - 2, 0))
            .unwrap();
        let err = layout.resolve().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::LayoutOverflow { row, .. } if row == u64::from(MAX_ROWS)
        ));

        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(Value::new(1), 0, 20_000))
            .unwrap();
        assert!(matches!(
            layout.resolve(),
            Err(LayoutError::LayoutOverflow { .. })
        ));
    }

    #[test]
    fn test_cycle_between_placed_nodes() {
        let x = Value::deferred();
        let y = &x + 1;
        x.define(&y * 2).unwrap();

        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(&x, 0, 0).with(&y, 0, 1))
            .unwrap();
        let mut sink = MemorySink::new();
        let err = layout.write(&mut sink).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Formula(FormulaError::CyclicReference(_))
        ));
        // nothing was emitted
        assert!(sink.sheets().is_empty());
    }

    #[test]
    fn test_unplaced_reference() {
        let loose = Value::new(3);
        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("S").with(&loose + 1, 0, 0))
            .unwrap();
        let err = layout.write(&mut MemorySink::new()).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Formula(FormulaError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn test_formats_deduplicated_and_headers_styled() {
        let amounts = Series::from_values([1.0, 2.0, 3.0])
            .named("Amount")
            .number_format("#,##0.00");
        let total = amounts.sum().unwrap().number_format("#,##0.00");
        let table = Table::titled("Loans").with_column(amounts).unwrap();

        let mut layout = Layout::new();
        layout
            .add_sheet(
                SheetLayout::new("Data")
                    .with(Stack::vertical().child(table).child(total), 0, 0),
            )
            .unwrap();

        let mut sink = MemorySink::new();
        let report = layout.write(&mut sink).unwrap();
        let data = sink.sheet("Data").unwrap();

        assert_eq!(data.literal("A1"), Some(&Literal::from("Loans")));
        assert_eq!(data.literal("A2"), Some(&Literal::from("Amount")));
        assert_eq!(data.formula("A7"), Some("=SUM(A3:A5)"));
        // bold header + number format
        assert_eq!(report.formats, 2);
        let bold = data.format_at(0, 0).unwrap();
        assert_eq!(data.format_at(1, 0), Some(bold));
        assert_eq!(
            sink.format(bold).map(|f| f.style.clone()),
            Some(Style::new().bold(true))
        );
        assert_eq!(data.format_at(2, 0), data.format_at(6, 0));
    }

    #[test]
    fn test_auto_width() {
        let p = Value::new(0.05).named("Annual interest rate").parameter();
        let params = ParameterTable::new().with(&p);

        let mut layout = Layout::new();
        layout
            .add_sheet(SheetLayout::new("Inputs").with(params, 0, 0))
            .unwrap();
        layout
            .add_sheet(SheetLayout::new("Other").with(Value::new(1), 0, 0).auto_width(false))
            .unwrap();

        let mut sink = MemorySink::new();
        layout.write(&mut sink).unwrap();
        let inputs = sink.sheet("Inputs").unwrap();
        assert_eq!(inputs.column_width(0), Some(21.5));
        assert_eq!(inputs.column_width(1), Some(6.5));
        assert_eq!(inputs.column_width(2), Some(5.5));
        assert!(sink.sheet("Other").unwrap().column_widths().is_empty());

        let mut layout = Layout::with_options(LayoutOptions::new().auto_width(false));
        layout
            .add_sheet(SheetLayout::new("Inputs").with(Value::new(1), 0, 0))
            .unwrap();
        let mut sink = MemorySink::new();
        layout.write(&mut sink).unwrap();
        assert!(sink.sheet("Inputs").unwrap().column_widths().is_empty());
    }
}
