//! End-to-end tests for the layout -> write -> auto-width pipeline

use gridwright::prelude::*;
use gridwright::{Literal, MemoryCell, Payload};
use pretty_assertions::assert_eq;

fn write(layout: &Layout) -> MemorySink {
    let mut sink = MemorySink::new();
    layout.write(&mut sink).unwrap();
    sink
}

/// Parameter on one sheet, derived value on another
#[test]
fn test_parameter_scenario() {
    let a = Value::new(500_000.0).parameter();
    let b = &a / 12;

    let mut layout = Layout::new();
    layout.add_sheet(SheetLayout::new("P").with(&a, 0, 0)).unwrap();
    layout.add_sheet(SheetLayout::new("C").with(&b, 0, 1)).unwrap();

    let sink = write(&layout);
    assert_eq!(sink.sheet_names(), vec!["P", "C"]);
    assert_eq!(sink.sheet("C").unwrap().formula("B1"), Some("=P!$A$1/12"));
}

/// Every placed node of an acyclic graph gets a non-empty cell
#[test]
fn test_every_placed_node_renders() {
    let x = Value::new(3);
    let y = Value::new(4);
    let hyp = (&x * &x + &y * &y).pow(0.5);
    let label = Value::new("hypotenuse");
    let total = functions::sum([&x, &y, &hyp]).unwrap();
    let check = functions::if_(hyp.equals(5), true, false);

    let mut layout = Layout::new();
    layout
        .add_sheet(
            SheetLayout::new("Geometry").with(
                Stack::vertical()
                    .spacing(0)
                    .child(&x)
                    .child(&y)
                    .child(&hyp)
                    .child(&label)
                    .child(&total)
                    .child(&check),
                0,
                0,
            ),
        )
        .unwrap();

    let sink = write(&layout);
    let sheet = sink.sheet("Geometry").unwrap();
    assert_eq!(sheet.cell_count(), 6);
    for (_, cell) in sheet.cells() {
        let text = match cell {
            MemoryCell::Formula(f) => f.clone(),
            MemoryCell::Literal(l) => l.display_text(),
        };
        assert!(!text.is_empty());
    }
    assert_eq!(sheet.formula("A3"), Some("=(A1*A1+A2*A2)^0.5"));
    assert_eq!(sheet.formula("A5"), Some("=SUM(A1,A2,A3)"));
    assert_eq!(sheet.formula("A6"), Some("=IF(A3=5,TRUE,FALSE)"));
}

/// Rendering the same graph twice yields identical documents
#[test]
fn test_writes_are_repeatable() {
    let base = Value::new(10).parameter();
    let series = Series::from_values([1, 2, 3]).named("Units");
    let scaled = series.map_scalar(BinaryOperator::Multiply, &base).named("Scaled");
    let table = Table::new()
        .with_column(series)
        .unwrap()
        .with_column(scaled)
        .unwrap();

    let mut layout = Layout::new();
    layout
        .add_sheet(SheetLayout::new("S").with(&base, 0, 0).with(table, 2, 0))
        .unwrap();

    let first = write(&layout);
    let second = write(&layout);
    let cells = |sink: &MemorySink| -> Vec<((u32, u16), MemoryCell)> {
        sink.sheets()[0]
            .cells()
            .map(|(pos, cell)| (pos, cell.clone()))
            .collect()
    };
    assert_eq!(cells(&first), cells(&second));
    assert_eq!(first.sheet("S").unwrap().formula("B4"), Some("=A4*$A$1"));
}

/// A series element mirrors the node it was built from
#[test]
fn test_series_of_nodes() {
    let rent = Value::new(1200).named("Rent");
    let mut costs = Series::new().named("Costs");
    costs.insert("rent", &rent);
    costs.insert("food", 400);
    let total = costs.sum().unwrap();

    let mut layout = Layout::new();
    layout
        .add_sheet(
            SheetLayout::new("Budget")
                .with(costs, 0, 0)
                .with(&total, 3, 0),
        )
        .unwrap();

    let sink = write(&layout);
    let sheet = sink.sheet("Budget").unwrap();
    // rent itself is never placed, so its mirror holds the constant
    assert_eq!(sheet.literal("A1"), Some(&Literal::Number(1200.0)));
    assert_eq!(sheet.literal("A2"), Some(&Literal::Number(400.0)));
    assert_eq!(sheet.formula("A4"), Some("=SUM(A1:A2)"));
    assert!(matches!(total.payload(), Some(Payload::Formula(_))));
}

/// Mirrors of placed nodes become plain references
#[test]
fn test_mirror_of_placed_node() {
    let rate = Value::new(0.05).parameter();
    let mirror = Value::reference(&rate);

    let mut layout = Layout::new();
    layout
        .add_sheet(SheetLayout::new("Inputs").with(&rate, 0, 0))
        .unwrap();
    layout
        .add_sheet(SheetLayout::new("Report").with(&mirror, 4, 2))
        .unwrap();

    let sink = write(&layout);
    assert_eq!(
        sink.sheet("Report").unwrap().formula("C5"),
        Some("=Inputs!$A$1")
    );
}

/// Titles and headers are styled once; widths follow the widest cell
#[test]
fn test_headers_formats_and_widths() {
    let amounts = Series::from_values([1.5, 22.25, 333.125])
        .named("Amount")
        .number_format("0.00");
    let total = amounts
        .sum()
        .unwrap()
        .style(Style::new().bold(true).italic(true));

    let mut layout = Layout::new();
    layout
        .add_sheet(
            SheetLayout::new("Ledger")
                .with(Table::titled("Ledger entries").with_column(amounts).unwrap(), 0, 0)
                .with(&total, 6, 0),
        )
        .unwrap();

    let mut sink = MemorySink::new();
    let report = layout.write(&mut sink).unwrap();
    let sheet = sink.sheet("Ledger").unwrap();

    assert_eq!(report.cells, 6);
    assert_eq!(report.formulas, 1);
    // bold headers, "0.00" data, bold italic total
    assert_eq!(report.formats, 3);
    assert_eq!(sheet.format_at(0, 0), sheet.format_at(1, 0));
    assert_ne!(sheet.format_at(2, 0), sheet.format_at(0, 0));
    assert_eq!(sheet.formula("A7"), Some("=SUM(A3:A5)"));

    // "Ledger entries" is the widest text: 14 chars + padding
    assert_eq!(sheet.column_width(0), Some(15.5));
}

/// Auto-width can be switched off globally
#[test]
fn test_auto_width_disabled() {
    let mut layout = Layout::with_options(LayoutOptions::default().auto_width(false));
    layout
        .add_sheet(SheetLayout::new("S").with(Value::new("wide text here"), 0, 0))
        .unwrap();
    let sink = write(&layout);
    assert!(sink.sheet("S").unwrap().column_widths().is_empty());
}

/// Horizontal stacks place children side by side
#[test]
fn test_horizontal_stack_placement() {
    let left = Series::from_values([1, 2, 3]);
    let right = Series::from_values([4, 5]);
    let stack = Stack::horizontal().spacing(2).padding(1).child(left).child(right);

    let mut layout = Layout::new();
    layout.add_sheet(SheetLayout::new("S").with(stack, 0, 0)).unwrap();
    let sink = write(&layout);
    let sheet = sink.sheet("S").unwrap();

    assert_eq!(sheet.literal("B2"), Some(&Literal::Number(1.0)));
    assert_eq!(sheet.literal("B4"), Some(&Literal::Number(3.0)));
    // one column for the first child, then two columns of spacing
    assert_eq!(sheet.literal("E2"), Some(&Literal::Number(4.0)));
    assert_eq!(sheet.literal("E3"), Some(&Literal::Number(5.0)));
}

/// A running total whose final figure is placed above the values it depends on
#[test]
fn test_long_chain_with_summary_first() {
    let mut chain = vec![Value::new(0)];
    for i in 1..20_000 {
        let next = &chain[i - 1] + 1;
        chain.push(next);
    }

    let last = chain.len() - 1;
    let mut sheet = SheetLayout::new("S").with(&chain[last], 0, 1);
    for (row, value) in chain[..last].iter().enumerate() {
        sheet = sheet.with(value, row as u32 + 1, 0);
    }
    let mut layout = Layout::new();
    layout.add_sheet(sheet).unwrap();

    let sink = write(&layout);
    let sheet = sink.sheet("S").unwrap();
    assert_eq!(sheet.formula("B1"), Some("=A20000+1"));
    assert_eq!(sheet.formula("A3"), Some("=A2+1"));
    assert_eq!(sheet.literal("A1"), None);
    assert_eq!(sheet.literal("A2"), Some(&Literal::Number(0.0)));
}
