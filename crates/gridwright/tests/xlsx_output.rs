//! Layouts saved as .xlsx files

use std::io::{Cursor, Read};

use gridwright::prelude::*;
use gridwright::save;
use pretty_assertions::assert_eq;

fn read_part(path: &std::path::Path, name: &str) -> String {
    let bytes = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}

fn mortgage_layout() -> Layout {
    let principal = Value::new(500_000.0)
        .named("Principal")
        .unit("$")
        .number_format("#,##0")
        .parameter();
    let rate = Value::new(0.06).named("Rate").unit("%").parameter();
    let monthly = (&principal * &rate / 12).named("Monthly interest");

    let mut layout = Layout::new();
    layout
        .add_sheet(SheetLayout::new("P").with(
            ParameterTable::new().with(&principal).with(&rate),
            0,
            0,
        ))
        .unwrap();
    layout
        .add_sheet(SheetLayout::new("C").with(&monthly, 0, 1))
        .unwrap();
    layout
}

#[test]
fn test_save_writes_formulas_and_styles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mortgage.xlsx");
    let report = save(&mortgage_layout(), &path).unwrap();

    // headers (3) + names (2) + values (2) + units (2) + formula
    assert_eq!(report.cells, 10);
    assert_eq!(report.formulas, 1);

    let workbook = read_part(&path, "xl/workbook.xml");
    assert!(workbook.find("name=\"P\"").unwrap() < workbook.find("name=\"C\"").unwrap());

    let calc = read_part(&path, "xl/worksheets/sheet2.xml");
    assert!(calc.contains("<c r=\"B1\"><f>P!$B$2*P!$B$3/12</f></c>"));

    let params = read_part(&path, "xl/worksheets/sheet1.xml");
    assert!(params.contains("<c r=\"B2\" s=\"2\"><v>500000</v></c>"));
    assert!(params.contains("<cols>"));

    let styles = read_part(&path, "xl/styles.xml");
    assert!(styles.contains("formatCode=\"#,##0\""));
    assert!(styles.contains("<cellXfs count=\"3\">"));
}

#[test]
fn test_layout_ext_and_free_save_agree() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.xlsx");
    let b = dir.path().join("b.xlsx");
    let layout = mortgage_layout();

    let first = layout.save(&a).unwrap();
    let second = save(&layout, &b).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        read_part(&a, "xl/worksheets/sheet1.xml"),
        read_part(&b, "xl/worksheets/sheet1.xml")
    );
}

#[test]
fn test_write_into_buffer() {
    let mut sink = XlsxSink::with_options(
        Cursor::new(Vec::new()),
        XlsxOptions::new().compress(false).default_column_width(10.0),
    );
    let report = mortgage_layout().write(&mut sink).unwrap();
    assert_eq!(report.sheets, 2);
    assert!(sink.is_closed());
    assert!(!sink.into_inner().into_inner().is_empty());
}
