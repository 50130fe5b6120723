//! OOXML package writer

use std::io::{Seek, Write};

use gridwright_core::{CellAddress, CellRange, Literal};
use quick_xml::escape::escape;

use crate::error::XlsxResult;
use crate::options::XlsxOptions;
use crate::sink::{BufferedCell, BufferedSheet, CellData};
use crate::styles::StyleTable;

/// Writes buffered sheets as a zip package
pub(crate) struct PackageWriter<'a> {
    sheets: &'a [BufferedSheet],
    styles: &'a StyleTable,
    options: &'a XlsxOptions,
}

impl<'a> PackageWriter<'a> {
    pub(crate) fn new(
        sheets: &'a [BufferedSheet],
        styles: &'a StyleTable,
        options: &'a XlsxOptions,
    ) -> Self {
        Self {
            sheets,
            styles,
            options,
        }
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        self.write_content_types(&mut zip)?;
        self.write_root_rels(&mut zip)?;
        self.write_workbook_xml(&mut zip)?;
        self.write_workbook_rels(&mut zip)?;
        self.write_styles_xml(&mut zip)?;
        for (i, sheet) in self.sheets.iter().enumerate() {
            self.write_worksheet(&mut zip, i, sheet)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn start_file<W: Write + Seek>(
        &self,
        zip: &mut zip::ZipWriter<W>,
        name: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(self.options.compression_method());
        zip.start_file(name, options)?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(&self, zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        self.start_file(zip, "[Content_Types].xml")?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );
        for i in 0..self.sheets.len() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }
        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(&self, zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        self.start_file(zip, "_rels/.rels")?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(&self, zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        self.start_file(zip, "xl/workbook.xml")?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );
        for (i, sheet) in self.sheets.iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name.as_str()),
                i + 1,
                i + 1
            ));
        }
        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(&self, zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        self.start_file(zip, "xl/_rels/workbook.xml.rels")?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for i in 0..self.sheets.len() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            self.sheets.len() + 1
        ));

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(&self, zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        self.start_file(zip, "xl/styles.xml")?;
        zip.write_all(self.styles.to_styles_xml().as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        &self,
        zip: &mut zip::ZipWriter<W>,
        index: usize,
        sheet: &BufferedSheet,
    ) -> XlsxResult<()> {
        self.start_file(zip, &format!("xl/worksheets/sheet{}.xml", index + 1))?;
        let content = worksheet_xml(sheet, self.options);
        log::trace!(
            "sheet '{}': {} buffered cells, {} column widths",
            sheet.name,
            sheet.cells.len(),
            sheet.column_widths.len()
        );
        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn worksheet_xml(sheet: &BufferedSheet, options: &XlsxOptions) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if let Some(range) = used_range(sheet) {
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
    }

    if let Some(width) = options.default_column_width {
        content.push_str(&format!(
            "\n    <sheetFormatPr defaultColWidth=\"{}\" defaultRowHeight=\"15\"/>",
            width
        ));
    }

    if !sheet.column_widths.is_empty() {
        content.push_str("\n    <cols>");
        for (&col, &width) in &sheet.column_widths {
            // <col> bounds are 1-based
            content.push_str(&format!(
                "\n        <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>",
                u32::from(col) + 1,
                width
            ));
        }
        content.push_str("\n    </cols>");
    }

    content.push_str("\n    <sheetData>");
    let mut current_row: Option<u32> = None;
    for (&(row, col), cell) in &sheet.cells {
        let Some(xml) = cell_xml(row, col, cell) else {
            continue;
        };
        if current_row != Some(row) {
            if current_row.is_some() {
                content.push_str("\n        </row>");
            }
            content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
            current_row = Some(row);
        }
        content.push_str("\n            ");
        content.push_str(&xml);
    }
    if current_row.is_some() {
        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>\n</worksheet>");
    content
}

/// `<c>` element for one cell, or `None` for an unstyled empty cell
fn cell_xml(row: u32, col: u16, cell: &BufferedCell) -> Option<String> {
    let cell_ref = CellAddress::new(row, col).to_a1_string();
    let xf_id = StyleTable::xf_id(cell.format);
    let style_attr = if xf_id != 0 {
        format!(" s=\"{}\"", xf_id)
    } else {
        String::new()
    };

    let xml = match &cell.data {
        CellData::Formula(text) => format!(
            "<c r=\"{}\"{}><f>{}</f></c>",
            cell_ref,
            style_attr,
            escape(text.as_str())
        ),
        CellData::Literal(Literal::Empty) => {
            if xf_id == 0 {
                return None;
            }
            format!("<c r=\"{}\"{}/>", cell_ref, style_attr)
        }
        CellData::Literal(Literal::Number(n)) if !n.is_finite() => {
            format!("<c r=\"{}\"{} t=\"e\"><v>#NUM!</v></c>", cell_ref, style_attr)
        }
        CellData::Literal(Literal::Number(n)) => {
            format!("<c r=\"{}\"{}><v>{}</v></c>", cell_ref, style_attr, n)
        }
        CellData::Literal(Literal::Bool(b)) => format!(
            "<c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
            cell_ref,
            style_attr,
            u8::from(*b)
        ),
        CellData::Literal(Literal::Text(s)) => {
            let space = if s.trim() != s {
                " xml:space=\"preserve\""
            } else {
                ""
            };
            format!(
                "<c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                cell_ref,
                style_attr,
                space,
                escape(s.as_str())
            )
        }
    };
    Some(xml)
}

fn used_range(sheet: &BufferedSheet) -> Option<CellRange> {
    let mut positions = sheet.cells.keys();
    let &(first_row, first_col) = positions.next()?;
    let (mut min_col, mut max_col, mut max_row) = (first_col, first_col, first_row);
    for &(row, col) in positions {
        min_col = min_col.min(col);
        max_col = max_col.max(col);
        max_row = max_row.max(row);
    }
    Some(CellRange::new(
        CellAddress::new(first_row, min_col),
        CellAddress::new(max_row, max_col),
    ))
}
