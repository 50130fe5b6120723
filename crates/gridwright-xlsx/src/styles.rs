//! styles.xml generation

use std::collections::HashMap;

use gridwright_core::{CellFormat, Color};
use quick_xml::escape::escape;

/// First id available for custom number formats
const FIRST_CUSTOM_NUMFMT: u32 = 164;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Font {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

#[derive(Debug, Clone, Copy)]
struct Xf {
    num_fmt_id: u32,
    font_id: u32,
    fill_id: u32,
}

/// Component tables for every format created through the sink.
///
/// The sink's format handle `n` maps to cellXfs index `n + 1`; index 0 is
/// the default format.
#[derive(Debug)]
pub(crate) struct StyleTable {
    fonts: Vec<Font>,
    /// Solid fill colors; fill ids are offset by the two mandatory fills
    fills: Vec<Color>,
    num_fmts: Vec<(u32, String)>,
    xfs: Vec<Xf>,
}

impl StyleTable {
    pub(crate) fn build(formats: &[CellFormat]) -> Self {
        let mut fonts = vec![Font {
            bold: false,
            italic: false,
            color: None,
        }];
        let mut font_ids: HashMap<Font, u32> = HashMap::new();
        font_ids.insert(fonts[0].clone(), 0);

        let mut fills: Vec<Color> = Vec::new();
        let mut fill_ids: HashMap<Color, u32> = HashMap::new();

        let mut num_fmts: Vec<(u32, String)> = Vec::new();
        let mut num_fmt_ids: HashMap<String, u32> = HashMap::new();

        let mut xfs = vec![Xf {
            num_fmt_id: 0,
            font_id: 0,
            fill_id: 0,
        }];

        for format in formats {
            let font = Font {
                bold: format.style.bold,
                italic: format.style.italic,
                color: format.style.font_color,
            };
            let font_id = match font_ids.get(&font) {
                Some(&id) => id,
                None => {
                    let id = fonts.len() as u32;
                    fonts.push(font.clone());
                    font_ids.insert(font, id);
                    id
                }
            };

            let fill_id = match format.style.fill_color {
                None => 0,
                Some(color) => *fill_ids.entry(color).or_insert_with(|| {
                    fills.push(color);
                    fills.len() as u32 + 1
                }),
            };

            let num_fmt_id = match &format.number_format {
                None => 0,
                Some(code) => match num_fmt_ids.get(code) {
                    Some(&id) => id,
                    None => {
                        let id = FIRST_CUSTOM_NUMFMT + num_fmts.len() as u32;
                        num_fmts.push((id, code.clone()));
                        num_fmt_ids.insert(code.clone(), id);
                        id
                    }
                },
            };

            xfs.push(Xf {
                num_fmt_id,
                font_id,
                fill_id,
            });
        }

        Self {
            fonts,
            fills,
            num_fmts,
            xfs,
        }
    }

    /// Number of cellXfs entries, including the default
    pub(crate) fn len(&self) -> usize {
        self.xfs.len()
    }

    /// cellXfs index for a sink format handle
    pub(crate) fn xf_id(format: Option<u32>) -> u32 {
        format.map_or(0, |handle| handle + 1)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.num_fmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", self.num_fmts.len()));
            for (id, code) in &self.num_fmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape(code.as_str())
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", self.fonts.len()));
        for font in &self.fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        // Excel requires the first two fills to be none and gray125
        xml.push_str(&format!("\n  <fills count=\"{}\">", self.fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &self.fills {
            xml.push_str(&format!(
                "\n    <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                color.to_argb_hex()
            ));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(
            r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.xfs.len()));
        for xf in &self.xfs {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(xf));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn write_font(font: &Font) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    s.push_str("<sz val=\"11\"/>");
    if let Some(color) = &font.color {
        s.push_str(&format!("<color rgb=\"{}\"/>", color.to_argb_hex()));
    }
    s.push_str("<name val=\"Calibri\"/><family val=\"2\"/></font>");
    s
}

fn write_xf(xf: &Xf) -> String {
    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"",
        xf.num_fmt_id, xf.font_id, xf.fill_id
    );
    if xf.num_fmt_id != 0 {
        s.push_str(" applyNumberFormat=\"1\"");
    }
    if xf.font_id != 0 {
        s.push_str(" applyFont=\"1\"");
    }
    if xf.fill_id != 0 {
        s.push_str(" applyFill=\"1\"");
    }
    s.push_str("/>");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwright_core::Style;

    #[test]
    fn test_components_are_shared() {
        let bold = Style::new().bold(true);
        let formats = vec![
            CellFormat::new(Some(&bold), None),
            CellFormat::new(Some(&bold), Some("0.00%")),
            CellFormat::new(None, Some("0.00%")),
            CellFormat::new(Some(&Style::new().fill_color(Color::YELLOW)), Some("#,##0")),
        ];
        let table = StyleTable::build(&formats);
        assert_eq!(table.len(), 5);
        assert_eq!(table.fonts.len(), 2);
        assert_eq!(table.fills.len(), 1);
        assert_eq!(
            table.num_fmts,
            vec![(164, "0.00%".to_string()), (165, "#,##0".to_string())]
        );
        assert_eq!(table.xfs[2].font_id, 1);
        assert_eq!(table.xfs[3].font_id, 0);
        assert_eq!(table.xfs[4].fill_id, 2);
    }

    #[test]
    fn test_styles_xml() {
        let formats = vec![CellFormat::new(
            Some(&Style::new().italic(true).font_color(Color::RED)),
            Some("\"$\"#,##0"),
        )];
        let xml = StyleTable::build(&formats).to_styles_xml();
        assert!(xml.contains("<numFmt numFmtId=\"164\" formatCode=\"&quot;$&quot;#,##0\"/>"));
        assert!(xml.contains("<font><i/><sz val=\"11\"/><color rgb=\"FFFF0000\"/>"));
        assert!(xml.contains("<cellXfs count=\"2\">"));
        assert!(xml.contains(
            "<xf numFmtId=\"164\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyNumberFormat=\"1\" applyFont=\"1\"/>"
        ));
    }

    #[test]
    fn test_xf_id() {
        assert_eq!(StyleTable::xf_id(None), 0);
        assert_eq!(StyleTable::xf_id(Some(0)), 1);
    }
}
