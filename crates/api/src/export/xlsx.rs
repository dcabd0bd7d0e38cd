//! Minimal XLSX workbook writer.
//!
//! An `.xlsx` file is a zip container of OOXML parts. The report endpoints
//! only need one sheet with a header row, text/number cells, and column
//! widths, so this writer emits exactly those parts and nothing more.
//! Strings are stored inline (`t="inlineStr"`) to avoid a shared-strings
//! table.

use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;

#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One cell of a data row.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

/// A column definition: header text plus display width in characters.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub width: u32,
}

/// Build a single-sheet workbook and return the finished file bytes.
pub fn build_workbook(
    sheet_name: &str,
    columns: &[Column],
    rows: &[Vec<Cell>],
) -> Result<Vec<u8>, XlsxError> {
    let mut buff = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buff);
        let mut zip = zip::ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(workbook_xml(sheet_name).as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(WORKBOOK_RELS.as_bytes())?;

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(STYLES.as_bytes())?;

        zip.start_file("xl/worksheets/sheet1.xml", options)?;
        zip.write_all(sheet_xml(columns, rows).as_bytes())?;

        zip.finish()?;
    }
    Ok(buff)
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf/></cellStyleXfs><cellXfs count="1"><xf xfId="0"/></cellXfs></styleSheet>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    )
}

fn sheet_xml(columns: &[Column], rows: &[Vec<Cell>]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cols>"#,
    );

    for (i, col) in columns.iter().enumerate() {
        let idx = i + 1;
        out.push_str(&format!(
            r#"<col min="{idx}" max="{idx}" width="{}" customWidth="1"/>"#,
            col.width
        ));
    }
    out.push_str("</cols><sheetData>");

    // Header row.
    out.push_str("<row>");
    for col in columns {
        push_text_cell(&mut out, col.header);
    }
    out.push_str("</row>");

    for row in rows {
        out.push_str("<row>");
        for cell in row {
            match cell {
                Cell::Text(s) => push_text_cell(&mut out, s),
                Cell::Int(n) => out.push_str(&format!("<c><v>{n}</v></c>")),
                Cell::Float(f) => out.push_str(&format!("<c><v>{f}</v></c>")),
            }
        }
        out.push_str("</row>");
    }

    out.push_str("</sheetData></worksheet>");
    out
}

fn push_text_cell(out: &mut String, text: &str) {
    out.push_str(r#"<c t="inlineStr"><is><t>"#);
    out.push_str(&escape_xml(text));
    out.push_str("</t></is></c>");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column { header: "Name", width: 20 },
            Column { header: "Count", width: 10 },
        ]
    }

    #[test]
    fn produces_a_zip_container() {
        let bytes = build_workbook("Sheet1", &columns(), &[]).unwrap();
        // Local file header magic of the zip format.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn sheet_contains_header_and_rows() {
        let rows = vec![vec![Cell::Text("Yoga & Pilates".into()), Cell::Int(7)]];
        let bytes = build_workbook("Clients", &columns(), &rows).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();

        assert!(sheet.contains("<t>Name</t>"));
        // XML-escaped text cell plus the numeric cell.
        assert!(sheet.contains("Yoga &amp; Pilates"));
        assert!(sheet.contains("<c><v>7</v></c>"));
    }

    #[test]
    fn workbook_lists_all_required_parts() {
        let bytes = build_workbook("Sheet1", &columns(), &[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing part {part}");
        }
    }
}
