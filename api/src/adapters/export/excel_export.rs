//! Spreadsheet exporter
//!
//! Writes a minimal Office Open XML workbook: one `Report` sheet with a title
//! row, a `Metric | Value` header and one row per metric. Text cells are
//! inline strings, so no shared-string table is needed.

use std::io::Write;

use async_trait::async_trait;
use zip::write::{FileOptions, ZipWriter};

use super::ArtifactStore;
use crate::domain::entities::{ReportArtifact, ReportDocument, ReportFormat};
use crate::domain::ports::ReportExporter;
use crate::error::ExportError;

const SHEET_NAME: &str = "Report";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub struct ExcelExporter {
    store: ArtifactStore,
}

impl ExcelExporter {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    fn encode(document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file::<_, ()>("_rels/.rels", FileOptions::default())?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file::<_, ()>("xl/workbook.xml", FileOptions::default())?;
        zip.write_all(workbook_xml().as_bytes())?;

        zip.start_file::<_, ()>("xl/_rels/workbook.xml.rels", FileOptions::default())?;
        zip.write_all(WORKBOOK_RELS.as_bytes())?;

        zip.start_file::<_, ()>("xl/worksheets/sheet1.xml", FileOptions::default())?;
        zip.write_all(sheet_xml(document)?.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    )
}

/// Numeric cells must hold finite numbers
fn sheet_xml(document: &ReportDocument) -> Result<String, ExportError> {
    let mut rows = String::new();
    rows.push_str(&format!(
        r#"<row r="1">{}</row>"#,
        text_cell("A1", document.title())
    ));
    rows.push_str(&format!(
        r#"<row r="2">{}{}</row>"#,
        text_cell("A2", "Metric"),
        text_cell("B2", "Value")
    ));
    for (i, metric) in document.rows.iter().enumerate() {
        if !metric.value.is_finite() {
            return Err(ExportError::Render(format!(
                "metric '{}' has non-finite value {}",
                metric.metric, metric.value
            )));
        }
        let r = i + 3;
        rows.push_str(&format!(
            r#"<row r="{r}">{}<c r="B{r}"><v>{}</v></c></row>"#,
            text_cell(&format!("A{}", r), &metric.metric),
            metric.value,
        ));
    }

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    ))
}

fn text_cell(reference: &str, text: &str) -> String {
    format!(
        r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
        reference,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl ReportExporter for ExcelExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Excel
    }

    async fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError> {
        let bytes = Self::encode(document)?;
        self.store
            .persist(document.report_type, ReportFormat::Excel, bytes)
            .await
    }
}
