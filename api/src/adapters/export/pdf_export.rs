//! PDF exporter
//!
//! Builds a PDF 1.4 document with lopdf using the built-in Helvetica font:
//! the report title and period on the first page, then one `metric: value`
//! line per row, paginated at `LINES_PER_PAGE`. Text outside printable ASCII
//! is replaced with `?`.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::{format_value, ArtifactStore};
use crate::domain::entities::{ReportArtifact, ReportDocument, ReportFormat};
use crate::domain::ports::ReportExporter;
use crate::error::ExportError;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 50;
const LINE_HEIGHT: i64 = 14;
const LINES_PER_PAGE: usize = 45;

pub struct PdfExporter {
    store: ArtifactStore,
}

impl PdfExporter {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    fn encode(document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for content in page_contents(document) {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = add_page(&mut doc, pages_id, content_id);
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn add_page(doc: &mut Document, pages_id: ObjectId, content_id: ObjectId) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    })
}

/// One content stream per page; an empty dataset still yields a page
fn page_contents(document: &ReportDocument) -> Vec<Content> {
    let lines: Vec<String> = document
        .rows
        .iter()
        .map(|row| format!("{}: {}", row.metric, format_value(row.value)))
        .collect();

    let mut chunks: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(page, chunk)| {
            let mut operations = vec![Operation::new("BT", vec![])];
            let mut y = PAGE_HEIGHT - MARGIN;

            if page == 0 {
                operations.extend(text_line(16, y, document.title()));
                y -= 24;
                let period = format!(
                    "Period: {} to {}",
                    document.period.start.format("%Y-%m-%d"),
                    document.period.end.format("%Y-%m-%d")
                );
                operations.extend(text_line(10, y, &period));
                y -= LINE_HEIGHT;
                let generated = format!(
                    "Generated: {}",
                    document.generated_at.format("%Y-%m-%d %H:%M UTC")
                );
                operations.extend(text_line(10, y, &generated));
                y -= 2 * LINE_HEIGHT;
            }

            for line in chunk {
                operations.extend(text_line(11, y, line));
                y -= LINE_HEIGHT;
            }

            operations.push(Operation::new("ET", vec![]));
            Content { operations }
        })
        .collect()
}

fn text_line(size: i64, y: i64, text: &str) -> [Operation; 3] {
    [
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                MARGIN.into(),
                y.into(),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(printable(text))]),
    ]
}

/// Helvetica without an embedded font covers printable ASCII only
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

#[async_trait]
impl ReportExporter for PdfExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    async fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError> {
        let bytes = Self::encode(document)?;
        self.store
            .persist(document.report_type, ReportFormat::Pdf, bytes)
            .await
    }
}
