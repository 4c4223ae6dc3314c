//! File exporters
//!
//! Every exporter renders a [`ReportDocument`] into an in-memory buffer it
//! owns, then hands the bytes to the shared [`ArtifactStore`], which names the
//! file, writes it under the reports directory and builds its public URL.

pub mod csv_export;
pub mod excel_export;
pub mod pdf_export;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{ReportArtifact, ReportFormat, ReportType};
use crate::domain::ports::ReportExporter;
use crate::error::ExportError;

pub use csv_export::CsvExporter;
pub use excel_export::ExcelExporter;
pub use pdf_export::PdfExporter;

/// Where rendered reports land and how they are addressed
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    base_url: String,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            dir: dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `<type>_report_<timestamp>_<suffix>.<ext>`, unique per call
    pub fn filename(&self, report_type: ReportType, format: ReportFormat) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}_report_{}_{}.{}",
            report_type,
            Utc::now().format("%Y%m%d%H%M%S%3f"),
            &suffix[..8],
            format.extension()
        )
    }

    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }

    /// Write the rendered bytes, creating the directory if needed
    pub async fn persist(
        &self,
        report_type: ReportType,
        format: ReportFormat,
        bytes: Vec<u8>,
    ) -> Result<ReportArtifact, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = self.filename(report_type, format);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), "Wrote report file");

        Ok(ReportArtifact {
            url: self.url_for(&filename),
            filename,
            format,
            path,
        })
    }
}

/// The three built-in exporters, sharing one store
pub fn file_exporters(store: ArtifactStore) -> Vec<Arc<dyn ReportExporter>> {
    vec![
        Arc::new(PdfExporter::new(store.clone())),
        Arc::new(ExcelExporter::new(store.clone())),
        Arc::new(CsvExporter::new(store)),
    ]
}

/// Whole numbers print bare, everything else with two decimals
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
