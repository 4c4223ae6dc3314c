//! Delimited-text exporter

use async_trait::async_trait;

use super::{format_value, ArtifactStore};
use crate::domain::entities::{ReportArtifact, ReportDocument, ReportFormat};
use crate::domain::ports::ReportExporter;
use crate::error::ExportError;

pub struct CsvExporter {
    store: ArtifactStore,
}

impl CsvExporter {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    fn encode(document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(["Metric", "Value"])?;
        for row in &document.rows {
            writer.write_record([row.metric.as_str(), format_value(row.value).as_str()])?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}

#[async_trait]
impl ReportExporter for CsvExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    async fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError> {
        let bytes = Self::encode(document)?;
        self.store
            .persist(document.report_type, ReportFormat::Csv, bytes)
            .await
    }
}
