//! Report exporter port
//!
//! All exporters share one contract: a flattened `{metric, value}` dataset
//! in, a file artifact out. Each call owns its own writer.

use async_trait::async_trait;

use crate::domain::entities::{ReportArtifact, ReportDocument, ReportFormat};
use crate::error::ExportError;

#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// The format this exporter produces
    fn format(&self) -> ReportFormat;

    /// Render the document and persist it, returning a stable reference
    async fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError>;
}
