//! Report orchestration: record in, `.xlsx` bytes out.

use crate::assembler::DocumentAssembler;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::layout;
use chrono::{DateTime, FixedOffset, Local};
use cl_chart::{ChartEngine, ChartId, ChartRenderer, ChartSpecBuilder, SvgChartEngine};
use cl_common::ExperimentRecord;
use cl_math::DerivedMetrics;
use cl_workbook::{WorkbookSerializer, XlsxSerializer};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// A finished report.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    /// Suggested file name, e.g. `Elastic_Collision_Report_2026-10-16_9h5m.xlsx`.
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`.
    pub sha256: String,
    pub generated_at: DateTime<FixedOffset>,
    pub sheet_count: usize,
    pub image_count: usize,
    /// Charts left out of the report, in catalogue order.
    pub skipped_charts: Vec<ChartId>,
}

impl ReportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the workbook into `dir` under [`file_name`](Self::file_name).
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "report written");
        Ok(path)
    }
}

/// File name for a report generated at `at` (local wall-clock time).
pub fn report_file_name(at: &DateTime<FixedOffset>) -> String {
    format!(
        "Elastic_Collision_Report_{}.xlsx",
        at.format("%Y-%m-%d_%-Hh%-Mm")
    )
}

/// Turns an experiment record into a styled workbook.
///
/// Holds no per-run state; one generator may serve many runs concurrently.
pub struct ReportGenerator<E, S> {
    config: ReportConfig,
    renderer: Option<ChartRenderer<E>>,
    serializer: Option<S>,
}

impl ReportGenerator<SvgChartEngine, XlsxSerializer> {
    /// Generator wired to the bundled chart engine and xlsx writer.
    pub fn standard(config: ReportConfig) -> Self {
        Self::new(config)
            .with_chart_engine(SvgChartEngine::new())
            .with_serializer(XlsxSerializer)
    }
}

impl<E: ChartEngine, S: WorkbookSerializer> ReportGenerator<E, S> {
    /// Create a generator with no collaborators attached.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            renderer: None,
            serializer: None,
        }
    }

    /// Attach the chart engine, bounded by the configured render timeout.
    pub fn with_chart_engine(mut self, engine: E) -> Self {
        self.renderer = Some(
            ChartRenderer::new(engine, self.config.render.timeout())
                .with_concurrency(self.config.render.concurrent),
        );
        self
    }

    pub fn with_serializer(mut self, serializer: S) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate a report stamped with the current local time.
    pub async fn generate(&self, record: Option<&ExperimentRecord>) -> Result<ReportArtifact> {
        self.generate_at(record, Local::now().fixed_offset()).await
    }

    /// Generate a report from a JSON record. Blank input and `null` count
    /// as a missing record.
    pub async fn generate_from_json(&self, json: &str) -> Result<ReportArtifact> {
        if json.trim().is_empty() {
            return Err(ReportError::MissingInput);
        }
        let record: Option<ExperimentRecord> = serde_json::from_str(json)?;
        self.generate(record.as_ref()).await
    }

    /// Generate a report stamped with `generated_at`.
    ///
    /// Each stage runs only when the previous one succeeded; the first
    /// failure ends the run without producing any bytes.
    pub async fn generate_at(
        &self,
        record: Option<&ExperimentRecord>,
        generated_at: DateTime<FixedOffset>,
    ) -> Result<ReportArtifact> {
        let started = Instant::now();

        let record = record.ok_or(ReportError::MissingInput)?;
        let renderer = self
            .renderer
            .as_ref()
            .filter(|r| r.is_available())
            .ok_or_else(|| ReportError::MissingCollaborator("chart engine".to_string()))?;
        let serializer = self
            .serializer
            .as_ref()
            .filter(|s| s.is_available())
            .ok_or_else(|| ReportError::MissingCollaborator("workbook serializer".to_string()))?;
        self.config.validate()?;
        record.validate()?;

        let metrics = DerivedMetrics::compute(record);
        debug!(
            energy_error = metrics.energy_error,
            momentum_error = metrics.momentum_error,
            "metrics computed"
        );

        let plan = ChartSpecBuilder::new(self.config.chart_settings()).build(record, &metrics);
        debug!(ready = plan.ready_count(), "chart plan built");

        let outcomes = renderer.render_plan(&plan).await?;
        debug!(engine = renderer.engine().name(), "charts rendered");

        let document =
            DocumentAssembler::new(&self.config, generated_at).assemble(record, &metrics, outcomes);
        let skipped_charts = document.placeholder_ids();
        let image_count = document.image_count();
        let sheet_count = document.sheets.len();

        let workbook = layout::lower(&document)?;
        debug!(sheets = sheet_count, images = image_count, "workbook laid out");

        let bytes = serializer.serialize(workbook).await?;
        let sha256 = hex::encode(Sha256::digest(&bytes));

        let artifact = ReportArtifact {
            file_name: report_file_name(&generated_at),
            bytes,
            sha256,
            generated_at,
            sheet_count,
            image_count,
            skipped_charts,
        };

        info!(
            file = %artifact.file_name,
            bytes = artifact.len(),
            sheets = artifact.sheet_count,
            images = artifact.image_count,
            skipped = artifact.skipped_charts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report generated"
        );
        Ok(artifact)
    }
}
