//! Spreadsheet report generator for elastic two-cart collisions.
//!
//! Takes one [`ExperimentRecord`](cl_common::ExperimentRecord) and produces a
//! styled seven-sheet `.xlsx` workbook with embedded charts.
//!
//! # Pipeline
//!
//! 1. Validate the record (`InvalidInput` on the first bad field)
//! 2. Derive metrics ([`cl_math::DerivedMetrics`])
//! 3. Plan and render the seven charts ([`cl_chart`])
//! 4. Assemble a [`ReportDocument`] of placed regions ([`DocumentAssembler`])
//! 5. Lower the document to a workbook ([`layout::lower`])
//! 6. Serialize through a [`WorkbookSerializer`](cl_workbook::WorkbookSerializer)
//!
//! # Sheets
//!
//! - Cover: banner, run date, summary table
//! - Experimental Data: initial conditions, results, conservation checks
//! - Charts: the seven charts in rows of 2, 2 and 3
//! - Formulas: ten worked formulas
//! - Statistical Analysis: derived quantities and conclusions
//! - Comparative Table: cart and system values before and after
//! - Notes & Recommendations: notes, grading and reflections
//!
//! # Example
//!
//! ```no_run
//! use cl_common::ExperimentRecord;
//! use cl_report::{ReportConfig, ReportGenerator};
//! use std::path::Path;
//!
//! # async fn run(record: ExperimentRecord) -> cl_report::Result<()> {
//! let generator = ReportGenerator::standard(ReportConfig::default());
//! let artifact = generator.generate(Some(&record)).await?;
//! artifact.write_to(Path::new("reports"))?;
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod generator;
pub mod layout;
mod sections;
mod style;

pub use assembler::DocumentAssembler;
pub use config::{RenderSettings, ReportConfig, Thresholds, TimelineSettings};
pub use document::{
    ChartContent, ColumnRole, ColumnSpan, ImagePlacement, KeyValueTable, LineHeight,
    PlacedChart, PlacedRegion, Region, RegionKind, ReportDocument, RowCursor, Sheet, SheetKind,
    TableCell, TableColumn, TableRow, TextBlock, TextStyle, Tint, TitleBlock, TitleLevel,
};
pub use error::{ReportError, Result};
pub use generator::{report_file_name, ReportArtifact, ReportGenerator};
