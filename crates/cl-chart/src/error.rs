//! Error types for chart rendering.

use crate::spec::ChartId;
use thiserror::Error;

/// Failure reported by a chart engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The chart could not be laid out or parsed as SVG.
    #[error("invalid chart markup: {0}")]
    Markup(String),

    /// The raster surface could not be allocated.
    #[error("cannot allocate a {width}x{height} raster")]
    Surface { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// The background render task died before signalling completion.
    #[error("render task failed: {0}")]
    Task(String),

    /// The engine cannot render this chart kind.
    #[error("unsupported chart: {0}")]
    Unsupported(String),
}

/// Errors surfaced by [`ChartRenderer`](crate::ChartRenderer).
#[derive(Error, Debug)]
pub enum RenderError {
    /// The engine reported a failure for a chart.
    #[error("chart '{chart}' failed to render: {source}")]
    Failed {
        chart: ChartId,
        #[source]
        source: EngineError,
    },

    /// No completion signal arrived within the ceiling.
    #[error("chart '{chart}' did not finish rendering within {ceiling_ms} ms")]
    Timeout { chart: ChartId, ceiling_ms: u64 },

    /// The engine returned something that is not a PNG.
    #[error("chart '{chart}' produced an empty or non-PNG image")]
    InvalidImage { chart: ChartId },
}

impl RenderError {
    /// The chart the error refers to.
    pub fn chart(&self) -> ChartId {
        match self {
            RenderError::Failed { chart, .. }
            | RenderError::Timeout { chart, .. }
            | RenderError::InvalidImage { chart } => *chart,
        }
    }
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
