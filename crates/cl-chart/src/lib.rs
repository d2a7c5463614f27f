//! Chart catalogue and rendering for cartlab reports.
//!
//! The report embeds seven charts in a fixed order. This crate splits the
//! work in two steps:
//!
//! - [`ChartSpecBuilder`] turns a record and its metrics into a
//!   [`ChartPlan`]: seven slots, each a ready [`ChartSpec`] or a skip reason.
//! - [`ChartRenderer`] drives a [`ChartEngine`] to turn each spec into a PNG,
//!   bounded by a timeout and returning results in catalogue order.
//!
//! [`SvgChartEngine`] is the bundled engine: it lays the chart out as SVG and
//! rasterizes it with `resvg` on the blocking pool.
//!
//! # Example
//!
//! ```no_run
//! use cl_chart::{ChartRenderer, ChartSettings, ChartSpecBuilder, SvgChartEngine};
//! use cl_common::ExperimentRecord;
//! use cl_math::DerivedMetrics;
//! use std::time::Duration;
//!
//! # async fn run(record: ExperimentRecord) {
//! let metrics = DerivedMetrics::compute(&record);
//! let plan = ChartSpecBuilder::new(ChartSettings::default()).build(&record, &metrics);
//! let renderer = ChartRenderer::new(SvgChartEngine::new(), Duration::from_secs(10));
//! let outcomes = renderer.render_plan(&plan).await.unwrap();
//! assert_eq!(outcomes.len(), 7);
//! # }
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod spec;
pub mod svg;

pub use builder::{ChartSettings, ChartSpecBuilder};
pub use engine::ChartEngine;
pub use error::{EngineError, RenderError, Result};
pub use renderer::{ChartOutcome, ChartRenderer, ImageEncoding, RenderedChart};
pub use spec::{
    AxisTitles, ChartId, ChartKind, ChartPlan, ChartSlot, ChartSpec, LegendPosition, Rgba,
    Series, SeriesColor, SkipReason,
};
pub use svg::SvgChartEngine;
