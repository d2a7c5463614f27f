//! Drives a [`ChartEngine`] over the chart catalogue.

use crate::engine::ChartEngine;
use crate::error::{RenderError, Result};
use crate::spec::{ChartId, ChartPlan, ChartSlot, ChartSpec, SkipReason};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Encoding of a rendered chart payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    Png,
}

impl ImageEncoding {
    pub fn extension(self) -> &'static str {
        match self {
            ImageEncoding::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageEncoding::Png => "image/png",
        }
    }
}

/// A finished chart image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub id: ChartId,
    /// Catalogue position, `0..7`.
    pub slot: usize,
    pub title: String,
    pub encoding: ImageEncoding,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Result for one catalogue slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Rendered(RenderedChart),
    Skipped { id: ChartId, reason: SkipReason },
}

impl ChartOutcome {
    pub fn id(&self) -> ChartId {
        match self {
            ChartOutcome::Rendered(chart) => chart.id,
            ChartOutcome::Skipped { id, .. } => *id,
        }
    }

    pub fn rendered(&self) -> Option<&RenderedChart> {
        match self {
            ChartOutcome::Rendered(chart) => Some(chart),
            ChartOutcome::Skipped { .. } => None,
        }
    }
}

/// Renders chart specs with a completion ceiling.
pub struct ChartRenderer<E> {
    engine: Arc<E>,
    ceiling: Duration,
    concurrent: bool,
}

impl<E: ChartEngine> ChartRenderer<E> {
    /// Create a renderer that fails any chart not finished within `ceiling`.
    pub fn new(engine: E, ceiling: Duration) -> Self {
        Self {
            engine: Arc::new(engine),
            ceiling,
            concurrent: true,
        }
    }

    /// Render charts one after another instead of concurrently.
    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    pub fn is_concurrent(&self) -> bool {
        self.concurrent
    }

    /// Whether the underlying engine accepts work.
    pub fn is_available(&self) -> bool {
        self.engine.is_available()
    }

    /// Render one chart, waiting for the engine's completion signal.
    pub async fn render(&self, spec: &ChartSpec) -> Result<RenderedChart> {
        let id = spec.id;
        let started = Instant::now();

        let data = match tokio::time::timeout(self.ceiling, self.engine.render_chart(spec.clone()))
            .await
        {
            Err(_) => {
                return Err(RenderError::Timeout {
                    chart: id,
                    ceiling_ms: self.ceiling.as_millis() as u64,
                })
            }
            Ok(Err(source)) => return Err(RenderError::Failed { chart: id, source }),
            Ok(Ok(data)) => data,
        };
        if !data.starts_with(PNG_MAGIC) {
            return Err(RenderError::InvalidImage { chart: id });
        }

        debug!(
            chart = %id,
            engine = self.engine.name(),
            bytes = data.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chart rendered"
        );

        Ok(RenderedChart {
            id,
            slot: id.slot(),
            title: spec.title.clone(),
            encoding: ImageEncoding::Png,
            data,
            width: spec.width,
            height: spec.height,
        })
    }

    /// Render every ready slot of `plan`.
    ///
    /// Outcomes come back in catalogue order whatever order the engine
    /// finishes in. The first failing slot (in catalogue order) is returned
    /// as the error.
    pub async fn render_plan(&self, plan: &ChartPlan) -> Result<Vec<ChartOutcome>> {
        let started = Instant::now();
        let outcomes = if self.concurrent {
            join_all(plan.slots.iter().map(|slot| self.render_slot(slot)))
                .await
                .into_iter()
                .collect::<Result<Vec<_>>>()?
        } else {
            let mut outcomes = Vec::with_capacity(plan.slots.len());
            for slot in &plan.slots {
                outcomes.push(self.render_slot(slot).await?);
            }
            outcomes
        };

        info!(
            rendered = outcomes.iter().filter(|o| o.rendered().is_some()).count(),
            skipped = outcomes.iter().filter(|o| o.rendered().is_none()).count(),
            concurrent = self.concurrent,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Charts rendered"
        );
        Ok(outcomes)
    }

    async fn render_slot(&self, slot: &ChartSlot) -> Result<ChartOutcome> {
        match slot {
            ChartSlot::Ready(spec) => self.render(spec).await.map(ChartOutcome::Rendered),
            ChartSlot::Skipped { id, reason } => Ok(ChartOutcome::Skipped {
                id: *id,
                reason: reason.clone(),
            }),
        }
    }
}

impl<E> std::fmt::Debug for ChartRenderer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartRenderer")
            .field("ceiling", &self.ceiling)
            .field("concurrent", &self.concurrent)
            .finish()
    }
}
