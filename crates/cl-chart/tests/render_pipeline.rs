//! Renderer behaviour against real and scripted chart engines.

use cl_chart::{
    ChartEngine, ChartId, ChartOutcome, ChartPlan, ChartRenderer, ChartSettings, ChartSpec,
    ChartSpecBuilder, EngineError, RenderError, SvgChartEngine,
};
use cl_common::ExperimentRecord;
use cl_math::DerivedMetrics;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn equal_mass_swap() -> ExperimentRecord {
    ExperimentRecord {
        m1: 1.0,
        m2: 1.0,
        v1: 2.0,
        v2: 0.0,
        v1f: 0.0,
        v2f: 2.0,
        ke_initial: 2.0,
        ke_final: 2.0,
        p_initial: 2.0,
        p_final: 2.0,
    }
}

fn plan_for(record: &ExperimentRecord) -> ChartPlan {
    let metrics = DerivedMetrics::compute(record);
    ChartSpecBuilder::new(ChartSettings::default()).build(record, &metrics)
}

fn png_size(data: &[u8]) -> (u32, u32) {
    let w = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let h = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    (w, h)
}

// ============================================================================
// Scripted engines
// ============================================================================

/// Finishes later charts first to shake out ordering bugs.
struct ReverseDelayEngine {
    calls: Arc<AtomicUsize>,
}

impl ChartEngine for ReverseDelayEngine {
    fn name(&self) -> &str {
        "reverse-delay"
    }

    fn render_chart(
        &self,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = Duration::from_millis(10 * (7 - spec.id.slot() as u64));
        async move {
            tokio::time::sleep(delay).await;
            let mut png = PNG_MAGIC.to_vec();
            png.push(spec.id.slot() as u8);
            Ok(png)
        }
    }
}

/// Never signals completion for one chart.
struct HangingEngine {
    stuck: ChartId,
}

impl ChartEngine for HangingEngine {
    fn name(&self) -> &str {
        "hanging"
    }

    fn render_chart(
        &self,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send {
        let stuck = spec.id == self.stuck;
        async move {
            if stuck {
                std::future::pending::<()>().await;
            }
            Ok(PNG_MAGIC.to_vec())
        }
    }
}

/// Fails one chart and returns garbage for another.
struct FaultyEngine;

impl ChartEngine for FaultyEngine {
    fn name(&self) -> &str {
        "faulty"
    }

    fn render_chart(
        &self,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send {
        async move {
            match spec.id {
                ChartId::Momentum => Err(EngineError::Markup("boom".into())),
                ChartId::VelocityTimeline => Ok(b"GIF89a".to_vec()),
                _ => Ok(PNG_MAGIC.to_vec()),
            }
        }
    }
}

// ============================================================================
// Ordering and concurrency
// ============================================================================

#[tokio::test]
async fn concurrent_render_keeps_catalogue_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let renderer = ChartRenderer::new(
        ReverseDelayEngine {
            calls: Arc::clone(&calls),
        },
        Duration::from_secs(5),
    );

    let outcomes = renderer
        .render_plan(&plan_for(&equal_mass_swap()))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 7);
    let ids: Vec<ChartId> = outcomes.iter().map(ChartOutcome::id).collect();
    assert_eq!(ids, ChartId::ALL.to_vec());
    for (i, outcome) in outcomes.iter().enumerate() {
        let chart = outcome.rendered().unwrap();
        assert_eq!(chart.slot, i);
        assert_eq!(*chart.data.last().unwrap(), i as u8);
    }
}

#[tokio::test]
async fn sequential_and_concurrent_agree() {
    let plan = plan_for(&equal_mass_swap());
    let engine = || ReverseDelayEngine {
        calls: Arc::new(AtomicUsize::new(0)),
    };

    let concurrent = ChartRenderer::new(engine(), Duration::from_secs(5))
        .render_plan(&plan)
        .await
        .unwrap();
    let sequential = ChartRenderer::new(engine(), Duration::from_secs(5))
        .with_concurrency(false)
        .render_plan(&plan)
        .await
        .unwrap();

    assert_eq!(concurrent, sequential);
}

#[tokio::test]
async fn skipped_slots_are_passed_through_without_rendering() {
    let record = ExperimentRecord {
        v1: 0.0,
        v1f: 0.0,
        v2f: 0.0,
        ke_initial: 0.0,
        ke_final: 0.0,
        p_initial: 0.0,
        p_final: 0.0,
        ..equal_mass_swap()
    };
    let calls = Arc::new(AtomicUsize::new(0));
    let renderer = ChartRenderer::new(
        ReverseDelayEngine {
            calls: Arc::clone(&calls),
        },
        Duration::from_secs(5),
    );

    let outcomes = renderer.render_plan(&plan_for(&record)).await.unwrap();

    assert_eq!(outcomes.len(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(matches!(
        outcomes[ChartId::Conservation.slot()],
        ChartOutcome::Skipped { .. }
    ));
}

#[test]
fn plan_serializes_for_out_of_process_engines() {
    let record = ExperimentRecord {
        v1: 0.0,
        v1f: 0.0,
        v2f: 0.0,
        ke_initial: 0.0,
        ke_final: 0.0,
        p_initial: 0.0,
        p_final: 0.0,
        ..equal_mass_swap()
    };
    let json = serde_json::to_value(plan_for(&record)).unwrap();
    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 7);

    let velocities = &slots[ChartId::Velocities.slot()]["ready"];
    assert_eq!(velocities["id"], "velocities");
    assert_eq!(velocities["kind"], "bar");
    assert_eq!(velocities["width"], 800);

    let split = &slots[ChartId::InitialEnergySplit.slot()]["skipped"];
    assert_eq!(split["id"], "initial_energy_split");
    assert_eq!(split["reason"]["reason"], "nothing_to_split");

    let spec: ChartSpec = serde_json::from_value(velocities.clone()).unwrap();
    assert_eq!(spec.id, ChartId::Velocities);
    assert_eq!(spec.categories.len(), spec.series[0].values.len());
}

// ============================================================================
// Failure modes
// ============================================================================

#[tokio::test]
async fn missing_completion_signal_times_out() {
    let renderer = ChartRenderer::new(
        HangingEngine {
            stuck: ChartId::FinalEnergySplit,
        },
        Duration::from_millis(50),
    );

    let err = renderer
        .render_plan(&plan_for(&equal_mass_swap()))
        .await
        .unwrap_err();

    match err {
        RenderError::Timeout { chart, ceiling_ms } => {
            assert_eq!(chart, ChartId::FinalEnergySplit);
            assert_eq!(ceiling_ms, 50);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn engine_failure_names_the_chart() {
    let renderer = ChartRenderer::new(FaultyEngine, Duration::from_secs(1));

    let err = renderer
        .render_plan(&plan_for(&equal_mass_swap()))
        .await
        .unwrap_err();

    assert_eq!(err.chart(), ChartId::Momentum);
    assert!(err.to_string().contains("momentum"));
    assert!(matches!(err, RenderError::Failed { .. }));
}

#[tokio::test]
async fn non_png_payload_is_rejected() {
    let plan = plan_for(&equal_mass_swap());
    let spec = plan.slots[ChartId::VelocityTimeline.slot()]
        .spec()
        .unwrap();
    let err = ChartRenderer::new(FaultyEngine, Duration::from_secs(1))
        .render(spec)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::InvalidImage {
            chart: ChartId::VelocityTimeline
        }
    ));
}

// ============================================================================
// Real engine
// ============================================================================

#[tokio::test]
async fn svg_engine_renders_every_chart_at_its_size() {
    let plan = plan_for(&ExperimentRecord {
        ke_final: 1.98,
        ..equal_mass_swap()
    });
    let renderer = ChartRenderer::new(SvgChartEngine::new(), Duration::from_secs(30));

    let outcomes = renderer.render_plan(&plan).await.unwrap();

    assert_eq!(outcomes.len(), 7);
    for (outcome, spec) in outcomes.iter().zip(plan.specs()) {
        let chart = outcome.rendered().unwrap();
        assert!(chart.data.starts_with(PNG_MAGIC));
        assert_eq!(png_size(&chart.data), (spec.width, spec.height));
        assert_eq!((chart.width, chart.height), (spec.width, spec.height));
    }
}
