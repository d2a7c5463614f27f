//! Builds the fixed seven-chart catalogue from a record and its metrics.

use crate::spec::{
    AxisTitles, ChartId, ChartKind, ChartPlan, ChartSlot, ChartSpec, LegendPosition, Rgba,
    Series, SeriesColor, SkipReason,
};
use cl_common::{Cart, ExperimentRecord};
use cl_math::{DerivedMetrics, Measure, DENOMINATOR_EPSILON};
use tracing::debug;

/// Report colours shared by the charts.
pub mod palette {
    use crate::spec::Rgba;

    pub const CART_1: Rgba = Rgba::new(74, 144, 226, 0.85);
    pub const CART_2: Rgba = Rgba::new(237, 85, 100, 0.85);
    pub const ENERGY_INITIAL: Rgba = Rgba::new(76, 175, 80, 0.85);
    pub const ENERGY_FINAL: Rgba = Rgba::new(156, 39, 176, 0.85);
    pub const MOMENTUM_INITIAL: Rgba = Rgba::new(255, 152, 0, 0.85);
    pub const MOMENTUM_FINAL: Rgba = Rgba::new(0, 150, 136, 0.85);
    pub const CONSERVED: Rgba = Rgba::new(76, 175, 80, 0.85);
    pub const NOT_CONSERVED: Rgba = Rgba::new(255, 152, 0, 0.85);
    pub const REFERENCE: Rgba = Rgba::new(200, 200, 200, 0.3);

    pub fn cart(cart: cl_common::Cart) -> Rgba {
        match cart {
            cl_common::Cart::One => CART_1,
            cl_common::Cart::Two => CART_2,
        }
    }
}

/// Tunables for the chart catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    /// Number of points on the velocity timeline.
    pub timeline_samples: usize,
    /// Spacing of timeline points (s).
    pub timeline_step: f64,
    /// Instant at which the timeline switches to final velocities (s).
    pub collision_time: f64,
    /// Bars at or above this percentage are drawn as conserved.
    pub conserved_pct: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            timeline_samples: 50,
            timeline_step: 0.02,
            collision_time: 0.5,
            conserved_pct: 99.0,
        }
    }
}

/// Produces the ordered chart catalogue.
#[derive(Debug, Clone, Default)]
pub struct ChartSpecBuilder {
    settings: ChartSettings,
}

impl ChartSpecBuilder {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Build all seven slots in catalogue order.
    ///
    /// A slot is `Ready` only when every value in its spec is finite.
    pub fn build(&self, record: &ExperimentRecord, metrics: &DerivedMetrics) -> ChartPlan {
        let slots = ChartId::ALL
            .iter()
            .map(|&id| {
                let built = match id {
                    ChartId::Velocities => Ok(self.velocities(record)),
                    ChartId::KineticEnergy => Ok(self.kinetic_energy(record, metrics)),
                    ChartId::Momentum => Ok(self.momentum(record, metrics)),
                    ChartId::VelocityTimeline => Ok(self.timeline(record)),
                    ChartId::InitialEnergySplit => self.energy_split(
                        id,
                        metrics.cart1.kinetic_initial,
                        metrics.cart2.kinetic_initial,
                    ),
                    ChartId::FinalEnergySplit => self.energy_split(
                        id,
                        metrics.cart1.kinetic_final,
                        metrics.cart2.kinetic_final,
                    ),
                    ChartId::Conservation => self.conservation(metrics),
                };
                match built.and_then(ensure_finite) {
                    Ok(spec) => ChartSlot::Ready(spec),
                    Err(reason) => {
                        debug!(chart = %id, %reason, "Chart skipped");
                        ChartSlot::Skipped { id, reason }
                    }
                }
            })
            .collect();
        ChartPlan { slots }
    }

    fn velocities(&self, record: &ExperimentRecord) -> ChartSpec {
        let series = Cart::ALL
            .iter()
            .map(|&cart| {
                let vi = record.initial_velocity(cart);
                let vf = record.final_velocity(cart);
                Series::new(
                    cart.label(),
                    vec![vi, vf, vf - vi],
                    SeriesColor::Uniform(palette::cart(cart)),
                )
            })
            .collect();
        cartesian(
            ChartId::Velocities,
            ChartKind::Bar,
            labels(&["Initial velocity", "Final velocity", "Velocity change"]),
            series,
            axes("Motion state", "Velocity (m/s)"),
            800,
        )
    }

    fn kinetic_energy(&self, record: &ExperimentRecord, metrics: &DerivedMetrics) -> ChartSpec {
        let series = vec![
            Series::new(
                "Initial energy (J)",
                vec![
                    metrics.cart1.kinetic_initial,
                    metrics.cart2.kinetic_initial,
                    record.ke_initial,
                ],
                SeriesColor::Uniform(palette::ENERGY_INITIAL),
            ),
            Series::new(
                "Final energy (J)",
                vec![
                    metrics.cart1.kinetic_final,
                    metrics.cart2.kinetic_final,
                    record.ke_final,
                ],
                SeriesColor::Uniform(palette::ENERGY_FINAL),
            ),
        ];
        cartesian(
            ChartId::KineticEnergy,
            ChartKind::Bar,
            labels(&["Cart 1", "Cart 2", "System total"]),
            series,
            axes("System components", "Energy (J)"),
            800,
        )
    }

    fn momentum(&self, record: &ExperimentRecord, metrics: &DerivedMetrics) -> ChartSpec {
        let series = vec![
            Series::new(
                "Initial momentum (kg·m/s)",
                vec![
                    metrics.cart1.momentum_initial,
                    metrics.cart2.momentum_initial,
                    record.p_initial,
                ],
                SeriesColor::Uniform(palette::MOMENTUM_INITIAL),
            ),
            Series::new(
                "Final momentum (kg·m/s)",
                vec![
                    metrics.cart1.momentum_final,
                    metrics.cart2.momentum_final,
                    record.p_final,
                ],
                SeriesColor::Uniform(palette::MOMENTUM_FINAL),
            ),
        ];
        cartesian(
            ChartId::Momentum,
            ChartKind::Bar,
            labels(&["Cart 1", "Cart 2", "System total"]),
            series,
            axes("System components", "Momentum (kg·m/s)"),
            800,
        )
    }

    fn timeline(&self, record: &ExperimentRecord) -> ChartSpec {
        let times: Vec<f64> = (0..self.settings.timeline_samples)
            .map(|i| i as f64 * self.settings.timeline_step)
            .collect();
        let series = Cart::ALL
            .iter()
            .map(|&cart| {
                let values = times
                    .iter()
                    .map(|&t| {
                        if t < self.settings.collision_time {
                            record.initial_velocity(cart)
                        } else {
                            record.final_velocity(cart)
                        }
                    })
                    .collect();
                Series::new(
                    format!("{} (m/s)", cart.label()),
                    values,
                    SeriesColor::Uniform(palette::cart(cart)),
                )
            })
            .collect();
        let mut spec = cartesian(
            ChartId::VelocityTimeline,
            ChartKind::Line,
            times.iter().map(|t| format!("{t:.2}")).collect(),
            series,
            axes("Time (s)", "Velocity (m/s)"),
            800,
        );
        spec.max_x_ticks = Some(10);
        spec
    }

    fn energy_split(
        &self,
        id: ChartId,
        cart1: f64,
        cart2: f64,
    ) -> Result<ChartSpec, SkipReason> {
        let total = cart1 + cart2;
        if total.is_finite() && total.abs() <= DENOMINATOR_EPSILON {
            return Err(SkipReason::NothingToSplit);
        }
        Ok(ChartSpec {
            id,
            kind: ChartKind::Pie,
            title: id.title().to_string(),
            categories: labels(&["Cart 1", "Cart 2"]),
            series: vec![Series::new(
                "Kinetic energy (J)",
                vec![cart1, cart2],
                SeriesColor::PerPoint(vec![palette::CART_1, palette::CART_2]),
            )],
            axes: None,
            value_range: None,
            legend: LegendPosition::Bottom,
            max_x_ticks: None,
            width: 600,
            height: 500,
        })
    }

    fn conservation(&self, metrics: &DerivedMetrics) -> Result<ChartSpec, SkipReason> {
        let candidates = [
            ("Energy", "energy conserved %", metrics.energy_conserved_pct),
            (
                "Linear momentum",
                "momentum conserved %",
                metrics.momentum_conserved_pct,
            ),
        ];

        let mut categories = Vec::new();
        let mut values = Vec::new();
        let mut missing = Vec::new();
        for (label, metric, measure) in candidates {
            match measure {
                Measure::Value(v) => {
                    categories.push(label.to_string());
                    values.push(v);
                }
                Measure::Indeterminate => missing.push(metric.to_string()),
            }
        }
        if values.is_empty() {
            return Err(SkipReason::IndeterminateMetric { metrics: missing });
        }

        let threshold = self.settings.conserved_pct;
        let colors = values
            .iter()
            .map(|&v| {
                if v >= threshold {
                    palette::CONSERVED
                } else {
                    palette::NOT_CONSERVED
                }
            })
            .collect();
        let range = percent_range(&values);
        let reference = vec![100.0; values.len()];

        let mut spec = cartesian(
            ChartId::Conservation,
            ChartKind::Bar,
            categories,
            vec![
                Series::new("Conservation (%)", values, SeriesColor::PerPoint(colors)),
                Series::new(
                    "Target: 100%",
                    reference,
                    SeriesColor::Uniform(palette::REFERENCE),
                )
                .dashed(),
            ],
            axes("Physical quantity", "Percentage (%)"),
            700,
        );
        spec.value_range = Some(range);
        Ok(spec)
    }
}

fn cartesian(
    id: ChartId,
    kind: ChartKind,
    categories: Vec<String>,
    series: Vec<Series>,
    axes: AxisTitles,
    width: u32,
) -> ChartSpec {
    ChartSpec {
        id,
        kind,
        title: id.title().to_string(),
        categories,
        series,
        axes: Some(axes),
        value_range: None,
        legend: LegendPosition::Top,
        max_x_ticks: None,
        width,
        height: 500,
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn axes(x: &str, y: &str) -> AxisTitles {
    AxisTitles {
        x: x.to_string(),
        y: y.to_string(),
    }
}

// 95..105 unless a bar would fall outside it.
fn percent_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = if min < 95.0 { (min - 1.0).floor() } else { 95.0 };
    let hi = if max > 105.0 { (max + 1.0).ceil() } else { 105.0 };
    (lo, hi)
}

fn ensure_finite(spec: ChartSpec) -> Result<ChartSpec, SkipReason> {
    for series in &spec.series {
        for (value, category) in series.values.iter().zip(&spec.categories) {
            if !value.is_finite() {
                return Err(SkipReason::NonFiniteInput {
                    input: format!("{} / {}", series.label, category),
                });
            }
        }
    }
    Ok(spec)
}
