//! Chart definitions handed to a rendering engine.

use serde::{Deserialize, Serialize};

/// The seven charts of the report, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Velocities,
    KineticEnergy,
    Momentum,
    VelocityTimeline,
    InitialEnergySplit,
    FinalEnergySplit,
    Conservation,
}

impl ChartId {
    /// All charts in catalogue order.
    pub const ALL: [ChartId; 7] = [
        ChartId::Velocities,
        ChartId::KineticEnergy,
        ChartId::Momentum,
        ChartId::VelocityTimeline,
        ChartId::InitialEnergySplit,
        ChartId::FinalEnergySplit,
        ChartId::Conservation,
    ];

    /// Zero-based position in the catalogue.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Chart title as printed above the plot.
    pub fn title(self) -> &'static str {
        match self {
            ChartId::Velocities => "VELOCITIES BEFORE AND AFTER",
            ChartId::KineticEnergy => "KINETIC ENERGY ANALYSIS",
            ChartId::Momentum => "LINEAR MOMENTUM ANALYSIS",
            ChartId::VelocityTimeline => "VELOCITY OVER TIME",
            ChartId::InitialEnergySplit => "INITIAL ENERGY DISTRIBUTION",
            ChartId::FinalEnergySplit => "FINAL ENERGY DISTRIBUTION",
            ChartId::Conservation => "CONSERVATION CHECK (%)",
        }
    }

    /// Stable identifier used for logs and media names.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartId::Velocities => "velocities",
            ChartId::KineticEnergy => "kinetic_energy",
            ChartId::Momentum => "momentum",
            ChartId::VelocityTimeline => "velocity_timeline",
            ChartId::InitialEnergySplit => "initial_energy_split",
            ChartId::FinalEnergySplit => "final_energy_split",
            ChartId::Conservation => "conservation",
        }
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// An sRGB colour with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour, fully opaque.
    pub const fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill colour of a series: one for every point, or one per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    Uniform(Rgba),
    PerPoint(Vec<Rgba>),
}

impl SeriesColor {
    /// Colour of the point at `index`, cycling a short per-point list.
    pub fn at(&self, index: usize) -> Rgba {
        match self {
            SeriesColor::Uniform(c) => *c,
            SeriesColor::PerPoint(colors) if colors.is_empty() => Rgba::new(0, 0, 0, 1.0),
            SeriesColor::PerPoint(colors) => colors[index % colors.len()],
        }
    }
}

/// One named data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    /// One value per category label.
    pub values: Vec<f64>,
    pub color: SeriesColor,
    /// Draw the outline dashed (used for reference series).
    #[serde(default)]
    pub dashed: bool,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>, color: SeriesColor) -> Self {
        Self {
            label: label.into(),
            values,
            color,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Axis captions for cartesian charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
}

/// Where the legend is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

/// Complete, finite description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    /// Category labels (x axis for bar/line, slices for pie).
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Absent for pie charts.
    pub axes: Option<AxisTitles>,
    /// Fixed value-axis range; automatic when absent.
    pub value_range: Option<(f64, f64)>,
    pub legend: LegendPosition,
    /// Show at most this many category labels on the x axis.
    pub max_x_ticks: Option<usize>,
    pub width: u32,
    pub height: u32,
}

impl ChartSpec {
    /// Iterator over every numeric value in the chart.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.values.iter().copied())
    }

    /// True when every value is finite and every series matches the categories.
    pub fn is_well_formed(&self) -> bool {
        !self.categories.is_empty()
            && !self.series.is_empty()
            && self
                .series
                .iter()
                .all(|s| s.values.len() == self.categories.len())
            && self.values().all(f64::is_finite)
    }
}

/// Why a chart was left out of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// Every metric the chart needs is indeterminate.
    IndeterminateMetric { metrics: Vec<String> },
    /// An input overflowed to a non-finite value.
    NonFiniteInput { input: String },
    /// A pie whose slices sum to zero.
    NothingToSplit,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::IndeterminateMetric { metrics } => {
                write!(f, "indeterminate metric: {}", metrics.join(", "))
            }
            SkipReason::NonFiniteInput { input } => write!(f, "non-finite input: {input}"),
            SkipReason::NothingToSplit => f.write_str("no kinetic energy to split"),
        }
    }
}

/// One catalogue position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Ready(ChartSpec),
    Skipped { id: ChartId, reason: SkipReason },
}

impl ChartSlot {
    pub fn id(&self) -> ChartId {
        match self {
            ChartSlot::Ready(spec) => spec.id,
            ChartSlot::Skipped { id, .. } => *id,
        }
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartSlot::Ready(spec) => Some(spec),
            ChartSlot::Skipped { .. } => None,
        }
    }
}

/// All seven slots, in catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlan {
    pub slots: Vec<ChartSlot>,
}

impl ChartPlan {
    /// Specs that are ready to render, in catalogue order.
    pub fn specs(&self) -> impl Iterator<Item = &ChartSpec> {
        self.slots.iter().filter_map(ChartSlot::spec)
    }

    pub fn ready_count(&self) -> usize {
        self.specs().count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (ChartId, &SkipReason)> {
        self.slots.iter().filter_map(|slot| match slot {
            ChartSlot::Skipped { id, reason } => Some((*id, reason)),
            ChartSlot::Ready(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order() {
        for (i, id) in ChartId::ALL.iter().enumerate() {
            assert_eq!(id.slot(), i);
        }
        assert_eq!(ChartId::Conservation.to_string(), "conservation");
    }

    #[test]
    fn test_series_color_cycles() {
        let color = SeriesColor::PerPoint(vec![Rgba::new(1, 2, 3, 1.0), Rgba::new(4, 5, 6, 1.0)]);
        assert_eq!(color.at(2).r, 1);
        assert_eq!(color.at(1).hex(), "#040506");
    }

    #[test]
    fn test_well_formed_rejects_nan() {
        let mut spec = ChartSpec {
            id: ChartId::Velocities,
            kind: ChartKind::Bar,
            title: "t".into(),
            categories: vec!["a".into()],
            series: vec![Series::new(
                "s",
                vec![1.0],
                SeriesColor::Uniform(Rgba::new(0, 0, 0, 1.0)),
            )],
            axes: None,
            value_range: None,
            legend: LegendPosition::Top,
            max_x_ticks: None,
            width: 10,
            height: 10,
        };
        assert!(spec.is_well_formed());
        spec.series[0].values[0] = f64::NAN;
        assert!(!spec.is_well_formed());
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::IndeterminateMetric {
            metrics: vec!["energy %".into(), "momentum %".into()],
        };
        assert_eq!(reason.to_string(), "indeterminate metric: energy %, momentum %");
    }
}
