//! SVG chart layout rasterized with `resvg`.
//!
//! Charts are drawn as plain SVG markup (title, legend, grid, bars, lines or
//! pie slices) and rasterized to PNG on Tokio's blocking pool. The join handle
//! of the blocking task is the completion signal for the renderer.

use crate::engine::ChartEngine;
use crate::error::EngineError;
use crate::spec::{ChartKind, ChartSpec, LegendPosition, Rgba};
use resvg::tiny_skia;
use resvg::usvg::{self, fontdb};
use std::f64::consts::PI;
use std::future::Future;
use std::sync::Arc;

const FONT: &str = "DejaVu Sans, Segoe UI, Arial, sans-serif";
const INK: &str = "#2c3e50";
const MUTED: &str = "#5f6b7a";
const GRID: &str = "rgba(0,0,0,0.08)";
const PAD: f64 = 30.0;

/// Chart engine backed by `resvg`.
#[derive(Clone)]
pub struct SvgChartEngine {
    fontdb: Arc<fontdb::Database>,
}

impl SvgChartEngine {
    /// Engine using the fonts installed on this machine.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Engine with an empty font database; text elements are not drawn.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    /// Number of font faces available for labels.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }
}

impl Default for SvgChartEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SvgChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgChartEngine")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl ChartEngine for SvgChartEngine {
    fn name(&self) -> &str {
        "svg"
    }

    fn render_chart(
        &self,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send {
        let fontdb = Arc::clone(&self.fontdb);
        async move {
            let markup = chart_svg(&spec)?;
            let (width, height) = (spec.width, spec.height);
            tokio::task::spawn_blocking(move || rasterize(&markup, width, height, fontdb))
                .await
                .map_err(|e| EngineError::Task(e.to_string()))?
        }
    }
}

fn rasterize(
    markup: &str,
    width: u32,
    height: u32,
    fontdb: Arc<fontdb::Database>,
) -> Result<Vec<u8>, EngineError> {
    let options = usvg::Options {
        fontdb,
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(markup, &options).map_err(|e| EngineError::Markup(e.to_string()))?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(EngineError::Surface { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| EngineError::Encode(e.to_string()))
}

/// Lay a chart out as standalone SVG markup.
pub fn chart_svg(spec: &ChartSpec) -> Result<String, EngineError> {
    if spec.width == 0 || spec.height == 0 {
        return Err(EngineError::Surface {
            width: spec.width,
            height: spec.height,
        });
    }
    if !spec.is_well_formed() {
        return Err(EngineError::Markup(format!(
            "chart '{}' has missing or non-finite data",
            spec.id
        )));
    }

    let w = spec.width as f64;
    let h = spec.height as f64;
    let mut out = String::new();
    out.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##
    ));
    out.push_str(&format!(r##"<rect width="{w}" height="{h}" fill="#ffffff"/>"##));
    out.push_str(&text(w / 2.0, PAD + 12.0, 18.0, "bold", INK, "middle", &spec.title));

    let legend: Vec<(String, Rgba)> = match spec.kind {
        ChartKind::Pie => spec
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), spec.series[0].color.at(i)))
            .collect(),
        ChartKind::Bar | ChartKind::Line => spec
            .series
            .iter()
            .map(|s| (s.label.clone(), s.color.at(0)))
            .collect(),
    };
    let legend_y = match spec.legend {
        LegendPosition::Top => PAD + 45.0,
        LegendPosition::Bottom => h - PAD,
    };
    out.push_str(&legend_row(&legend, w, legend_y));

    let area = PlotArea {
        left: PAD + 60.0,
        right: w - PAD,
        top: match spec.legend {
            LegendPosition::Top => PAD + 75.0,
            LegendPosition::Bottom => PAD + 40.0,
        },
        bottom: match (spec.kind, spec.legend) {
            (ChartKind::Pie, LegendPosition::Bottom) => h - PAD - 30.0,
            (ChartKind::Pie, LegendPosition::Top) => h - PAD,
            _ => h - PAD - 45.0,
        },
    };

    match spec.kind {
        ChartKind::Bar => bars(&mut out, spec, &area),
        ChartKind::Line => lines(&mut out, spec, &area),
        ChartKind::Pie => pie(&mut out, spec, &area)?,
    }

    if let Some(axes) = &spec.axes {
        out.push_str(&text(
            (area.left + area.right) / 2.0,
            h - PAD + 8.0,
            14.0,
            "bold",
            INK,
            "middle",
            &axes.x,
        ));
        let cy = (area.top + area.bottom) / 2.0;
        out.push_str(&format!(
            r##"<g transform="rotate(-90 {x:.1} {cy:.1})">{label}</g>"##,
            x = PAD - 6.0,
            label = text(PAD - 6.0, cy, 14.0, "bold", INK, "middle", &axes.y),
        ));
    }

    out.push_str("</svg>");
    Ok(out)
}

struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl PlotArea {
    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Value axis with "nice" tick spacing.
struct ValueAxis {
    lo: f64,
    hi: f64,
    step: f64,
}

impl ValueAxis {
    fn for_spec(spec: &ChartSpec) -> Self {
        if let Some((lo, hi)) = spec.value_range {
            if hi > lo {
                return Self {
                    lo,
                    hi,
                    step: nice_step((hi - lo) / 5.0),
                };
            }
        }
        let min = spec.values().fold(0.0_f64, f64::min);
        let max = spec.values().fold(0.0_f64, f64::max);
        let (min, max) = if max - min < f64::EPSILON {
            (min, min + 1.0)
        } else {
            (min, max)
        };
        let step = nice_step((max - min) / 5.0);
        Self {
            lo: (min / step).floor() * step,
            hi: (max / step).ceil() * step,
            step,
        }
    }

    fn y(&self, value: f64, area: &PlotArea) -> f64 {
        let t = (value.clamp(self.lo, self.hi) - self.lo) / (self.hi - self.lo);
        area.bottom - t * area.height()
    }

    fn ticks(&self) -> Vec<f64> {
        let mut ticks = Vec::new();
        let mut v = (self.lo / self.step).ceil() * self.step;
        while v <= self.hi + self.step * 1e-9 && ticks.len() < 50 {
            ticks.push(v);
            v += self.step;
        }
        ticks
    }

    fn decimals(&self) -> usize {
        if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10()).ceil() as usize
        }
    }

    fn draw(&self, out: &mut String, area: &PlotArea) {
        let decimals = self.decimals();
        for tick in self.ticks() {
            let y = self.y(tick, area);
            out.push_str(&format!(
                r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID}" stroke-width="1"/>"##,
                area.left, area.right
            ));
            out.push_str(&text(
                area.left - 8.0,
                y + 4.0,
                12.0,
                "normal",
                MUTED,
                "end",
                &format!("{:.*}", decimals, tick),
            ));
        }
        let base = self.y(0.0, area);
        out.push_str(&format!(
            r##"<line x1="{:.1}" y1="{base:.1}" x2="{:.1}" y2="{base:.1}" stroke="{MUTED}" stroke-width="1"/>"##,
            area.left, area.right
        ));
    }
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn bars(out: &mut String, spec: &ChartSpec, area: &PlotArea) {
    let axis = ValueAxis::for_spec(spec);
    axis.draw(out, area);

    let groups = spec.categories.len() as f64;
    let group_w = area.width() / groups;
    let bar_w = group_w * 0.8 / spec.series.len() as f64;
    let base = axis.y(0.0, area);

    for (i, category) in spec.categories.iter().enumerate() {
        let group_x = area.left + i as f64 * group_w;
        for (s, series) in spec.series.iter().enumerate() {
            let color = series.color.at(i);
            let y = axis.y(series.values[i], area);
            let x = group_x + group_w * 0.1 + s as f64 * bar_w;
            let dash = if series.dashed {
                r##" stroke-dasharray="5,5" stroke="#646464" stroke-width="1""##
            } else {
                ""
            };
            out.push_str(&format!(
                r##"<rect x="{x:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="{}" fill-opacity="{}"{dash}/>"##,
                y.min(base),
                (bar_w - 4.0).max(1.0),
                (y - base).abs(),
                color.hex(),
                color.a,
            ));
        }
        out.push_str(&text(
            group_x + group_w / 2.0,
            area.bottom + 20.0,
            12.0,
            "normal",
            MUTED,
            "middle",
            category,
        ));
    }
}

fn lines(out: &mut String, spec: &ChartSpec, area: &PlotArea) {
    let axis = ValueAxis::for_spec(spec);
    axis.draw(out, area);

    let n = spec.categories.len();
    let dx = if n > 1 {
        area.width() / (n - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| area.left + i as f64 * dx;

    for series in &spec.series {
        let points: Vec<String> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.1},{:.1}", x_at(i), axis.y(v, area)))
            .collect();
        let color = series.color.at(0).opaque();
        out.push_str(&format!(
            r##"<polyline points="{}" fill="none" stroke="{}" stroke-width="3" stroke-linejoin="round"/>"##,
            points.join(" "),
            color.hex()
        ));
    }

    let stride = spec
        .max_x_ticks
        .filter(|&max| max > 0)
        .map(|max| n.div_ceil(max))
        .unwrap_or(1)
        .max(1);
    for (i, label) in spec.categories.iter().enumerate().step_by(stride) {
        out.push_str(&text(
            x_at(i),
            area.bottom + 20.0,
            12.0,
            "normal",
            MUTED,
            "middle",
            label,
        ));
    }
}

fn pie(out: &mut String, spec: &ChartSpec, area: &PlotArea) -> Result<(), EngineError> {
    let series = &spec.series[0];
    let values: Vec<f64> = series.values.iter().map(|v| v.max(0.0)).collect();
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(EngineError::Unsupported(format!(
            "pie chart '{}' has no positive slice",
            spec.id
        )));
    }

    let cx = (area.left + area.right) / 2.0;
    let cy = (area.top + area.bottom) / 2.0;
    let r = (area.width().min(area.height()) / 2.0 - 10.0).max(10.0);
    let mut angle = -PI / 2.0;

    for (i, &value) in values.iter().enumerate() {
        if value <= 0.0 {
            continue;
        }
        let fraction = value / total;
        let color = series.color.at(i);
        if fraction > 0.999_999 {
            out.push_str(&format!(
                r##"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{}" fill-opacity="{}" stroke="#ffffff" stroke-width="2"/>"##,
                color.hex(),
                color.a
            ));
        } else {
            let end = angle + fraction * 2.0 * PI;
            let large = if fraction > 0.5 { 1 } else { 0 };
            out.push_str(&format!(
                r##"<path d="M {cx:.1} {cy:.1} L {:.1} {:.1} A {r:.1} {r:.1} 0 {large} 1 {:.1} {:.1} Z" fill="{}" fill-opacity="{}" stroke="#ffffff" stroke-width="2"/>"##,
                cx + r * angle.cos(),
                cy + r * angle.sin(),
                cx + r * end.cos(),
                cy + r * end.sin(),
                color.hex(),
                color.a
            ));
        }
        let mid = angle + fraction * PI;
        out.push_str(&text(
            cx + 0.6 * r * mid.cos(),
            cy + 0.6 * r * mid.sin() + 5.0,
            14.0,
            "bold",
            "#ffffff",
            "middle",
            &format!("{:.1}%", fraction * 100.0),
        ));
        angle += fraction * 2.0 * PI;
    }
    Ok(())
}

fn legend_row(items: &[(String, Rgba)], width: f64, y: f64) -> String {
    let item_w: Vec<f64> = items
        .iter()
        .map(|(label, _)| 24.0 + label.chars().count() as f64 * 8.0 + 20.0)
        .collect();
    let total: f64 = item_w.iter().sum();
    let mut x = ((width - total) / 2.0).max(PAD);
    let mut out = String::new();
    for ((label, color), w) in items.iter().zip(item_w) {
        out.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="6" fill="{}"/>"##,
            x + 6.0,
            y - 5.0,
            color.opaque().hex()
        ));
        out.push_str(&text(x + 18.0, y, 14.0, "bold", INK, "start", label));
        x += w;
    }
    out
}

fn text(x: f64, y: f64, size: f64, weight: &str, fill: &str, anchor: &str, body: &str) -> String {
    format!(
        r##"<text x="{x:.1}" y="{y:.1}" font-family="{FONT}" font-size="{size}" font-weight="{weight}" fill="{fill}" text-anchor="{anchor}">{}</text>"##,
        escape(body)
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ChartSpecBuilder;
    use crate::spec::{ChartId, Series, SeriesColor};
    use cl_common::ExperimentRecord;
    use cl_math::DerivedMetrics;

    fn plan() -> crate::spec::ChartPlan {
        let record = ExperimentRecord {
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
        };
        let metrics = DerivedMetrics::compute(&record);
        ChartSpecBuilder::default().build(&record, &metrics)
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.3), 0.5);
        assert_eq!(nice_step(2.0), 2.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn test_bar_markup_has_title_and_rects() {
        let plan = plan();
        let spec = plan.slots[0].spec().unwrap();
        let svg = chart_svg(spec).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("VELOCITIES BEFORE AND AFTER"));
        // 3 categories x 2 series plus the background
        assert_eq!(svg.matches("<rect").count(), 7);
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_pie_markup_has_slices() {
        let plan = plan();
        let spec = plan.slots[ChartId::InitialEnergySplit.slot()].spec().unwrap();
        let svg = chart_svg(spec).unwrap();
        // all initial energy sits in cart 1, drawn as a full disc
        assert!(!svg.contains("<path"));
        assert_eq!(svg.matches("%</text>").count(), 1);
    }

    #[test]
    fn test_timeline_tick_stride() {
        let plan = plan();
        let spec = plan.slots[ChartId::VelocityTimeline.slot()].spec().unwrap();
        let svg = chart_svg(spec).unwrap();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(">0.00<"));
        assert!(svg.contains(">0.10<"));
        assert!(!svg.contains(">0.02<"));
    }

    #[test]
    fn test_rejects_malformed_spec() {
        let plan = plan();
        let mut spec = plan.slots[0].spec().unwrap().clone();
        spec.series.push(Series::new(
            "short",
            vec![1.0],
            SeriesColor::Uniform(Rgba::new(0, 0, 0, 1.0)),
        ));
        assert!(matches!(chart_svg(&spec), Err(EngineError::Markup(_))));
    }

    #[tokio::test]
    async fn test_render_produces_png() {
        let plan = plan();
        let spec = plan.slots[ChartId::Conservation.slot()].spec().unwrap().clone();
        let png = SvgChartEngine::without_fonts()
            .render_chart(spec)
            .await
            .unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
