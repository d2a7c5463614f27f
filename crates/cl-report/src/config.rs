//! Report configuration types.

use crate::error::{ReportError, Result};
use cl_chart::ChartSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Grading thresholds used by the verification tables and notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Absolute error below which a conservation law counts as verified.
    #[serde(default = "default_conservation_tolerance")]
    pub conservation_tolerance: f64,
    /// Percentage graded EXCELLENT (and drawn green on the conservation chart).
    #[serde(default = "default_conserved_pct")]
    pub conserved_pct: f64,
    /// Percentage graded GOOD.
    #[serde(default = "default_good_pct")]
    pub good_pct: f64,
    /// Restitution graded ELASTIC.
    #[serde(default = "default_elastic_restitution")]
    pub elastic_restitution: f64,
    /// Restitution graded NEAR-ELASTIC.
    #[serde(default = "default_near_elastic_restitution")]
    pub near_elastic_restitution: f64,
}

fn default_conservation_tolerance() -> f64 {
    0.01
}

fn default_conserved_pct() -> f64 {
    99.0
}

fn default_good_pct() -> f64 {
    95.0
}

fn default_elastic_restitution() -> f64 {
    0.99
}

fn default_near_elastic_restitution() -> f64 {
    0.8
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            conservation_tolerance: default_conservation_tolerance(),
            conserved_pct: default_conserved_pct(),
            good_pct: default_good_pct(),
            elastic_restitution: default_elastic_restitution(),
            near_elastic_restitution: default_near_elastic_restitution(),
        }
    }
}

/// Chart rendering behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Render the seven charts concurrently.
    #[serde(default = "default_true")]
    pub concurrent: bool,
    /// Ceiling for a single chart's completion signal.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            concurrent: true,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RenderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Sampling of the velocity-vs-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Seconds between samples.
    #[serde(default = "default_step")]
    pub step_s: f64,
    /// Instant of the collision (s).
    #[serde(default = "default_collision")]
    pub collision_s: f64,
}

fn default_samples() -> usize {
    50
}

fn default_step() -> f64 {
    0.02
}

fn default_collision() -> f64 {
    0.5
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            step_s: default_step(),
            collision_s: default_collision(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Custom banner title for the cover sheet.
    #[serde(default)]
    pub title: Option<String>,
    /// Laboratory name, used as document creator and in the footer.
    #[serde(default = "default_laboratory")]
    pub laboratory: String,
    /// Company written to the document properties.
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub timeline: TimelineSettings,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_laboratory() -> String {
    "Virtual Physics Laboratory".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            laboratory: default_laboratory(),
            company: None,
            thresholds: Thresholds::default(),
            render: RenderSettings::default(),
            timeline: TimelineSettings::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cover banner title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_laboratory(mut self, laboratory: impl Into<String>) -> Self {
        self.laboratory = laboratory.into();
        self
    }

    /// Render charts one at a time instead of concurrently.
    pub fn with_concurrent_render(mut self, concurrent: bool) -> Self {
        self.render.concurrent = concurrent;
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Banner text for the cover sheet.
    pub fn banner_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| self.laboratory.to_uppercase())
    }

    /// Settings handed to the chart catalogue builder.
    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            timeline_samples: self.timeline.samples,
            timeline_step: self.timeline.step_s,
            collision_time: self.timeline.collision_s,
            conserved_pct: self.thresholds.conserved_pct,
        }
    }

    /// Reject settings no report could be built with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ReportError::InvalidConfig(msg));
        let t = &self.thresholds;

        if self.render.timeout_ms == 0 {
            return invalid("render.timeout_ms must be positive".into());
        }
        if self.timeline.samples < 2 {
            return invalid("timeline.samples must be at least 2".into());
        }
        if !(self.timeline.step_s.is_finite() && self.timeline.step_s > 0.0) {
            return invalid("timeline.step_s must be a positive number".into());
        }
        if !self.timeline.collision_s.is_finite() {
            return invalid("timeline.collision_s must be finite".into());
        }
        if !(t.conservation_tolerance.is_finite() && t.conservation_tolerance > 0.0) {
            return invalid("thresholds.conservation_tolerance must be positive".into());
        }
        if !(t.good_pct.is_finite() && t.conserved_pct.is_finite()) || t.good_pct > t.conserved_pct
        {
            return invalid(format!(
                "thresholds.good_pct ({}) must not exceed thresholds.conserved_pct ({})",
                t.good_pct, t.conserved_pct
            ));
        }
        if !(t.near_elastic_restitution.is_finite() && t.elastic_restitution.is_finite())
            || t.near_elastic_restitution > t.elastic_restitution
        {
            return invalid(format!(
                "thresholds.near_elastic_restitution ({}) must not exceed thresholds.elastic_restitution ({})",
                t.near_elastic_restitution, t.elastic_restitution
            ));
        }
        if self.laboratory.trim().is_empty() {
            return invalid("laboratory must not be empty".into());
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
