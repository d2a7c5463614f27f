//! One builder per report sheet.

pub(crate) mod charts;
pub(crate) mod comparison;
pub(crate) mod cover;
pub(crate) mod data;
pub(crate) mod formulas;
pub(crate) mod notes;
pub(crate) mod statistics;

use crate::config::ReportConfig;
use crate::document::{ColumnSpan, SheetKind, Tint, TitleBlock, TitleLevel};
use chrono::{DateTime, FixedOffset};
use cl_common::ExperimentRecord;
use cl_math::DerivedMetrics;
use cl_workbook::Rgb;

/// Inputs shared by every sheet builder.
pub(crate) struct SheetContext<'a> {
    pub record: &'a ExperimentRecord,
    pub metrics: &'a DerivedMetrics,
    pub config: &'a ReportConfig,
    pub generated_at: DateTime<FixedOffset>,
}

/// Tint for sheet titles: the tab colour with neutral companions.
pub(crate) fn sheet_tint(kind: SheetKind) -> Tint {
    let strong = match kind {
        SheetKind::ExperimentalData => Rgb::hex(0x203864),
        other => other.tab_color(),
    };
    Tint::new(strong, Rgb::hex(0xF2F2F2), Rgb::WHITE)
}

/// The title block every sheet opens with.
pub(crate) fn sheet_title(kind: SheetKind, text: &str, span: ColumnSpan) -> TitleBlock {
    TitleBlock::new(text, TitleLevel::Sheet, span, sheet_tint(kind))
}
