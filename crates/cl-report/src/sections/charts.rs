use super::{sheet_title, SheetContext};
use crate::document::{ChartContent, ColumnSpan, ImagePlacement, PlacedChart, Sheet, SheetKind};
use cl_chart::{ChartId, ChartOutcome};
use std::collections::HashMap;

/// Chart rows: ids with their `[from, to)` columns, and the row height.
const ROWS: [(&[(ChartId, u32, u32)], u32); 3] = [
    (
        &[(ChartId::Velocities, 1, 5), (ChartId::KineticEnergy, 5, 9)],
        20,
    ),
    (
        &[(ChartId::Momentum, 1, 5), (ChartId::VelocityTimeline, 5, 9)],
        20,
    ),
    (
        &[
            (ChartId::InitialEnergySplit, 1, 4),
            (ChartId::FinalEnergySplit, 4, 7),
            (ChartId::Conservation, 7, 10),
        ],
        18,
    ),
];

/// The seven charts in three rows.
pub(crate) fn build(_ctx: &SheetContext<'_>, outcomes: Vec<ChartOutcome>) -> Sheet {
    let mut by_id: HashMap<ChartId, ChartOutcome> =
        outcomes.into_iter().map(|o| (o.id(), o)).collect();

    let mut sheet = Sheet::new(SheetKind::Charts);
    sheet.push(sheet_title(
        SheetKind::Charts,
        "COMPLETE GRAPHICAL ANALYSIS",
        ColumnSpan::new(1, 8),
    ));

    for (charts, height) in ROWS {
        sheet.skip(2);
        let charts = charts
            .iter()
            .map(|&(id, from_col, to_col)| PlacedChart {
                id,
                title: id.title().to_string(),
                from_col,
                to_col,
                content: content(by_id.remove(&id)),
            })
            .collect();
        sheet.push(ImagePlacement { height, charts });
    }
    sheet
}

fn content(outcome: Option<ChartOutcome>) -> ChartContent {
    match outcome {
        Some(ChartOutcome::Rendered(chart)) => ChartContent::Image {
            encoding: chart.encoding,
            data: chart.data,
        },
        Some(ChartOutcome::Skipped { reason, .. }) => ChartContent::Placeholder {
            reason: format!("Chart not available: {reason}"),
        },
        None => ChartContent::Placeholder {
            reason: "Chart not available: not rendered".to_string(),
        },
    }
}
