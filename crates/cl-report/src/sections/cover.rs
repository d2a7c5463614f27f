use super::SheetContext;
use crate::document::{
    ColumnRole, ColumnSpan, KeyValueTable, Sheet, SheetKind, TableCell, TableColumn, TextBlock,
    TextStyle, Tint, TitleBlock, TitleLevel,
};
use crate::format;
use cl_workbook::Rgb;

const BANNER: Tint = Tint::new(Rgb::hex(0x1A237E), Rgb::hex(0xE8EAF6), Rgb::WHITE);
const SUMMARY: Tint = Tint::new(Rgb::hex(0x1976D2), Rgb::hex(0xBBDEFB), Rgb::WHITE);

/// Banner, run date and the summary table.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let m = ctx.metrics;
    let r = ctx.record;
    let wide = ColumnSpan::new(1, 6);

    let mut sheet = Sheet::new(SheetKind::Cover);
    sheet.skip(1);
    sheet.push(
        TitleBlock::new(ctx.config.banner_title(), TitleLevel::Banner, wide, BANNER).with_rows(3),
    );
    sheet.skip(1);
    sheet.push(TitleBlock::new(
        "ELASTIC COLLISION ANALYSIS",
        TitleLevel::Subtitle,
        wide,
        BANNER,
    ));
    sheet.skip(1);
    sheet.push(TextBlock::new(TextStyle::Info, wide, BANNER).lines([
        format!(
            "Experiment date: {}",
            ctx.generated_at.format("%A, %B %-d, %Y")
        ),
        format!("Time: {}", ctx.generated_at.format("%H:%M:%S")),
    ]));
    sheet.skip(2);
    sheet.push(TitleBlock::new("SUMMARY", TitleLevel::Section, wide, SUMMARY));

    let rows = [
        (
            "Total system mass",
            format::quantity(m.total_mass, "kg"),
            "Sum of both cart masses",
        ),
        (
            "Initial relative speed",
            format::quantity(m.approach_speed, "m/s"),
            "Speed of approach",
        ),
        (
            "Total initial energy",
            format::quantity(r.ke_initial, "J"),
            "System kinetic energy before",
        ),
        (
            "Total initial momentum",
            format::quantity(r.p_initial, "kg·m/s"),
            "Linear momentum before",
        ),
        (
            "Energy conservation",
            format::percent(m.energy_conserved_pct),
            "Share of kinetic energy conserved",
        ),
        (
            "Momentum conservation",
            format::percent(m.momentum_conserved_pct),
            "Share of momentum conserved",
        ),
        (
            "Energy error",
            format::quantity(m.energy_error, "J"),
            "Absolute energy difference",
        ),
        (
            "Momentum error",
            format::quantity(m.momentum_error, "kg·m/s"),
            "Absolute momentum difference",
        ),
    ];

    let mut table = KeyValueTable::new(
        vec![
            TableColumn::new(ColumnSpan::new(1, 2), ColumnRole::Label),
            TableColumn::new(ColumnSpan::new(3, 4), ColumnRole::Emphasis),
            TableColumn::new(ColumnSpan::new(5, 6), ColumnRole::Detail),
        ],
        SUMMARY,
    )
    .with_header(["Parameter", "Value", "Interpretation"]);
    for (label, value, meaning) in rows {
        table = table.data_row(vec![
            TableCell::text(label),
            TableCell::text(value),
            TableCell::text(meaning),
        ]);
    }
    sheet.push(table);
    sheet
}
