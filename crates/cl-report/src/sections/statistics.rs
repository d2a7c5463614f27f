use super::{sheet_title, SheetContext};
use crate::document::{
    ColumnRole, ColumnSpan, KeyValueTable, LineHeight, Sheet, SheetKind, TableCell, TableColumn,
    TextBlock, TextStyle, Tint, TitleBlock, TitleLevel,
};
use crate::format;
use cl_workbook::Rgb;

const ANALYSIS: Tint = Tint::new(Rgb::hex(0x9C27B0), Rgb::hex(0xE1BEE7), Rgb::WHITE);
const CONCLUSIONS: Tint = Tint::new(Rgb::hex(0x2E7D32), Rgb::hex(0xC8E6C9), Rgb::WHITE);
const SPAN: ColumnSpan = ColumnSpan::new(1, 3);

/// Derived-quantity table and six conclusions.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let m = ctx.metrics;
    let mut sheet = Sheet::new(SheetKind::Statistics);
    sheet.push(sheet_title(
        SheetKind::Statistics,
        "STATISTICAL ANALYSIS AND CONCLUSIONS",
        SPAN,
    ));
    sheet.skip(2);

    let rows = [
        (
            "Initial relative speed",
            format::quantity(m.approach_speed, "m/s"),
            "Speed of approach",
        ),
        (
            "Final relative speed",
            format::quantity(m.separation_speed, "m/s"),
            "Speed of separation",
        ),
        (
            "Coefficient of restitution",
            format::measure(m.restitution, ""),
            "e = 1 for an elastic collision",
        ),
        (
            "Total system mass",
            format::quantity(m.total_mass, "kg"),
            "Sum of both masses",
        ),
        (
            "Reduced mass",
            format::quantity(m.reduced_mass, "kg"),
            "Effective mass of the system",
        ),
        (
            "Centre-of-mass velocity",
            format::quantity(m.cm_velocity_initial, "m/s"),
            "Constant velocity of the CM",
        ),
        (
            "Mass ratio (m₁/m₂)",
            format::measure(m.mass_ratio, ""),
            "Proportion of masses",
        ),
        (
            "Energy per unit mass",
            format::measure(m.energy_per_mass, "J/kg"),
            "Specific energy",
        ),
        (
            "Momentum per unit mass",
            format::measure(m.momentum_per_mass, "m/s"),
            "Specific momentum",
        ),
    ];
    let mut table = KeyValueTable::new(
        vec![
            TableColumn::new(ColumnSpan::single(1), ColumnRole::Label),
            TableColumn::new(ColumnSpan::single(2), ColumnRole::Emphasis),
            TableColumn::new(ColumnSpan::single(3), ColumnRole::Detail),
        ],
        ANALYSIS,
    )
    .with_header(["Analysed parameter", "Value", "Interpretation"]);
    for (label, value, meaning) in rows {
        table = table.data_row(vec![
            TableCell::text(label),
            TableCell::Text(value),
            TableCell::text(meaning),
        ]);
    }
    sheet.push(table);

    sheet.skip(2);
    sheet.push(TitleBlock::new(
        "EXPERIMENT CONCLUSIONS",
        TitleLevel::Section,
        SPAN,
        CONCLUSIONS,
    ));
    sheet.push(
        TextBlock::new(TextStyle::Striped, SPAN, CONCLUSIONS)
            .with_line_height(LineHeight::Fixed(35.0))
            .lines(conclusions(ctx)),
    );
    sheet
}

fn conclusions(ctx: &SheetContext<'_>) -> [String; 6] {
    let m = ctx.metrics;
    let restitution = match m.restitution.value() {
        Some(e) if e > ctx.config.thresholds.elastic_restitution => {
            "very close to 1 (ideal elastic collision)"
        }
        Some(_) => "indicating minor energy losses",
        None => "undefined because the carts had no relative motion",
    };
    [
        format!(
            "1. Kinetic energy was conserved at {}, validating the elastic collision model.",
            format::percent(m.energy_conserved_pct)
        ),
        format!(
            "2. Linear momentum was conserved at {}, confirming the law of conservation of momentum.",
            format::percent(m.momentum_conserved_pct)
        ),
        format!(
            "3. The computed coefficient of restitution is {}, {restitution}.",
            format::measure(m.restitution, "")
        ),
        format!(
            "4. The centre-of-mass velocity stayed constant at {} throughout the collision.",
            format::quantity(m.cm_velocity_initial, "m/s")
        ),
        format!(
            "5. The velocity of cart 1 changed by {} and that of cart 2 by {}.",
            format::quantity(m.cart1.velocity_delta, "m/s"),
            format::quantity(m.cart2.velocity_delta, "m/s")
        ),
        format!(
            "6. The mass ratio (m₁/m₂ = {}) shaped the momentum transfer between the carts.",
            format::measure(m.mass_ratio, "")
        ),
    ]
}
