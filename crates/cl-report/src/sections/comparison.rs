use super::{sheet_title, SheetContext};
use crate::document::{
    ColumnRole, ColumnSpan, KeyValueTable, Sheet, SheetKind, TableCell, TableColumn, TableRow,
    Tint,
};
use cl_workbook::Rgb;

const TABLE: Tint = Tint::new(Rgb::hex(0x00BCD4), Rgb::hex(0xB2EBF2), Rgb::WHITE);
const BEFORE: Tint = Tint::new(Rgb::hex(0x0288D1), Rgb::hex(0xB3E5FC), Rgb::WHITE);
const AFTER: Tint = Tint::new(Rgb::hex(0x388E3C), Rgb::hex(0xC8E6C9), Rgb::WHITE);
const CHANGES: Tint = Tint::new(Rgb::hex(0xFF6F00), Rgb::hex(0xFFE0B2), Rgb::WHITE);

/// Side-by-side cart and system quantities before, after and changed.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let r = ctx.record;
    let (c1, c2) = (&ctx.metrics.cart1, &ctx.metrics.cart2);
    let total_mass = ctx.metrics.total_mass;

    let mut sheet = Sheet::new(SheetKind::Comparison);
    sheet.push(sheet_title(
        SheetKind::Comparison,
        "COMPLETE COMPARATIVE TABLE",
        ColumnSpan::new(1, 4),
    ));
    sheet.skip(2);

    let table = KeyValueTable::new(
        vec![
            TableColumn::new(ColumnSpan::single(1), ColumnRole::Label),
            TableColumn::new(ColumnSpan::single(2), ColumnRole::Value),
            TableColumn::new(ColumnSpan::single(3), ColumnRole::Value),
            TableColumn::new(ColumnSpan::single(4), ColumnRole::Emphasis),
        ],
        TABLE,
    )
    .with_header(["Physical quantity", "Cart 1", "Cart 2", "System total"])
    .row(TableRow::band("BEFORE THE COLLISION", BEFORE))
    .data_row(numbers("Mass (kg)", c1.mass, c2.mass, Some(total_mass)))
    .data_row(numbers(
        "Velocity (m/s)",
        c1.velocity_initial,
        c2.velocity_initial,
        None,
    ))
    .data_row(numbers(
        "Momentum (kg·m/s)",
        c1.momentum_initial,
        c2.momentum_initial,
        Some(r.p_initial),
    ))
    .data_row(numbers(
        "Kinetic energy (J)",
        c1.kinetic_initial,
        c2.kinetic_initial,
        Some(r.ke_initial),
    ))
    .row(TableRow::Spacer)
    .row(TableRow::band("AFTER THE COLLISION", AFTER))
    .data_row(numbers("Mass (kg)", c1.mass, c2.mass, Some(total_mass)))
    .data_row(numbers(
        "Velocity (m/s)",
        c1.velocity_final,
        c2.velocity_final,
        None,
    ))
    .data_row(numbers(
        "Momentum (kg·m/s)",
        c1.momentum_final,
        c2.momentum_final,
        Some(r.p_final),
    ))
    .data_row(numbers(
        "Kinetic energy (J)",
        c1.kinetic_final,
        c2.kinetic_final,
        Some(r.ke_final),
    ))
    .row(TableRow::Spacer)
    .row(TableRow::band("CHANGES (Δ)", CHANGES))
    .data_row(numbers(
        "Velocity change (m/s)",
        c1.velocity_delta,
        c2.velocity_delta,
        None,
    ))
    .data_row(numbers(
        "Momentum change (kg·m/s)",
        c1.momentum_delta,
        c2.momentum_delta,
        Some(r.p_final - r.p_initial),
    ))
    .data_row(numbers(
        "Energy change (J)",
        c1.kinetic_delta,
        c2.kinetic_delta,
        Some(r.ke_final - r.ke_initial),
    ));
    sheet.push(table);
    sheet
}

/// A quantity row; `system` is `None` where a system total means nothing.
fn numbers(label: &str, cart1: f64, cart2: f64, system: Option<f64>) -> Vec<TableCell> {
    vec![
        TableCell::text(label),
        TableCell::number(cart1),
        TableCell::number(cart2),
        system.map_or_else(|| TableCell::text("-"), TableCell::number),
    ]
}
