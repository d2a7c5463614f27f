use super::{sheet_title, SheetContext};
use crate::document::{
    ColumnRole, ColumnSpan, KeyValueTable, Sheet, SheetKind, TableCell, TableColumn, Tint,
    TitleBlock, TitleLevel,
};
use crate::format;
use cl_common::Cart;
use cl_workbook::Rgb;

const INITIAL_BAND: Tint = Tint::new(Rgb::hex(0x5B9BD5), Rgb::hex(0xD9E1F2), Rgb::WHITE);
const INITIAL: Tint = Tint::new(Rgb::hex(0x4472C4), Rgb::hex(0xD9E1F2), Rgb::WHITE);
const RESULTS: Tint = Tint::new(Rgb::hex(0x70AD47), Rgb::hex(0xE2EFDA), Rgb::WHITE);
const CHECKS: Tint = Tint::new(Rgb::hex(0xFFC000), Rgb::hex(0xFFF2CC), Rgb::WHITE);

const SPAN: ColumnSpan = ColumnSpan::new(1, 3);

/// Initial conditions, results and the conservation checks.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let m = ctx.metrics;
    let mut sheet = Sheet::new(SheetKind::ExperimentalData);
    sheet.push(sheet_title(
        SheetKind::ExperimentalData,
        "COMPLETE EXPERIMENTAL DATA",
        SPAN,
    ));

    sheet.skip(2);
    sheet.push(heading("INITIAL CONDITIONS", INITIAL_BAND));
    let mut initial = quantity_table(INITIAL, ColumnRole::Value);
    for cart in Cart::ALL {
        let c = m.cart(cart);
        let n = cart.index();
        initial = initial
            .data_row(row(format!("{cart} mass (m{n})"), c.mass, "kg"))
            .data_row(row(
                format!("{cart} initial velocity (v{n}i)"),
                c.velocity_initial,
                "m/s",
            ))
            .data_row(row(
                format!("{cart} initial momentum"),
                c.momentum_initial,
                "kg·m/s",
            ))
            .data_row(row(
                format!("{cart} initial kinetic energy"),
                c.kinetic_initial,
                "J",
            ));
    }
    sheet.push(initial);

    sheet.skip(2);
    sheet.push(heading("RESULTS AFTER THE COLLISION", RESULTS));
    let mut results = quantity_table(RESULTS, ColumnRole::Emphasis);
    for cart in Cart::ALL {
        let c = m.cart(cart);
        let n = cart.index();
        results = results
            .data_row(row(
                format!("{cart} final velocity (v{n}f)"),
                c.velocity_final,
                "m/s",
            ))
            .data_row(row(
                format!("{cart} velocity change (Δv{n})"),
                c.velocity_delta,
                "m/s",
            ))
            .data_row(row(
                format!("{cart} final momentum"),
                c.momentum_final,
                "kg·m/s",
            ))
            .data_row(row(
                format!("{cart} final kinetic energy"),
                c.kinetic_final,
                "J",
            ));
    }
    sheet.push(results);

    sheet.skip(2);
    sheet.push(heading("CONSERVATION LAW VERIFICATION", CHECKS));
    let tolerance = ctx.config.thresholds.conservation_tolerance;
    let checks = KeyValueTable::new(
        vec![
            TableColumn::new(ColumnSpan::single(1), ColumnRole::Label),
            TableColumn::new(ColumnSpan::single(2), ColumnRole::Value),
            TableColumn::new(ColumnSpan::single(3), ColumnRole::Detail),
        ],
        CHECKS,
    )
    .with_header(["Conservation law", "Status", "Absolute error"])
    .data_row(check(
        "Energy conservation",
        m.energy_verified(tolerance),
        m.energy_error,
        "J",
    ))
    .data_row(check(
        "Momentum conservation",
        m.momentum_verified(tolerance),
        m.momentum_error,
        "kg·m/s",
    ));
    sheet.push(checks);
    sheet
}

fn heading(text: &str, tint: Tint) -> TitleBlock {
    TitleBlock::new(text, TitleLevel::Heading, SPAN, tint)
}

fn quantity_table(tint: Tint, value_role: ColumnRole) -> KeyValueTable {
    KeyValueTable::new(
        vec![
            TableColumn::new(ColumnSpan::single(1), ColumnRole::Label),
            TableColumn::new(ColumnSpan::single(2), value_role),
            TableColumn::new(ColumnSpan::single(3), ColumnRole::Detail),
        ],
        tint,
    )
    .with_header(["Parameter", "Value", "Unit"])
}

fn row(label: String, value: f64, unit: &str) -> Vec<TableCell> {
    vec![
        TableCell::Text(label),
        TableCell::number(value),
        TableCell::text(unit),
    ]
}

fn check(law: &str, verified: bool, error: f64, unit: &str) -> Vec<TableCell> {
    let status = if verified {
        "✓ Verified"
    } else {
        "✗ NOT verified"
    };
    vec![
        TableCell::text(law),
        TableCell::Status {
            verified,
            text: status.to_string(),
        },
        TableCell::Text(format!(
            "{} {unit}",
            format::fixed(error, format::ERROR_DECIMALS)
        )),
    ]
}
