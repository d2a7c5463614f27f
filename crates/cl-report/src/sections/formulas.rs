use super::{sheet_title, SheetContext};
use crate::document::{
    ColumnRole, ColumnSpan, KeyValueTable, Sheet, SheetKind, TableCell, TableColumn, TextBlock,
    TextStyle, Tint,
};
use crate::format::{fixed, plain, DECIMALS};
use cl_workbook::Rgb;

const ENTRY: Tint = Tint::new(Rgb::hex(0xED7D31), Rgb::hex(0xFCE4D6), Rgb::hex(0xF2F2F2));
const SPAN: ColumnSpan = ColumnSpan::new(1, 3);

struct Entry {
    title: &'static str,
    formula: &'static str,
    calculation: String,
    value: f64,
}

/// Ten worked formulas, each with the record's numbers substituted.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let mut sheet = Sheet::new(SheetKind::Formulas);
    sheet.push(sheet_title(
        SheetKind::Formulas,
        "FORMULAS AND DETAILED CALCULATIONS",
        SPAN,
    ));
    sheet.skip(2);

    for (i, entry) in entries(ctx).into_iter().enumerate() {
        sheet.push(
            KeyValueTable::new(
                vec![
                    TableColumn::new(ColumnSpan::new(1, 2), ColumnRole::Heading),
                    TableColumn::new(ColumnSpan::single(3), ColumnRole::Highlight),
                ],
                ENTRY,
            )
            .data_row(vec![
                TableCell::Text(format!("{}. {}", i + 1, entry.title)),
                TableCell::number(entry.value),
            ]),
        );
        sheet.push(
            TextBlock::new(TextStyle::Formula, SPAN, ENTRY)
                .line(format!("Formula: {}", entry.formula)),
        );
        sheet.push(
            TextBlock::new(TextStyle::Calculation, SPAN, ENTRY)
                .line(format!("Calculation: {}", entry.calculation)),
        );
        sheet.skip(2);
    }
    sheet
}

fn entries(ctx: &SheetContext<'_>) -> Vec<Entry> {
    let r = ctx.record;
    let m = ctx.metrics;
    let (m1, m2) = (plain(r.m1), plain(r.m2));
    let (v1, v2) = (plain(r.v1), plain(r.v2));
    let (v1f, v2f) = (fixed(r.v1f, DECIMALS), fixed(r.v2f, DECIMALS));

    vec![
        Entry {
            title: "Final velocity of cart 1",
            formula: "v₁f = ((m₁ - m₂) × v₁ᵢ + 2 × m₂ × v₂ᵢ) / (m₁ + m₂)",
            calculation: format!("(({m1} - {m2}) × {v1} + 2 × {m2} × {v2}) / ({m1} + {m2})"),
            value: r.v1f,
        },
        Entry {
            title: "Final velocity of cart 2",
            formula: "v₂f = ((m₂ - m₁) × v₂ᵢ + 2 × m₁ × v₁ᵢ) / (m₁ + m₂)",
            calculation: format!("(({m2} - {m1}) × {v2} + 2 × {m1} × {v1}) / ({m1} + {m2})"),
            value: r.v2f,
        },
        Entry {
            title: "Total initial kinetic energy",
            formula: "KEᵢ = ½ × m₁ × v₁ᵢ² + ½ × m₂ × v₂ᵢ²",
            calculation: format!("½ × {m1} × {v1}² + ½ × {m2} × {v2}²"),
            value: r.ke_initial,
        },
        Entry {
            title: "Total final kinetic energy",
            formula: "KEf = ½ × m₁ × v₁f² + ½ × m₂ × v₂f²",
            calculation: format!("½ × {m1} × {v1f}² + ½ × {m2} × {v2f}²"),
            value: r.ke_final,
        },
        Entry {
            title: "Initial linear momentum",
            formula: "Pᵢ = m₁ × v₁ᵢ + m₂ × v₂ᵢ",
            calculation: format!("{m1} × {v1} + {m2} × {v2}"),
            value: r.p_initial,
        },
        Entry {
            title: "Final linear momentum",
            formula: "Pf = m₁ × v₁f + m₂ × v₂f",
            calculation: format!("{m1} × {v1f} + {m2} × {v2f}"),
            value: r.p_final,
        },
        Entry {
            title: "Velocity change of cart 1",
            formula: "Δv₁ = v₁f - v₁ᵢ",
            calculation: format!("{v1f} - {v1}"),
            value: m.cart1.velocity_delta,
        },
        Entry {
            title: "Velocity change of cart 2",
            formula: "Δv₂ = v₂f - v₂ᵢ",
            calculation: format!("{v2f} - {v2}"),
            value: m.cart2.velocity_delta,
        },
        Entry {
            title: "Energy error",
            formula: "|KEᵢ - KEf|",
            calculation: format!(
                "|{} - {}|",
                fixed(r.ke_initial, DECIMALS),
                fixed(r.ke_final, DECIMALS)
            ),
            value: m.energy_error,
        },
        Entry {
            title: "Momentum error",
            formula: "|Pᵢ - Pf|",
            calculation: format!(
                "|{} - {}|",
                fixed(r.p_initial, DECIMALS),
                fixed(r.p_final, DECIMALS)
            ),
            value: m.momentum_error,
        },
    ]
}
