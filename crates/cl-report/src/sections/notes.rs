use super::{sheet_title, SheetContext};
use crate::config::Thresholds;
use crate::document::{
    ColumnSpan, LineHeight, Sheet, SheetKind, TextBlock, TextStyle, Tint, TitleBlock, TitleLevel,
};
use crate::format;
use cl_math::Measure;
use cl_workbook::Rgb;

const NOTES: Tint = Tint::new(Rgb::hex(0xFF9800), Rgb::hex(0xFFE0B2), Rgb::WHITE);
const FOOTER: Tint = Tint::new(Rgb::hex(0x666666), Rgb::hex(0xF5F5F5), Rgb::WHITE);
const SPAN: ColumnSpan = ColumnSpan::single(1);

const NOTE_HEIGHT: LineHeight = LineHeight::ByLength {
    short: 25.0,
    long: 40.0,
    limit: 80,
};

/// Seven note sections and the generation footer.
pub(crate) fn build(ctx: &SheetContext<'_>) -> Sheet {
    let mut sheet = Sheet::new(SheetKind::Notes);
    sheet.push(sheet_title(
        SheetKind::Notes,
        "TECHNICAL NOTES AND RECOMMENDATIONS",
        SPAN,
    ));
    sheet.skip(2);

    for (title, lines) in sections(ctx) {
        sheet.push(TitleBlock::new(title, TitleLevel::Heading, SPAN, NOTES));
        sheet.push(
            TextBlock::new(TextStyle::Striped, SPAN, NOTES)
                .with_line_height(NOTE_HEIGHT)
                .lines(lines),
        );
        sheet.skip(2);
    }

    sheet.skip(2);
    sheet.push(
        TextBlock::new(TextStyle::Footer, SPAN, FOOTER)
            .with_line_height(LineHeight::Fixed(30.0))
            .line(format!(
                "Report generated on {} | {}",
                ctx.generated_at.format("%A, %B %-d, %Y %H:%M:%S"),
                ctx.config.laboratory
            )),
    );
    sheet
}

fn sections(ctx: &SheetContext<'_>) -> Vec<(&'static str, Vec<String>)> {
    let r = ctx.record;
    let m = ctx.metrics;
    let t = &ctx.config.thresholds;
    let tolerance = format::plain(t.conservation_tolerance);

    let ideal = m
        .energy_conserved_pct
        .value()
        .is_some_and(|pct| pct >= t.conserved_pct);

    vec![
        (
            "ABOUT THE EXPERIMENT",
            owned(&[
                "This experiment simulates an ideal elastic collision between two carts on a frictionless track.",
                "Real collisions always lose some energy to friction, deformation and sound.",
                "The values obtained represent the ideal theoretical behaviour of the system.",
            ]),
        ),
        (
            "SOURCES OF ERROR",
            owned(&[
                "• Friction on the rail or contact surface",
                "• Air resistance (negligible at low speeds)",
                "• Deformation of the carts during impact",
                "• Measurement errors in masses and velocities",
                "• Limited precision of the measuring instruments",
            ]),
        ),
        (
            "VALIDATION CRITERIA",
            vec![
                format!(
                    "• Energy conservation: {} {}",
                    format::percent(m.energy_conserved_pct),
                    conservation_grade(m.energy_conserved_pct, t)
                ),
                format!(
                    "• Momentum conservation: {} {}",
                    format::percent(m.momentum_conserved_pct),
                    conservation_grade(m.momentum_conserved_pct, t)
                ),
                format!(
                    "• Coefficient of restitution: {} {}",
                    format::measure(m.restitution, ""),
                    restitution_grade(m.restitution, t)
                ),
                format!("• Energy error < {tolerance} J to be considered negligible"),
                format!("• Momentum error < {tolerance} kg·m/s to be considered negligible"),
            ],
        ),
        (
            "KEY CONCEPTS",
            owned(&[
                "• Elastic collision: both momentum and kinetic energy are conserved",
                "• Linear momentum (p): product of mass and velocity (p = mv)",
                "• Kinetic energy (KE): energy of motion (KE = ½mv²)",
                "• Centre of mass: point where the whole mass of the system can be considered concentrated",
                "• Coefficient of restitution: measure of how elastic a collision is (e = 1 when elastic)",
                "• Reduced mass: effective mass in two-body problems (μ = m₁m₂/(m₁+m₂))",
            ]),
        ),
        (
            "PRACTICAL APPLICATIONS",
            owned(&[
                "• Vehicle safety design (airbags, crumple zones)",
                "• Collisions in sports (billiards, bowling, hockey)",
                "• Particle physics (collisions in accelerators)",
                "• Dynamics of asteroids and planets",
                "• Design of shock absorbers and suspension systems",
                "• Physics engines in games and simulations",
            ]),
        ),
        (
            "RECOMMENDATIONS FOR IMPROVEMENT",
            owned(&[
                "1. Repeat the experiment several times and average the results",
                "2. Use different mass combinations to look for patterns",
                "3. Vary the initial velocities systematically",
                "4. Compare with inelastic collisions (objects that stick together)",
                "5. Record the experimental conditions (temperature, surface, etc.)",
                "6. Calibrate the measuring instruments before each series of experiments",
            ]),
        ),
        (
            "FINAL REFLECTIONS",
            vec![
                format!(
                    "For this specific experiment with m₁={} kg, v₁={} m/s, m₂={} kg, v₂={} m/s:",
                    format::plain(r.m1),
                    format::plain(r.v1),
                    format::plain(r.m2),
                    format::plain(r.v2)
                ),
                format!(
                    "• {} experienced the largest change in velocity",
                    m.largest_velocity_change()
                ),
                format!(
                    "• After the collision most of the energy was carried by {}",
                    m.dominant_final_energy()
                ),
                format!(
                    "• The system {}",
                    if ideal {
                        "behaved almost ideally"
                    } else {
                        "showed measurable energy losses"
                    }
                ),
                "• The results are consistent with the theoretical predictions of classical mechanics"
                    .to_string(),
            ],
        ),
    ]
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// Grade a conservation percentage.
pub(crate) fn conservation_grade(pct: Measure, t: &Thresholds) -> &'static str {
    match pct.value() {
        Some(p) if p >= t.conserved_pct => "✓ EXCELLENT",
        Some(p) if p >= t.good_pct => "✓ GOOD",
        _ => "⚠ REVIEW",
    }
}

/// Grade a coefficient of restitution.
pub(crate) fn restitution_grade(e: Measure, t: &Thresholds) -> &'static str {
    match e.value() {
        Some(e) if e >= t.elastic_restitution => "✓ ELASTIC",
        Some(e) if e >= t.near_elastic_restitution => "~ NEAR-ELASTIC",
        Some(_) => "⚠ INELASTIC",
        None => "⚠ UNDEFINED",
    }
}
