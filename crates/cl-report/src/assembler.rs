//! Builds the seven-sheet [`ReportDocument`].

use crate::config::ReportConfig;
use crate::document::ReportDocument;
use crate::sections::{self, SheetContext};
use chrono::{DateTime, FixedOffset};
use cl_chart::ChartOutcome;
use cl_common::ExperimentRecord;
use cl_math::DerivedMetrics;
use tracing::debug;

/// Lays out the report for one experiment.
///
/// Assembly is pure: the same record, metrics, chart outcomes and timestamp
/// always produce the same document.
pub struct DocumentAssembler<'a> {
    config: &'a ReportConfig,
    generated_at: DateTime<FixedOffset>,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a ReportConfig, generated_at: DateTime<FixedOffset>) -> Self {
        Self {
            config,
            generated_at,
        }
    }

    /// Assemble all sheets in workbook order.
    ///
    /// `charts` holds one outcome per catalogue chart; skipped or missing
    /// charts become placeholder notes on the Charts sheet.
    pub fn assemble(
        &self,
        record: &ExperimentRecord,
        metrics: &DerivedMetrics,
        charts: Vec<ChartOutcome>,
    ) -> ReportDocument {
        let ctx = SheetContext {
            record,
            metrics,
            config: self.config,
            generated_at: self.generated_at,
        };

        let sheets = vec![
            sections::cover::build(&ctx),
            sections::data::build(&ctx),
            sections::charts::build(&ctx, charts),
            sections::formulas::build(&ctx),
            sections::statistics::build(&ctx),
            sections::comparison::build(&ctx),
            sections::notes::build(&ctx),
        ];

        for sheet in &sheets {
            debug!(
                sheet = sheet.name(),
                regions = sheet.regions().len(),
                rows = sheet.cursor().position(),
                "sheet assembled"
            );
        }

        ReportDocument {
            title: "Elastic Collision Report".to_string(),
            subject: "Elastic collision analysis".to_string(),
            creator: self.config.laboratory.clone(),
            company: self.config.company.clone(),
            generated_at: self.generated_at,
            sheets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Region, SheetKind};
    use chrono::TimeZone;
    use cl_chart::{ChartId, SkipReason};

    fn record() -> ExperimentRecord {
        ExperimentRecord {
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
        }
    }

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 5, 0)
            .unwrap()
    }

    fn skipped_all() -> Vec<ChartOutcome> {
        ChartId::ALL
            .into_iter()
            .map(|id| ChartOutcome::Skipped {
                id,
                reason: SkipReason::NothingToSplit,
            })
            .collect()
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let config = ReportConfig::default();
        let record = record();
        let metrics = DerivedMetrics::compute(&record);
        let assembler = DocumentAssembler::new(&config, at());

        let a = assembler.assemble(&record, &metrics, skipped_all());
        let b = assembler.assemble(&record, &metrics, skipped_all());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sheet_order_and_titles() {
        let config = ReportConfig::default();
        let record = record();
        let metrics = DerivedMetrics::compute(&record);
        let doc = DocumentAssembler::new(&config, at()).assemble(&record, &metrics, vec![]);

        let kinds: Vec<SheetKind> = doc.sheets.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, SheetKind::ALL.to_vec());
        for sheet in &doc.sheets {
            assert!(matches!(sheet.regions()[0].region, Region::Title(_)));
            assert!(!sheet.title().unwrap_or_default().is_empty());
        }
        assert_eq!(doc.placeholder_ids(), ChartId::ALL.to_vec());
        assert_eq!(doc.image_count(), 0);
    }

    #[test]
    fn test_cover_banner_uses_config_title() {
        let config = ReportConfig::default().with_title("CART LAB");
        let record = record();
        let metrics = DerivedMetrics::compute(&record);
        let doc = DocumentAssembler::new(&config, at()).assemble(&record, &metrics, vec![]);

        let cover = doc.sheet(SheetKind::Cover).unwrap();
        assert_eq!(cover.title(), Some("CART LAB"));
        assert_eq!(cover.regions()[0].first_row, 2);
        assert_eq!(cover.regions()[0].last_row, 4);
        assert!(cover
            .texts()
            .contains(&"Experiment date: Friday, October 16, 2026".to_string()));
    }
}
