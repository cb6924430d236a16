//! Severity Classifier
//!
//! Only the risk -> label decision. No types, no scoring.
//! Input: risk score
//! Output: Verdict (label, or rejection inside a dead zone)

use super::rules::SeverityThresholds;
use super::scorer;
use super::tables::RiskTables;
use super::types::{AttributeRecord, SeverityLabel, Verdict};

/// Classify with the standard thresholds
pub fn classify(risk: f64) -> Verdict {
    classify_with_thresholds(risk, &SeverityThresholds::default())
}

/// Dead zones are checked first; a label is only emitted outside them.
pub fn classify_with_thresholds(risk: f64, thresholds: &SeverityThresholds) -> Verdict {
    if thresholds.in_dead_zone(risk) {
        return Verdict::Rejected;
    }

    let label = if risk >= thresholds.fatal_min {
        SeverityLabel::Fatal
    } else if risk >= thresholds.serious_min {
        SeverityLabel::Serious
    } else {
        SeverityLabel::Minor
    };

    Verdict::Accepted(label)
}

/// Score and classify a record in one step
pub fn label_record(
    record: &AttributeRecord,
    tables: &RiskTables,
    thresholds: &SeverityThresholds,
) -> Verdict {
    classify_with_thresholds(scorer::score_with_tables(record, tables), thresholds)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(classify(0.0), Verdict::Accepted(SeverityLabel::Minor));
        assert_eq!(classify(0.2799), Verdict::Accepted(SeverityLabel::Minor));
        assert_eq!(classify(0.28), Verdict::Rejected);
        assert_eq!(classify(0.3999), Verdict::Rejected);
        assert_eq!(classify(0.40), Verdict::Accepted(SeverityLabel::Serious));
        assert_eq!(classify(0.5599), Verdict::Accepted(SeverityLabel::Serious));
        assert_eq!(classify(0.56), Verdict::Rejected);
        assert_eq!(classify(0.6799), Verdict::Rejected);
        assert_eq!(classify(0.68), Verdict::Accepted(SeverityLabel::Fatal));
        assert_eq!(classify(5.0), Verdict::Accepted(SeverityLabel::Fatal));
    }

    #[test]
    fn test_dead_zones_never_labelled() {
        // Sweep [0, 1.5) in 1e-4 steps
        for i in 0..15_000 {
            let risk = i as f64 / 10_000.0;
            let verdict = classify(risk);
            let dead = (0.28..0.40).contains(&risk) || (0.56..0.68).contains(&risk);
            assert_eq!(verdict.is_rejected(), dead, "risk = {}", risk);
        }
    }

    #[test]
    fn test_accepting_bands_partition() {
        for i in 0..15_000 {
            let risk = i as f64 / 10_000.0;
            let expected = if risk < 0.28 {
                Some(SeverityLabel::Minor)
            } else if (0.40..0.56).contains(&risk) {
                Some(SeverityLabel::Serious)
            } else if risk >= 0.68 {
                Some(SeverityLabel::Fatal)
            } else {
                None
            };
            assert_eq!(classify(risk).label(), expected, "risk = {}", risk);
        }
    }

    #[test]
    fn test_label_record_scenarios() {
        let tables = RiskTables::standard();
        let thresholds = SeverityThresholds::default();

        let worst = AttributeRecord {
            weather: "Stormy".to_string(),
            road_condition: "Damaged".to_string(),
            lighting: "Dark".to_string(),
            road_type: "National Highway".to_string(),
            vehicle_type: "Truck".to_string(),
            location_detail: "Curve".to_string(),
            speed_limit: 110,
            driver_age: 19,
            alcohol: "Yes".to_string(),
            license_status: "None".to_string(),
            num_vehicles: 5,
            time_of_day: "02:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            label_record(&worst, tables, &thresholds),
            Verdict::Accepted(SeverityLabel::Fatal)
        );

        let calm = AttributeRecord::default();
        assert_eq!(
            label_record(&calm, tables, &thresholds),
            Verdict::Accepted(SeverityLabel::Minor)
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = SeverityThresholds {
            minor_max: 0.1,
            serious_min: 0.2,
            serious_max: 0.3,
            fatal_min: 0.4,
        };
        assert_eq!(
            classify_with_thresholds(0.15, &thresholds),
            Verdict::Rejected
        );
        assert_eq!(
            classify_with_thresholds(0.25, &thresholds),
            Verdict::Accepted(SeverityLabel::Serious)
        );
    }
}
