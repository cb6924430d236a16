//! Casualty and fatality counts conditioned on severity

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::logic::risk::SeverityLabel;

/// Probability that a Serious accident has one fatality
pub const SERIOUS_FATALITY_PROBABILITY: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CasualtyCounts {
    pub casualties: u32,
    pub fatalities: u32,
}

/// Draw counts for an accident of the given severity.
///
/// - Fatal: fatalities in 1..=6, casualties = fatalities + 0..=5
/// - Serious: fatalities 1 with p=0.15 else 0, casualties 1..=8 drawn
///   independently (so fatalities may exceed casualties)
/// - Minor: no fatalities, casualties 0..=3
pub fn generate_counts<R: Rng + ?Sized>(label: SeverityLabel, rng: &mut R) -> CasualtyCounts {
    match label {
        SeverityLabel::Fatal => {
            let fatalities = rng.gen_range(1..=6);
            let casualties = fatalities + rng.gen_range(0..=5);
            CasualtyCounts { casualties, fatalities }
        }
        SeverityLabel::Serious => {
            let fatalities = u32::from(rng.gen_bool(SERIOUS_FATALITY_PROBABILITY));
            let casualties = rng.gen_range(1..=8);
            CasualtyCounts { casualties, fatalities }
        }
        SeverityLabel::Minor => CasualtyCounts {
            casualties: rng.gen_range(0..=3),
            fatalities: 0,
        },
    }
}
