//! Intervention targeting simulation
//!
//! What-if projection of parcel scores under planned interventions. Rows
//! come back worst parcel first, which is the order an investment-targeting
//! review walks them in.

use crate::record::Orchard;
use crate::scoring::clamp;

/// Score uplift from adding irrigation.
pub const IRRIGATION_DELTA: f64 = 15.0;

/// Score uplift from improved fertilization.
pub const FERTILIZATION_DELTA: f64 = 10.0;

/// Planned interventions to simulate across the portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interventions {
    pub irrigation: bool,
    pub fertilization: bool,
}

impl Interventions {
    /// Combined score delta; interventions stack additively.
    pub fn delta(&self) -> f64 {
        let mut delta = 0.0;
        if self.irrigation {
            delta += IRRIGATION_DELTA;
        }
        if self.fertilization {
            delta += FERTILIZATION_DELTA;
        }
        delta
    }
}

/// One parcel in the targeting table.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingRow {
    pub orchard_id: String,
    pub crop: String,
    pub area_ha: f64,
    pub score: f64,
    /// Score after the simulated interventions, capped at 100.
    pub projected: f64,
}

impl TargetingRow {
    pub fn uplift(&self) -> f64 {
        self.projected - self.score
    }
}

/// Project every parcel's score under the given interventions, sorted by
/// current score ascending (weakest parcels first).
pub fn simulate(orchards: &[Orchard], interventions: &Interventions) -> Vec<TargetingRow> {
    let delta = interventions.delta();

    let mut rows: Vec<TargetingRow> = orchards
        .iter()
        .map(|orchard| TargetingRow {
            orchard_id: orchard.orchard_id.clone(),
            crop: orchard.crop.clone(),
            area_ha: orchard.area_ha,
            score: orchard.score,
            projected: clamp(orchard.score + delta, 0.0, 100.0),
        })
        .collect();

    rows.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
    rows
}
