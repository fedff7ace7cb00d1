//! Parcel suitability scoring
//!
//! Pure functions computing the 0-100 overall suitability score from
//! irrigation, soil chemistry, vegetation, field-visit sub-scores, and site
//! risk flags. All functions are total: out-of-range inputs are clamped,
//! never rejected.

use crate::record::{RiskFlags, SoilChemistry, SubScores, VegetationIndices};

/// Component weights of the overall score. They sum to 1.0.
pub const W_IRRIGATION: f64 = 0.25;
pub const W_SOIL_QUALITY: f64 = 0.20;
pub const W_PLANT_HEALTH: f64 = 0.20;
pub const W_WEED: f64 = 0.15;
pub const W_PEST: f64 = 0.10;
pub const W_MANAGEMENT: f64 = 0.10;

/// Additive risk penalties, applied before the final clamp.
pub const FROST_POCKET_PENALTY: f64 = 10.0;
pub const EROSION_PENALTY: f64 = 7.0;
pub const WIND_EXPOSURE_PENALTY: f64 = 5.0;

/// Everything the overall score depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub irrigation_has: bool,
    pub soil: SoilChemistry,
    /// Plant health index, 0-100 (NDVI/vigor composite).
    pub plant_health_index: f64,
    pub weed_score: f64,
    pub pest_score: f64,
    pub management_score: f64,
    pub risk: RiskFlags,
}

/// Clamp `value` into `[min, max]`. Idempotent.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Soil quality, 0-100: half pH closeness to the 6.5 optimum, half the
/// N/P/K mean capped at 100.
pub fn soil_quality_score(soil: &SoilChemistry) -> f64 {
    let ph_score = 100.0 - (6.5 - soil.ph).abs() * 20.0;
    let macro_score = ((soil.n + soil.p + soil.k) / 3.0).min(100.0);
    clamp(ph_score * 0.5 + macro_score * 0.5, 0.0, 100.0)
}

/// Plant health, 0-100, from the vegetation indices: NDVI and vigor weigh
/// equally, waterlogging risk subtracts up to 30 points.
pub fn plant_health_score(indices: &VegetationIndices) -> f64 {
    let ndvi_score = indices.ndvi_mean * 100.0;
    let vigor_score = indices.vigor_index * 100.0;
    let water_penalty = indices.waterlogging_risk * 30.0;
    clamp(ndvi_score * 0.5 + vigor_score * 0.5 - water_penalty, 0.0, 100.0)
}

/// Overall suitability score for a parcel, 0-100.
pub fn overall_score(inputs: &ScoreInputs) -> f64 {
    let sub_scores = SubScores {
        soil_quality: soil_quality_score(&inputs.soil),
        plant_health: inputs.plant_health_index,
        weed: inputs.weed_score,
        pest: inputs.pest_score,
        management: inputs.management_score,
    };
    composite_score(inputs.irrigation_has, &sub_scores, &inputs.risk)
}

/// Weighted combination of already-resolved sub-scores minus the risk
/// penalty, clamped to 0-100. `overall_score` and the load-time resolution
/// path both end up here.
pub fn composite_score(irrigation_has: bool, sub_scores: &SubScores, risk: &RiskFlags) -> f64 {
    let irrigation_score = if irrigation_has { 100.0 } else { 0.0 };

    let base = W_IRRIGATION * irrigation_score
        + W_SOIL_QUALITY * sub_scores.soil_quality
        + W_PLANT_HEALTH * sub_scores.plant_health
        + W_WEED * sub_scores.weed
        + W_PEST * sub_scores.pest
        + W_MANAGEMENT * sub_scores.management;

    clamp(base - risk.penalty(), 0.0, 100.0)
}

/// Traffic-light classification of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Score >= 70
    Good,
    /// 40 <= score < 70
    Moderate,
    /// Score < 40
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Poor
        }
    }
}

/// Same classification for a raw NDVI value (0-1 scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdviBand {
    /// NDVI >= 0.7
    Dense,
    /// 0.4 <= NDVI < 0.7
    Moderate,
    /// NDVI < 0.4
    Sparse,
}

impl NdviBand {
    pub fn from_ndvi(ndvi: f64) -> Self {
        if ndvi >= 0.7 {
            NdviBand::Dense
        } else if ndvi >= 0.4 {
            NdviBand::Moderate
        } else {
            NdviBand::Sparse
        }
    }
}
