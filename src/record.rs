//! Parcel and registry record types
//!
//! Fixture data arrives with a number of optional fields that the dashboard
//! era read defensively at every call site. Here the optionality lives only
//! in the raw mirror types (`RawOrchard` and friends); `RawOrchard::resolve`
//! applies the documented defaults exactly once, so everything downstream
//! works with fully-populated, immutable records.

use serde::{Deserialize, Serialize};

use crate::scoring::{self, clamp};

/// Soil quality sub-score used when soil chemistry is absent from a fixture.
pub const DEFAULT_SOIL_QUALITY: f64 = 60.0;

/// Plant health sub-score used when both the fixture sub-score and the
/// vegetation indices are absent.
pub const DEFAULT_PLANT_HEALTH: f64 = 60.0;

/// Default for the weed, pest, and management field-visit sub-scores.
pub const DEFAULT_FIELD_SCORE: f64 = 70.0;

/// Topsoil chemistry measured at the parcel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SoilChemistry {
    /// Soil pH (H2O); the scoring optimum sits at 6.5
    #[serde(default)]
    pub ph: f64,
    /// Nitrogen availability (0-100)
    #[serde(default)]
    pub n: f64,
    /// Phosphorus availability (0-100)
    #[serde(default)]
    pub p: f64,
    /// Potassium availability (0-100)
    #[serde(default)]
    pub k: f64,
}

/// Remote-sensing vegetation indices for the parcel, all on a 0-1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct VegetationIndices {
    #[serde(default)]
    pub ndvi_mean: f64,
    #[serde(default)]
    pub vigor_index: f64,
    #[serde(default)]
    pub waterlogging_risk: f64,
}

/// Site risk conditions that penalise the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RiskFlags {
    #[serde(default)]
    pub frost_pocket: bool,
    #[serde(default)]
    pub erosion: bool,
    #[serde(default)]
    pub wind_exposure: bool,
}

impl RiskFlags {
    /// Additive score penalty: frost pocket -10, erosion -7, wind exposure -5.
    pub fn penalty(&self) -> f64 {
        let mut penalty = 0.0;
        if self.frost_pocket {
            penalty += scoring::FROST_POCKET_PENALTY;
        }
        if self.erosion {
            penalty += scoring::EROSION_PENALTY;
        }
        if self.wind_exposure {
            penalty += scoring::WIND_EXPOSURE_PENALTY;
        }
        penalty
    }
}

/// The five weighted components of the overall score, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub soil_quality: f64,
    pub plant_health: f64,
    pub weed: f64,
    pub pest: f64,
    pub management: f64,
}

/// A fully-resolved orchard parcel.
///
/// Created once at data-load time, never mutated. The overall `score` is
/// recomputed from the resolved components rather than trusted from the
/// fixture, so the scoring engine stays the single source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Orchard {
    pub orchard_id: String,
    pub crop: String,
    pub region: String,
    pub municipality: String,
    pub area_ha: f64,
    pub age_years: f64,
    pub irrigated: bool,
    pub soil: SoilChemistry,
    pub indices: VegetationIndices,
    pub risk: RiskFlags,
    /// Disease/insect condition flags, e.g. `disease_alternaria` or
    /// `insect_codling_moth`.
    pub flags: Vec<String>,
    pub sub_scores: SubScores,
    /// Derived overall suitability score, 0-100.
    pub score: f64,
}

impl Orchard {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Irrigation block as stored in the fixture; only the `has` bit matters
/// for scoring and filtering.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawIrrigation {
    #[serde(default)]
    pub has: bool,
}

/// Parcel properties exactly as they appear in the GeoJSON fixture,
/// with every historically-optional field modelled as `Option`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrchard {
    pub orchard_id: String,
    pub crop: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub municipality: String,
    #[serde(default)]
    pub area_ha: Option<f64>,
    #[serde(default)]
    pub age_years: Option<f64>,
    #[serde(default)]
    pub irrigation: Option<RawIrrigation>,
    #[serde(default)]
    pub soil: Option<SoilChemistry>,
    #[serde(default)]
    pub indices: Option<VegetationIndices>,
    #[serde(default)]
    pub risk: Option<RiskFlags>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, rename = "soilQualityScore")]
    pub soil_quality_score: Option<f64>,
    #[serde(default, rename = "plantHealthScore")]
    pub plant_health_score: Option<f64>,
    #[serde(default, rename = "weedScore")]
    pub weed_score: Option<f64>,
    #[serde(default, rename = "pestScore")]
    pub pest_score: Option<f64>,
    #[serde(default, rename = "managementScore")]
    pub management_score: Option<f64>,
    /// Overall score carried by some fixtures; ignored in favour of a
    /// recompute during resolution.
    #[serde(default)]
    pub score: Option<f64>,
}

impl RawOrchard {
    /// Resolve defaults once and derive the overall score.
    ///
    /// Defaulting rules:
    /// - soil chemistry / vegetation indices: zeroed when absent
    /// - soil quality: fixture value, else computed from chemistry when the
    ///   chemistry block is present, else 60
    /// - plant health: fixture value, else computed from the indices when
    ///   present, else 60
    /// - weed / pest / management: fixture value, else 70
    ///
    /// Fixture-supplied sub-scores are clamped to 0-100.
    pub fn resolve(self) -> Orchard {
        let soil = self.soil.unwrap_or_default();
        let indices = self.indices.unwrap_or_default();
        let risk = self.risk.unwrap_or_default();
        let irrigated = self.irrigation.map_or(false, |i| i.has);

        let soil_quality = match self.soil_quality_score {
            Some(v) => clamp(v, 0.0, 100.0),
            None if self.soil.is_some() => scoring::soil_quality_score(&soil),
            None => DEFAULT_SOIL_QUALITY,
        };
        let plant_health = match self.plant_health_score {
            Some(v) => clamp(v, 0.0, 100.0),
            None if self.indices.is_some() => scoring::plant_health_score(&indices),
            None => DEFAULT_PLANT_HEALTH,
        };
        let sub_scores = SubScores {
            soil_quality,
            plant_health,
            weed: resolve_field_score(self.weed_score),
            pest: resolve_field_score(self.pest_score),
            management: resolve_field_score(self.management_score),
        };

        let score = scoring::composite_score(irrigated, &sub_scores, &risk);

        Orchard {
            orchard_id: self.orchard_id,
            crop: self.crop,
            region: self.region,
            municipality: self.municipality,
            area_ha: self.area_ha.unwrap_or(0.0),
            age_years: self.age_years.unwrap_or(0.0),
            irrigated,
            soil,
            indices,
            risk,
            flags: self.flags,
            sub_scores,
            score,
        }
    }
}

fn resolve_field_score(value: Option<f64>) -> f64 {
    value.map_or(DEFAULT_FIELD_SCORE, |v| clamp(v, 0.0, 100.0))
}

/// Farmer risk classification in the loan portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    High,
    Observation,
    Controlled,
}

/// Field-visit state of a farmer's parcels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckupStatus {
    Checked,
    NotChecked,
    InProgress,
}

/// One farmer in the loan registry fixture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub surname: String,
    #[serde(default, rename = "nameEn")]
    pub name_en: String,
    #[serde(default, rename = "surnameEn")]
    pub surname_en: String,
    /// Portfolio label, `CB` or `SME`; compared case-insensitively.
    pub portfolio: String,
    #[serde(rename = "riskStatus")]
    pub risk_status: RiskStatus,
    pub crop: String,
    pub area: f64,
    #[serde(default, rename = "loanAmount")]
    pub loan_amount: f64,
    pub region: String,
    pub municipality: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default, rename = "checkupStatus")]
    pub checkup_status: Option<CheckupStatus>,
    /// Agronomist score on a 0-10 scale, present once a checkup happened.
    #[serde(default)]
    pub score: Option<f64>,
}

impl Farmer {
    pub fn in_portfolio(&self, portfolio: &str) -> bool {
        self.portfolio.eq_ignore_ascii_case(portfolio)
    }
}
