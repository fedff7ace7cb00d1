//! Filter criteria and predicate evaluation
//!
//! A filter is a conjunction of independent, optional criteria. Absent
//! criteria never constrain; evaluation short-circuits on the first failing
//! predicate. Disease and insect selections are two independent any-of
//! groups: once a group has at least one selection, records carrying none
//! of the selected condition flags are excluded.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::record::{CheckupStatus, Farmer, Orchard, RiskStatus};

/// Disease conditions selectable in the parcel filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disease {
    AlternariaAlternata,
    VerticilliumDahliae,
    ColletotrichumAcutatum,
}

impl Disease {
    /// Condition flag name carried by parcel fixtures for this disease.
    pub fn fixture_flag(&self) -> &'static str {
        match self {
            Disease::AlternariaAlternata => "disease_alternaria",
            Disease::VerticilliumDahliae => "disease_verticillium",
            Disease::ColletotrichumAcutatum => "disease_anthracnose",
        }
    }
}

/// Insect pest conditions selectable in the parcel filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insect {
    MyzusPersicae,
    CydiaPomonella,
    TetranychusUrticae,
}

impl Insect {
    pub fn fixture_flag(&self) -> &'static str {
        match self {
            Insect::MyzusPersicae => "insect_green_aphid",
            Insect::CydiaPomonella => "insect_codling_moth",
            Insect::TetranychusUrticae => "insect_spider_mite",
        }
    }
}

/// Inclusive numeric range criterion.
pub type Range = (f64, f64);

fn in_range(value: f64, range: Option<Range>) -> bool {
    match range {
        Some((min, max)) => value >= min && value <= max,
        None => true,
    }
}

/// Criteria applied to orchard parcels.
#[derive(Debug, Clone, Default)]
pub struct OrchardFilter {
    pub region: Option<String>,
    pub municipality: Option<String>,
    pub crop: Option<String>,
    pub irrigation: Option<bool>,
    pub age_range: Option<Range>,
    pub area_range: Option<Range>,
    pub score_range: Option<Range>,
    pub ph_range: Option<Range>,
    pub n_range: Option<Range>,
    pub p_range: Option<Range>,
    pub k_range: Option<Range>,
    pub diseases: SmallVec<[Disease; 3]>,
    pub insects: SmallVec<[Insect; 3]>,
}

impl OrchardFilter {
    /// True iff the parcel satisfies every present criterion.
    pub fn matches(&self, orchard: &Orchard) -> bool {
        if let Some(region) = &self.region {
            if &orchard.region != region {
                return false;
            }
        }
        if let Some(municipality) = &self.municipality {
            if &orchard.municipality != municipality {
                return false;
            }
        }
        if let Some(crop) = &self.crop {
            if &orchard.crop != crop {
                return false;
            }
        }
        if let Some(irrigation) = self.irrigation {
            if orchard.irrigated != irrigation {
                return false;
            }
        }
        if !in_range(orchard.age_years, self.age_range)
            || !in_range(orchard.area_ha, self.area_range)
            || !in_range(orchard.score, self.score_range)
        {
            return false;
        }
        if !in_range(orchard.soil.ph, self.ph_range)
            || !in_range(orchard.soil.n, self.n_range)
            || !in_range(orchard.soil.p, self.p_range)
            || !in_range(orchard.soil.k, self.k_range)
        {
            return false;
        }
        if !self.diseases.is_empty()
            && !self.diseases.iter().any(|d| orchard.has_flag(d.fixture_flag()))
        {
            return false;
        }
        if !self.insects.is_empty()
            && !self.insects.iter().any(|i| orchard.has_flag(i.fixture_flag()))
        {
            return false;
        }
        true
    }
}

/// Criteria applied to farmer registry records.
#[derive(Debug, Clone, Default)]
pub struct FarmerFilter {
    /// Portfolio label (`CB`/`SME`), matched case-insensitively.
    pub portfolio: Option<String>,
    /// Risk status selection; empty means all statuses pass.
    pub statuses: SmallVec<[RiskStatus; 3]>,
    pub checkup_status: Option<CheckupStatus>,
    pub crop: Option<String>,
    pub region: Option<String>,
    pub municipality: Option<String>,
    pub area_range: Option<Range>,
    pub loan_range: Option<Range>,
}

impl FarmerFilter {
    pub fn matches(&self, farmer: &Farmer) -> bool {
        if let Some(portfolio) = &self.portfolio {
            if !farmer.in_portfolio(portfolio) {
                return false;
            }
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&farmer.risk_status) {
            return false;
        }
        if let Some(status) = self.checkup_status {
            if farmer.checkup_status != Some(status) {
                return false;
            }
        }
        if let Some(crop) = &self.crop {
            if &farmer.crop != crop {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if &farmer.region != region {
                return false;
            }
        }
        if let Some(municipality) = &self.municipality {
            if &farmer.municipality != municipality {
                return false;
            }
        }
        in_range(farmer.area, self.area_range) && in_range(farmer.loan_amount, self.loan_range)
    }
}

/// Distinct values available for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub crops: Vec<String>,
    pub regions: Vec<String>,
    pub municipalities: Vec<String>,
}

impl FilterOptions {
    /// Collect distinct crops, regions, and municipalities, each sorted.
    /// With `region` set, municipalities are narrowed to that region.
    pub fn from_farmers(farmers: &[Farmer], region: Option<&str>) -> Self {
        let mut crops: FxHashSet<&str> = FxHashSet::default();
        let mut regions: FxHashSet<&str> = FxHashSet::default();
        let mut municipalities: FxHashSet<&str> = FxHashSet::default();

        for farmer in farmers {
            crops.insert(&farmer.crop);
            regions.insert(&farmer.region);
            if region.map_or(true, |r| farmer.region == r) {
                municipalities.insert(&farmer.municipality);
            }
        }

        let mut options = FilterOptions {
            crops: crops.into_iter().map(str::to_string).collect(),
            regions: regions.into_iter().map(str::to_string).collect(),
            municipalities: municipalities.into_iter().map(str::to_string).collect(),
        };
        options.crops.sort();
        options.regions.sort();
        options.municipalities.sort();
        options
    }
}
