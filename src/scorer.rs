//! Portfolio scorer - main coordinator
//!
//! Owns the loaded fixture data and provides the end-to-end operations a
//! portal session needs: filtered views over parcels and farmers, scoped
//! summaries, and the targeting simulation.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::data::PortfolioData;
use crate::filters::{FarmerFilter, FilterOptions, OrchardFilter};
use crate::record::{Farmer, Orchard};
use crate::summary::{
    crop_scores, CheckupCounts, CropScore, KpiSummary, PortfolioTotals, RiskCounts,
};
use crate::targeting::{simulate, Interventions, TargetingRow};

/// Main portfolio scorer
pub struct PortfolioScorer {
    data: PortfolioData,
}

impl PortfolioScorer {
    /// Initialize from the bundled fixtures.
    pub fn new(orchards_path: &Path, farmers_path: &Path) -> Result<Self> {
        info!("initializing portfolio scorer");
        let data = PortfolioData::load(orchards_path, farmers_path)?;
        Ok(Self { data })
    }

    /// Wrap already-loaded data (tests, benches, embedded fixtures).
    pub fn from_data(data: PortfolioData) -> Self {
        Self { data }
    }

    /// Access the underlying datasets.
    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    pub fn orchard(&self, orchard_id: &str) -> Option<&Orchard> {
        self.data.orchard_by_id(orchard_id)
    }

    /// Parcels passing every present criterion.
    pub fn filter_orchards(&self, filter: &OrchardFilter) -> Vec<&Orchard> {
        self.data.orchards.iter().filter(|o| filter.matches(o)).collect()
    }

    /// Farmers passing every present criterion.
    pub fn filter_farmers(&self, filter: &FarmerFilter) -> Vec<&Farmer> {
        self.data.farmers.iter().filter(|f| filter.matches(f)).collect()
    }

    /// Headline KPIs over the filtered parcel set.
    pub fn kpi(&self, filter: &OrchardFilter) -> KpiSummary {
        KpiSummary::from_orchards(self.filter_orchards(filter).into_iter())
    }

    /// Farmers in one portfolio (`CB`/`SME`), or all when `None`.
    pub fn portfolio_farmers(&self, portfolio: Option<&str>) -> Vec<&Farmer> {
        self.data
            .farmers
            .iter()
            .filter(|f| portfolio.map_or(true, |p| f.in_portfolio(p)))
            .collect()
    }

    pub fn risk_counts(&self, portfolio: Option<&str>) -> RiskCounts {
        RiskCounts::from_farmers(self.portfolio_farmers(portfolio))
    }

    pub fn checkup_counts(&self, portfolio: Option<&str>) -> CheckupCounts {
        CheckupCounts::from_farmers(self.portfolio_farmers(portfolio))
    }

    pub fn totals(&self, portfolio: Option<&str>) -> PortfolioTotals {
        PortfolioTotals::from_farmers(self.portfolio_farmers(portfolio))
    }

    /// Per-crop mean agronomist score for one portfolio, best crop first.
    pub fn crop_scores(&self, portfolio: Option<&str>) -> Result<Vec<CropScore>> {
        crop_scores(self.portfolio_farmers(portfolio))
    }

    /// Distinct filter-control values from the registry, municipalities
    /// optionally narrowed to a region.
    pub fn filter_options(&self, region: Option<&str>) -> FilterOptions {
        FilterOptions::from_farmers(&self.data.farmers, region)
    }

    /// Targeting simulation over the whole parcel portfolio.
    pub fn targeting(&self, interventions: &Interventions) -> Vec<TargetingRow> {
        simulate(&self.data.orchards, interventions)
    }
}
