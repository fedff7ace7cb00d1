//! Orchard Portfolio Scorer
//!
//! Agriculture portfolio monitoring core for the bank/insurance/government
//! portals: deterministic 0-100 parcel suitability scoring, filter predicate
//! evaluation over the bundled fixture collections, and portfolio-level
//! summaries (KPIs, risk distribution, per-crop scores).
//!
//! - `record` / `data`: fixture record types and one-shot load + defaulting
//! - `scoring`: the pure scoring engine
//! - `filters`: conjunction predicates over parcels and farmers
//! - `summary`: KPI, risk, checkup, and per-crop aggregation
//! - `targeting` / `trend` / `alerts`: planning helpers carried over from
//!   the portals (what-if deltas, seasonal series, persisted thresholds)
//!
//! Rendering (maps, charts, tables) and transport are out of scope; the
//! crate hands filtered record sequences and numbers to whatever consumes
//! them.

pub mod alerts;
pub mod data;
pub mod filters;
pub mod record;
pub mod scorer;
pub mod scoring;
pub mod summary;
pub mod targeting;
pub mod trend;

// Re-export commonly used types
pub use alerts::{AlertSettings, ThresholdAlert};
pub use data::{FixtureError, PortfolioData};
pub use filters::{Disease, FarmerFilter, FilterOptions, Insect, OrchardFilter};
pub use record::{
    CheckupStatus, Farmer, Orchard, RawOrchard, RiskFlags, RiskStatus, SoilChemistry, SubScores,
    VegetationIndices,
};
pub use scorer::PortfolioScorer;
pub use scoring::{
    clamp, overall_score, plant_health_score, soil_quality_score, NdviBand, ScoreBand, ScoreInputs,
};
pub use summary::{
    crop_score_frame, crop_scores, CheckupCounts, CropScore, KpiSummary, PortfolioTotals,
    RiskCounts,
};
pub use targeting::{simulate, Interventions, TargetingRow};
pub use trend::{ndvi_seasonal_series, TrendPoint};
