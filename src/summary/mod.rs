//! Portfolio-level aggregation
//!
//! Each summary takes an already-filtered set of records; applying criteria
//! is the filter module's job and never happens here.

pub mod crop_scores;
pub mod kpi;
pub mod risk;
pub mod totals;

pub use crop_scores::{crop_score_frame, crop_scores, CropScore};
pub use kpi::KpiSummary;
pub use risk::{CheckupCounts, RiskCounts};
pub use totals::PortfolioTotals;
