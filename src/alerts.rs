//! Persisted risk-share alert thresholds
//!
//! The one piece of state that outlives a session: per-status percentage
//! thresholds the user can enable to watch the portfolio's risk mix. A
//! missing or corrupt settings file falls back to defaults rather than
//! failing, since stale alert settings must never block a portal session.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::record::RiskStatus;
use crate::summary::RiskCounts;

/// One configurable threshold: alert when `status`'s share of the filtered
/// registry reaches `percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAlert {
    pub status: RiskStatus,
    pub percentage: f64,
    pub enabled: bool,
}

/// The persisted alert configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub alerts: Vec<ThresholdAlert>,
}

impl Default for AlertSettings {
    /// High 30%, observation 50%, controlled 20% — all disabled until the
    /// user opts in.
    fn default() -> Self {
        AlertSettings {
            alerts: vec![
                ThresholdAlert { status: RiskStatus::High, percentage: 30.0, enabled: false },
                ThresholdAlert {
                    status: RiskStatus::Observation,
                    percentage: 50.0,
                    enabled: false,
                },
                ThresholdAlert {
                    status: RiskStatus::Controlled,
                    percentage: 20.0,
                    enabled: false,
                },
            ],
        }
    }
}

impl AlertSettings {
    /// Load settings, falling back to defaults when the file is missing or
    /// unparseable.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return AlertSettings::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt alert settings, using defaults");
                AlertSettings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write alert settings: {}", path.display()))
    }

    /// Enabled alerts whose threshold the current risk distribution meets
    /// or exceeds.
    pub fn breached(&self, counts: &RiskCounts) -> Vec<&ThresholdAlert> {
        self.alerts
            .iter()
            .filter(|alert| alert.enabled && counts.share(alert.status) >= alert.percentage)
            .collect()
    }
}
