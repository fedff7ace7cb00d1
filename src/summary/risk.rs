//! Risk-status and checkup distribution over the farmer registry

use crate::record::{CheckupStatus, Farmer, RiskStatus};

/// Farmer counts per risk status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskCounts {
    pub high: usize,
    pub observation: usize,
    pub controlled: usize,
}

impl RiskCounts {
    pub fn from_farmers<'a, I>(farmers: I) -> Self
    where
        I: IntoIterator<Item = &'a Farmer>,
    {
        let mut counts = RiskCounts::default();
        for farmer in farmers {
            match farmer.risk_status {
                RiskStatus::High => counts.high += 1,
                RiskStatus::Observation => counts.observation += 1,
                RiskStatus::Controlled => counts.controlled += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.observation + self.controlled
    }

    pub fn count(&self, status: RiskStatus) -> usize {
        match status {
            RiskStatus::High => self.high,
            RiskStatus::Observation => self.observation,
            RiskStatus::Controlled => self.controlled,
        }
    }

    /// Percentage share of one status, 0 when the registry slice was empty.
    pub fn share(&self, status: RiskStatus) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / total as f64 * 100.0
    }
}

/// Field-visit (monitoring) distribution plus the mean agronomist score of
/// checked farmers. Farmers with no checkup status recorded count toward
/// the total but toward none of the three states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CheckupCounts {
    pub total: usize,
    pub checked: usize,
    pub not_checked: usize,
    pub in_progress: usize,
    /// Mean agronomist score (0-10 scale) over checked farmers; a checked
    /// farmer with no score contributes 0.
    pub avg_checked_score: f64,
}

impl CheckupCounts {
    pub fn from_farmers<'a, I>(farmers: I) -> Self
    where
        I: IntoIterator<Item = &'a Farmer>,
    {
        let mut counts = CheckupCounts::default();
        let mut checked_score_sum = 0.0;

        for farmer in farmers {
            counts.total += 1;
            match farmer.checkup_status {
                Some(CheckupStatus::Checked) => {
                    counts.checked += 1;
                    checked_score_sum += farmer.score.unwrap_or(0.0);
                }
                Some(CheckupStatus::NotChecked) => counts.not_checked += 1,
                Some(CheckupStatus::InProgress) => counts.in_progress += 1,
                None => {}
            }
        }

        if counts.checked > 0 {
            counts.avg_checked_score = checked_score_sum / counts.checked as f64;
        }
        counts
    }

    pub fn checked_share(&self) -> f64 {
        share(self.checked, self.total)
    }

    pub fn not_checked_share(&self) -> f64 {
        share(self.not_checked, self.total)
    }

    pub fn in_progress_share(&self) -> f64 {
        share(self.in_progress, self.total)
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn farmer(status: RiskStatus, checkup: Option<CheckupStatus>, score: Option<f64>) -> Farmer {
        Farmer {
            id: "F".to_string(),
            name: String::new(),
            surname: String::new(),
            name_en: String::new(),
            surname_en: String::new(),
            portfolio: "CB".to_string(),
            risk_status: status,
            crop: "apple".to_string(),
            area: 1.0,
            loan_amount: 0.0,
            region: String::new(),
            municipality: String::new(),
            lat: 0.0,
            lng: 0.0,
            checkup_status: checkup,
            score,
        }
    }

    #[test]
    fn test_risk_counts_and_shares() {
        let farmers = vec![
            farmer(RiskStatus::High, None, None),
            farmer(RiskStatus::High, None, None),
            farmer(RiskStatus::Observation, None, None),
            farmer(RiskStatus::Controlled, None, None),
        ];
        let counts = RiskCounts::from_farmers(&farmers);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.total(), 4);
        assert_relative_eq!(counts.share(RiskStatus::High), 50.0);
        assert_relative_eq!(counts.share(RiskStatus::Controlled), 25.0);
    }

    #[test]
    fn test_empty_shares_are_zero() {
        let counts = RiskCounts::default();
        assert_relative_eq!(counts.share(RiskStatus::High), 0.0);
        let farmers: Vec<Farmer> = Vec::new();
        let checkups = CheckupCounts::from_farmers(&farmers);
        assert_relative_eq!(checkups.checked_share(), 0.0);
        assert_relative_eq!(checkups.avg_checked_score, 0.0);
    }

    #[test]
    fn test_checkup_counts() {
        let farmers = vec![
            farmer(RiskStatus::High, Some(CheckupStatus::Checked), Some(8.0)),
            farmer(RiskStatus::High, Some(CheckupStatus::Checked), Some(6.0)),
            farmer(RiskStatus::High, Some(CheckupStatus::InProgress), None),
            farmer(RiskStatus::High, None, None),
        ];
        let counts = CheckupCounts::from_farmers(&farmers);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.checked, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.not_checked, 0);
        assert_relative_eq!(counts.avg_checked_score, 7.0);
        assert_relative_eq!(counts.checked_share(), 50.0);
    }
}
