//! Portfolio summary card numbers

use rustc_hash::FxHashSet;

use crate::record::Farmer;

/// Registry-wide totals for the summary cards: headcount, per-portfolio
/// split, distinct crops/regions, hectares, and loan exposure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioTotals {
    pub farmers: usize,
    pub cb: usize,
    pub sme: usize,
    pub crops: Vec<String>,
    pub regions: Vec<String>,
    pub total_area: f64,
    pub total_loan: f64,
}

impl PortfolioTotals {
    pub fn from_farmers<'a, I>(farmers: I) -> Self
    where
        I: IntoIterator<Item = &'a Farmer>,
    {
        let mut crops: FxHashSet<&str> = FxHashSet::default();
        let mut regions: FxHashSet<&str> = FxHashSet::default();
        let mut totals = PortfolioTotals::default();

        for farmer in farmers {
            totals.farmers += 1;
            if farmer.in_portfolio("cb") {
                totals.cb += 1;
            } else if farmer.in_portfolio("sme") {
                totals.sme += 1;
            }
            crops.insert(&farmer.crop);
            regions.insert(&farmer.region);
            totals.total_area += farmer.area;
            totals.total_loan += farmer.loan_amount;
        }

        totals.crops = crops.into_iter().map(str::to_string).collect();
        totals.crops.sort();
        totals.regions = regions.into_iter().map(str::to_string).collect();
        totals.regions.sort();
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RiskStatus;
    use approx::assert_relative_eq;

    fn farmer(portfolio: &str, crop: &str, region: &str, area: f64, loan: f64) -> Farmer {
        Farmer {
            id: "F".to_string(),
            name: String::new(),
            surname: String::new(),
            name_en: String::new(),
            surname_en: String::new(),
            portfolio: portfolio.to_string(),
            risk_status: RiskStatus::Controlled,
            crop: crop.to_string(),
            area,
            loan_amount: loan,
            region: region.to_string(),
            municipality: String::new(),
            lat: 0.0,
            lng: 0.0,
            checkup_status: None,
            score: None,
        }
    }

    #[test]
    fn test_totals() {
        let farmers = vec![
            farmer("CB", "apple", "Kakheti", 4.0, 100_000.0),
            farmer("SME", "apple", "Imereti", 2.0, 50_000.0),
            farmer("SME", "vine", "Kakheti", 3.0, 75_000.0),
        ];
        let totals = PortfolioTotals::from_farmers(&farmers);
        assert_eq!(totals.farmers, 3);
        assert_eq!(totals.cb, 1);
        assert_eq!(totals.sme, 2);
        assert_eq!(totals.crops, vec!["apple".to_string(), "vine".to_string()]);
        assert_eq!(totals.regions, vec!["Imereti".to_string(), "Kakheti".to_string()]);
        assert_relative_eq!(totals.total_area, 9.0);
        assert_relative_eq!(totals.total_loan, 225_000.0);
    }
}
