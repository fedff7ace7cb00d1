//! Per-crop average agronomist scores
//!
//! Only farmers whose parcels have actually been checked (and scored)
//! contribute; the result is sorted by average score, best crop first.

use anyhow::Result;
use polars::prelude::*;

use crate::record::{CheckupStatus, Farmer};

/// One row of the per-crop score table.
#[derive(Debug, Clone, PartialEq)]
pub struct CropScore {
    pub crop: String,
    pub n_farmers: u32,
    /// Mean agronomist score on the registry's 0-10 scale.
    pub avg_score: f64,
}

/// Assemble the per-crop table as a DataFrame: checked farmers with a
/// score, grouped by crop, mean score descending.
pub fn crop_score_frame<'a, I>(farmers: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = &'a Farmer>,
{
    let mut crops: Vec<&str> = Vec::new();
    let mut scores: Vec<Option<f64>> = Vec::new();
    let mut checked: Vec<bool> = Vec::new();
    for farmer in farmers {
        crops.push(farmer.crop.as_str());
        scores.push(farmer.score);
        checked.push(farmer.checkup_status == Some(CheckupStatus::Checked));
    }

    let df = df!(
        "crop" => crops,
        "score" => scores,
        "checked" => checked
    )?;

    let table = df
        .lazy()
        .filter(col("checked").and(col("score").is_not_null()))
        .group_by([col("crop")])
        .agg([
            col("score").mean().alias("avg_score"),
            col("score").count().alias("n_farmers"),
        ])
        .sort(
            ["avg_score"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;

    Ok(table)
}

/// Typed extraction of `crop_score_frame`.
pub fn crop_scores<'a, I>(farmers: I) -> Result<Vec<CropScore>>
where
    I: IntoIterator<Item = &'a Farmer>,
{
    let table = crop_score_frame(farmers)?;

    let crop_col = table.column("crop")?.str()?;
    let avg_col = table.column("avg_score")?.f64()?;
    let n_col = table.column("n_farmers")?.u32()?;

    let mut rows = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        if let (Some(crop), Some(avg_score), Some(n_farmers)) =
            (crop_col.get(idx), avg_col.get(idx), n_col.get(idx))
        {
            rows.push(CropScore { crop: crop.to_string(), n_farmers, avg_score });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RiskStatus;
    use approx::assert_relative_eq;

    fn farmer(crop: &str, checkup: Option<CheckupStatus>, score: Option<f64>) -> Farmer {
        Farmer {
            id: "F".to_string(),
            name: String::new(),
            surname: String::new(),
            name_en: String::new(),
            surname_en: String::new(),
            portfolio: "CB".to_string(),
            risk_status: RiskStatus::Controlled,
            crop: crop.to_string(),
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
    fn test_only_checked_scored_farmers_contribute() {
        let farmers = vec![
            farmer("apple", Some(CheckupStatus::Checked), Some(8.0)),
            farmer("apple", Some(CheckupStatus::Checked), Some(6.0)),
            farmer("apple", Some(CheckupStatus::NotChecked), Some(1.0)),
            farmer("apple", Some(CheckupStatus::Checked), None),
            farmer("vine", Some(CheckupStatus::Checked), Some(9.0)),
        ];

        let rows = crop_scores(&farmers).unwrap();
        assert_eq!(rows.len(), 2);

        // Sorted by average, best crop first.
        assert_eq!(rows[0].crop, "vine");
        assert_eq!(rows[0].n_farmers, 1);
        assert_relative_eq!(rows[0].avg_score, 9.0);

        assert_eq!(rows[1].crop, "apple");
        assert_eq!(rows[1].n_farmers, 2);
        assert_relative_eq!(rows[1].avg_score, 7.0);
    }

    #[test]
    fn test_empty_registry_yields_empty_table() {
        let farmers: Vec<Farmer> = Vec::new();
        let rows = crop_scores(&farmers).unwrap();
        assert!(rows.is_empty());
    }
}
