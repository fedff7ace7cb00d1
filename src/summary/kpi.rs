//! Headline KPI roll-up for a filtered parcel set

use crate::record::Orchard;

/// The sidebar KPI numbers: parcel count, hectares, score and NDVI means,
/// irrigation share, and how many parcels carry condition flags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiSummary {
    pub count: usize,
    pub total_area_ha: f64,
    /// Mean overall score; 0 when the set is empty.
    pub avg_score: f64,
    /// Share of irrigated parcels, rounded to whole percent.
    pub irrigated_pct: u32,
    /// Parcels with at least one disease/insect condition flag.
    pub flagged: usize,
    pub mean_ndvi: f64,
}

impl KpiSummary {
    pub fn from_orchards<'a, I>(orchards: I) -> Self
    where
        I: IntoIterator<Item = &'a Orchard>,
    {
        let mut count = 0usize;
        let mut total_area_ha = 0.0;
        let mut score_sum = 0.0;
        let mut ndvi_sum = 0.0;
        let mut irrigated = 0usize;
        let mut flagged = 0usize;

        for orchard in orchards {
            count += 1;
            total_area_ha += orchard.area_ha;
            score_sum += orchard.score;
            ndvi_sum += orchard.indices.ndvi_mean;
            if orchard.irrigated {
                irrigated += 1;
            }
            if !orchard.flags.is_empty() {
                flagged += 1;
            }
        }

        let denom = count.max(1) as f64;
        KpiSummary {
            count,
            total_area_ha,
            avg_score: score_sum / denom,
            irrigated_pct: (irrigated as f64 / denom * 100.0).round() as u32,
            flagged,
            mean_ndvi: ndvi_sum / denom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawOrchard;
    use approx::assert_relative_eq;

    fn orchard(json: &str) -> Orchard {
        serde_json::from_str::<RawOrchard>(json).unwrap().resolve()
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let orchards: Vec<Orchard> = Vec::new();
        let summary = KpiSummary::from_orchards(&orchards);
        assert_eq!(summary.count, 0);
        assert_relative_eq!(summary.avg_score, 0.0);
        assert_eq!(summary.irrigated_pct, 0);
    }

    #[test]
    fn test_roll_up() {
        let orchards = vec![
            orchard(
                r#"{"orchard_id": "A", "crop": "apple", "area_ha": 10.0,
                    "irrigation": {"has": true},
                    "indices": {"ndvi_mean": 0.8, "vigor_index": 0.8, "waterlogging_risk": 0.0},
                    "flags": ["disease_alternaria"]}"#,
            ),
            orchard(r#"{"orchard_id": "B", "crop": "vine", "area_ha": 2.5}"#),
        ];

        let summary = KpiSummary::from_orchards(&orchards);
        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.total_area_ha, 12.5);
        assert_eq!(summary.irrigated_pct, 50);
        assert_eq!(summary.flagged, 1);
        assert_relative_eq!(summary.mean_ndvi, 0.4, epsilon = 1e-9);
        assert!(summary.avg_score > 0.0 && summary.avg_score <= 100.0);
    }
}
