//! Fixture loading and portfolio data holder
//!
//! Loads the bundled parcel GeoJSON and the farmer registry JSON once, at
//! start-up. Missing optional fields resolve to documented defaults
//! (`record::RawOrchard::resolve`); structural problems (unreadable files,
//! invalid JSON, a wrong top-level type, duplicate parcel ids) fail the
//! load with path context.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::record::{Farmer, Orchard, RawOrchard};

/// Structural fixture violations that cannot be resolved by defaulting.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("expected a GeoJSON FeatureCollection, found type '{0}'")]
    NotAFeatureCollection(String),

    #[error("duplicate parcel id: {0}")]
    DuplicateParcelId(String),
}

/// GeoJSON feature wrapper; geometry is accepted and ignored, since no
/// consumer of this crate reads parcel polygons.
#[derive(Debug, Deserialize)]
struct Feature {
    properties: RawOrchard,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

/// All fixture data for one portal session.
#[derive(Debug)]
pub struct PortfolioData {
    pub orchards: Vec<Orchard>,
    pub farmers: Vec<Farmer>,
    orchard_index: AHashMap<String, usize>,
}

impl PortfolioData {
    /// Load both fixtures from disk.
    pub fn load(orchards_path: &Path, farmers_path: &Path) -> Result<Self> {
        let orchards = Self::load_orchards(orchards_path)?;
        let farmers = Self::load_farmers(farmers_path)?;

        info!(orchards = orchards.len(), farmers = farmers.len(), "fixtures loaded");

        Self::from_records(orchards, farmers)
    }

    /// Build the holder from already-resolved records (used by tests and
    /// benches as well as `load`).
    pub fn from_records(orchards: Vec<Orchard>, farmers: Vec<Farmer>) -> Result<Self> {
        let mut orchard_index = AHashMap::with_capacity(orchards.len());
        for (idx, orchard) in orchards.iter().enumerate() {
            if orchard_index.insert(orchard.orchard_id.clone(), idx).is_some() {
                return Err(FixtureError::DuplicateParcelId(orchard.orchard_id.clone()).into());
            }
        }
        Ok(PortfolioData { orchards, farmers, orchard_index })
    }

    /// Parse the parcel GeoJSON and resolve every feature.
    fn load_orchards(path: &Path) -> Result<Vec<Orchard>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read parcel fixture: {}", path.display()))?;

        let collection: FeatureCollection = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse parcel fixture: {}", path.display()))?;

        if collection.kind != "FeatureCollection" {
            return Err(FixtureError::NotAFeatureCollection(collection.kind).into());
        }

        // Resolution is per-feature and independent; do it data-parallel.
        let orchards: Vec<Orchard> = collection
            .features
            .into_par_iter()
            .map(|feature| feature.properties.resolve())
            .collect();

        Ok(orchards)
    }

    fn load_farmers(path: &Path) -> Result<Vec<Farmer>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read farmer registry: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse farmer registry: {}", path.display()))
    }

    pub fn orchard_by_id(&self, orchard_id: &str) -> Option<&Orchard> {
        self.orchard_index.get(orchard_id).map(|&idx| &self.orchards[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("orchard_scorer_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    const ORCHARDS_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[43.5, 42.0], [43.6, 42.0], [43.6, 42.1], [43.5, 42.0]]]},
                "properties": {
                    "orchard_id": "ORC-001",
                    "crop": "apple",
                    "region": "Kakheti",
                    "municipality": "Telavi",
                    "area_ha": 12.5,
                    "age_years": 8,
                    "irrigation": {"has": true},
                    "soil": {"ph": 6.5, "n": 100, "p": 100, "k": 100},
                    "indices": {"ndvi_mean": 1.0, "vigor_index": 1.0, "waterlogging_risk": 0.0},
                    "risk": {"frost_pocket": false, "erosion": false, "wind_exposure": false},
                    "weedScore": 100,
                    "pestScore": 100,
                    "managementScore": 100,
                    "flags": []
                }
            },
            {
                "type": "Feature",
                "properties": {"orchard_id": "ORC-002", "crop": "vine"}
            }
        ]
    }"#;

    const FARMERS_FIXTURE: &str = r#"[
        {
            "id": "F-001",
            "name": "გიორგი",
            "surname": "ბერიძე",
            "portfolio": "CB",
            "riskStatus": "high",
            "crop": "apple",
            "area": 4.2,
            "loanAmount": 120000,
            "region": "Kakheti",
            "municipality": "Telavi"
        }
    ]"#;

    #[test]
    fn test_load_fixtures() {
        let orchards_path = write_fixture("orchards.geojson", ORCHARDS_FIXTURE);
        let farmers_path = write_fixture("farmers.json", FARMERS_FIXTURE);

        let data = PortfolioData::load(&orchards_path, &farmers_path).unwrap();
        assert_eq!(data.orchards.len(), 2);
        assert_eq!(data.farmers.len(), 1);

        // Perfect parcel resolves to a perfect score.
        let perfect = data.orchard_by_id("ORC-001").unwrap();
        assert_eq!(perfect.score, 100.0);
        assert!(data.orchard_by_id("ORC-999").is_none());
    }

    #[test]
    fn test_wrong_top_level_type_is_an_error() {
        let path =
            write_fixture("not_a_collection.geojson", r#"{"type": "Feature", "features": []}"#);
        let farmers_path = write_fixture("farmers_ok.json", FARMERS_FIXTURE);

        let err = PortfolioData::load(&path, &farmers_path).unwrap_err();
        assert!(err.to_string().contains("FeatureCollection"));
    }

    #[test]
    fn test_duplicate_parcel_ids_are_an_error() {
        let fixture = r#"{
            "type": "FeatureCollection",
            "features": [
                {"properties": {"orchard_id": "ORC-001", "crop": "apple"}},
                {"properties": {"orchard_id": "ORC-001", "crop": "vine"}}
            ]
        }"#;
        let orchards_path = write_fixture("dup_orchards.geojson", fixture);
        let farmers_path = write_fixture("farmers_dup.json", FARMERS_FIXTURE);

        let err = PortfolioData::load(&orchards_path, &farmers_path).unwrap_err();
        assert!(err.to_string().contains("duplicate parcel id"));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let orchards_path = write_fixture("broken.geojson", "{not json");
        let farmers_path = write_fixture("farmers_broken.json", FARMERS_FIXTURE);

        let err = PortfolioData::load(&orchards_path, &farmers_path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.geojson"));
    }
}
