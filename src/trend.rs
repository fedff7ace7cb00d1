//! Seasonal series synthesis
//!
//! The portals chart a 12-month NDVI curve seeded from the current mean:
//! one sine cycle around the base value, clamped to the 0-1 NDVI range.

use libm::sin;

use crate::scoring::clamp;

/// Seasonal swing used by the KPI panel.
pub const KPI_AMPLITUDE: f64 = 0.08;

/// Seasonal swing used by the per-parcel drawer.
pub const PARCEL_AMPLITUDE: f64 = 0.10;

/// One monthly point of a synthesized series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    /// Month number, 1-12.
    pub month: u32,
    pub value: f64,
}

/// Twelve monthly NDVI points: `clamp(base + sin(2π·i/12)·amplitude, 0, 1)`.
pub fn ndvi_seasonal_series(base: f64, amplitude: f64) -> Vec<TrendPoint> {
    (0u32..12)
        .map(|i| {
            let phase = f64::from(i) / 12.0 * std::f64::consts::PI * 2.0;
            TrendPoint {
                month: i + 1,
                value: clamp(base + sin(phase) * amplitude, 0.0, 1.0),
            }
        })
        .collect()
}
