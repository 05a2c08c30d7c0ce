//! Embedded fallback dataset used whenever `data.json` cannot be loaded.

use once_cell::sync::Lazy;

use super::model::{Confidence, Dataset, DispersionEntry, FactorExposure, Kpis, Portfolio};

static FALLBACK: Lazy<Dataset> = Lazy::new(build_fallback);

/// The embedded dataset. Built once per process.
pub fn fallback_dataset() -> &'static Dataset {
    &FALLBACK
}

fn factors(entries: &[(&str, f64)]) -> Vec<FactorExposure> {
    entries
        .iter()
        .map(|&(name, percentile)| FactorExposure {
            name: name.to_string(),
            percentile,
        })
        .collect()
}

fn dispersion(entries: &[(&str, f64)]) -> Vec<DispersionEntry> {
    entries
        .iter()
        .map(|&(factor, dispersion_index)| DispersionEntry {
            factor: factor.to_string(),
            dispersion_index,
        })
        .collect()
}

fn build_fallback() -> Dataset {
    Dataset::from_portfolios([
        Portfolio {
            id: "internal".into(),
            name: "Internal Multi-Asset".into(),
            cohort_size: Some(1),
            confidence: Confidence::Internal,
            asset_class: Some("Multi-Asset".into()),
            aum: Some(320.0),
            kpis: Kpis {
                crowding_score: Some(42.0),
                psi: Some(0.31),
                peer_overlap_ratio: Some(0.0),
                crowding_momentum_30d: Some(-2.1),
            },
            crowding_interpretation: "Differentiated".into(),
            factors_top5: factors(&[
                ("Value", 28.0),
                ("Duration", 35.0),
                ("Low Vol", 41.0),
                ("Momentum", 52.0),
                ("Quality", 58.0),
            ]),
            dispersion_snapshot: dispersion(&[
                ("Value", 0.42),
                ("Duration", 0.38),
                ("Momentum", 0.51),
            ]),
            trend_crowding: vec![
                38.0, 38.6, 39.2, 39.8, 40.2, 40.6, 41.0, 41.5, 42.0, 41.6, 41.2, 40.8, 41.0, 41.3,
                41.6, 41.9, 42.2, 42.0, 41.7, 41.9, 42.1, 42.0, 41.8, 42.0, 42.2, 42.0, 41.7, 41.9,
                42.1, 42.0,
            ],
            trend_psi: vec![
                0.28, 0.285, 0.29, 0.295, 0.30, 0.305, 0.31, 0.308, 0.305, 0.302, 0.30, 0.302,
                0.304, 0.306, 0.308, 0.31, 0.308, 0.306, 0.307, 0.308, 0.31, 0.308, 0.306, 0.308,
                0.31, 0.308, 0.306, 0.308, 0.31, 0.31,
            ],
        },
        Portfolio {
            id: "french".into(),
            name: "French Equity Core".into(),
            cohort_size: Some(4),
            confidence: Confidence::Directional,
            asset_class: Some("Equity".into()),
            aum: Some(1200.0),
            kpis: Kpis {
                crowding_score: Some(58.0),
                psi: Some(0.67),
                peer_overlap_ratio: Some(34.0),
                crowding_momentum_30d: Some(5.2),
            },
            crowding_interpretation: "Typical".into(),
            factors_top5: factors(&[
                ("Momentum", 89.0),
                ("Quality", 82.0),
                ("Value", 76.0),
                ("Low Vol", 71.0),
                ("Size", 65.0),
            ]),
            dispersion_snapshot: dispersion(&[
                ("Momentum", 0.22),
                ("Quality", 0.28),
                ("Value", 0.31),
            ]),
            trend_crowding: vec![
                48.0, 48.7, 49.4, 50.1, 50.8, 51.4, 52.0, 52.6, 53.2, 53.8, 54.4, 55.0, 55.5, 56.0,
                56.5, 57.0, 57.5, 58.0, 57.6, 57.2, 56.8, 57.0, 57.3, 57.6, 57.9, 58.0, 57.7, 57.9,
                58.1, 58.0,
            ],
            trend_psi: vec![
                0.58, 0.585, 0.59, 0.595, 0.60, 0.605, 0.61, 0.615, 0.62, 0.625, 0.63, 0.635, 0.64,
                0.645, 0.65, 0.655, 0.66, 0.665, 0.67, 0.668, 0.665, 0.662, 0.665, 0.668, 0.67,
                0.668, 0.665, 0.668, 0.67, 0.67,
            ],
        },
        Portfolio {
            id: "euro".into(),
            name: "Euro Credit Total Return".into(),
            cohort_size: Some(11),
            confidence: Confidence::Robust,
            asset_class: Some("Credit".into()),
            aum: Some(2450.0),
            kpis: Kpis {
                crowding_score: Some(84.0),
                psi: Some(0.89),
                peer_overlap_ratio: Some(72.0),
                crowding_momentum_30d: Some(8.3),
            },
            crowding_interpretation: "Highly crowded".into(),
            factors_top5: factors(&[
                ("Momentum", 96.0),
                ("Low Vol", 94.0),
                ("Quality", 91.0),
                ("Duration", 88.0),
                ("Value", 85.0),
            ]),
            dispersion_snapshot: dispersion(&[
                ("Momentum", 0.12),
                ("Low Vol", 0.15),
                ("Duration", 0.18),
            ]),
            trend_crowding: vec![
                72.0, 72.6, 73.2, 73.8, 74.4, 75.0, 75.6, 76.2, 76.8, 77.4, 78.0, 78.5, 79.0, 79.5,
                80.0, 80.5, 81.0, 81.5, 82.0, 82.5, 83.0, 83.5, 84.0, 83.6, 83.2, 82.8, 83.0, 83.3,
                83.6, 84.0,
            ],
            trend_psi: vec![
                0.82, 0.825, 0.83, 0.835, 0.84, 0.845, 0.85, 0.855, 0.86, 0.865, 0.87, 0.875, 0.88,
                0.885, 0.89, 0.888, 0.885, 0.882, 0.885, 0.888, 0.89, 0.888, 0.885, 0.888, 0.89,
                0.888, 0.885, 0.888, 0.89, 0.89,
            ],
        },
    ])
}
