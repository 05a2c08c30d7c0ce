//! Test Fixtures
//!
//! Builders for portfolios, datasets and JSON documents.

use serde_json::json;

use crate::core::model::{Confidence, Dataset, Kpis, Portfolio};

// =============================================================================
// Portfolio Fixtures
// =============================================================================

/// A portfolio with every KPI present and a flat 30-day history.
pub fn create_test_portfolio(id: &str, name: &str) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        name: name.to_string(),
        cohort_size: Some(6),
        confidence: Confidence::Robust,
        asset_class: Some("Equity".to_string()),
        aum: Some(500.0),
        kpis: Kpis {
            crowding_score: Some(50.0),
            psi: Some(0.0),
            peer_overlap_ratio: Some(30.0),
            crowding_momentum_30d: Some(0.0),
        },
        crowding_interpretation: "Typical".to_string(),
        factors_top5: Vec::new(),
        dispersion_snapshot: Vec::new(),
        trend_crowding: vec![50.0; 30],
        trend_psi: vec![0.0; 30],
    }
}

/// A portfolio with the fields that drive sorting and filtering overridden.
pub fn create_portfolio_with(
    id: &str,
    confidence: Confidence,
    asset_class: Option<&str>,
    crowding: Option<f64>,
) -> Portfolio {
    let mut p = create_test_portfolio(id, &format!("Portfolio {id}"));
    p.confidence = confidence;
    p.asset_class = asset_class.map(str::to_string);
    p.kpis.crowding_score = crowding;
    p
}

/// A dataset of `n` portfolios cycling through confidence levels and
/// asset classes.
pub fn create_test_dataset(n: usize) -> Dataset {
    const CLASSES: [&str; 3] = ["Equity", "Credit", "Multi-Asset"];
    Dataset::from_portfolios((0..n).map(|i| {
        create_portfolio_with(
            &format!("p{i}"),
            Confidence::ALL[i % Confidence::ALL.len()],
            Some(CLASSES[i % CLASSES.len()]),
            Some((i * 7 % 100) as f64),
        )
    }))
}

// =============================================================================
// Document Fixtures
// =============================================================================

/// A `data.json` body with two portfolios, one using each confidence spelling.
pub fn create_test_document() -> serde_json::Value {
    json!({
        "portfolios": [
            {
                "id": "alpha",
                "name": "Alpha Growth",
                "cohortSize": 4,
                "confidence": "Directional",
                "assetClass": "Equity",
                "aum": 850,
                "kpis": {
                    "crowdingScore": 61,
                    "psi": 0.44,
                    "peerOverlapRatio": 37,
                    "crowdingMomentum30d": 1.5
                },
                "crowdingInterpretation": "Typical",
                "factorsTop5": [{ "name": "Quality", "percentile": 71 }],
                "dispersionSnapshot": [{ "factor": "Quality", "dispersionIndex": 0.33 }],
                "trendCrowding": [58, 59, 61],
                "trendPsi": [0.41, 0.43, 0.44]
            },
            {
                "id": "beta",
                "name": "Beta Income",
                "cohortSize": 9,
                "confidenceLabel": "Robust",
                "kpis": { "crowdingScore": 30 }
            }
        ]
    })
}
