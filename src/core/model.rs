//! Portfolio risk records and the canonical dataset.
//!
//! Two layers live here:
//! - the serde ingestion schema (`PortfolioDocument`, `RawPortfolio`) which
//!   tolerates both `confidence` and `confidenceLabel`, partial KPI blocks
//!   and missing or null fields;
//! - the canonical model (`Portfolio`, `Dataset`) every other module reads.
//!
//! `Dataset::from_document` is the only bridge between the two.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Confidence
// ============================================================================

/// Qualitative label derived from the size of the peer cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Internal,
    Directional,
    Robust,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [
        Confidence::Internal,
        Confidence::Directional,
        Confidence::Robust,
    ];

    /// Parse a label case-insensitively. Unknown labels are treated as Robust.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "internal" => Confidence::Internal,
            "directional" => Confidence::Directional,
            _ => Confidence::Robust,
        }
    }

    /// Cohort of one is internal only, 3 to 5 peers is directional.
    pub fn from_cohort_size(n: u32) -> Self {
        match n {
            1 => Confidence::Internal,
            3..=5 => Confidence::Directional,
            _ => Confidence::Robust,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::Internal => "Internal",
            Confidence::Directional => "Directional",
            Confidence::Robust => "Robust",
        }
    }

    pub fn badge(self) -> BadgeClass {
        match self {
            Confidence::Internal => BadgeClass::Neutral,
            Confidence::Directional => BadgeClass::Warning,
            Confidence::Robust => BadgeClass::Success,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Visual class of a confidence badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Neutral,
    Warning,
    Success,
}

impl BadgeClass {
    /// Badge class for a raw label; anything unrecognised is a success badge.
    pub fn for_label(label: &str) -> Self {
        Confidence::parse(label).badge()
    }
}

// ============================================================================
// Canonical model
// ============================================================================

/// Headline KPIs. Any of them may be absent in the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kpis {
    /// 0-100.
    pub crowding_score: Option<f64>,
    /// Portfolio similarity index in [-1, 1].
    pub psi: Option<f64>,
    /// 0-100.
    pub peer_overlap_ratio: Option<f64>,
    #[serde(rename = "crowdingMomentum30d")]
    pub crowding_momentum_30d: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorExposure {
    pub name: String,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispersionEntry {
    pub factor: String,
    pub dispersion_index: f64,
}

/// Maximum number of factor exposures kept per portfolio.
pub const MAX_FACTORS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub cohort_size: Option<u32>,
    pub confidence: Confidence,
    pub asset_class: Option<String>,
    /// Assets under management, in millions.
    pub aum: Option<f64>,
    pub kpis: Kpis,
    pub crowding_interpretation: String,
    pub factors_top5: Vec<FactorExposure>,
    pub dispersion_snapshot: Vec<DispersionEntry>,
    /// Daily samples, oldest first, newest is "today".
    pub trend_crowding: Vec<f64>,
    pub trend_psi: Vec<f64>,
}

impl Portfolio {
    /// Selector label, e.g. `French Equity Core (N=4 — Directional)`.
    pub fn display_label(&self) -> String {
        match self.cohort_size {
            Some(n) => format!("{} (N={} — {})", self.name, n, self.confidence),
            None => self.name.clone(),
        }
    }
}

// ============================================================================
// Ingestion schema
// ============================================================================

/// Top-level shape of `data.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioDocument {
    pub portfolios: Vec<RawPortfolio>,
}

/// A portfolio as it appears on the wire. Both `confidence` and
/// `confidenceLabel` are accepted.
///
/// Every field tolerates `null` as well as a missing key, and so do the
/// entries of each list. A `null` becomes a placeholder during
/// normalization instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPortfolio {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cohort_size: Option<u32>,
    pub confidence: Option<String>,
    pub confidence_label: Option<String>,
    pub asset_class: Option<String>,
    pub aum: Option<f64>,
    pub kpis: Option<Kpis>,
    pub crowding_interpretation: Option<String>,
    pub factors_top5: Option<Vec<Option<FactorExposure>>>,
    pub dispersion_snapshot: Option<Vec<Option<DispersionEntry>>>,
    pub trend_crowding: Option<Vec<Option<f64>>>,
    pub trend_psi: Option<Vec<Option<f64>>>,
}

impl RawPortfolio {
    /// Normalize into the canonical schema. Records without an id are dropped.
    pub fn normalize(self) -> Option<Portfolio> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;

        let confidence = self
            .confidence
            .as_deref()
            .or(self.confidence_label.as_deref())
            .map(Confidence::parse)
            .or_else(|| self.cohort_size.map(Confidence::from_cohort_size))
            .unwrap_or(Confidence::Robust);

        let mut factors_top5 = present(self.factors_top5);
        factors_top5.truncate(MAX_FACTORS);

        Some(Portfolio {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            cohort_size: self.cohort_size,
            confidence,
            asset_class: self.asset_class.filter(|c| !c.trim().is_empty()),
            aum: self.aum.filter(|v| v.is_finite()),
            kpis: self.kpis.unwrap_or_default(),
            crowding_interpretation: self.crowding_interpretation.unwrap_or_default(),
            factors_top5,
            dispersion_snapshot: present(self.dispersion_snapshot),
            trend_crowding: finite_only(self.trend_crowding),
            trend_psi: finite_only(self.trend_psi),
        })
    }
}

/// Entries of an optional list, with `null` entries removed.
fn present<T>(list: Option<Vec<Option<T>>>) -> Vec<T> {
    list.into_iter().flatten().flatten().collect()
}

fn finite_only(series: Option<Vec<Option<f64>>>) -> Vec<f64> {
    present(series).into_iter().filter(|v| v.is_finite()).collect()
}

// ============================================================================
// Dataset
// ============================================================================

/// Immutable, ordered collection of portfolios keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    portfolios: IndexMap<String, Portfolio>,
}

impl Dataset {
    /// Build from canonical records. The first record with a given id wins.
    pub fn from_portfolios(records: impl IntoIterator<Item = Portfolio>) -> Self {
        let mut portfolios = IndexMap::new();
        for p in records {
            if portfolios.contains_key(&p.id) {
                tracing::warn!(id = %p.id, "duplicate portfolio id ignored");
                continue;
            }
            portfolios.insert(p.id.clone(), p);
        }
        Self { portfolios }
    }

    /// Normalization step from the wire schema.
    pub fn from_document(doc: PortfolioDocument) -> Self {
        let total = doc.portfolios.len();
        let dataset =
            Self::from_portfolios(doc.portfolios.into_iter().filter_map(RawPortfolio::normalize));
        if dataset.len() < total {
            tracing::warn!(
                kept = dataset.len(),
                total,
                "some portfolio records were dropped during normalization"
            );
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Portfolio> {
        self.portfolios.get(id)
    }

    /// Position of a record in insertion order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.portfolios.get_index_of(id)
    }

    pub fn first(&self) -> Option<&Portfolio> {
        self.portfolios.first().map(|(_, p)| p)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Portfolio> {
        self.portfolios.values()
    }

    /// Distinct asset classes in first-seen order.
    pub fn asset_classes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for class in self.iter().filter_map(|p| p.asset_class.as_deref()) {
            if !seen.contains(&class) {
                seen.push(class);
            }
        }
        seen
    }
}
