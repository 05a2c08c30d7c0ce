//! Selection, sort and filter state for the dashboard.
//!
//! `ViewState` is a plain value. Every transition takes the current state
//! plus the dataset and returns the next state; rendering only ever reads it.
//! After each transition the selection is reconciled against the visible
//! rows so it never points at a filtered-out portfolio.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::{Confidence, Dataset, Portfolio};

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Confidence,
    AssetClass,
    Aum,
    CrowdingScore,
    Psi,
    PeerOverlap,
    Momentum,
}

impl SortKey {
    /// Table column order.
    pub const ALL: [SortKey; 8] = [
        SortKey::Name,
        SortKey::Confidence,
        SortKey::AssetClass,
        SortKey::Aum,
        SortKey::CrowdingScore,
        SortKey::Psi,
        SortKey::PeerOverlap,
        SortKey::Momentum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Portfolio",
            SortKey::Confidence => "Confidence",
            SortKey::AssetClass => "Asset Class",
            SortKey::Aum => "AUM",
            SortKey::CrowdingScore => "Crowding",
            SortKey::Psi => "PSI",
            SortKey::PeerOverlap => "Overlap",
            SortKey::Momentum => "Mom. 30d",
        }
    }

    pub fn next(self) -> SortKey {
        let idx = SortKey::ALL.iter().position(|&k| k == self).unwrap_or(0);
        SortKey::ALL[(idx + 1) % SortKey::ALL.len()]
    }

    fn is_textual(self) -> bool {
        matches!(self, SortKey::Name | SortKey::Confidence | SortKey::AssetClass)
    }

    fn text<'a>(self, p: &'a Portfolio) -> Option<&'a str> {
        match self {
            SortKey::Name => Some(p.name.as_str()),
            SortKey::Confidence => Some(p.confidence.label()),
            SortKey::AssetClass => p.asset_class.as_deref(),
            _ => None,
        }
    }

    fn number(self, p: &Portfolio) -> Option<f64> {
        match self {
            SortKey::Aum => p.aum,
            SortKey::CrowdingScore => p.kpis.crowding_score,
            SortKey::Psi => p.kpis.psi,
            SortKey::PeerOverlap => p.kpis.peer_overlap_ratio,
            SortKey::Momentum => p.kpis.crowding_momentum_30d,
            _ => None,
        }
    }

    /// Ascending comparison. Missing values sort below every present value.
    pub fn compare(self, a: &Portfolio, b: &Portfolio) -> Ordering {
        if self.is_textual() {
            compare_missing_first(self.text(a), self.text(b), |x, y| {
                collation_key(x).cmp(&collation_key(y))
            })
        } else {
            compare_missing_first(self.number(a), self.number(b), |x, y| x.total_cmp(&y))
        }
    }
}

fn compare_missing_first<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case- and accent-insensitive key: `Équité` collates with `equite`.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Stable sort in place. Ties keep their incoming order in both directions.
pub fn sort_portfolios(rows: &mut [&Portfolio], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = spec.key.compare(a, b);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

// ============================================================================
// Filtering
// ============================================================================

/// Conjunctive equality filters. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub confidence: Option<Confidence>,
    pub asset_class: Option<String>,
}

impl FilterSpec {
    pub fn matches(&self, p: &Portfolio) -> bool {
        let confidence_ok = self.confidence.map_or(true, |c| p.confidence == c);
        let class_ok = self
            .asset_class
            .as_deref()
            .map_or(true, |c| p.asset_class.as_deref() == Some(c));
        confidence_ok && class_ok
    }

    pub fn is_active(&self) -> bool {
        self.confidence.is_some() || self.asset_class.is_some()
    }
}

// ============================================================================
// View state
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub selected: Option<String>,
    /// `None` keeps dataset insertion order.
    pub sort: Option<SortSpec>,
    pub filter: FilterSpec,
}

impl ViewState {
    /// Unsorted, unfiltered, first portfolio selected.
    pub fn initial(dataset: &Dataset) -> Self {
        Self::default().reconciled(dataset)
    }

    /// Visible rows: filtered, then sorted.
    pub fn visible<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Portfolio> {
        let mut rows: Vec<&Portfolio> = dataset.iter().filter(|p| self.filter.matches(p)).collect();
        if let Some(spec) = self.sort {
            sort_portfolios(&mut rows, spec);
        }
        rows
    }

    pub fn selected_portfolio<'a>(&self, dataset: &'a Dataset) -> Option<&'a Portfolio> {
        self.selected.as_deref().and_then(|id| dataset.get(id))
    }

    /// Select `id` if it is a visible row; otherwise the state is unchanged.
    pub fn select(self, id: &str, dataset: &Dataset) -> Self {
        if self.visible(dataset).iter().any(|p| p.id == id) {
            tracing::debug!(id, "portfolio selected");
            Self {
                selected: Some(id.to_string()),
                ..self
            }
        } else {
            self
        }
    }

    /// Same key flips direction; a new key starts ascending.
    pub fn toggle_sort(self, key: SortKey, dataset: &Dataset) -> Self {
        let direction = match self.sort {
            Some(spec) if spec.key == key => spec.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        tracing::debug!(?key, ?direction, "sort changed");
        Self {
            sort: Some(SortSpec { key, direction }),
            ..self
        }
        .reconciled(dataset)
    }

    /// Advance to the next sort column, ascending.
    pub fn cycle_sort_key(self, dataset: &Dataset) -> Self {
        let key = self.sort.map_or(SortKey::Name, |s| s.key.next());
        let sort = Some(SortSpec {
            key,
            direction: SortDirection::Ascending,
        });
        Self { sort, ..self }.reconciled(dataset)
    }

    /// Flip the active direction, or start ascending by name.
    pub fn flip_direction(self, dataset: &Dataset) -> Self {
        let key = self.sort.map_or(SortKey::Name, |s| s.key);
        self.toggle_sort(key, dataset)
    }

    pub fn with_filter(self, filter: FilterSpec, dataset: &Dataset) -> Self {
        tracing::debug!(?filter, "filter changed");
        Self { filter, ..self }.reconciled(dataset)
    }

    /// All → Internal → Directional → Robust → All.
    pub fn cycle_confidence_filter(self, dataset: &Dataset) -> Self {
        let next = match self.filter.confidence {
            None => Some(Confidence::ALL[0]),
            Some(current) => Confidence::ALL
                .iter()
                .position(|&c| c == current)
                .and_then(|i| Confidence::ALL.get(i + 1).copied()),
        };
        let filter = FilterSpec {
            confidence: next,
            ..self.filter.clone()
        };
        self.with_filter(filter, dataset)
    }

    /// All → each asset class in dataset order → All.
    pub fn cycle_asset_class_filter(self, dataset: &Dataset) -> Self {
        let classes = dataset.asset_classes();
        let next = match self.filter.asset_class.as_deref() {
            None => classes.first().map(|c| c.to_string()),
            Some(current) => classes
                .iter()
                .position(|&c| c == current)
                .and_then(|i| classes.get(i + 1))
                .map(|c| c.to_string()),
        };
        let filter = FilterSpec {
            asset_class: next,
            ..self.filter.clone()
        };
        self.with_filter(filter, dataset)
    }

    pub fn select_next(self, dataset: &Dataset) -> Self {
        self.step_selection(dataset, 1)
    }

    pub fn select_prev(self, dataset: &Dataset) -> Self {
        self.step_selection(dataset, -1)
    }

    fn step_selection(self, dataset: &Dataset, delta: isize) -> Self {
        let rows = self.visible(dataset);
        if rows.is_empty() {
            return self;
        }
        let current = self
            .selected
            .as_deref()
            .and_then(|id| rows.iter().position(|p| p.id == id))
            .unwrap_or(0);
        let target = (current as isize + delta).clamp(0, rows.len() as isize - 1) as usize;
        let id = rows[target].id.clone();
        Self {
            selected: Some(id),
            ..self
        }
    }

    /// Keep the selection if it is still visible, else fall back to the first
    /// visible row, or none when nothing is visible.
    fn reconciled(self, dataset: &Dataset) -> Self {
        let rows = self.visible(dataset);
        let still_visible = self
            .selected
            .as_deref()
            .is_some_and(|id| rows.iter().any(|p| p.id == id));
        if still_visible {
            return self;
        }
        let selected = rows.first().map(|p| p.id.clone());
        Self { selected, ..self }
    }
}
