//! Property-based tests for selection, sorting and filtering
//!
//! Tests invariants:
//! - Double flip restores order
//! - Sort is ordered and stable
//! - Filters and selection agree with the visible set
//! - Keyboard stepping follows table order

use std::cmp::Ordering;

use proptest::prelude::*;

use crate::core::model::{Confidence, Dataset, Portfolio};
use crate::core::view_state::{FilterSpec, SortKey, ViewState};
use crate::tests::common::{create_portfolio_with, create_test_dataset};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_confidence() -> impl Strategy<Value = Confidence> {
    prop_oneof![
        Just(Confidence::Internal),
        Just(Confidence::Directional),
        Just(Confidence::Robust),
    ]
}

fn arb_asset_class() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop_oneof![Just("Equity"), Just("Credit"), Just("Multi-Asset")])
}

/// Small value domains so that ties and missing values are common.
fn arb_portfolio(index: usize) -> impl Strategy<Value = Portfolio> {
    (
        arb_confidence(),
        arb_asset_class(),
        prop::option::of(0u8..5),
        prop::option::of(0u8..4),
        prop_oneof![Just("alpha"), Just("Beta"), Just("émile"), Just("Emile")],
    )
        .prop_map(move |(confidence, class, crowding, aum, name)| {
            let mut p = create_portfolio_with(
                &format!("p{index}"),
                confidence,
                class,
                crowding.map(f64::from),
            );
            p.name = name.to_string();
            p.aum = aum.map(|a| f64::from(a) * 500.0);
            p
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (0usize..12)
        .prop_flat_map(|n| (0..n).map(arb_portfolio).collect::<Vec<_>>())
        .prop_map(Dataset::from_portfolios)
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_filter() -> impl Strategy<Value = FilterSpec> {
    (prop::option::of(arb_confidence()), arb_asset_class()).prop_map(|(confidence, class)| {
        FilterSpec {
            confidence,
            asset_class: class.map(str::to_string),
        }
    })
}

fn ids(view: &ViewState, dataset: &Dataset) -> Vec<String> {
    view.visible(dataset).iter().map(|p| p.id.clone()).collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: flipping the direction twice returns the same order
    #[test]
    fn prop_double_flip_restores_order(dataset in arb_dataset(), key in arb_sort_key()) {
        let sorted = ViewState::initial(&dataset).toggle_sort(key, &dataset);
        let before = ids(&sorted, &dataset);
        let twice = sorted.clone().flip_direction(&dataset).flip_direction(&dataset);
        prop_assert_eq!(before, ids(&twice, &dataset));
        prop_assert_eq!(twice.sort, sorted.sort);
    }

    /// Property: ascending order is non-decreasing and ties keep insertion order
    #[test]
    fn prop_ascending_is_ordered_and_stable(dataset in arb_dataset(), key in arb_sort_key()) {
        let view = ViewState::initial(&dataset).toggle_sort(key, &dataset);
        let rows = view.visible(&dataset);
        for pair in rows.windows(2) {
            let ord = key.compare(pair[0], pair[1]);
            prop_assert_ne!(ord, Ordering::Greater);
            if ord == Ordering::Equal {
                prop_assert!(dataset.position(&pair[0].id) < dataset.position(&pair[1].id));
            }
        }
    }

    /// Property: missing numeric values sort before present ones
    #[test]
    fn prop_missing_values_sort_first(dataset in arb_dataset()) {
        let view = ViewState::initial(&dataset).toggle_sort(SortKey::CrowdingScore, &dataset);
        let present: Vec<bool> = view
            .visible(&dataset)
            .iter()
            .map(|p| p.kpis.crowding_score.is_some())
            .collect();
        let first_present = present.iter().position(|&b| b).unwrap_or(present.len());
        prop_assert!(present[first_present..].iter().all(|&b| b));
    }

    /// Property: every visible row satisfies every active filter
    #[test]
    fn prop_visible_rows_match_filter(dataset in arb_dataset(), filter in arb_filter()) {
        let view = ViewState::initial(&dataset).with_filter(filter.clone(), &dataset);
        for p in view.visible(&dataset) {
            if let Some(c) = filter.confidence {
                prop_assert_eq!(p.confidence, c);
            }
            if let Some(class) = filter.asset_class.as_deref() {
                prop_assert_eq!(p.asset_class.as_deref(), Some(class));
            }
        }
        let expected = dataset.iter().filter(|p| filter.matches(p)).count();
        prop_assert_eq!(view.visible(&dataset).len(), expected);
    }

    /// Property: after any filter or sort change the selection is visible
    #[test]
    fn prop_selection_is_visible(
        dataset in arb_dataset(),
        filters in prop::collection::vec(arb_filter(), 1..5),
        key in arb_sort_key(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut view = ViewState::initial(&dataset);
        if !dataset.is_empty() {
            let id = dataset.iter().nth(pick.index(dataset.len())).map(|p| p.id.clone());
            if let Some(id) = id {
                view = view.select(&id, &dataset);
            }
        }
        for filter in filters {
            view = view.with_filter(filter, &dataset).toggle_sort(key, &dataset);
            let visible = view.visible(&dataset);
            match view.selected.as_deref() {
                Some(id) => prop_assert!(visible.iter().any(|p| p.id == id)),
                None => prop_assert!(visible.is_empty()),
            }
        }
    }

    /// Property: a selection that stays visible survives a filter change
    #[test]
    fn prop_visible_selection_is_kept(dataset in arb_dataset(), filter in arb_filter()) {
        let view = ViewState::initial(&dataset);
        let before = view.selected.clone();
        let after = view.with_filter(filter.clone(), &dataset);
        if let Some(id) = before.as_deref() {
            let still_visible = dataset.get(id).is_some_and(|p| filter.matches(p));
            if still_visible {
                prop_assert_eq!(after.selected.as_deref(), Some(id));
            }
        }
    }

    /// Property: stepping down walks the visible rows in order, then stops
    #[test]
    fn prop_select_next_walks_visible_rows(n in 1usize..20, key in arb_sort_key()) {
        let dataset = create_test_dataset(n);
        let view = ViewState::initial(&dataset).toggle_sort(key, &dataset);
        let order: Vec<String> = view.visible(&dataset).iter().map(|p| p.id.clone()).collect();
        let mut view = view.select(&order[0], &dataset);
        let mut walked = Vec::new();
        for _ in 0..=n {
            walked.push(view.selected.clone().unwrap_or_default());
            view = view.select_next(&dataset);
        }
        prop_assert_eq!(&walked[..n], &order[..]);
        prop_assert_eq!(walked[n].as_str(), order[n - 1].as_str());
    }
}
