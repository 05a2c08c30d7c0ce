//! Property-based tests for chart geometry
//!
//! Tests invariants:
//! - Hover index is in range inside the plot and absent outside
//! - Points span the plot horizontally
//! - Bubble radii are clamped
//! - Hit-testing respects bubble radii

use proptest::prelude::*;

use crate::core::chart::line::LineChart;
use crate::core::chart::scatter::{BubbleChart, ScatterPoint, MAX_RADIUS, MIN_RADIUS};
use crate::core::chart::Surface;
use crate::core::model::Confidence;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 1..60)
}

fn arb_surface() -> impl Strategy<Value = Surface> {
    (160.0f64..1200.0, 96.0f64..600.0, prop_oneof![Just(0.25), Just(0.125), Just(1.0), Just(2.0)])
        .prop_map(|(w, h, ratio)| Surface::new(w, h, ratio))
}

fn arb_points() -> impl Strategy<Value = Vec<ScatterPoint>> {
    prop::collection::vec(
        (-1.0f64..1.0, 0.0f64..100.0, prop::option::of(1.0f64..5000.0)),
        1..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (psi, metric, aum))| ScatterPoint {
                id: format!("p{i}"),
                psi,
                metric,
                magnitude: aum,
                confidence: Confidence::Robust,
            })
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: hover inside the plot resolves to a real sample
    #[test]
    fn prop_hover_inside_plot_is_in_range(
        series in arb_series(),
        surface in arb_surface(),
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let chart = LineChart::layout(&series, &surface).unwrap();
        let x = chart.plot.left + fx * chart.plot.width;
        let y = chart.plot.top + fy * chart.plot.height;
        let sample = chart.hover(x, y).unwrap();
        prop_assert!(sample.index < series.len());
        prop_assert_eq!(sample.value, series[sample.index]);
    }

    /// Property: hover left of or below the plot reports nothing
    #[test]
    fn prop_hover_outside_plot_is_none(
        series in arb_series(),
        surface in arb_surface(),
        offset in 0.5f64..50.0,
    ) {
        let chart = LineChart::layout(&series, &surface).unwrap();
        let mid_y = chart.plot.top + chart.plot.height / 2.0;
        let mid_x = chart.plot.left + chart.plot.width / 2.0;
        prop_assert!(chart.hover(chart.plot.left - offset, mid_y).is_none());
        prop_assert!(chart.hover(chart.plot.right() + offset, mid_y).is_none());
        prop_assert!(chart.hover(mid_x, chart.plot.bottom() + offset).is_none());
    }

    /// Property: the plot's left edge always resolves to the oldest sample
    #[test]
    fn prop_hover_at_left_edge_is_first(series in arb_series(), surface in arb_surface()) {
        let chart = LineChart::layout(&series, &surface).unwrap();
        let sample = chart.hover(chart.plot.left, chart.plot.top).unwrap();
        prop_assert_eq!(sample.index, 0);
    }

    /// Property: points run from plot-left to plot-right inside the plot
    #[test]
    fn prop_points_span_plot(series in arb_series(), surface in arb_surface()) {
        let chart = LineChart::layout(&series, &surface).unwrap();
        prop_assert_eq!(chart.points.len(), series.len());
        let first = chart.points[0];
        prop_assert!((first.0 - chart.plot.left).abs() < 1e-9);
        if series.len() > 1 {
            let last = chart.points[series.len() - 1];
            prop_assert!((last.0 - chart.plot.right()).abs() < 1e-9);
        }
        let eps = 1e-6;
        for &(x, y) in &chart.points {
            prop_assert!(x >= chart.plot.left - eps && x <= chart.plot.right() + eps);
            prop_assert!(y >= chart.plot.top - eps && y <= chart.plot.bottom() + eps);
        }
    }

    /// Property: bubble radii stay within [MIN_RADIUS, MAX_RADIUS]
    #[test]
    fn prop_radius_is_clamped(points in arb_points(), surface in arb_surface()) {
        let chart = BubbleChart::layout(&points, &surface, None).unwrap();
        for bubble in &chart.bubbles {
            prop_assert!(bubble.radius >= MIN_RADIUS && bubble.radius <= MAX_RADIUS);
        }
    }

    /// Property: the centre of the top-most bubble hits that bubble
    #[test]
    fn prop_hit_at_centre_of_last_bubble(points in arb_points(), surface in arb_surface()) {
        let chart = BubbleChart::layout(&points, &surface, None).unwrap();
        let last = chart.bubbles.last().unwrap();
        let hit = chart.hit_test(last.cx, last.cy).map(|b| b.id.clone());
        prop_assert_eq!(hit, Some(last.id.clone()));
    }

    /// Property: a lone bubble is hit within its radius and missed just past it
    #[test]
    fn prop_lone_bubble_radius(
        psi in -1.0f64..1.0,
        metric in 0.0f64..100.0,
        angle in 0.0f64..std::f64::consts::TAU,
        surface in arb_surface(),
    ) {
        let point = ScatterPoint {
            id: "solo".into(),
            psi,
            metric,
            magnitude: Some(100.0),
            confidence: Confidence::Internal,
        };
        let chart = BubbleChart::layout(&[point], &surface, None).unwrap();
        let b = &chart.bubbles[0];
        let inside = (b.cx + (b.radius - 0.01) * angle.cos(), b.cy + (b.radius - 0.01) * angle.sin());
        let outside = (b.cx + (b.radius + 1.0) * angle.cos(), b.cy + (b.radius + 1.0) * angle.sin());
        prop_assert!(chart.hit_test(inside.0, inside.1).is_some());
        prop_assert!(chart.hit_test(outside.0, outside.1).is_none());
    }
}
