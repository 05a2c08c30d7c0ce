//! Peer map: every visible portfolio as a bubble.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    Frame,
};

use crate::config::ChartMarker;
use crate::core::chart::scatter::{BubbleChart, ScatterMetric, ScatterPoint};
use crate::core::model::{Confidence, Dataset};
use crate::core::view_state::ViewState;
use crate::tui::hit_map::{ChartGeometry, ChartId, HitMap};
use crate::tui::theme;
use crate::tui::widgets::bubble_plot::BubblePlot;
use crate::tui::widgets::surface_for;

fn legend() -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for confidence in Confidence::ALL {
        spans.push(Span::styled(
            "● ",
            Style::default().fg(theme::confidence_color(confidence)),
        ));
        spans.push(Span::styled(format!("{}  ", confidence.label()), theme::muted()));
    }
    Line::from(spans)
}

/// Bubbles for the visible rows, in table order. Rows missing either
/// coordinate are left off the map.
pub fn points(dataset: &Dataset, view: &ViewState, metric: ScatterMetric) -> Vec<ScatterPoint> {
    view.visible(dataset)
        .into_iter()
        .filter_map(|p| ScatterPoint::from_portfolio(p, metric))
        .collect()
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    dataset: &Dataset,
    view: &ViewState,
    metric: ScatterMetric,
    marker: ChartMarker,
    hits: &mut HitMap,
) {
    let title = format!("Peer Map · PSI × {} [m]", metric.label());
    let block = theme::block_default(&title).title_bottom(legend());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface = surface_for(inner, marker);
    let points = points(dataset, view, metric);
    let Some(chart) = BubbleChart::layout(&points, &surface, view.selected.as_deref()) else {
        return;
    };
    frame.render_widget(
        BubblePlot::new(&chart, surface)
            .marker(marker)
            .y_title(metric.label()),
        inner,
    );
    hits.register_chart(ChartId::PeerMap, inner, ChartGeometry::Bubbles(chart));
}
