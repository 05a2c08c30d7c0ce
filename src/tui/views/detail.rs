//! Detail panels for the selected portfolio: KPI cards, factor bars,
//! dispersion list and the two trend charts.
//!
//! Every entry point takes `Option<&Portfolio>` and draws nothing for
//! `None`.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ChartMarker;
use crate::core::chart::line::LineChart;
use crate::core::format::{self, PLACEHOLDER};
use crate::core::model::{FactorExposure, Portfolio};
use crate::core::tooltips::TooltipKey;
use crate::tui::hit_map::{ChartGeometry, ChartId, HitMap, Target};
use crate::tui::layout::detail_columns;
use crate::tui::theme;
use crate::tui::widgets::surface_for;
use crate::tui::widgets::trend_chart::TrendChart;

pub const CROWDING_TREND_LABEL: &str = "Crowding Score";
pub const PSI_TREND_LABEL: &str = "PSI";

/// Width of the factor name column inside the factor panel.
const FACTOR_NAME_WIDTH: usize = 12;
/// Room left of the bar for the percentile figure.
const FACTOR_VALUE_WIDTH: usize = 5;

struct KpiCard {
    title: &'static str,
    key: TooltipKey,
    value: Span<'static>,
    caption: Line<'static>,
}

fn kpi_cards(p: &Portfolio) -> [KpiCard; 4] {
    let momentum = match format::format_momentum(p.kpis.crowding_momentum_30d) {
        Some((text, trend)) => Span::styled(text, theme::momentum(trend)),
        None => Span::styled(PLACEHOLDER, theme::muted()),
    };
    [
        KpiCard {
            title: "Crowding Score",
            key: TooltipKey::Crowding,
            value: Span::styled(format::format_opt(p.kpis.crowding_score, 0), theme::title()),
            caption: Line::from(vec![
                Span::styled(p.crowding_interpretation.clone(), theme::muted()),
                Span::raw(" "),
                Span::styled(format!(" {} ", p.confidence.label()), theme::badge(p.confidence)),
            ]),
        },
        KpiCard {
            title: "PSI",
            key: TooltipKey::Psi,
            value: Span::styled(format::format_psi(p.kpis.psi), theme::title()),
            caption: Line::styled("similarity to cohort", theme::muted()),
        },
        KpiCard {
            title: "Peer Overlap",
            key: TooltipKey::Overlap,
            value: Span::styled(format::format_percent(p.kpis.peer_overlap_ratio), theme::title()),
            caption: Line::styled("shared exposure", theme::muted()),
        },
        KpiCard {
            title: "Momentum 30d",
            key: TooltipKey::Momentum,
            value: momentum,
            caption: Line::styled("change in crowding", theme::muted()),
        },
    ]
}

/// The four KPI cards.
pub fn render_kpis(frame: &mut Frame, area: Rect, portfolio: Option<&Portfolio>, hits: &mut HitMap) {
    let Some(p) = portfolio else {
        return;
    };
    let slots = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (card, slot) in kpi_cards(p).into_iter().zip(slots.iter()) {
        let block = theme::block_default(card.title);
        let inner = block.inner(*slot);
        frame.render_widget(block, *slot);
        let body = Paragraph::new(vec![Line::from(card.value), card.caption]);
        frame.render_widget(body, inner);
        hits.register(
            Target::Metric {
                key: card.key,
                slot: 0,
            },
            *slot,
        );
    }
}

/// `name  ████████░░░  92%`, sized to `width` columns.
pub fn factor_bar_line(factor: &FactorExposure, width: usize) -> Line<'static> {
    let name: String = factor.name.chars().take(FACTOR_NAME_WIDTH).collect();
    let bar_width = width.saturating_sub(FACTOR_NAME_WIDTH + FACTOR_VALUE_WIDTH + 2);
    let filled = ((factor.percentile.clamp(0.0, 100.0) / 100.0) * bar_width as f64).round() as usize;
    Line::from(vec![
        Span::raw(format!("{name:<w$} ", w = FACTOR_NAME_WIDTH)),
        Span::styled("█".repeat(filled), Style::default().fg(theme::PRIMARY_LIGHT)),
        Span::styled("░".repeat(bar_width - filled), theme::dim()),
        Span::raw(format!(" {:>4}", format!("{:.0}%", factor.percentile))),
    ])
}

/// Factor bars, dispersion list and both trend charts.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    portfolio: Option<&Portfolio>,
    marker: ChartMarker,
    hits: &mut HitMap,
) {
    let Some(p) = portfolio else {
        return;
    };
    let [factors, dispersion, crowding, psi] = detail_columns(area);
    render_factors(frame, factors, p, hits);
    render_dispersion(frame, dispersion, p, hits);
    render_trend(
        frame,
        crowding,
        &p.trend_crowding,
        ChartId::CrowdingTrend,
        CROWDING_TREND_LABEL,
        marker,
        hits,
    );
    render_trend(frame, psi, &p.trend_psi, ChartId::PsiTrend, PSI_TREND_LABEL, marker, hits);
}

fn render_factors(frame: &mut Frame, area: Rect, p: &Portfolio, hits: &mut HitMap) {
    let block = theme::block_default("Factor Crowding");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    for (i, factor) in p.factors_top5.iter().enumerate().take(usize::from(inner.height)) {
        let row = Rect {
            y: inner.y + i as u16,
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(factor_bar_line(factor, width)), row);
        hits.register(
            Target::Metric {
                key: TooltipKey::FactorCrowding,
                slot: i,
            },
            row,
        );
    }
}

fn render_dispersion(frame: &mut Frame, area: Rect, p: &Portfolio, hits: &mut HitMap) {
    let block = theme::block_default("Dispersion");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width).saturating_sub(6).max(1);
    let lines: Vec<Line> = p
        .dispersion_snapshot
        .iter()
        .map(|d| {
            let factor: String = d.factor.chars().take(width).collect();
            Line::from(vec![
                Span::raw(format!("{factor:<width$}")),
                Span::styled(format!("{:>6.2}", d.dispersion_index), theme::title()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
    hits.register(
        Target::Metric {
            key: TooltipKey::Dispersion,
            slot: 0,
        },
        inner,
    );
}

fn render_trend(
    frame: &mut Frame,
    area: Rect,
    series: &[f64],
    id: ChartId,
    label: &'static str,
    marker: ChartMarker,
    hits: &mut HitMap,
) {
    let block = theme::block_default(label);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface = surface_for(inner, marker);
    let Some(chart) = LineChart::layout(series, &surface) else {
        return;
    };
    let color = match id {
        ChartId::PsiTrend => theme::PRIMARY_LIGHT,
        _ => theme::LINE,
    };
    frame.render_widget(
        TrendChart::new(&chart, surface).marker(marker).line_color(color),
        inner,
    );
    hits.register_chart(id, inner, ChartGeometry::Trend { chart, label });
}
