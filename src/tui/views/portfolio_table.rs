//! Portfolio table: one row per visible portfolio, clickable headers.
//!
//! Cells are laid out manually rather than with `Table` so that the header
//! and row rectangles registered in the hit map match exactly what was
//! drawn.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::core::format::{self, PLACEHOLDER};
use crate::core::model::{Dataset, Portfolio};
use crate::core::view_state::{SortKey, ViewState};
use crate::tui::hit_map::{HitMap, Target};
use crate::tui::theme;

/// Column widths, in `SortKey::ALL` order.
const COLUMNS: [Constraint; 8] = [
    Constraint::Min(14),
    Constraint::Length(13),
    Constraint::Length(11),
    Constraint::Length(7),
    Constraint::Length(9),
    Constraint::Length(6),
    Constraint::Length(8),
    Constraint::Length(9),
];

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: Option<usize>, viewport: usize) -> usize {
    match selected {
        Some(idx) if viewport > 0 && idx >= viewport => idx + 1 - viewport,
        _ => 0,
    }
}

fn header_label(key: SortKey, view: &ViewState) -> (String, Style) {
    match view.sort {
        Some(spec) if spec.key == key => (
            format!("{} {}", key.label(), spec.direction.glyph()),
            theme::sorted_header(),
        ),
        _ => (key.label().to_string(), theme::heading()),
    }
}

fn cells(p: &Portfolio) -> [Span<'static>; 8] {
    let momentum = match format::format_momentum(p.kpis.crowding_momentum_30d) {
        Some((text, trend)) => Span::styled(text, theme::momentum(trend)),
        None => Span::styled(PLACEHOLDER, theme::muted()),
    };
    [
        Span::raw(p.name.clone()),
        Span::styled(format!(" {} ", p.confidence.label()), theme::badge(p.confidence)),
        Span::raw(p.asset_class.clone().unwrap_or_else(|| PLACEHOLDER.to_string())),
        Span::raw(format::format_aum(p.aum)),
        Span::raw(format::format_opt(p.kpis.crowding_score, 0)),
        Span::raw(format::format_psi(p.kpis.psi)),
        Span::raw(format::format_percent(p.kpis.peer_overlap_ratio)),
        momentum,
    ]
}

pub fn render(frame: &mut Frame, area: Rect, dataset: &Dataset, view: &ViewState, hits: &mut HitMap) {
    let rows = view.visible(dataset);
    let title = if view.filter.is_active() {
        format!("Portfolios ({}/{})", rows.len(), dataset.len())
    } else {
        format!("Portfolios ({})", rows.len())
    };
    let block = theme::block_focused(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let header_row = Rect { height: 1, ..inner };
    let columns = Layout::horizontal(COLUMNS).spacing(1).split(header_row);
    for (key, col) in SortKey::ALL.iter().zip(columns.iter()) {
        let (label, style) = header_label(*key, view);
        frame.render_widget(Paragraph::new(Span::styled(label, style)), *col);
        hits.register(Target::Header(*key), *col);
    }

    if rows.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "No portfolios match the active filters (x clears)",
            theme::muted(),
        ));
        frame.render_widget(hint, Rect { y: inner.y + 1, height: inner.height.saturating_sub(1), ..inner });
        return;
    }

    let viewport = usize::from(inner.height.saturating_sub(1));
    let selected_idx = view
        .selected
        .as_deref()
        .and_then(|id| rows.iter().position(|p| p.id == id));
    let offset = scroll_offset(selected_idx, viewport);

    for (slot, portfolio) in rows.iter().skip(offset).take(viewport).enumerate() {
        let y = inner.y + 1 + slot as u16;
        let row_rect = Rect { y, height: 1, ..inner };
        let is_selected = view.selected.as_deref() == Some(portfolio.id.as_str());
        if is_selected {
            frame.render_widget(Block::default().style(theme::selected_row()), row_rect);
        }
        for (span, col) in cells(portfolio).into_iter().zip(columns.iter()) {
            frame.render_widget(Paragraph::new(span), Rect { y, ..*col });
        }
        hits.register(Target::Row(portfolio.id.clone()), row_rect);
    }
}
