//! Root layout: header, KPI cards, table + peer map, detail row, help panel
//! and status bar.
//!
//! Regions that do not fit the terminal are `None`; the views for them are
//! simply not rendered.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the KPI card row.
pub const KPI_HEIGHT: u16 = 5;
/// Height of the factor / dispersion / trend row.
pub const DETAIL_HEIGHT: u16 = 11;
/// Height of the help panel when expanded (collapsed it is a single line).
pub const HELP_EXPANDED_HEIGHT: u16 = 8;
/// Below this width the peer map is dropped and the table takes the row.
pub const SCATTER_MIN_WIDTH: u16 = 100;
/// Minimum rows left for the table before the detail row is dropped.
pub const TABLE_MIN_HEIGHT: u16 = 5;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub kpis: Option<Rect>,
    pub table: Rect,
    pub scatter: Option<Rect>,
    pub detail: Option<Rect>,
    pub help: Rect,
    pub status: Rect,
}

impl DashboardLayout {
    pub fn compute(area: Rect, help_expanded: bool) -> Self {
        let help_height = if help_expanded { HELP_EXPANDED_HEIGHT } else { 1 };
        let fixed = 1 + help_height + 1; // header + help + status
        let available = area.height.saturating_sub(fixed);

        let show_kpis = available >= KPI_HEIGHT + TABLE_MIN_HEIGHT;
        let after_kpis = if show_kpis { available - KPI_HEIGHT } else { available };
        let show_detail = after_kpis >= DETAIL_HEIGHT + TABLE_MIN_HEIGHT;

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if show_kpis { KPI_HEIGHT } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(if show_detail { DETAIL_HEIGHT } else { 0 }),
            Constraint::Length(help_height),
            Constraint::Length(1),
        ])
        .split(area);

        let body = rows[2];
        let (table, scatter) = if body.width >= SCATTER_MIN_WIDTH {
            let cols = Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(body);
            (cols[0], Some(cols[1]))
        } else {
            (body, None)
        };

        Self {
            header: rows[0],
            kpis: show_kpis.then_some(rows[1]),
            table,
            scatter,
            detail: show_detail.then_some(rows[3]),
            help: rows[4],
            status: rows[5],
        }
    }
}

/// Split the detail row into factors, dispersion and the two trend charts.
pub fn detail_columns(area: Rect) -> [Rect; 4] {
    let cols = Layout::horizontal([
        Constraint::Percentage(26),
        Constraint::Percentage(18),
        Constraint::Percentage(28),
        Constraint::Percentage(28),
    ])
    .split(area);
    [cols[0], cols[1], cols[2], cols[3]]
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
