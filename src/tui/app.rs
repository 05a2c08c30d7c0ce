use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent};
use super::hit_map::{ChartGeometry, ChartId, HitMap, Target};
use super::layout::{centered_rect, DashboardLayout};
use super::theme;
use super::tooltip::Tooltip;
use super::views::help_panel::HelpPanel;
use super::views::{detail, filter_bar, portfolio_table, scatter_panel};
use crate::config::{AppConfig, ChartMarker};
use crate::core::chart::scatter::ScatterMetric;
use crate::core::data_source::DataOrigin;
use crate::core::format;
use crate::core::model::Dataset;
use crate::core::view_state::{SortKey, ViewState};

const KEYBINDINGS: [(&str, &str); 16] = [
    ("Navigation:", ""),
    ("j/k  ↓/↑", "Select next / previous portfolio"),
    ("click row", "Select portfolio"),
    ("click bubble", "Select portfolio on the peer map"),
    ("", ""),
    ("Table:", ""),
    ("1-8 / click header", "Sort by column (again to flip)"),
    ("s / S", "Next sort column / flip direction"),
    ("c / a", "Cycle confidence / asset class filter"),
    ("x", "Clear filters"),
    ("", ""),
    ("Panels:", ""),
    ("m", "Cycle peer map metric"),
    ("h", "Expand / collapse help panel"),
    ("Esc", "Hide tooltip / close this window"),
    ("q  Ctrl+C", "Quit"),
];

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// `None` until the one-shot load resolves.
    pub dataset: Option<Dataset>,
    pub origin: Option<DataOrigin>,
    pub view: ViewState,
    /// Vertical axis of the peer map.
    pub scatter_metric: ScatterMetric,
    pub marker: ChartMarker,
    pub help_panel: HelpPanel,
    /// Whether the keybinding modal is open.
    pub show_keys: bool,
    /// The single visible tooltip.
    pub tooltip: Option<Tooltip>,
    /// Regions drawn in the last frame.
    hits: HitMap,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        config: &AppConfig,
    ) -> Self {
        Self {
            running: true,
            dataset: None,
            origin: None,
            view: ViewState::default(),
            scatter_metric: config.chart.scatter_metric,
            marker: config.chart.marker,
            help_panel: HelpPanel::default(),
            show_keys: false,
            tooltip: None,
            hits: HitMap::default(),
            event_rx,
            event_tx,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    /// Render one frame and keep its hit map for the next pointer event.
    pub fn draw(&mut self, frame: &mut Frame) {
        self.hits = self.render(frame);
    }

    /// Handle for background tasks that report back into the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(input) => self.handle_input(input),
            AppEvent::DataLoaded(outcome) => {
                if let DataOrigin::Fallback(reason) = &outcome.origin {
                    tracing::info!(%reason, "dashboard showing embedded portfolios");
                }
                self.view = ViewState::initial(&outcome.dataset);
                self.dataset = Some(outcome.dataset);
                self.origin = Some(outcome.origin);
            }
            // Redraw only.
            AppEvent::Tick => {}
        }
    }

    fn handle_input(&mut self, event: Event) {
        // The key modal consumes all input while open.
        if self.show_keys {
            if let Some(action) = map_keys_modal_input(&event) {
                self.handle_action(action);
            }
            return;
        }

        match event {
            Event::Key(key) => {
                if let Some(action) = map_key_to_action(key) {
                    self.handle_action(action);
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => match kind {
                MouseEventKind::Moved => self.on_pointer_move(column, row),
                MouseEventKind::Down(MouseButton::Left) => self.on_click(column, row),
                _ => {}
            },
            Event::FocusLost | Event::Resize(..) => self.tooltip = None,
            _ => {}
        }
    }

    // ── Pointer ─────────────────────────────────────────────────────────

    fn on_pointer_move(&mut self, column: u16, row: u16) {
        let Some((target, rect)) = self
            .hits
            .target_at(column, row)
            .map(|(target, rect)| (target.clone(), rect))
        else {
            self.tooltip = None;
            return;
        };

        self.tooltip = match target {
            Target::Metric { key, .. } => Some(Tooltip::below(target, rect, key.text())),
            Target::Chart(id) => self
                .chart_hover_text(id, column, row)
                .map(|text| Tooltip::at_pointer(target, column, row, text)),
            _ => None,
        };
    }

    fn chart_hover_text(&self, id: ChartId, column: u16, row: u16) -> Option<String> {
        let region = self.hits.chart(id)?;
        let (x, y) = region.to_logical(column, row);
        match &region.geometry {
            ChartGeometry::Trend { chart, label } => {
                let sample = chart.hover(x, y)?;
                Some(chart.hover_text(label, &sample))
            }
            ChartGeometry::Bubbles(chart) => {
                let bubble = chart.hit_test(x, y)?;
                let portfolio = self.dataset.as_ref()?.get(&bubble.id)?;
                Some(format!(
                    "{} — PSI {} · {} {} · AUM {}",
                    portfolio.name,
                    format::format_psi(portfolio.kpis.psi),
                    self.scatter_metric.label(),
                    format::format_opt(self.scatter_metric.value(portfolio), 1),
                    format::format_aum(portfolio.aum),
                ))
            }
        }
    }

    fn on_click(&mut self, column: u16, row: u16) {
        let action = match self.hits.target_at(column, row).map(|(t, _)| t) {
            Some(Target::Row(id)) => Some(Action::Select(id.clone())),
            Some(Target::Header(key)) => Some(Action::SortBy(*key)),
            Some(Target::ConfidenceFilter) => Some(Action::CycleConfidenceFilter),
            Some(Target::AssetClassFilter) => Some(Action::CycleAssetClassFilter),
            Some(Target::HelpToggle) => Some(Action::ToggleHelpPanel),
            Some(Target::Chart(ChartId::PeerMap)) => self.bubble_at(column, row).map(Action::Select),
            _ => None,
        };
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn bubble_at(&self, column: u16, row: u16) -> Option<String> {
        let region = self.hits.chart(ChartId::PeerMap)?;
        let ChartGeometry::Bubbles(chart) = &region.geometry else {
            return None;
        };
        let (x, y) = region.to_logical(column, row);
        chart.hit_test(x, y).map(|b| b.id.clone())
    }

    // ── Actions ─────────────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectNext => self.update_view(ViewState::select_next),
            Action::SelectPrev => self.update_view(ViewState::select_prev),
            Action::Select(id) => self.update_view(|view, ds| view.select(&id, ds)),
            Action::SortBy(key) => self.update_view(|view, ds| view.toggle_sort(key, ds)),
            Action::CycleSortKey => self.update_view(ViewState::cycle_sort_key),
            Action::FlipSortDirection => self.update_view(ViewState::flip_direction),
            Action::CycleConfidenceFilter => self.update_view(ViewState::cycle_confidence_filter),
            Action::CycleAssetClassFilter => self.update_view(ViewState::cycle_asset_class_filter),
            Action::ClearFilters => {
                self.update_view(|view, ds| view.with_filter(Default::default(), ds))
            }
            Action::CycleScatterMetric => {
                self.scatter_metric = self.scatter_metric.next();
                self.tooltip = None;
            }
            Action::ToggleHelpPanel => {
                self.help_panel.toggle();
                self.tooltip = None;
            }
            Action::ShowKeys => {
                self.show_keys = true;
                self.tooltip = None;
            }
            Action::CloseKeys => self.show_keys = false,
            Action::HideTooltip => self.tooltip = None,
        }
    }

    /// Apply a view transition. Ignored until the dataset has loaded.
    fn update_view(&mut self, transition: impl FnOnce(ViewState, &Dataset) -> ViewState) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        let view = std::mem::take(&mut self.view);
        self.view = transition(view, dataset);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Project the state onto `frame`, returning the regions drawn.
    fn render(&self, frame: &mut Frame) -> HitMap {
        let mut hits = HitMap::default();
        let area = frame.area();
        let layout = DashboardLayout::compute(area, self.help_panel.expanded);

        let selected = self
            .dataset
            .as_ref()
            .and_then(|ds| self.view.selected_portfolio(ds));
        filter_bar::render(frame, layout.header, selected, &self.view.filter, &mut hits);

        match self.dataset.as_ref() {
            Some(dataset) => {
                if let Some(kpis) = layout.kpis {
                    detail::render_kpis(frame, kpis, selected, &mut hits);
                }
                portfolio_table::render(frame, layout.table, dataset, &self.view, &mut hits);
                if let Some(scatter) = layout.scatter {
                    scatter_panel::render(
                        frame,
                        scatter,
                        dataset,
                        &self.view,
                        self.scatter_metric,
                        self.marker,
                        &mut hits,
                    );
                }
                if let Some(area) = layout.detail {
                    detail::render_detail(frame, area, selected, self.marker, &mut hits);
                }
            }
            None => {
                let loading = Paragraph::new(Line::styled(" Loading portfolios…", theme::muted()))
                    .block(theme::block_default("Portfolios"));
                frame.render_widget(loading, layout.table);
            }
        }

        self.help_panel.render(frame, layout.help, &mut hits);
        self.render_status_bar(frame, layout.status);

        if let Some(tooltip) = &self.tooltip {
            tooltip.render(frame);
        }
        if self.show_keys {
            self.render_keys_modal(frame, area);
        }
        hits
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" q ", theme::key_hint()),
            Span::raw("quit "),
            Span::styled(" ? ", theme::key_hint()),
            Span::raw("keys "),
            Span::styled(" j/k ", theme::key_hint()),
            Span::raw("select "),
            Span::styled(" m ", theme::key_hint()),
            Span::raw(format!("map: {} ", self.scatter_metric.label())),
        ];
        if let Some(dataset) = &self.dataset {
            let shown = self.view.visible(dataset).len();
            spans.push(Span::styled(
                format!("│ {shown}/{} portfolios", dataset.len()),
                theme::muted(),
            ));
        }
        if let Some(sort) = self.view.sort {
            spans.push(Span::styled(
                format!(" │ sorted by {} {}", sort.key.label(), sort.direction.glyph()),
                theme::muted(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_keys_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &KEYBINDINGS {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

// ── Input mapping ───────────────────────────────────────────────────────

fn map_keys_modal_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match (*modifiers, *code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (_, KeyCode::Esc | KeyCode::Char('?')) => Some(Action::CloseKeys),
        _ => None,
    }
}

fn map_key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ShowKeys),
            KeyCode::Esc => Some(Action::HideTooltip),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('s') => Some(Action::CycleSortKey),
            KeyCode::Char('S') => Some(Action::FlipSortDirection),
            KeyCode::Char('c') => Some(Action::CycleConfidenceFilter),
            KeyCode::Char('a') => Some(Action::CycleAssetClassFilter),
            KeyCode::Char('x') => Some(Action::ClearFilters),
            KeyCode::Char('m') => Some(Action::CycleScatterMetric),
            KeyCode::Char('h') => Some(Action::ToggleHelpPanel),
            KeyCode::Char(d @ '1'..='8') => {
                let idx = d as usize - '1' as usize;
                SortKey::ALL.get(idx).copied().map(Action::SortBy)
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data_source::LoadOutcome;
    use crate::core::fixtures::fallback_dataset;
    use crate::core::tooltips::TooltipKey;
    use crate::core::view_state::SortDirection;
    use ratatui::backend::TestBackend;

    fn loaded_app() -> AppState {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(rx, tx, &AppConfig::default());
        app.handle_event(AppEvent::DataLoaded(LoadOutcome {
            dataset: fallback_dataset().clone(),
            origin: DataOrigin::Fallback("empty".into()),
        }));
        app
    }

    fn draw(app: &mut AppState) {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
    }

    fn key(c: char) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> AppEvent {
        AppEvent::Input(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    #[test]
    fn test_data_loaded_selects_first() {
        let app = loaded_app();
        assert_eq!(app.view.selected.as_deref(), Some("internal"));
        assert!(app.origin.as_ref().is_some_and(DataOrigin::is_fallback));
    }

    #[test]
    fn test_actions_before_load_are_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(rx, tx, &AppConfig::default());
        app.handle_event(key('j'));
        app.handle_event(key('c'));
        assert_eq!(app.view, ViewState::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
    }

    #[test]
    fn test_key_mapping() {
        let mut app = loaded_app();
        app.handle_event(key('j'));
        assert_eq!(app.view.selected.as_deref(), Some("french"));
        app.handle_event(key('4'));
        assert_eq!(app.view.sort.map(|s| s.key), Some(SortKey::Aum));
        app.handle_event(key('m'));
        assert_eq!(app.scatter_metric, ScatterMetric::PeerOverlap);
        app.handle_event(key('h'));
        assert!(app.help_panel.expanded);
        app.handle_event(key('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_keys_modal_consumes_input() {
        let mut app = loaded_app();
        app.handle_event(key('?'));
        assert!(app.show_keys);
        app.handle_event(key('j'));
        assert_eq!(app.view.selected.as_deref(), Some("internal"));
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        ))));
        assert!(!app.show_keys);
    }

    #[test]
    fn test_ctrl_c_quits_from_input_stream() {
        let mut app = loaded_app();
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))));
        assert!(!app.running);
    }

    #[test]
    fn test_click_row_selects() {
        let mut app = loaded_app();
        draw(&mut app);
        let rect = app.hits.region(&Target::Row("euro".into())).unwrap();
        app.handle_event(click(rect.x + 1, rect.y));
        assert_eq!(app.view.selected.as_deref(), Some("euro"));
    }

    #[test]
    fn test_header_click_toggles_direction() {
        let mut app = loaded_app();
        draw(&mut app);
        let rect = app.hits.region(&Target::Header(SortKey::CrowdingScore)).unwrap();
        app.handle_event(click(rect.x, rect.y));
        assert_eq!(app.view.sort.map(|s| s.direction), Some(SortDirection::Ascending));
        draw(&mut app);
        app.handle_event(click(rect.x, rect.y));
        assert_eq!(app.view.sort.map(|s| s.direction), Some(SortDirection::Descending));
    }

    #[test]
    fn test_metric_hover_shows_single_tooltip_and_focus_loss_hides() {
        let mut app = loaded_app();
        draw(&mut app);
        let target = Target::Metric {
            key: TooltipKey::Psi,
            slot: 0,
        };
        let rect = app.hits.region(&target).unwrap();
        app.handle_event(mouse(MouseEventKind::Moved, rect.x + 1, rect.y + 1));
        app.handle_event(mouse(MouseEventKind::Moved, rect.x + 2, rect.y + 1));
        let tooltip = app.tooltip.clone().unwrap();
        assert_eq!(tooltip.text, TooltipKey::Psi.text());
        assert_eq!(tooltip.owner, target);

        // Re-rendering does not change what is shown.
        draw(&mut app);
        draw(&mut app);
        assert_eq!(app.tooltip, Some(tooltip));

        app.handle_event(AppEvent::Input(Event::FocusLost));
        assert!(app.tooltip.is_none());
    }

    #[test]
    fn test_trend_hover_reports_sample() {
        let mut app = loaded_app();
        draw(&mut app);
        let area = app.hits.chart(ChartId::CrowdingTrend).unwrap().area;
        let (column, row) = (area.x + area.width / 2, area.y + area.height / 2);
        app.handle_event(mouse(MouseEventKind::Moved, column, row));
        let text = app.tooltip.as_ref().map(|t| t.text.clone()).unwrap();
        assert!(text.starts_with("Crowding Score — T-"), "{text}");
    }

    #[test]
    fn test_bubble_click_selects() {
        let mut app = loaded_app();
        draw(&mut app);
        let region = app.hits.chart(ChartId::PeerMap).unwrap();
        let ChartGeometry::Bubbles(chart) = &region.geometry else {
            panic!("peer map should hold bubble geometry");
        };
        let euro = chart.bubbles.iter().find(|b| b.id == "euro").unwrap();
        let column = region.area.x + (euro.cx / 8.0) as u16;
        let row = region.area.y + (euro.cy / 16.0) as u16;
        app.handle_event(click(column, row));
        assert_eq!(app.view.selected.as_deref(), Some("euro"));
    }

    #[test]
    fn test_filter_chip_click_reconciles_selection() {
        let mut app = loaded_app();
        draw(&mut app);
        let rect = app.hits.region(&Target::ConfidenceFilter).unwrap();
        // All → Internal → Directional
        app.handle_event(click(rect.x, rect.y));
        draw(&mut app);
        let rect = app.hits.region(&Target::ConfidenceFilter).unwrap();
        app.handle_event(click(rect.x, rect.y));
        assert_eq!(app.view.selected.as_deref(), Some("french"));

        app.handle_event(key('x'));
        assert!(!app.view.filter.is_active());
        assert_eq!(app.view.selected.as_deref(), Some("french"));
    }

    #[test]
    fn test_help_toggle_click() {
        let mut app = loaded_app();
        draw(&mut app);
        let rect = app.hits.region(&Target::HelpToggle).unwrap();
        app.handle_event(click(rect.x, rect.y));
        assert_eq!(app.help_panel.aria_expanded(), "true");
    }
}
