//! Tooltip overlay.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::hit_map::Target;
use super::theme;

const MAX_WIDTH: u16 = 56;

/// The single visible tooltip. Showing a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub text: String,
    /// Top-left cell of the overlay.
    pub anchor: (u16, u16),
    /// The region that raised it.
    pub owner: Target,
}

impl Tooltip {
    /// Anchored under an element.
    pub fn below(owner: Target, rect: Rect, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: (rect.x, rect.y.saturating_add(rect.height)),
            owner,
        }
    }

    /// Anchored next to the pointer.
    pub fn at_pointer(owner: Target, column: u16, row: u16, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: (column.saturating_add(2), row.saturating_add(1)),
            owner,
        }
    }

    /// Overlay rect, kept inside `frame_area`.
    pub fn placement(&self, frame_area: Rect) -> Rect {
        let text_width = self.text.chars().count() as u16;
        let width = text_width
            .saturating_add(2)
            .min(MAX_WIDTH)
            .min(frame_area.width);
        let inner_width = width.saturating_sub(2).max(1);
        let lines = text_width.div_ceil(inner_width).max(1);
        let height = lines.saturating_add(2).min(frame_area.height);

        let max_x = frame_area.x + frame_area.width.saturating_sub(width);
        let max_y = frame_area.y + frame_area.height.saturating_sub(height);
        let x = self.anchor.0.clamp(frame_area.x, max_x);
        let y = self.anchor.1.clamp(frame_area.y, max_y);
        Rect::new(x, y, width, height)
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = self.placement(frame.area());
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(Line::raw(self.text.as_str()))
            .wrap(Wrap { trim: true })
            .style(theme::tooltip())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_focused()),
            );
        frame.render_widget(paragraph, area);
    }
}
