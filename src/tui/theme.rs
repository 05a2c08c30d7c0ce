//! Centralized Teal & Coral color theme for the observatory TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::format::MomentumTrend;
use crate::core::model::{BadgeClass, Confidence};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Teal. Titles, focused borders and the crowding trend.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
/// Light teal for key hints and the PSI trend.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Coral marks the selection.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x19, 0x19);
/// Tooltip and selected row background.
pub const BG_SURFACE: Color = Color::Rgb(0x12, 0x26, 0x26);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Charts ──────────────────────────────────────────────────────────────────

/// Axis lines.
pub const AXIS: Color = Color::Rgb(0x30, 0x36, 0x3D);
/// Tick labels.
pub const TICK: Color = Color::Rgb(0x8B, 0x94, 0x9E);
/// Trend line stroke.
pub const LINE: Color = INFO;
/// Area under the trend line.
pub const LINE_FILL: Color = Color::Rgb(0x1A, 0x3A, 0x5C);

// ── Domain ──────────────────────────────────────────────────────────────────

pub fn badge_color(badge: BadgeClass) -> Color {
    match badge {
        BadgeClass::Neutral => TEXT_MUTED,
        BadgeClass::Warning => WARNING,
        BadgeClass::Success => SUCCESS,
    }
}

/// Bubble and legend color for a confidence category.
pub fn confidence_color(confidence: Confidence) -> Color {
    badge_color(confidence.badge())
}

/// Inverse badge, e.g. ` Directional ` on amber.
pub fn badge(confidence: Confidence) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(confidence_color(confidence))
        .add_modifier(Modifier::BOLD)
}

pub fn momentum(trend: MomentumTrend) -> Style {
    match trend {
        MomentumTrend::Rising => Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
        MomentumTrend::Falling => Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Primary-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Selected table row.
pub fn selected_row() -> Style {
    Style::default().bg(BG_SURFACE).fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Active sort column header.
pub fn sorted_header() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn tooltip() -> Style {
    Style::default().fg(TEXT).bg(BG_SURFACE)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_teal() {
        assert_eq!(PRIMARY, Color::Rgb(0x00, 0x80, 0x80));
    }

    #[test]
    fn test_badge_colors_follow_badge_class() {
        assert_eq!(confidence_color(Confidence::Internal), TEXT_MUTED);
        assert_eq!(confidence_color(Confidence::Directional), WARNING);
        assert_eq!(confidence_color(Confidence::Robust), SUCCESS);
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(highlight(), Style::default());
        assert_ne!(sorted_header(), Style::default());
        assert_ne!(momentum(MomentumTrend::Rising), momentum(MomentumTrend::Falling));
    }
}
