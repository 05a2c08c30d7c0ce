//! Collapsible "how to read this dashboard" panel.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::hit_map::{HitMap, Target};
use crate::tui::theme;

const HEADING: &str = "How to read this dashboard";

const BODY: [&str; 5] = [
    "Crowding Score ranks how closely a portfolio's exposures track its peer cohort (0 = unique, 100 = herd).",
    "PSI is the signed similarity to the cohort; the peer map plots it against the chosen metric.",
    "Bubble size follows AUM, colour follows cohort confidence (Internal, Directional, Robust).",
    "Factor bars show percentile exposure versus peers; dispersion shows how much peers disagree.",
    "Trend charts cover the last 30 days; hover for the value on a given day.",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpPanel {
    pub expanded: bool,
}

impl HelpPanel {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        tracing::debug!(expanded = self.expanded, "help panel toggled");
    }

    /// Accessibility state of the toggle, `"true"` or `"false"`.
    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded {
            "true"
        } else {
            "false"
        }
    }

    fn toggle_line(&self) -> Line<'static> {
        let (glyph, state) = if self.expanded {
            ("▾", "expanded")
        } else {
            ("▸", "collapsed")
        };
        Line::from(vec![
            Span::styled(format!("{glyph} {HEADING} "), theme::heading()),
            Span::styled(format!("({state}) "), theme::muted()),
            Span::styled("[h]", theme::key_hint()),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
        if area.height == 0 {
            return;
        }
        let toggle = Rect { height: 1, ..area };
        if !self.expanded {
            frame.render_widget(Paragraph::new(self.toggle_line()), toggle);
            hits.register(Target::HelpToggle, toggle);
            return;
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme::border_default())
            .title(self.toggle_line());
        let lines: Vec<Line> = BODY
            .iter()
            .map(|text| Line::from(vec![Span::styled("  • ", theme::dim()), Span::raw(*text)]))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
        hits.register(Target::HelpToggle, toggle);
    }
}
