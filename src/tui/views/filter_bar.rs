//! Header line: brand, selected portfolio and the two filter chips.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::model::Portfolio;
use crate::core::view_state::FilterSpec;
use crate::tui::hit_map::{HitMap, Target};
use crate::tui::theme;

const BRAND: &str = " PEER OBSERVATORY ";

fn confidence_chip(filter: &FilterSpec) -> String {
    let value = filter.confidence.map_or("All", |c| c.label());
    format!(" Confidence: {value} ")
}

fn asset_class_chip(filter: &FilterSpec) -> String {
    let value = filter.asset_class.as_deref().unwrap_or("All");
    format!(" Asset class: {value} ")
}

fn chip_width(text: &str) -> u16 {
    text.chars().count() as u16
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    selected: Option<&Portfolio>,
    filter: &FilterSpec,
    hits: &mut HitMap,
) {
    let confidence = confidence_chip(filter);
    let asset_class = asset_class_chip(filter);

    let [brand, title, conf_area, _, class_area] = Layout::horizontal([
        Constraint::Length(chip_width(BRAND) + 1),
        Constraint::Min(0),
        Constraint::Length(chip_width(&confidence)),
        Constraint::Length(1),
        Constraint::Length(chip_width(&asset_class)),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(BRAND, theme::brand_badge())),
        brand,
    );

    if let Some(portfolio) = selected {
        let line = Line::from(vec![
            Span::styled(portfolio.display_label(), theme::title()),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", portfolio.confidence.label()),
                theme::badge(portfolio.confidence),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), title);
    }

    let chip_style = |active: bool| if active { theme::highlight() } else { theme::key_hint() };
    frame.render_widget(
        Paragraph::new(Span::styled(confidence, chip_style(filter.confidence.is_some()))),
        conf_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            asset_class,
            chip_style(filter.asset_class.is_some()),
        )),
        class_area,
    );
    hits.register(Target::ConfidenceFilter, conf_area);
    hits.register(Target::AssetClassFilter, class_area);
}
