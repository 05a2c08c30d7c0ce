//! Canvas projection of a [`BubbleChart`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Widget,
    },
};

use super::{canvas_marker, put_label, text_px};
use crate::config::ChartMarker;
use crate::core::chart::scatter::BubbleChart;
use crate::core::chart::Surface;
use crate::tui::theme;

pub struct BubblePlot<'a> {
    chart: &'a BubbleChart,
    surface: Surface,
    marker: ChartMarker,
    y_title: &'a str,
}

impl<'a> BubblePlot<'a> {
    pub fn new(chart: &'a BubbleChart, surface: Surface) -> Self {
        Self {
            chart,
            surface,
            marker: ChartMarker::default(),
            y_title: "",
        }
    }

    pub fn marker(mut self, marker: ChartMarker) -> Self {
        self.marker = marker;
        self
    }

    /// Label for the vertical axis.
    pub fn y_title(mut self, title: &'a str) -> Self {
        self.y_title = title;
        self
    }

    fn flip(&self, y: f64) -> f64 {
        self.surface.height - y
    }
}

impl Widget for BubblePlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let chart = self.chart;
        let surface = self.surface;
        let plot = chart.plot;
        let step = 1.0 / surface.pixel_ratio;

        Canvas::default()
            .marker(canvas_marker(self.marker))
            .x_bounds([0.0, surface.width])
            .y_bounds([0.0, surface.height])
            .paint(|ctx| {
                ctx.draw(&CanvasLine::new(
                    plot.left,
                    self.flip(plot.top),
                    plot.left,
                    self.flip(plot.bottom()),
                    theme::AXIS,
                ));
                ctx.draw(&CanvasLine::new(
                    plot.left,
                    self.flip(plot.bottom()),
                    plot.right(),
                    self.flip(plot.bottom()),
                    theme::AXIS,
                ));
                ctx.layer();

                for bubble in &chart.bubbles {
                    let (x, y) = (surface.snap(bubble.cx), self.flip(surface.snap(bubble.cy)));
                    if bubble.selected {
                        let mut r = bubble.radius;
                        while r > 0.0 {
                            ctx.draw(&Circle {
                                x,
                                y,
                                radius: r,
                                color: theme::ACCENT,
                            });
                            r -= step;
                        }
                    } else {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: bubble.radius,
                            color: theme::confidence_color(bubble.confidence),
                        });
                    }
                }
            })
            .render(area, buf);

        let tick_style = Style::default().fg(theme::TICK);
        for tick in &chart.y_ticks {
            put_label(buf, area, tick.x - text_px(&tick.text), tick.y, &tick.text, tick_style);
        }
        for tick in &chart.x_ticks {
            put_label(buf, area, tick.x - text_px(&tick.text) / 2.0, tick.y, &tick.text, tick_style);
        }

        // Vertical title above the plot, horizontal title left of the x ticks.
        let title_style = theme::muted();
        put_label(buf, area, plot.left, 0.0, self.y_title, title_style);
        if let Some(tick) = chart.x_ticks.first() {
            put_label(buf, area, 0.0, tick.y, "PSI", title_style);
        }
    }
}
