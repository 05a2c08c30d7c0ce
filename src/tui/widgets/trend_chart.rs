//! Canvas projection of a [`LineChart`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Widget,
    },
};

use super::{canvas_marker, put_label, text_px};
use crate::config::ChartMarker;
use crate::core::chart::line::LineChart;
use crate::core::chart::Surface;
use crate::tui::theme;

/// A trend line chart drawn from precomputed geometry.
///
/// ```ignore
/// let surface = surface_for(area, ChartMarker::Braille);
/// if let Some(chart) = LineChart::layout(&portfolio.trend_crowding, &surface) {
///     frame.render_widget(TrendChart::new(&chart, surface), area);
/// }
/// ```
pub struct TrendChart<'a> {
    chart: &'a LineChart,
    surface: Surface,
    marker: ChartMarker,
    line_color: Color,
    fill_color: Color,
}

impl<'a> TrendChart<'a> {
    pub fn new(chart: &'a LineChart, surface: Surface) -> Self {
        Self {
            chart,
            surface,
            marker: ChartMarker::default(),
            line_color: theme::LINE,
            fill_color: theme::LINE_FILL,
        }
    }

    pub fn marker(mut self, marker: ChartMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Canvas y grows upwards; geometry y grows downwards.
    fn flip(&self, y: f64) -> f64 {
        self.surface.height - y
    }
}

impl Widget for TrendChart<'_> {
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
                // Area under the line, one dot column at a time.
                let mut x = plot.left;
                while x <= plot.right() {
                    if let Some(y) = chart.line_y_at(x) {
                        ctx.draw(&CanvasLine::new(
                            surface.snap(x),
                            self.flip(plot.bottom()),
                            surface.snap(x),
                            self.flip(y),
                            self.fill_color,
                        ));
                    }
                    x += step;
                }
                ctx.layer();

                // Axes
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

                // Polyline
                for pair in chart.points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&CanvasLine::new(
                        surface.snap(x1),
                        self.flip(surface.snap(y1)),
                        surface.snap(x2),
                        self.flip(surface.snap(y2)),
                        self.line_color,
                    ));
                }
            })
            .render(area, buf);

        let tick_style = Style::default().fg(theme::TICK);
        for tick in &chart.y_ticks {
            put_label(buf, area, tick.x - text_px(&tick.text), tick.y, &tick.text, tick_style);
        }
        for tick in &chart.x_labels {
            put_label(buf, area, tick.x - text_px(&tick.text) / 2.0, tick.y, &tick.text, tick_style);
        }
    }
}
