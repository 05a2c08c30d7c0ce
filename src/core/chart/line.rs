//! Trailing-window line chart: axes, min/mid/max ticks, polyline and area.

use super::{extent, Padding, PlotArea, Surface, Tick, LABEL_GAP, LINE_HEIGHT};
use crate::core::format::{relative_day_label, tick_decimals};

pub const PADDING: Padding = Padding {
    top: 12.0,
    right: 12.0,
    bottom: 28.0,
    left: 42.0,
};

/// Length of the trailing window named by the x-axis labels.
pub const WINDOW_DAYS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub plot: PlotArea,
    pub min: f64,
    pub max: f64,
    /// `max - min`, or 1 for a flat series.
    pub range: f64,
    pub decimals: usize,
    pub values: Vec<f64>,
    /// One point per sample, oldest first.
    pub points: Vec<(f64, f64)>,
    /// Min, mid, max. Anchored at their right edge.
    pub y_ticks: Vec<Tick>,
    /// Window start, middle and end. Anchored at their centre.
    pub x_labels: Vec<Tick>,
}

/// Result of a hover lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSample {
    pub index: usize,
    pub value: f64,
    pub relative_label: String,
}

impl LineChart {
    /// Lay out `values` on `surface`. Returns `None` for an empty series.
    pub fn layout(values: &[f64], surface: &Surface) -> Option<Self> {
        let (min, max) = extent(values.iter().copied())?;
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let decimals = tick_decimals(range);
        let plot = PlotArea::inset(surface, PADDING);

        let y_for = |v: f64| plot.top + plot.height - ((v - min) / range) * plot.height;
        let last = values.len().saturating_sub(1);
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let t = if last == 0 { 0.0 } else { i as f64 / last as f64 };
                (plot.left + t * plot.width, y_for(v))
            })
            .collect();

        let y_ticks = [min, min + range * 0.5, max]
            .into_iter()
            .map(|v| Tick {
                text: format!("{v:.decimals$}"),
                x: plot.left - LABEL_GAP,
                y: y_for(v),
            })
            .collect();

        let half = WINDOW_DAYS / 2;
        let x_labels = [
            (0.0, format!("T-{WINDOW_DAYS}")),
            (0.5, format!("T-{half}")),
            (1.0, "T".to_string()),
        ]
        .into_iter()
        .map(|(t, text)| Tick {
            text,
            x: plot.left + t * plot.width,
            y: plot.bottom() + LINE_HEIGHT,
        })
        .collect();

        Some(Self {
            plot,
            min,
            max,
            range,
            decimals,
            values: values.to_vec(),
            points,
            y_ticks,
            x_labels,
        })
    }

    /// Y of the line at `x`, interpolated between neighbouring points.
    pub fn line_y_at(&self, x: f64) -> Option<f64> {
        let first = self.points.first()?;
        if self.points.len() == 1 || x <= first.0 {
            return Some(first.1);
        }
        for pair in self.points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if x <= x1 {
                let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
                return Some(y0 + t * (y1 - y0));
            }
        }
        self.points.last().map(|p| p.1)
    }

    /// Nearest sample under the pointer, or `None` outside the plot area.
    pub fn hover(&self, x: f64, y: f64) -> Option<HoverSample> {
        if self.values.is_empty() || !self.plot.contains(x, y) {
            return None;
        }
        let last = self.values.len() - 1;
        let t = if self.plot.width > 0.0 {
            (x - self.plot.left) / self.plot.width
        } else {
            0.0
        };
        let index = ((t * last as f64).round().max(0.0) as usize).min(last);
        Some(HoverSample {
            index,
            value: self.values[index],
            relative_label: relative_day_label(index, self.values.len()),
        })
    }

    /// Tooltip text, e.g. `Crowding Score — T-3: 57`.
    pub fn hover_text(&self, label: &str, sample: &HoverSample) -> String {
        let decimals = self.decimals;
        format!(
            "{label} — {}: {:.decimals$}",
            sample.relative_label, sample.value
        )
    }
}
