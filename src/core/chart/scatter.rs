//! Bubble scatter: similarity index against a secondary metric, radius by
//! asset size.

use super::{extent, Padding, PlotArea, Surface, Tick, LABEL_GAP, LINE_HEIGHT};
use crate::core::format::tick_decimals;
use crate::core::model::{Confidence, Portfolio};

pub const PADDING: Padding = Padding {
    top: 16.0,
    right: 16.0,
    bottom: 32.0,
    left: 48.0,
};

pub const MIN_RADIUS: f64 = 6.0;
pub const MAX_RADIUS: f64 = 22.0;

/// Axis ranges are padded by this share of the raw span on each side.
pub const AXIS_PAD_FRACTION: f64 = 0.08;

/// Similarity index bounds.
pub const PSI_BOUNDS: (f64, f64) = (-1.0, 1.0);

/// The vertical axis of the bubble chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterMetric {
    #[default]
    CrowdingScore,
    PeerOverlap,
    Momentum,
}

impl ScatterMetric {
    pub const ALL: [ScatterMetric; 3] = [
        ScatterMetric::CrowdingScore,
        ScatterMetric::PeerOverlap,
        ScatterMetric::Momentum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScatterMetric::CrowdingScore => "Crowding Score",
            ScatterMetric::PeerOverlap => "Peer Overlap %",
            ScatterMetric::Momentum => "Momentum 30d",
        }
    }

    pub fn value(self, p: &Portfolio) -> Option<f64> {
        match self {
            ScatterMetric::CrowdingScore => p.kpis.crowding_score,
            ScatterMetric::PeerOverlap => p.kpis.peer_overlap_ratio,
            ScatterMetric::Momentum => p.kpis.crowding_momentum_30d,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Input for one bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub id: String,
    pub psi: f64,
    pub metric: f64,
    pub magnitude: Option<f64>,
    pub confidence: Confidence,
}

impl ScatterPoint {
    /// `None` when either coordinate is missing.
    pub fn from_portfolio(p: &Portfolio, metric: ScatterMetric) -> Option<Self> {
        Some(Self {
            id: p.id.clone(),
            psi: p.kpis.psi?,
            metric: metric.value(p)?,
            magnitude: p.aum,
            confidence: p.confidence,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Pad the raw extent by `AXIS_PAD_FRACTION` of its span (unit span when
    /// flat), then clamp to `bounds` if given.
    pub fn padded(lo: f64, hi: f64, bounds: Option<(f64, f64)>) -> Self {
        let span = if hi - lo == 0.0 { 1.0 } else { hi - lo };
        let pad = span * AXIS_PAD_FRACTION;
        let (mut min, mut max) = (lo - pad, hi + pad);
        if let Some((bmin, bmax)) = bounds {
            min = min.max(bmin);
            max = max.min(bmax);
        }
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            span
        } else {
            1.0
        }
    }

    /// Position of `v` in [0, 1] along the axis.
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub confidence: Confidence,
    pub selected: bool,
}

impl Bubble {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChart {
    pub plot: PlotArea,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// In draw order; later bubbles are on top.
    pub bubbles: Vec<Bubble>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

/// Square-root scale from `[lo, hi]` magnitudes onto the radius range.
fn radius_for(magnitude: Option<f64>, lo: f64, hi: f64) -> f64 {
    let Some(m) = magnitude else {
        return MIN_RADIUS;
    };
    let (slo, shi) = (lo.max(0.0).sqrt(), hi.max(0.0).sqrt());
    let t = if shi > slo {
        (m.max(0.0).sqrt() - slo) / (shi - slo)
    } else {
        0.5
    };
    (MIN_RADIUS + t * (MAX_RADIUS - MIN_RADIUS)).clamp(MIN_RADIUS, MAX_RADIUS)
}

impl BubbleChart {
    /// Lay out `points` on `surface`. Returns `None` when there are no points.
    pub fn layout(points: &[ScatterPoint], surface: &Surface, selected: Option<&str>) -> Option<Self> {
        let (xlo, xhi) = extent(points.iter().map(|p| p.psi))?;
        let (ylo, yhi) = extent(points.iter().map(|p| p.metric))?;
        let x_range = AxisRange::padded(xlo, xhi, Some(PSI_BOUNDS));
        let y_range = AxisRange::padded(ylo, yhi, None);
        let plot = PlotArea::inset(surface, PADDING);

        let (mlo, mhi) = extent(points.iter().filter_map(|p| p.magnitude)).unwrap_or((0.0, 0.0));

        let bubbles = points
            .iter()
            .map(|p| Bubble {
                id: p.id.clone(),
                cx: plot.left + x_range.fraction(p.psi) * plot.width,
                cy: plot.bottom() - y_range.fraction(p.metric) * plot.height,
                radius: radius_for(p.magnitude, mlo, mhi),
                confidence: p.confidence,
                selected: selected == Some(p.id.as_str()),
            })
            .collect();

        let x_ticks = [x_range.min, (x_range.min + x_range.max) / 2.0, x_range.max]
            .into_iter()
            .map(|v| Tick {
                text: format!("{v:.2}"),
                x: plot.left + x_range.fraction(v) * plot.width,
                y: plot.bottom() + LINE_HEIGHT,
            })
            .collect();
        let decimals = tick_decimals(y_range.span());
        let y_ticks = [y_range.min, (y_range.min + y_range.max) / 2.0, y_range.max]
            .into_iter()
            .map(|v| Tick {
                text: format!("{v:.decimals$}"),
                x: plot.left - LABEL_GAP,
                y: plot.bottom() - y_range.fraction(v) * plot.height,
            })
            .collect();

        Some(Self {
            plot,
            x_range,
            y_range,
            bubbles,
            x_ticks,
            y_ticks,
        })
    }

    /// Top-most bubble under the pointer. Later bubbles win.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Bubble> {
        self.bubbles.iter().rev().find(|b| b.contains(x, y))
    }
}
