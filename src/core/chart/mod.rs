//! Chart geometry.
//!
//! Layout functions are pure: series + surface in, geometry out. Widgets in
//! `tui::widgets` project the geometry onto a canvas and the interaction
//! layer keeps it for hover and hit-testing. Coordinates are logical pixels
//! with the origin at the top-left and y growing downwards.

pub mod line;
pub mod scatter;

/// A drawing surface in logical pixels.
///
/// `pixel_ratio` is device dots per logical pixel. Geometry is computed in
/// logical units and snapped to the dot grid at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Device resolution backing this surface.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }

    /// Snap a logical coordinate onto the device grid.
    pub fn snap(&self, v: f64) -> f64 {
        (v * self.pixel_ratio).round() / self.pixel_ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The region inside the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn inset(surface: &Surface, padding: Padding) -> Self {
        Self {
            left: padding.left,
            top: padding.top,
            width: (surface.width - padding.left - padding.right).max(0.0),
            height: (surface.height - padding.top - padding.bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Gap between the y axis and the right edge of its tick labels.
pub const LABEL_GAP: f64 = 6.0;

/// Height of one line of label text. X-axis labels sit one line below the
/// axis so they never share a text row with it.
pub const LINE_HEIGHT: f64 = 16.0;

/// A positioned text label. `y` falls inside the text line it is drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Minimum and maximum of a series, `None` when empty.
pub(crate) fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
