pub mod bubble_plot;
pub mod trend_chart;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;

use super::hit_map::{CELL_PX_H, CELL_PX_W};
use crate::config::ChartMarker;
use crate::core::chart::Surface;

/// Dots per cell horizontally for each marker.
fn dots_per_cell(marker: ChartMarker) -> f64 {
    match marker {
        ChartMarker::Braille => 2.0,
        ChartMarker::HalfBlock => 1.0,
    }
}

/// Logical surface covering `area`, with the marker's dot density as the
/// pixel ratio.
pub fn surface_for(area: Rect, marker: ChartMarker) -> Surface {
    Surface::new(
        f64::from(area.width) * CELL_PX_W,
        f64::from(area.height) * CELL_PX_H,
        dots_per_cell(marker) / CELL_PX_W,
    )
}

pub fn canvas_marker(marker: ChartMarker) -> Marker {
    match marker {
        ChartMarker::Braille => Marker::Braille,
        ChartMarker::HalfBlock => Marker::HalfBlock,
    }
}

/// Logical width of `text` when printed on a canvas.
pub(crate) fn text_px(text: &str) -> f64 {
    text.chars().count() as f64 * CELL_PX_W
}

/// Writes `text` into the cell holding logical point `(x, y)`, using the
/// same 8x16 mapping as pointer lookups. The text is kept inside `area`.
///
/// Canvas `print` scales rows by `height - 1`, which puts labels near the
/// bottom edge one row too high, so chart labels go straight to the buffer
/// after the canvas has drawn.
pub(crate) fn put_label(buf: &mut Buffer, area: Rect, x: f64, y: f64, text: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = text.chars().count().min(usize::from(area.width)) as u16;
    let column = ((x.max(0.0) / CELL_PX_W).floor() as u16).min(area.width - width);
    let row = ((y.max(0.0) / CELL_PX_H).floor() as u16).min(area.height - 1);
    buf.set_stringn(
        area.x + column,
        area.y + row,
        text,
        usize::from(width),
        style,
    );
}
