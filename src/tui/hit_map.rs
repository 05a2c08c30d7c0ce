//! Interactive regions and chart geometry captured while rendering.
//!
//! Every frame builds a fresh `HitMap`; views register what they drew and
//! the event handler resolves pointer positions against the last one.
//! Registering the same target twice replaces the earlier region, so a view
//! that re-renders never stacks duplicate handlers.

use std::collections::HashMap;

use indexmap::IndexMap;
use ratatui::layout::Rect;

use crate::core::chart::line::LineChart;
use crate::core::chart::scatter::BubbleChart;
use crate::core::tooltips::TooltipKey;
use crate::core::view_state::SortKey;

/// Logical pixels per terminal cell.
pub const CELL_PX_W: f64 = 8.0;
pub const CELL_PX_H: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    CrowdingTrend,
    PsiTrend,
    PeerMap,
}

/// Something the pointer can land on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Row(String),
    Header(SortKey),
    /// A metric with an explanatory tooltip. `slot` distinguishes repeated
    /// elements sharing one text, such as factor rows.
    Metric { key: TooltipKey, slot: usize },
    ConfidenceFilter,
    AssetClassFilter,
    HelpToggle,
    Chart(ChartId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Trend { chart: LineChart, label: &'static str },
    Bubbles(BubbleChart),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartRegion {
    /// Cells the canvas was drawn into.
    pub area: Rect,
    pub geometry: ChartGeometry,
}

impl ChartRegion {
    /// Pointer cell to logical chart coordinates (cell centre).
    pub fn to_logical(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = f64::from(column.saturating_sub(self.area.x));
        let dy = f64::from(row.saturating_sub(self.area.y));
        (dx * CELL_PX_W + CELL_PX_W / 2.0, dy * CELL_PX_H + CELL_PX_H / 2.0)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: IndexMap<Target, Rect>,
    charts: HashMap<ChartId, ChartRegion>,
}

impl HitMap {
    pub fn register(&mut self, target: Target, rect: Rect) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        // Re-inserting moves the target to the top of the stack.
        self.regions.shift_remove(&target);
        self.regions.insert(target, rect);
    }

    pub fn register_chart(&mut self, id: ChartId, area: Rect, geometry: ChartGeometry) {
        self.register(Target::Chart(id), area);
        self.charts.insert(id, ChartRegion { area, geometry });
    }

    /// Top-most target under the pointer; later registrations win.
    pub fn target_at(&self, column: u16, row: u16) -> Option<(&Target, Rect)> {
        self.regions
            .iter()
            .rev()
            .find(|(_, rect)| rect_contains(**rect, column, row))
            .map(|(target, rect)| (target, *rect))
    }

    pub fn chart(&self, id: ChartId) -> Option<&ChartRegion> {
        self.charts.get(&id)
    }

    pub fn region(&self, target: &Target) -> Option<Rect> {
        self.regions.get(target).copied()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
