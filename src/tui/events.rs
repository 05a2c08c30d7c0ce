use crate::core::data_source::LoadOutcome;
use crate::core::view_state::SortKey;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,
    /// Raw terminal input (keyboard/mouse/focus).
    Input(crossterm::event::Event),
    /// The one-shot dataset load finished.
    DataLoaded(LoadOutcome),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Selection
    SelectNext,
    SelectPrev,
    Select(String),

    // Sorting and filtering
    SortBy(SortKey),
    CycleSortKey,
    FlipSortDirection,
    CycleConfidenceFilter,
    CycleAssetClassFilter,
    ClearFilters,

    // Panels
    CycleScatterMetric,
    ToggleHelpPanel,
    ShowKeys,
    CloseKeys,
    HideTooltip,

    // Application
    Quit,
}
