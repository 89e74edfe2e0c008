//! All possible UI actions. Actions are the sole mechanism for state mutation.

use dojo_core::{Portal, RequestCompletion, Toast};

/// Which dashboard panel holds the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    LearningPath,
    #[default]
    Catalog,
}

impl Panel {
    pub fn toggle(self) -> Self {
        match self {
            Self::LearningPath => Self::Catalog,
            Self::Catalog => Self::LearningPath,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,

    // ── Connection ──
    Connected(Portal),
    ConnectFailed(String),
    Refresh,
    Refreshed,
    RefreshFailed(String),

    // ── Overlays ──
    ToggleHelp,
    OpenSearch,
    CloseSearch,
    /// Live search text, shown in the status bar while typing.
    SearchInput(String),
    /// Apply the typed search to the catalog.
    SearchSubmit(String),
    Notify(Toast),
    DismissToast,
    ShowWalkthrough,
    DismissWalkthrough,

    // ── Navigation ──
    FocusPanel(Panel),
    MoveUp,
    MoveDown,
    /// Open the course under the cursor, or run the open drawer's call to action.
    Activate,
    CloseDrawer,
    NextPage,
    PreviousPage,
    HistoryBack,
    HistoryForward,

    // ── Catalog filter and sort ──
    CycleLanguage,
    CycleDifficulty,
    ToggleCertificate,
    ToggleSubtitles,
    CycleMaxHours,
    /// Remove the n-th (1-based) active filter chip.
    RemoveChip(usize),
    ClearFilters,
    CycleSort,

    // ── Calls to action ──
    OpenSurvey,
    RequestSettled(RequestCompletion),
}
