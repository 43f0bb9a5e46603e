use crate::{
    AuthStatus, Facet, FilterEdit, FilterRemoval, ListingSummary, RequestSeq, ResultPage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The search view was shown; load the first page.
    Opened,
    /// User edited the free-text search box.
    QueryTextChanged(String),
    /// The search timer armed by `Effect::ScheduleSearch` fired.
    SearchTimerElapsed { generation: u64 },
    /// User flipped a quick facet.
    FacetToggled { facet: Facet, enabled: bool },
    /// User opened the filter panel.
    FilterPanelOpened,
    /// User changed a field inside the filter panel.
    PendingFilterChanged(FilterEdit),
    /// User clicked Apply in the filter panel.
    PendingFiltersApplied,
    /// User closed the filter panel without applying.
    FilterPanelCancelled,
    /// User clicked "clear all filters".
    FiltersReset,
    /// User removed one active filter chip.
    FilterRemoved(FilterRemoval),
    /// User navigated to another result page.
    PageChanged(u32),
    /// The session owner reports a login, logout or role change.
    AuthChanged(AuthStatus),
    /// Listings response for request `seq`.
    ListingsLoaded {
        seq: RequestSeq,
        result: Result<ResultPage, LoadError>,
    },
    /// Recommendations response for request `seq`.
    RecommendationsLoaded {
        seq: RequestSeq,
        result: Result<Vec<ListingSummary>, LoadError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// A failed load, already logged in detail by whoever ran the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
