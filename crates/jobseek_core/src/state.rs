use std::time::Duration;

use crate::view_model::{FilterChip, SearchViewModel};
use crate::{
    merge_results, AuthStatus, Effect, FilterPanel, FilterRemoval, ListingQuery, ListingSummary,
    ResultPage,
};

/// Monotonic identifier of an issued request.
pub type RequestSeq = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Shortest non-empty query that is sent, in characters.
    pub min_query_len: usize,
    /// Quiet period after the last keystroke before a query is sent.
    pub debounce: Duration,
    /// Delay used when the box is cleared.
    pub clear_delay: Duration,
    pub page_size: u32,
    pub recommendation_limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            debounce: Duration::from_millis(500),
            clear_delay: Duration::ZERO,
            page_size: 10,
            recommendation_limit: 6,
        }
    }
}

/// Query text captured when the search timer was armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScheduledSearch {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: SearchSettings,
    query_input: String,
    query: String,
    panel: FilterPanel,
    page: u32,
    results: ResultPage,
    has_loaded: bool,
    recommendations: Vec<ListingSummary>,
    auth: AuthStatus,
    loading: bool,
    search_generation: u64,
    scheduled: Option<ScheduledSearch>,
    listings_seq: RequestSeq,
    recommendations_seq: RequestSeq,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings,
            page: 1,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &ResultPage {
        &self.results
    }

    pub fn recommendations(&self) -> &[ListingSummary] {
        &self.recommendations
    }

    pub fn auth(&self) -> &AuthStatus {
        &self.auth
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn latest_listings_seq(&self) -> RequestSeq {
        self.listings_seq
    }

    /// True when the committed query or any committed filter differs from
    /// its default.
    pub fn filters_active(&self) -> bool {
        !self.query.is_empty() || !self.panel.committed().is_default()
    }

    pub fn view(&self) -> SearchViewModel {
        let rows = merge_results(
            &self.results.listings,
            &self.recommendations,
            self.filters_active(),
        );
        let no_results = self.has_loaded && !self.loading && rows.is_empty();
        SearchViewModel {
            query_input: self.query_input.clone(),
            query: self.query.clone(),
            committed: self.panel.committed().clone(),
            pending: self.panel.pending().clone(),
            editing: self.panel.is_editing(),
            loading: self.loading,
            rows,
            page_info: self.results.page_info,
            chips: FilterChip::collect(&self.query, self.panel.committed()),
            no_results,
            can_clear_filters: self.filters_active(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn panel_mut(&mut self) -> &mut FilterPanel {
        self.dirty = true;
        &mut self.panel
    }

    pub(crate) fn query_input(&self) -> &str {
        &self.query_input
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        self.query_input = text;
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.dirty = true;
    }

    /// Arms a new search timer generation for `query`.
    pub(crate) fn schedule_search(&mut self, query: String) -> u64 {
        self.search_generation += 1;
        self.scheduled = Some(ScheduledSearch {
            generation: self.search_generation,
            query,
        });
        self.search_generation
    }

    /// Drops the armed timer, returning whether one was pending.
    pub(crate) fn cancel_scheduled(&mut self) -> bool {
        self.scheduled.take().is_some()
    }

    /// Takes the scheduled query if `generation` is the one currently armed.
    pub(crate) fn take_scheduled(&mut self, generation: u64) -> Option<String> {
        match &self.scheduled {
            Some(scheduled) if scheduled.generation == generation => {
                self.scheduled.take().map(|scheduled| scheduled.query)
            }
            _ => None,
        }
    }

    /// Issues a listings request for the committed query, filters and `page`.
    /// The page cursor only moves once the response is accepted.
    pub(crate) fn fetch_page(&mut self, page: u32) -> Effect {
        self.listings_seq += 1;
        self.loading = true;
        self.dirty = true;
        Effect::FetchListings {
            seq: self.listings_seq,
            query: ListingQuery {
                query: self.query.clone(),
                filters: self.panel.committed().clone(),
                page,
                page_size: self.settings.page_size,
            },
        }
    }

    pub(crate) fn is_latest_listings(&self, seq: RequestSeq) -> bool {
        seq == self.listings_seq
    }

    pub(crate) fn finish_listings(&mut self, result: Option<ResultPage>) {
        if let Some(page) = result {
            self.page = page.page_info.page.max(1);
            self.results = page;
            self.has_loaded = true;
        }
        self.loading = false;
        self.dirty = true;
    }

    /// Replaces the auth status; returns false when nothing changed.
    pub(crate) fn set_auth(&mut self, auth: AuthStatus) -> bool {
        if self.auth == auth {
            return false;
        }
        self.auth = auth;
        self.recommendations.clear();
        // In-flight responses for the previous identity become stale.
        self.recommendations_seq += 1;
        self.dirty = true;
        true
    }

    pub(crate) fn request_recommendations(&mut self) -> Option<Effect> {
        let token = self.auth.recommendation_token()?.to_string();
        Some(Effect::FetchRecommendations {
            seq: self.recommendations_seq,
            limit: self.settings.recommendation_limit,
            token,
        })
    }

    pub(crate) fn is_latest_recommendations(&self, seq: RequestSeq) -> bool {
        seq == self.recommendations_seq
    }

    pub(crate) fn set_recommendations(&mut self, recommendations: Vec<ListingSummary>) {
        self.recommendations = recommendations;
        self.dirty = true;
    }

    pub(crate) fn known_total_pages(&self) -> Option<u32> {
        if self.has_loaded {
            Some(self.results.page_info.total_pages.max(1))
        } else {
            None
        }
    }

    pub(crate) fn remove_filter(&mut self, removal: &FilterRemoval) -> bool {
        if matches!(removal, FilterRemoval::Query) {
            let changed = !self.query.is_empty();
            self.query.clear();
            self.query_input.clear();
            self.dirty = true;
            return changed;
        }
        let changed = self.panel.remove(removal);
        self.dirty |= changed;
        changed
    }

    pub(crate) fn reset_filters(&mut self) {
        self.panel.reset();
        self.query.clear();
        self.query_input.clear();
        self.dirty = true;
    }
}
