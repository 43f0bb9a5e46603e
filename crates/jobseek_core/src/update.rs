use jobseek_logging::{seek_debug, seek_info};

use crate::{AppState, Effect, Msg, Notification, NotificationLevel};

const LOAD_FAILED_MESSAGE: &str = "Could not load jobs. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened => vec![state.fetch_page(1)],
        Msg::QueryTextChanged(text) => query_text_changed(&mut state, text),
        Msg::SearchTimerElapsed { generation } => match state.take_scheduled(generation) {
            Some(query) => {
                state.set_query(query);
                vec![state.fetch_page(1)]
            }
            None => {
                seek_debug!("Ignoring superseded search timer generation={}", generation);
                Vec::new()
            }
        },
        Msg::FacetToggled { facet, enabled } => {
            if state.panel_mut().toggle_facet(facet, enabled) {
                vec![state.fetch_page(1)]
            } else {
                Vec::new()
            }
        }
        Msg::FilterPanelOpened => {
            state.panel_mut().open();
            Vec::new()
        }
        Msg::PendingFilterChanged(edit) => {
            state.panel_mut().edit(edit);
            Vec::new()
        }
        Msg::FilterPanelCancelled => {
            state.panel_mut().cancel();
            Vec::new()
        }
        Msg::PendingFiltersApplied => apply_pending(&mut state),
        Msg::FiltersReset => {
            let mut effects = cancel_scheduled(&mut state);
            state.reset_filters();
            effects.push(state.fetch_page(1));
            effects.push(Effect::Notify(Notification::new(
                NotificationLevel::Info,
                "Filters cleared",
            )));
            effects
        }
        Msg::FilterRemoved(removal) => {
            let mut effects = if matches!(removal, crate::FilterRemoval::Query) {
                cancel_scheduled(&mut state)
            } else {
                Vec::new()
            };
            if state.remove_filter(&removal) {
                effects.push(state.fetch_page(1));
            }
            effects
        }
        Msg::PageChanged(page) => {
            let out_of_range = page == 0
                || state
                    .known_total_pages()
                    .is_some_and(|total_pages| page > total_pages);
            if out_of_range {
                seek_debug!("Ignoring page change to {}", page);
                Vec::new()
            } else {
                vec![state.fetch_page(page)]
            }
        }
        Msg::AuthChanged(auth) => {
            if state.set_auth(auth) {
                state.request_recommendations().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::ListingsLoaded { seq, result } => {
            if !state.is_latest_listings(seq) {
                seek_debug!(
                    "Discarding listings response seq={} (latest={})",
                    seq,
                    state.latest_listings_seq()
                );
                return (state, Vec::new());
            }
            match result {
                Ok(page) => {
                    seek_info!(
                        "Loaded page {} with {} listings",
                        page.page_info.page,
                        page.listings.len()
                    );
                    state.finish_listings(Some(page));
                    Vec::new()
                }
                Err(err) => {
                    seek_debug!("Listings request seq={} failed: {}", seq, err.message);
                    state.finish_listings(None);
                    vec![Effect::Notify(Notification::new(
                        NotificationLevel::Error,
                        LOAD_FAILED_MESSAGE,
                    ))]
                }
            }
        }
        Msg::RecommendationsLoaded { seq, result } => {
            if !state.is_latest_recommendations(seq) {
                seek_debug!("Discarding recommendations response seq={}", seq);
                return (state, Vec::new());
            }
            match result {
                Ok(recommendations) => state.set_recommendations(recommendations),
                // Keep whatever was loaded last.
                Err(err) => seek_debug!("Recommendations request failed: {}", err.message),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn query_text_changed(state: &mut AppState, text: String) -> Vec<Effect> {
    if text == state.query_input() {
        return Vec::new();
    }
    let trimmed = text.trim().to_string();
    state.set_query_input(text);

    if trimmed == state.query() {
        // Already what the last request used.
        return cancel_scheduled(state);
    }

    let settings = state.settings();
    let delay = if trimmed.is_empty() {
        settings.clear_delay
    } else if trimmed.chars().count() < settings.min_query_len {
        return cancel_scheduled(state);
    } else {
        settings.debounce
    };

    let generation = state.schedule_search(trimmed);
    vec![Effect::ScheduleSearch { generation, delay }]
}

fn apply_pending(state: &mut AppState) -> Vec<Effect> {
    if !state.panel().is_editing() {
        return Vec::new();
    }
    if state.panel().pending().salary.is_inverted() {
        return vec![Effect::Notify(Notification::new(
            NotificationLevel::Warning,
            "Minimum salary cannot exceed maximum salary",
        ))];
    }
    state.panel_mut().commit();
    vec![
        state.fetch_page(1),
        Effect::Notify(Notification::new(
            NotificationLevel::Success,
            "Filters applied",
        )),
    ]
}

fn cancel_scheduled(state: &mut AppState) -> Vec<Effect> {
    if state.cancel_scheduled() {
        state.mark_dirty();
        vec![Effect::CancelScheduledSearch]
    } else {
        Vec::new()
    }
}
