use std::sync::Once;
use std::time::Duration;

use jobseek_core::{update, AppState, Effect, ListingQuery, Msg};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobseek_logging::initialize_for_tests);
}

fn type_text(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::QueryTextChanged(text.to_string()))
}

fn fetched_query(effects: &[Effect]) -> Vec<&ListingQuery> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchListings { query, .. } => Some(query),
            _ => None,
        })
        .collect()
}

#[test]
fn short_queries_schedule_nothing() {
    init_logging();
    let (state, effects) = type_text(AppState::new(), "r");
    assert!(effects.is_empty());
    let (state, effects) = type_text(state, "ru");
    assert!(effects.is_empty());
    assert_eq!(state.view().query_input, "ru");
    assert_eq!(state.query(), "");
}

#[test]
fn burst_of_keystrokes_fetches_once_for_latest_text() {
    init_logging();
    let state = AppState::new();
    let (state, _) = type_text(state, "r");
    let (state, _) = type_text(state, "ru");
    let (state, first) = type_text(state, "rus");
    let (state, second) = type_text(state, "rust");

    assert_eq!(
        first,
        vec![Effect::ScheduleSearch {
            generation: 1,
            delay: Duration::from_millis(500),
        }]
    );
    assert_eq!(
        second,
        vec![Effect::ScheduleSearch {
            generation: 2,
            delay: Duration::from_millis(500),
        }]
    );

    // A timer that escaped cancellation must not fetch.
    let (state, effects) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::SearchTimerElapsed { generation: 2 });
    let queries = fetched_query(&effects);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].query, "rust");
    assert_eq!(queries[0].page, 1);
    assert_eq!(state.query(), "rust");
    assert!(state.is_loading());

    // The generation is consumed.
    let (_state, effects) = update(state, Msg::SearchTimerElapsed { generation: 2 });
    assert!(effects.is_empty());
}

#[test]
fn dropping_below_threshold_cancels_pending_search() {
    init_logging();
    let (state, _) = type_text(AppState::new(), "rust");
    let (state, effects) = type_text(state, "ru");
    assert_eq!(effects, vec![Effect::CancelScheduledSearch]);

    let (_state, effects) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    assert!(effects.is_empty());
}

#[test]
fn clearing_the_box_is_queryable_immediately() {
    init_logging();
    let (state, _) = type_text(AppState::new(), "rust");
    let (state, _) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    assert_eq!(state.query(), "rust");

    let (state, effects) = type_text(state, "");
    assert_eq!(
        effects,
        vec![Effect::ScheduleSearch {
            generation: 2,
            delay: Duration::ZERO,
        }]
    );
    let (state, effects) = update(state, Msg::SearchTimerElapsed { generation: 2 });
    assert_eq!(fetched_query(&effects)[0].query, "");
    assert!(!state.filters_active());
}

#[test]
fn retyping_committed_text_does_not_refetch() {
    init_logging();
    let (state, _) = type_text(AppState::new(), "rust");
    let (state, _) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    let (state, effects) = type_text(state, "rust ");
    assert!(effects.is_empty());
    let (_state, effects) = type_text(state, "rust");
    assert!(effects.is_empty());
}

#[test]
fn threshold_counts_characters_not_bytes() {
    init_logging();
    // Two characters, four bytes.
    let (_state, effects) = type_text(AppState::new(), "çë");
    assert!(effects.is_empty());
}
