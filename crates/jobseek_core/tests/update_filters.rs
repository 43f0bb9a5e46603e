use jobseek_core::{
    update, AppState, Effect, Facet, FilterEdit, FilterRemoval, FilterState, ListingQuery, Msg,
    Notification, NotificationLevel,
};
use pretty_assertions::assert_eq;

fn fetches(effects: &[Effect]) -> Vec<&ListingQuery> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchListings { query, .. } => Some(query),
            _ => None,
        })
        .collect()
}

fn notifications(effects: &[Effect]) -> Vec<&Notification> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification),
            _ => None,
        })
        .collect()
}

fn edit(state: AppState, edit: FilterEdit) -> AppState {
    let (state, effects) = update(state, Msg::PendingFilterChanged(edit));
    assert!(effects.is_empty(), "pending edits never fetch");
    state
}

fn apply(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::PendingFiltersApplied)
}

#[test]
fn pending_edits_only_reach_the_query_after_apply() {
    let state = edit(AppState::new(), FilterEdit::Company("Acme".into()));
    let view = state.view();
    assert!(view.editing);
    assert_eq!(view.pending.company, "Acme");
    assert!(view.committed.is_default());

    let (state, effects) = apply(state);
    let queries = fetches(&effects);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].filters.company, "Acme");
    assert_eq!(queries[0].page, 1);
    assert_eq!(
        notifications(&effects),
        vec![&Notification::new(NotificationLevel::Success, "Filters applied")]
    );
    assert!(!state.view().editing);
}

#[test]
fn cancel_discards_the_draft() {
    let state = edit(AppState::new(), FilterEdit::AddCategory("Teknologji".into()));
    let (state, effects) = update(state, Msg::FilterPanelCancelled);
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.editing);
    assert_eq!(view.pending, FilterState::default());

    let (_state, effects) = apply(state);
    assert!(effects.is_empty());
}

#[test]
fn inverted_salary_range_is_rejected() {
    let state = edit(AppState::new(), FilterEdit::SalaryMin(Some(2000)));
    let state = edit(state, FilterEdit::SalaryMax(Some(800)));
    let (state, effects) = apply(state);

    assert!(fetches(&effects).is_empty());
    assert_eq!(notifications(&effects)[0].level, NotificationLevel::Warning);
    assert!(state.view().editing);
    assert!(state.view().committed.is_default());
}

#[test]
fn quick_facets_bypass_the_draft() {
    let (state, effects) = update(
        AppState::new(),
        Msg::FacetToggled {
            facet: Facet::Remote,
            enabled: true,
        },
    );
    let queries = fetches(&effects);
    assert_eq!(queries.len(), 1);
    assert!(queries[0].filters.has_facet(Facet::Remote));
    assert!(state.panel().committed().has_facet(Facet::Remote));

    // Toggling to the value it already has does nothing.
    let (_state, effects) = update(
        state,
        Msg::FacetToggled {
            facet: Facet::Remote,
            enabled: true,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn remove_company_clears_both_copies_and_fetches_once() {
    let state = edit(AppState::new(), FilterEdit::Company("Acme".into()));
    let (state, _) = apply(state);
    let (state, _) = update(state, Msg::PageChanged(1));
    // Reopen the panel so a draft exists alongside the committed filters.
    let (state, _) = update(state, Msg::FilterPanelOpened);
    assert_eq!(state.view().pending.company, "Acme");

    let (state, effects) = update(state, Msg::FilterRemoved(FilterRemoval::Company));
    assert_eq!(effects.len(), 1);
    let queries = fetches(&effects);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].page, 1);
    assert!(queries[0].filters.company.is_empty());

    let view = state.view();
    assert!(view.committed.company.is_empty());
    assert!(view.pending.company.is_empty());
}

#[test]
fn removing_one_location_keeps_the_others() {
    let state = edit(AppState::new(), FilterEdit::AddLocation("Tirana".into()));
    let state = edit(state, FilterEdit::AddLocation("Durres".into()));
    let (state, _) = apply(state);

    let (state, effects) = update(
        state,
        Msg::FilterRemoved(FilterRemoval::Location(Some("Tirana".into()))),
    );
    assert_eq!(fetches(&effects).len(), 1);
    let locations: Vec<_> = state.view().committed.locations.into_iter().collect();
    assert_eq!(locations, vec!["Durres".to_string()]);

    // Removing what is not there issues nothing.
    let (_state, effects) = update(
        state,
        Msg::FilterRemoved(FilterRemoval::Location(Some("Tirana".into()))),
    );
    assert!(effects.is_empty());
}

#[test]
fn removing_the_query_cancels_a_pending_search() {
    let (state, _) = update(AppState::new(), Msg::QueryTextChanged("rust".into()));
    let (state, _) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    let (state, _) = update(state, Msg::QueryTextChanged("rustacean".into()));

    let (state, effects) = update(state, Msg::FilterRemoved(FilterRemoval::Query));
    assert_eq!(effects[0], Effect::CancelScheduledSearch);
    assert_eq!(fetches(&effects)[0].query, "");
    assert_eq!(state.view().query_input, "");
}

#[test]
fn reset_restores_defaults_and_fetches_first_page() {
    let state = edit(AppState::new(), FilterEdit::AddCategory("Teknologji".into()));
    let (state, _) = apply(state);
    let (state, _) = update(state, Msg::QueryTextChanged("design".into()));
    let (state, _) = update(state, Msg::SearchTimerElapsed { generation: 1 });
    let (state, _) = update(state, Msg::FilterPanelOpened);
    let state = edit(state, FilterEdit::Company("Acme".into()));

    let (state, effects) = update(state, Msg::FiltersReset);
    let queries = fetches(&effects);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].query, "");
    assert!(queries[0].filters.is_default());
    assert_eq!(queries[0].page, 1);

    let view = state.view();
    assert!(!view.editing);
    assert!(view.pending.is_default());
    assert_eq!(view.query_input, "");
    assert!(view.chips.is_empty());
}

#[test]
fn page_changes_keep_filters() {
    let (state, _) = update(
        AppState::new(),
        Msg::FacetToggled {
            facet: Facet::Seasonal,
            enabled: true,
        },
    );
    let (state, effects) = update(state, Msg::PageChanged(3));
    let queries = fetches(&effects);
    assert_eq!(queries[0].page, 3);
    assert!(queries[0].filters.has_facet(Facet::Seasonal));
    // The cursor waits for the response.
    assert_eq!(state.page(), 1);

    let (_state, effects) = update(state, Msg::PageChanged(0));
    assert!(effects.is_empty());
}

#[test]
fn chips_list_every_committed_value() {
    let state = edit(AppState::new(), FilterEdit::AddLocation("Vlore".into()));
    let state = edit(state, FilterEdit::SalaryMin(Some(500)));
    let (state, _) = apply(state);
    let (state, _) = update(
        state,
        Msg::FacetToggled {
            facet: Facet::Diaspora,
            enabled: true,
        },
    );

    let removals: Vec<_> = state.view().chips.into_iter().map(|c| c.removal).collect();
    assert_eq!(
        removals,
        vec![
            FilterRemoval::Location(Some("Vlore".into())),
            FilterRemoval::Facet(Facet::Diaspora),
            FilterRemoval::Salary,
        ]
    );
}
