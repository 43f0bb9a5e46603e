//! Jobseek core: pure search/filter state machine and view-model helpers.
mod auth;
mod effect;
mod filters;
mod listing;
mod merge;
mod msg;
mod panel;
mod state;
mod update;
mod view_model;

pub use auth::{AuthStatus, Role};
pub use effect::{Effect, Notification, NotificationLevel};
pub use filters::{
    Currency, ExperienceLevel, Facet, FilterEdit, FilterParseError, FilterRemoval, FilterState,
    JobType, PostedWithin, SalaryRange, SortOrder,
};
pub use listing::{ListingId, ListingQuery, ListingSummary, PageInfo, ResultPage};
pub use merge::{merge_results, ListingRow};
pub use msg::{LoadError, Msg};
pub use panel::{FilterPanel, PanelPhase};
pub use state::{AppState, RequestSeq, SearchSettings};
pub use update::update;
pub use view_model::{FilterChip, SearchViewModel};
