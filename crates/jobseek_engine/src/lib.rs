//! Jobseek engine: listing API client, search timer and effect execution.
mod client;
mod debounce;
mod engine;
mod types;

pub use client::{ApiSettings, ListingsApi, ReqwestListingsApi};
pub use debounce::Debouncer;
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    EngineError, EngineEvent, FailureKind, FetchError, ListingsPage, RequestSeq, WireListing,
    WirePagination, WireSalary,
};
