use std::time::Duration;

use crate::{ListingQuery, RequestSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the search timer, replacing any timer still pending.
    ScheduleSearch { generation: u64, delay: Duration },
    CancelScheduledSearch,
    FetchListings { seq: RequestSeq, query: ListingQuery },
    FetchRecommendations {
        seq: RequestSeq,
        limit: u32,
        token: String,
    },
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
