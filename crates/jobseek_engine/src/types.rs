use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Identifier the caller attaches to a request; echoed back in its event.
pub type RequestSeq = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ListingsFetched {
        seq: RequestSeq,
        result: Result<ListingsPage, FetchError>,
    },
    RecommendationsFetched {
        seq: RequestSeq,
        result: Result<Vec<WireListing>, FetchError>,
    },
    SearchTimerElapsed {
        generation: u64,
    },
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireListing {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    pub city: Option<String>,
    #[serde(default)]
    pub remote: bool,
    pub job_type: Option<String>,
    pub salary: Option<WireSalary>,
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSalary {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_jobs: u64,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingsPage {
    pub jobs: Vec<WireListing>,
    pub pagination: WirePagination,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecommendationsData {
    pub recommendations: Vec<WireListing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    /// The server answered with `success: false`.
    Api,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Api => write!(f, "api error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid api base url `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(String),
}
