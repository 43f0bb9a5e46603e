use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Currency, FilterState};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub id: ListingId,
    pub title: String,
    pub company: String,
    pub city: Option<String>,
    pub remote: bool,
    pub job_type: Option<String>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub currency: Option<Currency>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl ListingSummary {
    /// Minimal listing, mostly useful for tests and placeholders.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ListingId::new(id),
            title: title.into(),
            company: String::new(),
            city: None,
            remote: false,
            job_type: None,
            salary_min: None,
            salary_max: None,
            currency: None,
            posted_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            total_count: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub listings: Vec<ListingSummary>,
    pub page_info: PageInfo,
}

/// Snapshot of everything one listings request depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub query: String,
    pub filters: FilterState,
    pub page: u32,
    pub page_size: u32,
}

impl ListingQuery {
    /// Flat parameter set for the listings endpoint. Only non-default
    /// predicates are included; paging and sort are always sent.
    pub fn to_params(&self, now: DateTime<Utc>) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        let mut push = |key: &str, value: String| params.push((key.to_string(), value));
        let filters = &self.filters;

        let query = self.query.trim();
        if !query.is_empty() {
            push("search", query.to_string());
        }
        if !filters.locations.is_empty() {
            push("city", join(filters.locations.iter()));
        }
        if let Some(job_type) = filters.job_type {
            push("jobType", job_type.as_param().to_string());
        }
        for facet in &filters.facets {
            push(facet.param(), "true".to_string());
        }
        if let Some(min) = filters.salary.min {
            push("salaryMin", min.to_string());
        }
        if let Some(max) = filters.salary.max {
            push("salaryMax", max.to_string());
        }
        if filters.salary.min.is_some()
            || filters.salary.max.is_some()
            || filters.salary.currency != Currency::default()
        {
            push("currency", filters.salary.currency.code().to_string());
        }
        if let Some(level) = filters.experience {
            push("experience", level.as_param().to_string());
        }
        if !filters.company.is_empty() {
            push("company", filters.company.clone());
        }
        if !filters.categories.is_empty() {
            push("category", join(filters.categories.iter()));
        }
        if let Some(window) = filters.posted_within {
            let after = chrono::Duration::from_std(window.window())
                .ok()
                .and_then(|window| now.checked_sub_signed(window))
                .unwrap_or(now);
            push(
                "postedAfter",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }
        let (sort_by, sort_order) = filters.sort.params();
        push("sortBy", sort_by.to_string());
        push("sortOrder", sort_order.to_string());
        push("page", self.page.to_string());
        push("limit", self.page_size.to_string());
        params
    }
}

fn join<'a>(values: impl Iterator<Item = &'a String>) -> String {
    values.map(String::as_str).collect::<Vec<_>>().join(",")
}
