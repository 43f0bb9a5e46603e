use crate::{FilterRemoval, FilterState, ListingRow, PageInfo, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub query_input: String,
    pub query: String,
    pub committed: FilterState,
    pub pending: FilterState,
    pub editing: bool,
    pub loading: bool,
    pub rows: Vec<ListingRow>,
    pub page_info: PageInfo,
    pub chips: Vec<FilterChip>,
    /// A page has loaded and nothing matched.
    pub no_results: bool,
    pub can_clear_filters: bool,
    pub dirty: bool,
}

/// One removable active filter as shown above the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub removal: FilterRemoval,
}

impl FilterChip {
    fn new(label: impl Into<String>, removal: FilterRemoval) -> Self {
        Self {
            label: label.into(),
            removal,
        }
    }

    pub(crate) fn collect(query: &str, filters: &FilterState) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !query.is_empty() {
            chips.push(Self::new(format!("\"{query}\""), FilterRemoval::Query));
        }
        for city in &filters.locations {
            chips.push(Self::new(
                city.clone(),
                FilterRemoval::Location(Some(city.clone())),
            ));
        }
        if let Some(job_type) = filters.job_type {
            chips.push(Self::new(job_type.as_param(), FilterRemoval::JobType));
        }
        for facet in &filters.facets {
            chips.push(Self::new(facet.label(), FilterRemoval::Facet(*facet)));
        }
        if let Some(label) = salary_label(filters) {
            chips.push(Self::new(label, FilterRemoval::Salary));
        }
        if let Some(level) = filters.experience {
            chips.push(Self::new(level.as_param(), FilterRemoval::Experience));
        }
        if !filters.company.is_empty() {
            chips.push(Self::new(
                format!("Company: {}", filters.company),
                FilterRemoval::Company,
            ));
        }
        for category in &filters.categories {
            chips.push(Self::new(
                category.clone(),
                FilterRemoval::Category(Some(category.clone())),
            ));
        }
        if let Some(window) = filters.posted_within {
            chips.push(Self::new(window.label(), FilterRemoval::PostedWithin));
        }
        if filters.sort != SortOrder::default() {
            chips.push(Self::new(filters.sort.label(), FilterRemoval::Sort));
        }
        chips
    }
}

fn salary_label(filters: &FilterState) -> Option<String> {
    let salary = &filters.salary;
    let currency = salary.currency;
    match (salary.min, salary.max) {
        (Some(min), Some(max)) => Some(format!("{min}-{max} {currency}")),
        (Some(min), None) => Some(format!("from {min} {currency}")),
        (None, Some(max)) => Some(format!("up to {max} {currency}")),
        (None, None) if salary.currency != Default::default() => {
            Some(format!("Salary in {currency}"))
        }
        (None, None) => None,
    }
}
