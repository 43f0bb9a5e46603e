//! Filter predicates and the edits that can be applied to them.
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct FilterParseError {
    pub kind: &'static str,
    pub value: String,
}

impl FilterParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Quick boolean filters. Toggling one bypasses the pending draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Remote,
    PartTime,
    Seasonal,
    Diaspora,
    PublicSector,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Remote,
        Facet::PartTime,
        Facet::Seasonal,
        Facet::Diaspora,
        Facet::PublicSector,
    ];

    /// Query parameter name understood by the listings endpoint.
    pub fn param(self) -> &'static str {
        match self {
            Facet::Remote => "remote",
            Facet::PartTime => "partTime",
            Facet::Seasonal => "seasonal",
            Facet::Diaspora => "diaspora",
            Facet::PublicSector => "publicSector",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::Remote => "Remote",
            Facet::PartTime => "Part-time",
            Facet::Seasonal => "Seasonal",
            Facet::Diaspora => "Diaspora",
            Facet::PublicSector => "Public sector",
        }
    }
}

impl FromStr for Facet {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Facet::Remote),
            "part-time" | "parttime" => Ok(Facet::PartTime),
            "seasonal" => Ok(Facet::Seasonal),
            "diaspora" => Ok(Facet::Diaspora),
            "public-sector" | "publicsector" | "public" => Ok(Facet::PublicSector),
            _ => Err(FilterParseError::new("facet", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl JobType {
    pub fn as_param(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Temporary => "temporary",
        }
    }
}

impl FromStr for JobType {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-time" | "fulltime" => Ok(JobType::FullTime),
            "part-time" | "parttime" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "temporary" => Ok(JobType::Temporary),
            _ => Err(FilterParseError::new("job type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_param(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(ExperienceLevel::Entry),
            "junior" => Ok(ExperienceLevel::Junior),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            _ => Err(FilterParseError::new("experience level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Eur,
    Lek,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Lek => "ALL",
            Currency::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "ALL" | "LEK" => Ok(Currency::Lek),
            "USD" => Ok(Currency::Usd),
            _ => Err(FilterParseError::new("currency", s)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostedWithin {
    Day,
    Week,
    Month,
}

impl PostedWithin {
    pub fn window(self) -> Duration {
        const DAY: u64 = 24 * 60 * 60;
        match self {
            PostedWithin::Day => Duration::from_secs(DAY),
            PostedWithin::Week => Duration::from_secs(7 * DAY),
            PostedWithin::Month => Duration::from_secs(30 * DAY),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostedWithin::Day => "Last 24 hours",
            PostedWithin::Week => "Last 7 days",
            PostedWithin::Month => "Last 30 days",
        }
    }
}

impl FromStr for PostedWithin {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "24h" => Ok(PostedWithin::Day),
            "week" | "7d" => Ok(PostedWithin::Week),
            "month" | "30d" => Ok(PostedWithin::Month),
            _ => Err(FilterParseError::new("posting window", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    SalaryHigh,
    SalaryLow,
}

impl SortOrder {
    /// `(sortBy, sortOrder)` pair sent with every listings request.
    pub fn params(self) -> (&'static str, &'static str) {
        match self {
            SortOrder::Newest => ("postedAt", "desc"),
            SortOrder::Oldest => ("postedAt", "asc"),
            SortOrder::SalaryHigh => ("salary", "desc"),
            SortOrder::SalaryLow => ("salary", "asc"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
            SortOrder::SalaryHigh => "Highest salary",
            SortOrder::SalaryLow => "Lowest salary",
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "salary-high" | "salary-desc" => Ok(SortOrder::SalaryHigh),
            "salary-low" | "salary-asc" => Ok(SortOrder::SalaryLow),
            _ => Err(FilterParseError::new("sort order", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalaryRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub currency: Currency,
}

impl SalaryRange {
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Every field defaults to "no restriction"; `FilterState::default()` matches
/// all listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub locations: BTreeSet<String>,
    pub job_type: Option<JobType>,
    pub facets: BTreeSet<Facet>,
    pub salary: SalaryRange,
    pub experience: Option<ExperienceLevel>,
    pub company: String,
    pub categories: BTreeSet<String>,
    pub posted_within: Option<PostedWithin>,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    pub fn has_facet(&self, facet: Facet) -> bool {
        self.facets.contains(&facet)
    }

    /// Returns true when the facet value actually changed.
    pub fn set_facet(&mut self, facet: Facet, enabled: bool) -> bool {
        if enabled {
            self.facets.insert(facet)
        } else {
            self.facets.remove(&facet)
        }
    }

    pub fn apply_edit(&mut self, edit: FilterEdit) {
        match edit {
            FilterEdit::AddLocation(city) => {
                let city = city.trim();
                if !city.is_empty() {
                    self.locations.insert(city.to_string());
                }
            }
            FilterEdit::RemoveLocation(city) => {
                self.locations.remove(city.trim());
            }
            FilterEdit::JobType(job_type) => self.job_type = job_type,
            FilterEdit::Facet(facet, enabled) => {
                self.set_facet(facet, enabled);
            }
            FilterEdit::SalaryMin(min) => self.salary.min = min,
            FilterEdit::SalaryMax(max) => self.salary.max = max,
            FilterEdit::Currency(currency) => self.salary.currency = currency,
            FilterEdit::Experience(level) => self.experience = level,
            FilterEdit::Company(company) => self.company = company.trim().to_string(),
            FilterEdit::AddCategory(category) => {
                let category = category.trim();
                if !category.is_empty() {
                    self.categories.insert(category.to_string());
                }
            }
            FilterEdit::RemoveCategory(category) => {
                self.categories.remove(category.trim());
            }
            FilterEdit::PostedWithin(window) => self.posted_within = window,
            FilterEdit::Sort(sort) => self.sort = sort,
        }
    }

    /// Clears a field (or one entry of a multi-value field).
    /// Returns true when something was removed.
    pub fn remove(&mut self, removal: &FilterRemoval) -> bool {
        match removal {
            FilterRemoval::Query => false,
            FilterRemoval::Location(Some(city)) => self.locations.remove(city),
            FilterRemoval::Location(None) => take_set(&mut self.locations),
            FilterRemoval::JobType => self.job_type.take().is_some(),
            FilterRemoval::Facet(facet) => self.facets.remove(facet),
            FilterRemoval::Salary => {
                let changed = self.salary != SalaryRange::default();
                self.salary = SalaryRange::default();
                changed
            }
            FilterRemoval::Experience => self.experience.take().is_some(),
            FilterRemoval::Company => {
                let changed = !self.company.is_empty();
                self.company.clear();
                changed
            }
            FilterRemoval::Category(Some(category)) => self.categories.remove(category),
            FilterRemoval::Category(None) => take_set(&mut self.categories),
            FilterRemoval::PostedWithin => self.posted_within.take().is_some(),
            FilterRemoval::Sort => {
                let changed = self.sort != SortOrder::default();
                self.sort = SortOrder::default();
                changed
            }
        }
    }
}

fn take_set(set: &mut BTreeSet<String>) -> bool {
    let changed = !set.is_empty();
    set.clear();
    changed
}

/// A single change to the pending filter draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    AddLocation(String),
    RemoveLocation(String),
    JobType(Option<JobType>),
    Facet(Facet, bool),
    SalaryMin(Option<u32>),
    SalaryMax(Option<u32>),
    Currency(Currency),
    Experience(Option<ExperienceLevel>),
    Company(String),
    AddCategory(String),
    RemoveCategory(String),
    PostedWithin(Option<PostedWithin>),
    Sort(SortOrder),
}

/// Identifies what a "remove filter" action clears. Multi-value fields take
/// an optional entry; `None` clears the whole field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRemoval {
    Query,
    Location(Option<String>),
    JobType,
    Facet(Facet),
    Salary,
    Experience,
    Company,
    Category(Option<String>),
    PostedWithin,
    Sort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_default() {
        assert!(FilterState::default().is_default());
        let mut state = FilterState::default();
        state.apply_edit(FilterEdit::Currency(Currency::Usd));
        assert!(!state.is_default());
    }

    #[test]
    fn blank_tags_are_not_added() {
        let mut state = FilterState::default();
        state.apply_edit(FilterEdit::AddLocation("   ".into()));
        state.apply_edit(FilterEdit::AddCategory(String::new()));
        assert!(state.is_default());
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut state = FilterState::default();
        state.apply_edit(FilterEdit::AddLocation("Tirana".into()));
        state.apply_edit(FilterEdit::AddLocation("Durres".into()));

        assert!(state.remove(&FilterRemoval::Location(Some("Tirana".into()))));
        assert!(!state.remove(&FilterRemoval::Location(Some("Tirana".into()))));
        assert!(state.remove(&FilterRemoval::Location(None)));
        assert!(!state.remove(&FilterRemoval::Company));
        assert!(state.is_default());
    }

    #[test]
    fn salary_inversion_is_detected() {
        let range = SalaryRange {
            min: Some(2000),
            max: Some(1000),
            currency: Currency::Eur,
        };
        assert!(range.is_inverted());
        assert!(!SalaryRange::default().is_inverted());
    }

    #[test]
    fn parses_user_facing_names() {
        assert_eq!("Part-Time".parse::<Facet>(), Ok(Facet::PartTime));
        assert_eq!("lek".parse::<Currency>(), Ok(Currency::Lek));
        assert_eq!("salary-high".parse::<SortOrder>(), Ok(SortOrder::SalaryHigh));
        let err = "weekly".parse::<PostedWithin>().unwrap_err();
        assert_eq!(err.to_string(), "unknown posting window `weekly`");
    }
}
