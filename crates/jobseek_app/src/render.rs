use std::fmt::Write;

use jobseek_core::{FilterState, ListingRow, SearchViewModel};

/// Renders the view model as plain text.
pub fn render(view: &SearchViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "----------------------------------------");
    if view.query_input != view.query {
        let _ = writeln!(out, "search: {}_", view.query_input);
    } else if !view.query.is_empty() {
        let _ = writeln!(out, "search: {}", view.query);
    }

    if !view.chips.is_empty() {
        let labels: Vec<&str> = view.chips.iter().map(|chip| chip.label.as_str()).collect();
        let _ = writeln!(out, "filters: [{}]", labels.join("] ["));
    }
    if view.editing && view.pending != view.committed {
        let _ = writeln!(out, "draft (not applied): {}", describe(&view.pending));
    }

    if view.loading {
        let _ = writeln!(out, "loading...");
    }
    if view.no_results {
        let _ = writeln!(out, "No jobs match your search.");
        if view.can_clear_filters {
            let _ = writeln!(out, "Type `reset` to clear all filters.");
        }
    }

    for (index, row) in view.rows.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, row_line(row));
    }

    let info = &view.page_info;
    if info.total_pages > 0 {
        let _ = writeln!(
            out,
            "page {}/{} ({} jobs){}{}",
            info.page,
            info.total_pages,
            info.total_count,
            if info.has_prev { "  prev" } else { "" },
            if info.has_next { "  next" } else { "" },
        );
    }
    out
}

fn row_line(row: &ListingRow) -> String {
    let listing = &row.listing;
    let mut line = String::new();
    if row.is_recommended {
        line.push_str("* ");
    }
    line.push_str(&listing.title);
    if !listing.company.is_empty() {
        let _ = write!(line, " - {}", listing.company);
    }
    match (&listing.city, listing.remote) {
        (Some(city), true) => {
            let _ = write!(line, " ({city}, remote)");
        }
        (Some(city), false) => {
            let _ = write!(line, " ({city})");
        }
        (None, true) => line.push_str(" (remote)"),
        (None, false) => {}
    }
    let currency = listing.currency.map(|c| c.code()).unwrap_or("");
    match (listing.salary_min, listing.salary_max) {
        (Some(min), Some(max)) => {
            let _ = write!(line, " {min}-{max} {currency}");
        }
        (Some(min), None) => {
            let _ = write!(line, " from {min} {currency}");
        }
        (None, Some(max)) => {
            let _ = write!(line, " up to {max} {currency}");
        }
        (None, None) => {}
    }
    line.trim_end().to_string()
}

fn describe(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filters.locations.is_empty() {
        parts.push(format!(
            "locations={}",
            filters.locations.iter().cloned().collect::<Vec<_>>().join(",")
        ));
    }
    if let Some(job_type) = filters.job_type {
        parts.push(format!("type={}", job_type.as_param()));
    }
    for facet in &filters.facets {
        parts.push(facet.label().to_string());
    }
    if filters.salary.min.is_some() || filters.salary.max.is_some() {
        parts.push(format!(
            "salary={}..{} {}",
            filters.salary.min.map(|v| v.to_string()).unwrap_or_default(),
            filters.salary.max.map(|v| v.to_string()).unwrap_or_default(),
            filters.salary.currency
        ));
    }
    if let Some(level) = filters.experience {
        parts.push(format!("experience={}", level.as_param()));
    }
    if !filters.company.is_empty() {
        parts.push(format!("company={}", filters.company));
    }
    if !filters.categories.is_empty() {
        parts.push(format!(
            "categories={}",
            filters.categories.iter().cloned().collect::<Vec<_>>().join(",")
        ));
    }
    if let Some(window) = filters.posted_within {
        parts.push(window.label().to_string());
    }
    parts.push(filters.sort.label().to_string());
    parts.join(", ")
}
