use std::collections::HashSet;

use crate::{ListingId, ListingSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub listing: ListingSummary,
    pub is_recommended: bool,
}

/// Blends a fetched page with the recommendation set.
///
/// With filters active the fetched order is kept and entries are only
/// flagged. With no filter active the whole recommendation set comes first,
/// followed by fetched entries that are not already in it.
pub fn merge_results(
    fetched: &[ListingSummary],
    recommendations: &[ListingSummary],
    filters_active: bool,
) -> Vec<ListingRow> {
    let recommended: HashSet<&ListingId> = recommendations.iter().map(|l| &l.id).collect();

    if filters_active {
        return fetched
            .iter()
            .map(|listing| ListingRow {
                is_recommended: recommended.contains(&listing.id),
                listing: listing.clone(),
            })
            .collect();
    }

    let mut rows = Vec::with_capacity(recommendations.len() + fetched.len());
    rows.extend(recommendations.iter().map(|listing| ListingRow {
        listing: listing.clone(),
        is_recommended: true,
    }));
    rows.extend(
        fetched
            .iter()
            .filter(|listing| !recommended.contains(&listing.id))
            .map(|listing| ListingRow {
                listing: listing.clone(),
                is_recommended: false,
            }),
    );
    rows
}
