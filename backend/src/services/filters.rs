//! Patent filtering for constellation requests.

use crate::api::PatentFilters;
use crate::error::{ConstellationError, ConstellationResult};
use crate::models::Patent;

/// Reject filter combinations that can never match.
pub fn validate_filters(filters: &PatentFilters) -> ConstellationResult<()> {
    if let (Some(from), Some(to)) = (filters.year_from, filters.year_to) {
        if from > to {
            return Err(ConstellationError::validation(format!(
                "year_from ({}) must not be after year_to ({})",
                from, to
            )));
        }
    }
    Ok(())
}

/// True when `patent` passes every constraint in `filters`.
///
/// Empty lists and unset bounds impose no constraint. Patents without a
/// filing date fail any year bound. Domain and assignee matches ignore case.
pub fn matches_filters(patent: &Patent, filters: &PatentFilters) -> bool {
    if !filters.technology_domains.is_empty()
        && !patent.matches_any_domain(&filters.technology_domains)
    {
        return false;
    }

    if filters.year_from.is_some() || filters.year_to.is_some() {
        let Some(year) = patent.filing_year() else {
            return false;
        };
        if filters.year_from.is_some_and(|from| year < from)
            || filters.year_to.is_some_and(|to| year > to)
        {
            return false;
        }
    }

    if !filters.legal_statuses.is_empty() && !filters.legal_statuses.contains(&patent.legal_status)
    {
        return false;
    }

    if !filters.assignees.is_empty() {
        let assignee = patent.assignee.trim();
        if !filters
            .assignees
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(assignee))
        {
            return false;
        }
    }

    true
}

pub fn apply_filters(patents: Vec<Patent>, filters: &PatentFilters) -> Vec<Patent> {
    patents
        .into_iter()
        .filter(|p| matches_filters(p, filters))
        .collect()
}
