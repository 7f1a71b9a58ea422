//! Competitive comparison between an own portfolio and a competitor's holdings.
//!
//! Both sides are grouped by primary technology domain. Domains held by both
//! become overlap zones, the rest exclusive zones; a weighted blend of volume,
//! contested-domain dominance and value yields the strength index.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::api::{
    ComparisonResult, ComparisonSummary, ExclusiveZone, OverlapZone, StrengthAdvantage,
};
use crate::models::Patent;
use crate::services::geometry::group_by_key;

/// Patents older than this contribute the base recency weight of 1.0.
pub const RECENCY_HORIZON_YEARS: f64 = 20.0;
pub const VOLUME_WEIGHT: f64 = 0.4;
pub const OVERLAP_WEIGHT: f64 = 0.3;
pub const VALUE_WEIGHT: f64 = 0.3;
/// Index magnitude above which one side is declared ahead.
pub const ADVANTAGE_THRESHOLD: f64 = 0.1;

/// `1 + (20 - age) / 20` for patents younger than 20 years, else 1.0.
///
/// Patents without a filing date get the base weight.
pub fn recency_weight(age_years: Option<f64>) -> f64 {
    match age_years {
        Some(age) if age < RECENCY_HORIZON_YEARS => {
            1.0 + (RECENCY_HORIZON_YEARS - age.max(0.0)) / RECENCY_HORIZON_YEARS
        }
        _ => 1.0,
    }
}

/// Non-positive value scores count as 1.0 for strength.
fn strength_value(value_score: f64) -> f64 {
    if value_score > 0.0 {
        value_score
    } else {
        1.0
    }
}

/// `(a - b) / (a + b)`, or 0 when both are zero.
pub fn balance_ratio(a: f64, b: f64) -> f64 {
    let total = a + b;
    if total > 0.0 {
        (a - b) / total
    } else {
        0.0
    }
}

/// `1 - |own - competitor| / (own + competitor)`.
pub fn overlap_intensity(own_count: usize, competitor_count: usize) -> f64 {
    let total = (own_count + competitor_count) as f64;
    if total == 0.0 {
        return 0.0;
    }
    1.0 - (own_count as f64 - competitor_count as f64).abs() / total
}

/// Mean recency-weighted value scaled by `1 + ln(1 + count)`.
pub fn exclusive_strength(patents: &[&Patent], as_of: NaiveDate) -> f64 {
    if patents.is_empty() {
        return 0.0;
    }
    let count = patents.len() as f64;
    let weighted: f64 = patents
        .iter()
        .map(|p| recency_weight(p.age_years(as_of)) * strength_value(p.value_score))
        .sum();
    weighted / count * (1.0 + (1.0 + count).ln())
}

pub fn advantage_for(strength_index: f64) -> StrengthAdvantage {
    if strength_index > ADVANTAGE_THRESHOLD {
        StrengthAdvantage::Own
    } else if strength_index < -ADVANTAGE_THRESHOLD {
        StrengthAdvantage::Competitor
    } else {
        StrengthAdvantage::Neutral
    }
}

fn positive_value_sum(patents: &[Patent]) -> f64 {
    patents.iter().map(|p| p.value_score.max(0.0)).sum()
}

/// Compare two patent sets domain by domain.
///
/// Zones are ordered by domain; ages are measured against `as_of`.
pub fn compare_portfolios(
    own: &[Patent],
    competitor: &[Patent],
    as_of: NaiveDate,
) -> ComparisonResult {
    let own_by_domain = group_by_key(own, |p| p.primary_domain().to_string());
    let competitor_by_domain = group_by_key(competitor, |p| p.primary_domain().to_string());
    let domains: BTreeSet<&String> = own_by_domain
        .keys()
        .chain(competitor_by_domain.keys())
        .collect();

    let mut overlap_zones = Vec::new();
    let mut own_exclusive_zones = Vec::new();
    let mut competitor_exclusive_zones = Vec::new();

    for domain in domains {
        match (own_by_domain.get(domain), competitor_by_domain.get(domain)) {
            (Some(mine), Some(theirs)) => overlap_zones.push(OverlapZone {
                technology_domain: domain.clone(),
                own_count: mine.len(),
                competitor_count: theirs.len(),
                intensity: overlap_intensity(mine.len(), theirs.len()),
            }),
            (Some(mine), None) => own_exclusive_zones.push(ExclusiveZone {
                technology_domain: domain.clone(),
                patent_count: mine.len(),
                strength: exclusive_strength(mine, as_of),
            }),
            (None, Some(theirs)) => competitor_exclusive_zones.push(ExclusiveZone {
                technology_domain: domain.clone(),
                patent_count: theirs.len(),
                strength: exclusive_strength(theirs, as_of),
            }),
            (None, None) => {}
        }
    }

    let volume_ratio = balance_ratio(own.len() as f64, competitor.len() as f64);
    let overlap_dominance = if overlap_zones.is_empty() {
        0.0
    } else {
        let own_overlap: usize = overlap_zones.iter().map(|z| z.own_count).sum();
        let competitor_overlap: usize = overlap_zones.iter().map(|z| z.competitor_count).sum();
        balance_ratio(own_overlap as f64, competitor_overlap as f64)
    };
    let value_ratio = balance_ratio(positive_value_sum(own), positive_value_sum(competitor));

    let strength_index = (VOLUME_WEIGHT * volume_ratio
        + OVERLAP_WEIGHT * overlap_dominance
        + VALUE_WEIGHT * value_ratio)
        .clamp(-1.0, 1.0);

    let summary = ComparisonSummary {
        own_patent_count: own.len(),
        competitor_patent_count: competitor.len(),
        overlap_zone_count: overlap_zones.len(),
        own_exclusive_count: own_exclusive_zones.len(),
        competitor_exclusive_count: competitor_exclusive_zones.len(),
        advantage: advantage_for(strength_index),
        strength_index,
    };

    ComparisonResult {
        overlap_zones,
        own_exclusive_zones,
        competitor_exclusive_zones,
        strength_index,
        summary,
    }
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod compare_tests;
