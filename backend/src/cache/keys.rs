//! Deterministic cache keys.
//!
//! Keys are SHA-256 digests of the portfolio id plus the serialized request
//! parameters, so regenerating with identical inputs yields the identical key.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::api::{PatentFilters, PortfolioId};
use crate::inference::ReductionConfig;

/// Hex-encoded SHA-256 of `content`.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Serialize)]
struct ConstellationKeyMaterial<'a> {
    portfolio_id: PortfolioId,
    filters: &'a PatentFilters,
    reduction: &'a ReductionConfig,
    include_white_space: bool,
}

/// Filters have set semantics; order and duplicates must not change the key.
fn normalized_filters(filters: &PatentFilters) -> PatentFilters {
    let mut normalized = filters.clone();
    normalized.technology_domains.sort();
    normalized.technology_domains.dedup();
    normalized.legal_statuses.sort();
    normalized.legal_statuses.dedup();
    normalized.assignees.sort();
    normalized.assignees.dedup();
    normalized
}

/// Cache key for a constellation generation run.
pub fn constellation_cache_key(
    portfolio_id: PortfolioId,
    filters: &PatentFilters,
    reduction: &ReductionConfig,
    include_white_space: bool,
) -> String {
    let filters = normalized_filters(filters);
    let material = ConstellationKeyMaterial {
        portfolio_id,
        filters: &filters,
        reduction,
        include_white_space,
    };
    // Serializing plain structs of strings and numbers cannot fail.
    let serialized = serde_json::to_string(&material).unwrap_or_default();
    format!("constellation:{}", calculate_checksum(&serialized))
}

/// Cache key for a coverage heatmap.
pub fn heatmap_cache_key(portfolio_id: PortfolioId, resolution: usize) -> String {
    format!(
        "heatmap:{}",
        calculate_checksum(&format!("{}:{}", portfolio_id, resolution))
    )
}
