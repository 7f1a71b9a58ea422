use serde::{Deserialize, Serialize};

use crate::api::PortfolioId;
use crate::inference::ReductionAlgorithm;
use crate::models::{LegalStatus, PointType};

// =========================================================
// Constellation types + route
// =========================================================

/// One molecule/patent pairing placed in the reduced space.
///
/// Coordinates are only comparable with points from the same generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationPoint {
    pub id: String,
    pub patent_number: Option<String>,
    pub molecule_id: Option<String>,
    pub smiles: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub technology_domain: String,
    pub legal_status: LegalStatus,
    pub assignee: String,
    pub filing_year: Option<i32>,
    pub value_score: f64,
    pub point_type: PointType,
}

/// A density-dense region of the constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationCluster {
    pub id: String,
    pub label: String,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub radius: f64,
    pub member_count: usize,
    pub technology_domains: Vec<String>,
    pub density: f64,
}

/// A sparse cell close to existing activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteSpaceRegion {
    pub id: String,
    pub center_x: f64,
    pub center_y: f64,
    pub area: f64,
    pub nearby_domains: Vec<String>,
    pub score: f64,
}

/// Aggregate of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CoverageStatistics {
    pub total_points: usize,
    pub own_patent_count: usize,
    pub competitor_patent_count: usize,
    pub cluster_count: usize,
    pub white_space_count: usize,
    pub density_mean: f64,
    pub density_std_dev: f64,
    pub coverage_ratio: f64,
}

/// Optional patent filters; empty collections mean "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PatentFilters {
    #[serde(default)]
    pub technology_domains: Vec<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub legal_statuses: Vec<LegalStatus>,
    #[serde(default)]
    pub assignees: Vec<String>,
}

/// Caller-supplied reduction parameters before defaults are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReductionParams {
    #[serde(default)]
    pub algorithm: Option<ReductionAlgorithm>,
    #[serde(default)]
    pub dimensions: Option<i32>,
    #[serde(default)]
    pub perplexity: Option<f64>,
    #[serde(default)]
    pub n_neighbors: Option<u32>,
}

/// Request for a constellation generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationRequest {
    pub portfolio_id: PortfolioId,
    #[serde(default)]
    pub filters: PatentFilters,
    #[serde(default)]
    pub reduction: ReductionParams,
    #[serde(default = "default_true")]
    pub include_white_space: bool,
}

fn default_true() -> bool {
    true
}

impl ConstellationRequest {
    pub fn new(portfolio_id: PortfolioId) -> Self {
        Self {
            portfolio_id,
            filters: PatentFilters::default(),
            reduction: ReductionParams::default(),
            include_white_space: true,
        }
    }
}

/// Full constellation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstellationResponse {
    pub points: Vec<ConstellationPoint>,
    pub clusters: Vec<ConstellationCluster>,
    pub white_space_regions: Vec<WhiteSpaceRegion>,
    pub statistics: CoverageStatistics,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub cache_key: String,
}

pub const GENERATE_CONSTELLATION: &str = "generate_constellation";
