//! Data Transfer Objects for the HTTP API.
//!
//! Response types are re-exported from the routes module since they already
//! derive Serialize/Deserialize. Request bodies here omit the portfolio id,
//! which comes from the path.

use serde::{Deserialize, Serialize};

use crate::api::{CompareRequest, PatentFilters, PortfolioId, ReductionParams};
use crate::services::HeatmapOptions;

pub use crate::api::{
    ComparisonResult, ConstellationRequest, ConstellationResponse, CoverageHeatmap,
    DomainDistribution,
};

fn default_true() -> bool {
    true
}

/// Body of `POST /v1/portfolios/{portfolio_id}/constellation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstellationBody {
    #[serde(default)]
    pub filters: PatentFilters,
    #[serde(default)]
    pub reduction: ReductionParams,
    #[serde(default = "default_true")]
    pub include_white_space: bool,
}

impl Default for ConstellationBody {
    fn default() -> Self {
        Self {
            filters: PatentFilters::default(),
            reduction: ReductionParams::default(),
            include_white_space: true,
        }
    }
}

impl ConstellationBody {
    pub fn into_request(self, portfolio_id: PortfolioId) -> ConstellationRequest {
        ConstellationRequest {
            portfolio_id,
            filters: self.filters,
            reduction: self.reduction,
            include_white_space: self.include_white_space,
        }
    }
}

/// Body of `POST /v1/portfolios/{portfolio_id}/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareBody {
    pub competitor_name: String,
    #[serde(default)]
    pub competitor_patent_ids: Vec<String>,
    #[serde(default)]
    pub technology_domains: Vec<String>,
}

impl CompareBody {
    pub fn into_request(self, portfolio_id: PortfolioId) -> CompareRequest {
        CompareRequest {
            portfolio_id,
            competitor_name: self.competitor_name,
            competitor_patent_ids: self.competitor_patent_ids,
            technology_domains: self.technology_domains,
        }
    }
}

/// Query parameters for the heatmap endpoint.
///
/// Out-of-range values are ignored and the defaults kept.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub resolution: Option<i64>,
    #[serde(default)]
    pub density_min: Option<f64>,
    #[serde(default)]
    pub density_max: Option<f64>,
}

impl HeatmapQuery {
    pub fn to_options(&self) -> HeatmapOptions {
        let mut options = HeatmapOptions::default();
        if let Some(resolution) = self.resolution {
            options.set_resolution(resolution);
        }
        if let Some(max) = self.density_max {
            options.set_density_range(self.density_min.unwrap_or(0.0), max);
        }
        options
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
