use serde::{Deserialize, Serialize};

use crate::api::PortfolioId;

// =========================================================
// Competitive comparison types + route
// =========================================================

/// A technology domain both portfolios file in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapZone {
    pub technology_domain: String,
    pub own_count: usize,
    pub competitor_count: usize,
    /// In (0, 1]; 1.0 when both sides hold the same number of patents.
    pub intensity: f64,
}

/// A technology domain only one side files in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusiveZone {
    pub technology_domain: String,
    pub patent_count: usize,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthAdvantage {
    Own,
    Competitor,
    Neutral,
}

impl StrengthAdvantage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthAdvantage::Own => "own",
            StrengthAdvantage::Competitor => "competitor",
            StrengthAdvantage::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub own_patent_count: usize,
    pub competitor_patent_count: usize,
    pub overlap_zone_count: usize,
    pub own_exclusive_count: usize,
    pub competitor_exclusive_count: usize,
    pub advantage: StrengthAdvantage,
    pub strength_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overlap_zones: Vec<OverlapZone>,
    pub own_exclusive_zones: Vec<ExclusiveZone>,
    pub competitor_exclusive_zones: Vec<ExclusiveZone>,
    pub strength_index: f64,
    pub summary: ComparisonSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub portfolio_id: PortfolioId,
    pub competitor_name: String,
    #[serde(default)]
    pub competitor_patent_ids: Vec<String>,
    #[serde(default)]
    pub technology_domains: Vec<String>,
}

pub const COMPARE_WITH_COMPETITOR: &str = "compare_with_competitor";
