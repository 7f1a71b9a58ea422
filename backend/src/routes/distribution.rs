use serde::{Deserialize, Serialize};

use crate::api::PortfolioId;

// =========================================================
// Technology-domain distribution types + route
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDistributionEntry {
    pub domain: String,
    pub patent_count: usize,
    pub percentage: f64,
    pub value_sum: f64,
    pub value_percentage: f64,
    pub average_age_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDistribution {
    pub portfolio_id: PortfolioId,
    pub total_patents: usize,
    pub total_value: f64,
    pub domains: Vec<DomainDistributionEntry>,
}

pub const GET_DOMAIN_DISTRIBUTION: &str = "get_domain_distribution";
