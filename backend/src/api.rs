//! Public API surface for the constellation backend.
//!
//! This file consolidates the portfolio identifier and DTO types exposed to
//! the HTTP layer. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{LegalStatus, Molecule, Patent, PointType, Portfolio};
pub use crate::routes::compare::ComparisonResult;
pub use crate::routes::compare::ComparisonSummary;
pub use crate::routes::compare::CompareRequest;
pub use crate::routes::compare::ExclusiveZone;
pub use crate::routes::compare::OverlapZone;
pub use crate::routes::compare::StrengthAdvantage;
pub use crate::routes::constellation::ConstellationCluster;
pub use crate::routes::constellation::ConstellationPoint;
pub use crate::routes::constellation::ConstellationRequest;
pub use crate::routes::constellation::ConstellationResponse;
pub use crate::routes::constellation::CoverageStatistics;
pub use crate::routes::constellation::PatentFilters;
pub use crate::routes::constellation::ReductionParams;
pub use crate::routes::constellation::WhiteSpaceRegion;
pub use crate::routes::distribution::DomainDistribution;
pub use crate::routes::distribution::DomainDistributionEntry;
pub use crate::routes::heatmap::CoverageHeatmap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portfolio identifier (UUID primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PortfolioId(pub Uuid);

impl PortfolioId {
    pub fn new(value: Uuid) -> Self {
        PortfolioId(value)
    }

    /// Parse a portfolio id from its textual UUID form.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(PortfolioId)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    /// The nil UUID is never a valid portfolio.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl std::fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PortfolioId {
    fn from(id: Uuid) -> Self {
        PortfolioId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_id_parse_roundtrip() {
        let raw = "6f1c1a52-3f4e-4a8e-9c53-1d2b8f6e7a90";
        let id = PortfolioId::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw);
        assert!(!id.is_nil());
    }

    #[test]
    fn test_portfolio_id_rejects_malformed() {
        assert!(PortfolioId::parse("not-a-uuid").is_err());
        assert!(PortfolioId::parse("").is_err());
    }

    #[test]
    fn test_nil_portfolio_id() {
        assert!(PortfolioId::new(Uuid::nil()).is_nil());
    }

    #[test]
    fn test_portfolio_id_serializes_as_plain_string() {
        let id = PortfolioId::parse("6f1c1a52-3f4e-4a8e-9c53-1d2b8f6e7a90").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6f1c1a52-3f4e-4a8e-9c53-1d2b8f6e7a90\"");
    }
}
