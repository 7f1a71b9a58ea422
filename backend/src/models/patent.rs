//! Patent portfolio records consumed from the repository layer.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::PortfolioId;

/// Bucket used for patents without any technology-domain code.
pub const UNCLASSIFIED_DOMAIN: &str = "unclassified";

/// Legal status of a patent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegalStatus {
    Granted,
    Pending,
    Expired,
    Abandoned,
    #[default]
    Unknown,
}

impl LegalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalStatus::Granted => "granted",
            LegalStatus::Pending => "pending",
            LegalStatus::Expired => "expired",
            LegalStatus::Abandoned => "abandoned",
            LegalStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a constellation point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointType {
    OwnPatent,
    CompetitorPatent,
    PublicPatent,
    MoleculeOnly,
}

/// A patent as stored in the patent store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    pub id: String,
    #[serde(default)]
    pub patent_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub portfolio_id: Option<PortfolioId>,
    /// Ordered technology-domain codes (IPC/CPC); the first one is primary.
    #[serde(default)]
    pub technology_domains: Vec<String>,
    #[serde(default)]
    pub legal_status: LegalStatus,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub value_score: f64,
    #[serde(default)]
    pub molecule_ids: Vec<String>,
}

impl Patent {
    /// Primary technology domain, or `"unclassified"` when none is set.
    pub fn primary_domain(&self) -> &str {
        self.technology_domains
            .first()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .unwrap_or(UNCLASSIFIED_DOMAIN)
    }

    pub fn filing_year(&self) -> Option<i32> {
        self.filing_date.map(|d| d.year())
    }

    /// Age in fractional years at `as_of`; never negative.
    pub fn age_years(&self, as_of: NaiveDate) -> Option<f64> {
        self.filing_date
            .map(|filed| ((as_of - filed).num_days() as f64 / 365.25).max(0.0))
    }

    /// True when any of the patent's domains is in `domains`.
    pub fn matches_any_domain(&self, domains: &[String]) -> bool {
        self.technology_domains
            .iter()
            .any(|d| domains.iter().any(|wanted| wanted.eq_ignore_ascii_case(d)))
    }
}

/// A molecule referenced by one or more patents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub id: String,
    #[serde(default)]
    pub smiles: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Molecule {
    /// SMILES string if present and non-blank.
    pub fn resolvable_smiles(&self) -> Option<&str> {
        self.smiles
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A named collection of patents owned by one organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub name: String,
    #[serde(default)]
    pub owner: String,
}
