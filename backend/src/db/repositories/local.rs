//! In-memory local repository implementation.
//!
//! Stores portfolios, patents and molecules in HashMaps, providing fast,
//! deterministic and isolated execution for tests and local development.
//! It can be seeded from a JSON document (see [`SeedData`]).

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::api::PortfolioId;
use crate::db::repository::*;
use crate::models::{Molecule, Patent, Portfolio};

/// JSON seed document for the local repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
    #[serde(default)]
    pub patents: Vec<Patent>,
    #[serde(default)]
    pub molecules: Vec<Molecule>,
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use patent_constellation::db::repositories::LocalRepository;
/// use patent_constellation::models::Portfolio;
/// use patent_constellation::api::PortfolioId;
///
/// let repo = LocalRepository::new();
/// let id = PortfolioId::new(uuid::Uuid::new_v4());
/// repo.add_portfolio(Portfolio { id, name: "Acme".into(), owner: "Acme Corp".into() });
/// assert!(repo.has_portfolio(id));
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    portfolios: HashMap<PortfolioId, Portfolio>,
    // Insertion order is kept so lookups return patents deterministically.
    patents: Vec<Patent>,
    molecules: HashMap<String, Molecule>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            portfolios: HashMap::new(),
            patents: Vec::new(),
            molecules: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with `seed`.
    pub fn from_seed(seed: SeedData) -> Self {
        let repo = Self::new();
        for portfolio in seed.portfolios {
            repo.add_portfolio(portfolio);
        }
        for patent in seed.patents {
            repo.add_patent(patent);
        }
        for molecule in seed.molecules {
            repo.add_molecule(molecule);
        }
        repo
    }

    /// Load a JSON seed file.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read seed file: {}", e),
                ErrorContext::new("from_seed_file")
                    .with_details(path.as_ref().display().to_string()),
            )
        })?;
        let seed: SeedData = serde_json::from_str(&content)?;
        Ok(Self::from_seed(seed))
    }

    pub fn add_portfolio(&self, portfolio: Portfolio) {
        self.data.write().portfolios.insert(portfolio.id, portfolio);
    }

    /// Insert or replace a patent (matched by id).
    pub fn add_patent(&self, patent: Patent) {
        let mut data = self.data.write();
        match data.patents.iter_mut().find(|p| p.id == patent.id) {
            Some(existing) => *existing = patent,
            None => data.patents.push(patent),
        }
    }

    pub fn add_molecule(&self, molecule: Molecule) {
        self.data
            .write()
            .molecules
            .insert(molecule.id.clone(), molecule);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn has_portfolio(&self, portfolio_id: PortfolioId) -> bool {
        self.data.read().portfolios.contains_key(&portfolio_id)
    }

    pub fn patent_count(&self) -> usize {
        self.data.read().patents.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("Local repository marked unhealthy")
                .with_operation(operation))
        }
    }
}

#[async_trait]
impl PatentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_patents_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> RepositoryResult<Vec<Patent>> {
        self.ensure_healthy("get_patents_by_portfolio")?;
        let data = self.data.read();
        if !data.portfolios.contains_key(&portfolio_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("Portfolio {} not found", portfolio_id),
                ErrorContext::new("get_patents_by_portfolio")
                    .with_entity("portfolio")
                    .with_entity_id(portfolio_id),
            ));
        }

        Ok(data
            .patents
            .iter()
            .filter(|p| p.portfolio_id == Some(portfolio_id))
            .cloned()
            .collect())
    }

    async fn get_patents_by_assignee(&self, assignee: &str) -> RepositoryResult<Vec<Patent>> {
        self.ensure_healthy("get_patents_by_assignee")?;
        let wanted = assignee.trim();
        Ok(self
            .data
            .read()
            .patents
            .iter()
            .filter(|p| p.assignee.trim().eq_ignore_ascii_case(wanted))
            .cloned()
            .collect())
    }

    async fn get_patents_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<Patent>> {
        self.ensure_healthy("get_patents_by_ids")?;
        let data = self.data.read();
        Ok(ids
            .iter()
            .filter_map(|id| data.patents.iter().find(|p| &p.id == id).cloned())
            .collect())
    }
}

#[async_trait]
impl MoleculeRepository for LocalRepository {
    async fn get_molecules_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<Molecule>> {
        self.ensure_healthy("get_molecules_by_ids")?;
        let data = self.data.read();
        Ok(ids
            .iter()
            .filter_map(|id| data.molecules.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LegalStatus;
    use std::io::Write;

    fn portfolio_id() -> PortfolioId {
        PortfolioId::parse("11111111-2222-3333-4444-555555555555").unwrap()
    }

    fn patent(id: &str, assignee: &str, portfolio: Option<PortfolioId>) -> Patent {
        Patent {
            id: id.to_string(),
            patent_number: format!("US-{}", id),
            title: String::new(),
            assignee: assignee.to_string(),
            portfolio_id: portfolio,
            technology_domains: vec!["A61K".to_string()],
            legal_status: LegalStatus::Granted,
            filing_date: None,
            value_score: 1.0,
            molecule_ids: vec![],
        }
    }

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.add_portfolio(Portfolio {
            id: portfolio_id(),
            name: "Acme".into(),
            owner: "Acme Corp".into(),
        });
        repo.add_patent(patent("p1", "Acme Corp", Some(portfolio_id())));
        repo.add_patent(patent("p2", "Rival Inc", None));
        repo
    }

    #[tokio::test]
    async fn test_missing_portfolio_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo.get_patents_by_portfolio(portfolio_id()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_patents_by_portfolio_and_assignee() {
        let repo = seeded();
        let own = repo.get_patents_by_portfolio(portfolio_id()).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, "p1");

        let rival = repo.get_patents_by_assignee("rival inc").await.unwrap();
        assert_eq!(rival.len(), 1);
        assert_eq!(rival[0].id, "p2");
    }

    #[tokio::test]
    async fn test_patents_by_ids_skips_unknown() {
        let repo = seeded();
        let ids = vec!["p2".to_string(), "missing".to_string(), "p1".to_string()];
        let patents = repo.get_patents_by_ids(&ids).await.unwrap();
        let found: Vec<&str> = patents.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn test_add_patent_replaces_existing() {
        let repo = seeded();
        let mut updated = patent("p1", "Acme Corp", Some(portfolio_id()));
        updated.value_score = 9.0;
        repo.add_patent(updated);
        assert_eq!(repo.patent_count(), 2);
        let own = repo.get_patents_by_portfolio(portfolio_id()).await.unwrap();
        assert_eq!(own[0].value_score, 9.0);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_lookups() {
        let repo = seeded();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.get_patents_by_assignee("Acme Corp").await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "portfolios": [{{"id": "11111111-2222-3333-4444-555555555555", "name": "Acme"}}],
                "patents": [{{"id": "p1", "portfolio_id": "11111111-2222-3333-4444-555555555555",
                              "technology_domains": ["A61K"], "molecule_ids": ["m1"]}}],
                "molecules": [{{"id": "m1", "smiles": "CCO"}}]
            }}"#
        )
        .unwrap();

        let repo = LocalRepository::from_seed_file(file.path()).unwrap();
        let patents = repo.get_patents_by_portfolio(portfolio_id()).await.unwrap();
        assert_eq!(patents.len(), 1);
        let molecules = repo.get_molecules_by_ids(&["m1".to_string()]).await.unwrap();
        assert_eq!(molecules[0].smiles.as_deref(), Some("CCO"));
    }

    #[test]
    fn test_from_seed_file_missing() {
        let result = LocalRepository::from_seed_file("/definitely/not/here.json");
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
