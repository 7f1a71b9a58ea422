//! Repository traits for abstracting patent-store lookups.
//!
//! The constellation core only reads from the store; persistence and
//! validation of patents live behind these traits.

use async_trait::async_trait;

use crate::api::PortfolioId;
use crate::models::{Molecule, Patent};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Patent and portfolio lookups.
///
/// # Error Handling
/// A missing portfolio is reported as `RepositoryError::NotFound`; an existing
/// portfolio without patents yields an empty vector.
#[async_trait]
pub trait PatentRepository: Send + Sync {
    /// Check if the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch every patent held in a portfolio.
    async fn get_patents_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> RepositoryResult<Vec<Patent>>;

    /// Fetch every patent whose assignee matches `assignee` (case-insensitive).
    async fn get_patents_by_assignee(&self, assignee: &str) -> RepositoryResult<Vec<Patent>>;

    /// Fetch patents by id. Unknown ids are skipped.
    async fn get_patents_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<Patent>>;
}

/// Molecule lookups.
#[async_trait]
pub trait MoleculeRepository: Send + Sync {
    /// Fetch molecules by id. Unknown ids are skipped.
    async fn get_molecules_by_ids(&self, ids: &[String]) -> RepositoryResult<Vec<Molecule>>;
}

/// Everything the constellation service reads.
pub trait FullRepository: PatentRepository + MoleculeRepository {}

impl<T: PatentRepository + MoleculeRepository> FullRepository for T {}
