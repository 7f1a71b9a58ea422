//! Repository factory for dependency injection.
//!
//! Creates repository instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::config::RepositorySettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from the `[repository]` configuration section.
    ///
    /// A configured `seed_file` is loaded into the local repository.
    pub fn from_settings(settings: &RepositorySettings) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_str(&settings.repo_type).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Local => match &settings.seed_file {
                Some(path) => {
                    let repo = LocalRepository::from_seed_file(path)?;
                    log::info!(
                        "Seeded local repository from {} ({} patents)",
                        path.display(),
                        repo.patent_count()
                    );
                    Ok(Arc::new(repo))
                }
                None => Ok(Self::create_local()),
            },
        }
    }
}
