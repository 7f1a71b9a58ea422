//! Database module for patent, portfolio and molecule lookups.
//!
//! The constellation core consumes the patent store through the Repository
//! pattern so different storage backends can be swapped easily.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (services::constellation)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{LocalRepository, SeedData};
pub use repository::{
    ErrorContext, FullRepository, MoleculeRepository, PatentRepository, RepositoryError,
    RepositoryResult,
};
