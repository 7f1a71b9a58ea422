//! Embedding and dimensionality-reduction collaborators.
//!
//! The ML inference engine is opaque to the constellation core: it is reached
//! through [`EmbeddingService`] (one molecule at a time) and
//! [`ReductionService`] (one batched call per generation run). The
//! [`StubInferenceEngine`] implements both deterministically.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod stub;

pub use stub::StubInferenceEngine;

/// Result type for inference calls.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Error type for embedding and reduction calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Reduction failed: {0}")]
    Reduction(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Dimensionality-reduction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReductionAlgorithm {
    #[default]
    Umap,
    #[serde(alias = "t-sne", alias = "t_sne")]
    Tsne,
    Pca,
}

impl ReductionAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionAlgorithm::Umap => "umap",
            ReductionAlgorithm::Tsne => "tsne",
            ReductionAlgorithm::Pca => "pca",
        }
    }
}

impl std::fmt::Display for ReductionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved parameters for one reduction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionConfig {
    pub algorithm: ReductionAlgorithm,
    /// Always 2 or 3.
    pub dimensions: usize,
    /// t-SNE only.
    pub perplexity: Option<f64>,
    /// UMAP only.
    pub n_neighbors: Option<u32>,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            algorithm: ReductionAlgorithm::Umap,
            dimensions: 2,
            perplexity: None,
            n_neighbors: Some(15),
        }
    }
}

/// One embedding vector plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingOutput {
    pub vector: Vec<f32>,
    pub confidence: f64,
    pub latency: Duration,
}

/// Molecule embedding generation.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed one molecule given its SMILES string.
    async fn embed(&self, smiles: &str) -> InferenceResult<EmbeddingOutput>;
}

/// Batched dimensionality reduction.
#[async_trait]
pub trait ReductionService: Send + Sync {
    /// Project `vectors` to `config.dimensions` coordinates each, preserving order.
    async fn reduce(
        &self,
        vectors: &[Vec<f32>],
        config: &ReductionConfig,
    ) -> InferenceResult<Vec<Vec<f64>>>;
}

/// Both halves of the inference engine.
pub trait InferenceEngine: EmbeddingService + ReductionService {}

impl<T: EmbeddingService + ReductionService> InferenceEngine for T {}
