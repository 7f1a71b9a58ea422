//! Deterministic inference engine.
//!
//! Embeddings are derived from a SHA-256 stream of the SMILES string and
//! reduction is a fixed linear projection, so identical inputs always land on
//! identical coordinates. Used for tests and local development.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::time::Instant;

use super::{
    EmbeddingOutput, EmbeddingService, InferenceError, InferenceResult, ReductionConfig,
    ReductionService,
};

#[derive(Debug, Clone)]
pub struct StubInferenceEngine {
    model_id: String,
    dimensions: usize,
}

impl Default for StubInferenceEngine {
    fn default() -> Self {
        Self::new("stub-embedding-v1", 64)
    }
}

impl StubInferenceEngine {
    pub fn new(model_id: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model_id: model_id.into(),
            dimensions: dimensions.max(1),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Hash-derived vector with components in [-1, 1].
    fn hash_vector(&self, input: &str) -> Vec<f32> {
        let mut vector = Vec::with_capacity(self.dimensions);
        let mut block: u32 = 0;
        while vector.len() < self.dimensions {
            let mut hasher = Sha256::new();
            hasher.update(self.model_id.as_bytes());
            hasher.update(input.as_bytes());
            hasher.update(block.to_le_bytes());
            for byte in hasher.finalize() {
                if vector.len() == self.dimensions {
                    break;
                }
                vector.push(byte as f32 / 127.5 - 1.0);
            }
            block += 1;
        }
        vector
    }
}

/// Fixed projection weight for output axis `axis` and input component `component`.
fn projection_weight(axis: usize, component: usize, len: usize) -> f64 {
    let phase = (axis + 1) as f64 * (component + 1) as f64 * std::f64::consts::FRAC_1_SQRT_2;
    phase.sin() / (len as f64).sqrt()
}

#[async_trait]
impl EmbeddingService for StubInferenceEngine {
    async fn embed(&self, smiles: &str) -> InferenceResult<EmbeddingOutput> {
        let started = Instant::now();
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(InferenceError::Embedding("empty SMILES string".to_string()));
        }

        Ok(EmbeddingOutput {
            vector: self.hash_vector(smiles),
            confidence: 1.0,
            latency: started.elapsed(),
        })
    }
}

#[async_trait]
impl ReductionService for StubInferenceEngine {
    async fn reduce(
        &self,
        vectors: &[Vec<f32>],
        config: &ReductionConfig,
    ) -> InferenceResult<Vec<Vec<f64>>> {
        let first = vectors
            .first()
            .ok_or_else(|| InferenceError::EmptyInput("no vectors to reduce".to_string()))?;
        if !(2..=3).contains(&config.dimensions) {
            return Err(InferenceError::Reduction(format!(
                "unsupported target dimensionality {}",
                config.dimensions
            )));
        }

        let expected = first.len();
        let mut reduced = Vec::with_capacity(vectors.len());
        for vector in vectors {
            if vector.len() != expected {
                return Err(InferenceError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            let coords = (0..config.dimensions)
                .map(|axis| {
                    vector
                        .iter()
                        .enumerate()
                        .map(|(j, v)| *v as f64 * projection_weight(axis, j, expected))
                        .sum::<f64>()
                })
                .collect::<Vec<f64>>();
            reduced.push(coords);
        }
        Ok(reduced)
    }
}
