//! Embedding & reduction orchestration.
//!
//! Turns a filtered patent list into labeled constellation points: collect the
//! referenced molecules, embed each one, reduce all vectors in a single batch,
//! then map coordinates back onto every (patent, molecule) reference.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, warn};

use crate::api::{ConstellationPoint, ReductionParams};
use crate::db::MoleculeRepository;
use crate::error::{ConstellationError, ConstellationResult};
use crate::inference::{InferenceEngine, ReductionAlgorithm, ReductionConfig};
use crate::models::{Molecule, Patent, PointType};
use crate::services::geometry::dedup_preserving_order;

pub const DEFAULT_TSNE_PERPLEXITY: f64 = 30.0;
pub const DEFAULT_UMAP_NEIGHBORS: u32 = 15;
pub const MIN_DIMENSIONS: usize = 2;
pub const MAX_DIMENSIONS: usize = 3;

/// Apply reduction defaults.
///
/// - algorithm defaults to UMAP
/// - dimensions clamp to [2, 3]; 0 or unset becomes 2
/// - perplexity defaults to 30 for t-SNE only
/// - neighbor count defaults to 15 for UMAP only
pub fn resolve_reduction_config(params: &ReductionParams) -> ReductionConfig {
    let algorithm = params.algorithm.unwrap_or_default();
    let dimensions = match params.dimensions {
        Some(d) if d > MAX_DIMENSIONS as i32 => MAX_DIMENSIONS,
        Some(d) if d >= MIN_DIMENSIONS as i32 => d as usize,
        _ => MIN_DIMENSIONS,
    };

    let perplexity = match algorithm {
        ReductionAlgorithm::Tsne => Some(
            params
                .perplexity
                .filter(|p| *p > 0.0)
                .unwrap_or(DEFAULT_TSNE_PERPLEXITY),
        ),
        _ => params.perplexity,
    };
    let n_neighbors = match algorithm {
        ReductionAlgorithm::Umap => Some(
            params
                .n_neighbors
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_UMAP_NEIGHBORS),
        ),
        _ => params.n_neighbors,
    };

    ReductionConfig {
        algorithm,
        dimensions,
        perplexity,
        n_neighbors,
    }
}

/// Referenced molecule ids, deduplicated in first-seen order.
pub fn collect_molecule_ids(patents: &[Patent]) -> Vec<String> {
    dedup_preserving_order(patents.iter().flat_map(|p| p.molecule_ids.iter()))
}

/// Fetch, embed and reduce the molecules referenced by `patents`.
///
/// Returns one point per (patent, molecule) reference whose molecule was
/// embedded. Individual embedding failures are logged and skipped; if no
/// molecule at all could be embedded the call fails.
pub async fn build_constellation_points<R, E>(
    patents: &[Patent],
    molecules: &R,
    engine: &E,
    config: &ReductionConfig,
    point_type: PointType,
) -> ConstellationResult<Vec<ConstellationPoint>>
where
    R: MoleculeRepository + ?Sized,
    E: InferenceEngine + ?Sized,
{
    let started = Instant::now();
    let molecule_ids = collect_molecule_ids(patents);
    if molecule_ids.is_empty() {
        debug!("No molecules referenced by {} patents", patents.len());
        return Ok(Vec::new());
    }

    let fetched = molecules
        .get_molecules_by_ids(&molecule_ids)
        .await
        .map_err(|e| ConstellationError::repository("get_molecules_by_ids", e))?;
    let by_id: HashMap<&str, &Molecule> = fetched.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut embedded: Vec<(&Molecule, Vec<f32>)> = Vec::with_capacity(molecule_ids.len());
    let mut failures = 0usize;
    for molecule_id in &molecule_ids {
        let Some(molecule) = by_id.get(molecule_id.as_str()).copied() else {
            warn!("Molecule {} not found; skipping", molecule_id);
            failures += 1;
            continue;
        };
        let Some(smiles) = molecule.resolvable_smiles() else {
            warn!("Molecule {} has no structure; skipping", molecule_id);
            failures += 1;
            continue;
        };
        match engine.embed(smiles).await {
            Ok(output) => embedded.push((molecule, output.vector)),
            Err(e) => {
                warn!("Embedding failed for molecule {}: {}", molecule_id, e);
                failures += 1;
            }
        }
    }

    if embedded.is_empty() {
        return Err(ConstellationError::internal(format!(
            "no embeddings could be generated for {} referenced molecules",
            molecule_ids.len()
        )));
    }

    embedded.sort_by(|a, b| a.0.id.cmp(&b.0.id));
    let vectors: Vec<Vec<f32>> = embedded.iter().map(|(_, v)| v.clone()).collect();
    let reduced = engine
        .reduce(&vectors, config)
        .await
        .map_err(|e| ConstellationError::inference("reduce", e))?;

    if reduced.len() != embedded.len() {
        return Err(ConstellationError::internal(format!(
            "reduction returned {} coordinates for {} vectors",
            reduced.len(),
            embedded.len()
        )));
    }
    if let Some(short) = reduced.iter().find(|c| c.len() < MIN_DIMENSIONS) {
        return Err(ConstellationError::internal(format!(
            "reduction returned {}-dimensional coordinates",
            short.len()
        )));
    }

    let coordinates: HashMap<&str, (&Molecule, &Vec<f64>)> = embedded
        .iter()
        .zip(reduced.iter())
        .map(|((molecule, _), coords)| (molecule.id.as_str(), (*molecule, coords)))
        .collect();

    let mut points = Vec::new();
    for patent in patents {
        for molecule_id in dedup_preserving_order(patent.molecule_ids.iter()) {
            if let Some((molecule, coords)) = coordinates.get(molecule_id.as_str()) {
                points.push(make_point(patent, molecule, coords, config.dimensions, point_type));
            }
        }
    }

    debug!(
        "Embedded {} of {} molecules ({} skipped) into {} points in {:?}",
        embedded.len(),
        molecule_ids.len(),
        failures,
        points.len(),
        started.elapsed()
    );
    Ok(points)
}

fn make_point(
    patent: &Patent,
    molecule: &Molecule,
    coords: &[f64],
    dimensions: usize,
    point_type: PointType,
) -> ConstellationPoint {
    ConstellationPoint {
        id: format!("{}:{}", patent.id, molecule.id),
        patent_number: Some(patent.patent_number.clone()).filter(|n| !n.is_empty()),
        molecule_id: Some(molecule.id.clone()),
        smiles: molecule.resolvable_smiles().map(str::to_string),
        x: coords[0],
        y: coords[1],
        z: if dimensions >= 3 { coords.get(2).copied() } else { None },
        technology_domain: patent.primary_domain().to_string(),
        legal_status: patent.legal_status,
        assignee: patent.assignee.clone(),
        filing_year: patent.filing_year(),
        value_score: patent.value_score,
        point_type,
    }
}

#[cfg(test)]
#[path = "embedding_tests.rs"]
mod embedding_tests;
