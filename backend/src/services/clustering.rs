//! Grid-density clustering of constellation points.
//!
//! Points are bucketed into an adaptive square grid over their bounding box;
//! every cell holding markedly more points than the average cell becomes a
//! circular cluster.

use std::collections::BTreeMap;

use crate::api::{ConstellationCluster, ConstellationPoint};
use crate::services::geometry::{compute_bounding_box, euclidean_distance, unique_sorted};

/// Clustering needs at least this many points.
pub const MIN_POINTS_FOR_CLUSTERING: usize = 3;
pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 20;
/// A cell must hold this multiple of the mean cell population (tunable).
pub const CLUSTER_DENSITY_FACTOR: f64 = 1.5;
pub const MIN_CLUSTER_MEMBERS: usize = 2;
/// Label used when no member carries a technology domain.
pub const DEFAULT_CLUSTER_LABEL: &str = "cluster";

/// Adaptive grid side length: `clamp(ceil(sqrt(n / 3)), 2, 20)`.
pub fn grid_size(point_count: usize) -> usize {
    ((point_count as f64 / 3.0).sqrt().ceil() as usize).clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

/// Cell index along one axis; the maximum coordinate falls into the last cell.
pub(crate) fn cell_index(value: f64, min: f64, cell_size: f64, cells: usize) -> usize {
    let idx = ((value - min) / cell_size).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(cells - 1)
    }
}

/// Detect dense regions; sorted by member count, largest first.
///
/// Fewer than three points never produce clusters.
pub fn detect_clusters(points: &[ConstellationPoint]) -> Vec<ConstellationCluster> {
    if points.len() < MIN_POINTS_FOR_CLUSTERING {
        return Vec::new();
    }

    let bbox = compute_bounding_box(points);
    let grid = grid_size(points.len());
    let cell_width = if bbox.width() > 0.0 {
        bbox.width() / grid as f64
    } else {
        1.0
    };
    let cell_height = if bbox.height() > 0.0 {
        bbox.height() / grid as f64
    } else {
        1.0
    };

    let mut cells: BTreeMap<(usize, usize), Vec<&ConstellationPoint>> = BTreeMap::new();
    for point in points {
        let col = cell_index(point.x, bbox.x_min, cell_width, grid);
        let row = cell_index(point.y, bbox.y_min, cell_height, grid);
        cells.entry((row, col)).or_default().push(point);
    }

    let mean_per_cell = points.len() as f64 / (grid * grid) as f64;
    let threshold = (CLUSTER_DENSITY_FACTOR * mean_per_cell).max(MIN_CLUSTER_MEMBERS as f64);

    let mut clusters: Vec<ConstellationCluster> = cells
        .values()
        .filter(|members| members.len() as f64 >= threshold)
        .map(|members| build_cluster(members))
        .collect();

    clusters.sort_by(|a, b| b.member_count.cmp(&a.member_count));
    for (i, cluster) in clusters.iter_mut().enumerate() {
        cluster.id = format!("cluster-{}", i + 1);
    }
    clusters
}

fn build_cluster(members: &[&ConstellationPoint]) -> ConstellationCluster {
    let count = members.len() as f64;
    let centroid_x = members.iter().map(|p| p.x).sum::<f64>() / count;
    let centroid_y = members.iter().map(|p| p.y).sum::<f64>() / count;
    let radius = members
        .iter()
        .map(|p| euclidean_distance(p.x, p.y, centroid_x, centroid_y))
        .fold(0.0, f64::max);
    let density = if radius > 0.0 {
        count / (std::f64::consts::PI * radius * radius)
    } else {
        0.0
    };

    let technology_domains = unique_sorted(members.iter().map(|p| p.technology_domain.as_str()));
    let label = technology_domains
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_CLUSTER_LABEL.to_string());

    ConstellationCluster {
        id: String::new(),
        label,
        centroid_x,
        centroid_y,
        radius,
        member_count: members.len(),
        technology_domains,
        density,
    }
}

#[cfg(test)]
#[path = "clustering_tests.rs"]
mod clustering_tests;
