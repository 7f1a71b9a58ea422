//! Coverage statistics for one constellation run.

use crate::api::{
    ConstellationCluster, ConstellationPoint, CoverageStatistics, WhiteSpaceRegion,
};
use crate::models::PointType;

/// Aggregate counts, cluster density moments and the coverage ratio.
///
/// `white_space_scanned` is false when the caller skipped white-space
/// detection; the coverage ratio then reports full coverage whenever
/// clusters exist.
pub fn compute_statistics(
    points: &[ConstellationPoint],
    clusters: &[ConstellationCluster],
    white_space: &[WhiteSpaceRegion],
    white_space_scanned: bool,
) -> CoverageStatistics {
    let own_patent_count = points
        .iter()
        .filter(|p| p.point_type == PointType::OwnPatent)
        .count();
    let competitor_patent_count = points
        .iter()
        .filter(|p| p.point_type == PointType::CompetitorPatent)
        .count();

    let (density_mean, density_std_dev) = mean_and_std_dev(clusters.iter().map(|c| c.density));

    CoverageStatistics {
        total_points: points.len(),
        own_patent_count,
        competitor_patent_count,
        cluster_count: clusters.len(),
        white_space_count: white_space.len(),
        density_mean,
        density_std_dev,
        coverage_ratio: coverage_ratio(clusters, white_space, white_space_scanned),
    }
}

/// Population mean and standard deviation; zeros for an empty input.
fn mean_and_std_dev<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn coverage_ratio(
    clusters: &[ConstellationCluster],
    white_space: &[WhiteSpaceRegion],
    white_space_scanned: bool,
) -> f64 {
    if clusters.is_empty() {
        return 0.0;
    }
    let cluster_area: f64 = clusters
        .iter()
        .map(|c| std::f64::consts::PI * c.radius * c.radius)
        .sum();
    let white_space_area: f64 = white_space.iter().map(|w| w.area).sum();
    let total = cluster_area + white_space_area;
    if !white_space_scanned || total <= 0.0 {
        return 1.0;
    }
    cluster_area / total
}
