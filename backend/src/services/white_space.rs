//! White-space detection.
//!
//! Scans a fixed grid over the points' bounding box and reports sparse cells
//! that sit close enough to an existing cluster to be actionable.

use crate::api::{ConstellationCluster, ConstellationPoint, WhiteSpaceRegion};
use crate::services::geometry::{compute_bounding_box, euclidean_distance, unique_sorted};

pub const MIN_POINTS_FOR_WHITE_SPACE: usize = 5;
pub const MIN_SEARCH_RADIUS: f64 = 1e-6;
pub const WHITE_SPACE_GRID: usize = 20;
pub const SPARSE_THRESHOLD_FACTOR: f64 = 0.3;
/// Actionable cutoff in search radii (tunable).
pub const ACTIONABLE_DISTANCE_FACTOR: f64 = 5.0;
pub const NEARBY_DOMAIN_FACTOR: f64 = 2.0;
pub const MAX_WHITE_SPACE_REGIONS: usize = 20;

/// Heuristic knobs of the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteSpaceConfig {
    /// Cells per axis.
    pub grid_size: usize,
    /// A cell is sparse when its local count is below `factor * n / grid_size²`.
    pub sparse_threshold_factor: f64,
    /// Candidates farther than this many search radii from every cluster are dropped.
    pub actionable_distance_factor: f64,
    /// Domains within this many search radii are reported as context.
    pub nearby_domain_factor: f64,
    pub max_regions: usize,
}

impl Default for WhiteSpaceConfig {
    fn default() -> Self {
        Self {
            grid_size: WHITE_SPACE_GRID,
            sparse_threshold_factor: SPARSE_THRESHOLD_FACTOR,
            actionable_distance_factor: ACTIONABLE_DISTANCE_FACTOR,
            nearby_domain_factor: NEARBY_DOMAIN_FACTOR,
            max_regions: MAX_WHITE_SPACE_REGIONS,
        }
    }
}

/// Local search radius: `0.5 * sqrt(boxArea / n)`, at least 1e-6.
pub fn search_radius(box_area: f64, point_count: usize) -> f64 {
    if point_count == 0 {
        return MIN_SEARCH_RADIUS;
    }
    (0.5 * (box_area / point_count as f64).sqrt()).max(MIN_SEARCH_RADIUS)
}

/// Detect white-space regions with the default heuristics.
pub fn detect_white_space(
    points: &[ConstellationPoint],
    clusters: &[ConstellationCluster],
) -> Vec<WhiteSpaceRegion> {
    detect_white_space_with(points, clusters, &WhiteSpaceConfig::default())
}

/// Detect white-space regions; highest score first.
///
/// Fewer than five points never produce regions. Without clusters every
/// sparse cell is kept and scored as if it sat exactly at the cutoff distance.
pub fn detect_white_space_with(
    points: &[ConstellationPoint],
    clusters: &[ConstellationCluster],
    config: &WhiteSpaceConfig,
) -> Vec<WhiteSpaceRegion> {
    if points.len() < MIN_POINTS_FOR_WHITE_SPACE || config.grid_size == 0 {
        return Vec::new();
    }

    let bbox = compute_bounding_box(points);
    let grid = config.grid_size;
    let span_x = if bbox.width() > 0.0 { bbox.width() } else { 1.0 };
    let span_y = if bbox.height() > 0.0 { bbox.height() } else { 1.0 };
    let cell_width = span_x / grid as f64;
    let cell_height = span_y / grid as f64;
    let cell_area = cell_width * cell_height;

    let n = points.len();
    let radius = search_radius(bbox.area(), n);
    let sparse_threshold = config.sparse_threshold_factor * n as f64 / (grid * grid) as f64;
    let cutoff = config.actionable_distance_factor * radius;
    let nearby_radius = config.nearby_domain_factor * radius;

    let mut regions = Vec::new();
    for row in 0..grid {
        let center_y = bbox.y_min + (row as f64 + 0.5) * cell_height;
        for col in 0..grid {
            let center_x = bbox.x_min + (col as f64 + 0.5) * cell_width;

            let local = points
                .iter()
                .filter(|p| euclidean_distance(p.x, p.y, center_x, center_y) <= radius)
                .count();
            if local as f64 >= sparse_threshold {
                continue;
            }

            let nearest_cluster = clusters
                .iter()
                .map(|c| euclidean_distance(c.centroid_x, c.centroid_y, center_x, center_y))
                .fold(f64::INFINITY, f64::min);
            let distance = if clusters.is_empty() {
                cutoff
            } else if nearest_cluster > cutoff {
                continue;
            } else {
                nearest_cluster
            };

            let nearby_domains = unique_sorted(
                points
                    .iter()
                    .filter(|p| {
                        euclidean_distance(p.x, p.y, center_x, center_y) <= nearby_radius
                    })
                    .map(|p| p.technology_domain.as_str()),
            );

            regions.push(WhiteSpaceRegion {
                id: String::new(),
                center_x,
                center_y,
                area: cell_area,
                nearby_domains,
                score: 1.0 / (1.0 + distance / radius),
            });
        }
    }

    regions.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    regions.truncate(config.max_regions);
    for (i, region) in regions.iter_mut().enumerate() {
        region.id = format!("white-space-{}", i + 1);
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clustering::detect_clusters;
    use crate::services::test_support::{blob, point};

    fn two_blobs() -> Vec<ConstellationPoint> {
        let mut points = blob("a", 0.0, 0.0, 8, "A61K");
        points.extend(blob("b", 10.0, 10.0, 8, "C07D"));
        points
    }

    #[test]
    fn test_search_radius() {
        assert_eq!(search_radius(100.0, 25), 1.0);
        assert_eq!(search_radius(0.0, 10), MIN_SEARCH_RADIUS);
        assert_eq!(search_radius(100.0, 0), MIN_SEARCH_RADIUS);
    }

    #[test]
    fn test_fewer_than_five_points_yield_nothing() {
        let points: Vec<_> = (0..4)
            .map(|i| point(&format!("p{}", i), i as f64, 0.0, "A61K"))
            .collect();
        let clusters = detect_clusters(&points);
        assert!(detect_white_space(&points, &clusters).is_empty());
    }

    #[test]
    fn test_regions_are_actionable_and_sorted() {
        let points = two_blobs();
        let clusters = detect_clusters(&points);
        assert_eq!(clusters.len(), 2);

        let regions = detect_white_space(&points, &clusters);
        assert!(!regions.is_empty());
        assert!(regions.len() <= 20);

        let bbox = compute_bounding_box(&points);
        let radius = search_radius(bbox.area(), points.len());
        for pair in regions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for region in &regions {
            assert!(region.score > 0.0 && region.score <= 1.0);
            let nearest = clusters
                .iter()
                .map(|c| euclidean_distance(c.centroid_x, c.centroid_y, region.center_x, region.center_y))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest <= 5.0 * radius + 1e-9);
            assert!(points
                .iter()
                .all(|p| euclidean_distance(p.x, p.y, region.center_x, region.center_y) > radius));
            let mut sorted = region.nearby_domains.clone();
            sorted.sort();
            assert_eq!(sorted, region.nearby_domains);
        }
        assert_eq!(regions[0].id, "white-space-1");
    }

    #[test]
    fn test_region_area_is_one_grid_cell() {
        let points = two_blobs();
        let clusters = detect_clusters(&points);
        let regions = detect_white_space(&points, &clusters);
        let bbox = compute_bounding_box(&points);
        let expected = (bbox.width() / 20.0) * (bbox.height() / 20.0);
        assert!(regions.iter().all(|r| (r.area - expected).abs() < 1e-12));
    }

    #[test]
    fn test_without_clusters_scores_are_flat() {
        let points = two_blobs();
        let regions = detect_white_space(&points, &[]);
        assert_eq!(regions.len(), 20);
        assert!(regions.iter().all(|r| (r.score - 1.0 / 6.0).abs() < 1e-12));
    }

    #[test]
    fn test_nearby_domains_come_from_close_points() {
        let points = two_blobs();
        let clusters = detect_clusters(&points);
        let config = WhiteSpaceConfig {
            max_regions: 400,
            ..WhiteSpaceConfig::default()
        };
        let regions = detect_white_space_with(&points, &clusters, &config);
        assert!(regions
            .iter()
            .any(|r| r.nearby_domains == vec!["A61K".to_string()]));
        assert!(regions
            .iter()
            .all(|r| !r.nearby_domains.contains(&"G16B".to_string())));
    }

    #[test]
    fn test_zero_cutoff_discards_everything() {
        let points = two_blobs();
        let clusters = detect_clusters(&points);
        let config = WhiteSpaceConfig {
            actionable_distance_factor: 0.0,
            ..WhiteSpaceConfig::default()
        };
        assert!(detect_white_space_with(&points, &clusters, &config).is_empty());
    }
}
