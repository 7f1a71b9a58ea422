//! Service layer for the constellation analytics.
//!
//! The numerical stages are pure functions over points and patents;
//! [`constellation::ConstellationService`] sequences them, talks to the
//! repository, the inference engine and the cache, and exposes the produced
//! operations to higher layers.

pub mod clustering;
pub mod compare;
pub mod constellation;
pub mod distributions;
pub mod embedding;
pub mod filters;
pub mod geometry;
pub mod heatmap;
pub mod statistics;
pub mod white_space;

#[cfg(test)]
mod test_support;

pub use clustering::detect_clusters;
pub use compare::compare_portfolios;
pub use constellation::ConstellationService;
pub use distributions::compute_domain_distribution;
pub use embedding::{build_constellation_points, resolve_reduction_config};
pub use filters::{apply_filters, validate_filters};
pub use geometry::{compute_bounding_box, euclidean_distance, BoundingBox};
pub use heatmap::{generate_heatmap, HeatmapOptions};
pub use statistics::compute_statistics;
pub use white_space::{detect_white_space, WhiteSpaceConfig};
