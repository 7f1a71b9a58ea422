//! Coverage heatmap: Gaussian kernel density estimate over reduced points.

use crate::api::{ConstellationPoint, CoverageHeatmap};
use crate::services::geometry::compute_bounding_box;

pub const DEFAULT_RESOLUTION: usize = 100;
pub const MAX_RESOLUTION: usize = 500;
/// Each axis is padded by this fraction of its extent.
pub const HEATMAP_PADDING: f64 = 0.1;
/// Axes narrower than this are widened to a fixed span around their center.
pub const MIN_AXIS_RANGE: f64 = 1e-6;
pub const DEGENERATE_HALF_SPAN: f64 = 1.0;
pub const MIN_BANDWIDTH: f64 = 0.01;

/// Heatmap generation options.
///
/// Setters validate their input and leave the current value untouched when
/// it is out of bounds, returning whether the value was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapOptions {
    resolution: usize,
    density_range: Option<(f64, f64)>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            density_range: None,
        }
    }
}

impl HeatmapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn density_range(&self) -> Option<(f64, f64)> {
        self.density_range
    }

    /// Accepts resolutions in `(0, 500]`.
    pub fn set_resolution(&mut self, resolution: i64) -> bool {
        if resolution <= 0 || resolution > MAX_RESOLUTION as i64 {
            return false;
        }
        self.resolution = resolution as usize;
        true
    }

    /// Accepts finite ranges with `0 <= min < max`.
    pub fn set_density_range(&mut self, min: f64, max: f64) -> bool {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max <= min {
            return false;
        }
        self.density_range = Some((min, max));
        true
    }

    pub fn with_resolution(mut self, resolution: i64) -> Self {
        self.set_resolution(resolution);
        self
    }

    pub fn with_density_range(mut self, min: f64, max: f64) -> Self {
        self.set_density_range(min, max);
        self
    }

    /// Replace the reported maximum with the override, if any.
    ///
    /// Grid values are left as computed.
    pub fn apply_density_override(&self, heatmap: &mut CoverageHeatmap) {
        if heatmap.is_empty() {
            return;
        }
        if let Some((_, max)) = self.density_range {
            heatmap.max_density = max;
        }
    }
}

/// Silverman's rule of thumb: `1.06 * n^(-1/5)`, floored at 0.01.
pub fn silverman_bandwidth(point_count: usize) -> f64 {
    if point_count == 0 {
        return MIN_BANDWIDTH;
    }
    (1.06 * (point_count as f64).powf(-0.2)).max(MIN_BANDWIDTH)
}

fn axis_range(min: f64, max: f64) -> [f64; 2] {
    if max - min < MIN_AXIS_RANGE {
        let center = (min + max) / 2.0;
        [center - DEGENERATE_HALF_SPAN, center + DEGENERATE_HALF_SPAN]
    } else {
        [min, max]
    }
}

/// Compute the raw `resolution x resolution` density grid.
///
/// An empty point set yields an empty grid without computation.
pub fn generate_heatmap(points: &[ConstellationPoint], resolution: usize) -> CoverageHeatmap {
    if points.is_empty() || resolution == 0 {
        return CoverageHeatmap::empty(resolution);
    }

    let bbox = compute_bounding_box(points).padded(HEATMAP_PADDING);
    let x_range = axis_range(bbox.x_min, bbox.x_max);
    let y_range = axis_range(bbox.y_min, bbox.y_max);
    let cell_width = (x_range[1] - x_range[0]) / resolution as f64;
    let cell_height = (y_range[1] - y_range[0]) / resolution as f64;

    let n = points.len() as f64;
    let h = silverman_bandwidth(points.len());
    let norm = n * 2.0 * std::f64::consts::PI * h * h;

    let mut max_density = 0.0f64;
    let mut grid = Vec::with_capacity(resolution);
    for row in 0..resolution {
        let cy = y_range[0] + (row as f64 + 0.5) * cell_height;
        let mut cells = Vec::with_capacity(resolution);
        for col in 0..resolution {
            let cx = x_range[0] + (col as f64 + 0.5) * cell_width;
            let sum: f64 = points
                .iter()
                .map(|p| {
                    let dx = (p.x - cx) / h;
                    let dy = (p.y - cy) / h;
                    (-0.5 * (dx * dx + dy * dy)).exp()
                })
                .sum();
            let density = sum / norm;
            max_density = max_density.max(density);
            cells.push(density);
        }
        grid.push(cells);
    }

    CoverageHeatmap {
        grid,
        x_range,
        y_range,
        resolution,
        max_density,
        cache_key: String::new(),
    }
}
