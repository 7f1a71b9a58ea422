use serde::{Deserialize, Serialize};

// =========================================================
// Coverage heatmap types + route
// =========================================================

/// Square density grid over a padded bounding box.
///
/// `grid[row][col]`: rows follow the y axis, columns the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageHeatmap {
    pub grid: Vec<Vec<f64>>,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub resolution: usize,
    pub max_density: f64,
    #[serde(default)]
    pub cache_key: String,
}

impl CoverageHeatmap {
    /// An explicitly empty grid for portfolios without points.
    pub fn empty(resolution: usize) -> Self {
        Self {
            grid: Vec::new(),
            x_range: [0.0, 0.0],
            y_range: [0.0, 0.0],
            resolution,
            max_density: 0.0,
            cache_key: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

pub const GET_COVERAGE_HEATMAP: &str = "get_coverage_heatmap";
