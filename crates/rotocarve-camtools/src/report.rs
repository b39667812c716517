//! Per-layer diagnostics returned alongside the tool path.

use serde::{Deserialize, Serialize};

/// What happened to the points of one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerReport {
    pub layer_index: usize,
    pub z: f64,
    pub polygon_count: usize,
    /// Points after resampling
    pub point_count: usize,
    pub feasible_points: usize,
    /// Points blocked in every direction
    pub enclosed_points: usize,
    /// Points whose clear arcs were all narrower than the tool
    pub too_narrow_points: usize,
    /// Edges skipped because a bearing was NaN or infinite
    pub non_finite_bearings: usize,
    /// Edges skipped because they touch the point or are seen edge-on
    pub degenerate_edges: usize,
    /// Point count of each emitted segment, in emission order
    pub segment_lengths: Vec<usize>,
}

impl LayerReport {
    pub fn infeasible_points(&self) -> usize {
        self.enclosed_points + self.too_narrow_points
    }

    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Points actually machined in this layer.
    pub fn emitted_points(&self) -> usize {
        self.segment_lengths.iter().sum()
    }
}

/// Reports for every layer of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub layers: Vec<LayerReport>,
}

impl GenerationReport {
    pub fn total_segments(&self) -> usize {
        self.layers.iter().map(LayerReport::segment_count).sum()
    }

    pub fn total_feasible(&self) -> usize {
        self.layers.iter().map(|l| l.feasible_points).sum()
    }

    pub fn total_infeasible(&self) -> usize {
        self.layers.iter().map(LayerReport::infeasible_points).sum()
    }

    /// Layers that produced no cutting at all.
    pub fn empty_layers(&self) -> impl Iterator<Item = &LayerReport> {
        self.layers.iter().filter(|l| l.segment_lengths.is_empty())
    }
}
