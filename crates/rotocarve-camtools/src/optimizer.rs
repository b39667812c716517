//! Segment optimisation hook.
//!
//! Runs on each layer's segments between segmentation and emission. The
//! default keeps segments untouched.

use crate::segmenter::PathSegment;

/// Reorders, merges or filters the segments of one layer.
pub trait SegmentOptimizer {
    fn optimize(&self, segments: Vec<PathSegment>) -> Vec<PathSegment>;
}

/// Leaves segments as produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl SegmentOptimizer for PassThrough {
    fn optimize(&self, segments: Vec<PathSegment>) -> Vec<PathSegment> {
        segments
    }
}

/// Drops segments with fewer than `min_points` points.
#[derive(Debug, Clone, Copy)]
pub struct MinimumLength {
    pub min_points: usize,
}

impl SegmentOptimizer for MinimumLength {
    fn optimize(&self, mut segments: Vec<PathSegment>) -> Vec<PathSegment> {
        segments.retain(|s| s.len() >= self.min_points);
        segments
    }
}

impl<F> SegmentOptimizer for F
where
    F: Fn(Vec<PathSegment>) -> Vec<PathSegment>,
{
    fn optimize(&self, segments: Vec<PathSegment>) -> Vec<PathSegment> {
        self(segments)
    }
}
