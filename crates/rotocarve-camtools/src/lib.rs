//! # Rotocarve CAM Tools
//!
//! Tool path planning for 4-axis rotary carving of a sliced mesh.
//!
//! ## Pipeline
//!
//! - **Resample**: densify each layer contour to uniform spacing
//!   ([`resample_polygons`])
//! - **Visibility**: per point, the arcs from which the tool reaches it
//!   without touching other material ([`VisibilityAngleAnalyzer`])
//! - **Segment**: runs of points with overlapping arcs ([`PathSegmenter`])
//! - **Emit**: B-unwrapped four-axis motion ([`ToolPathEmitter`])
//! - **Generate**: the whole job with diagnostics
//!   ([`CncMeshToolPathGenerator`])

pub mod emitter;
pub mod error;
pub mod generator;
pub mod optimizer;
pub mod report;
pub mod resample;
pub mod segmenter;
pub mod visibility;

pub use emitter::{rotary_angle, unwrap_angle, ToolPathEmitter, COORDINATE_PRECISION};
pub use error::{CamToolError, CamToolResult};
pub use generator::{CncMeshToolPathGenerator, ToolPathResult};
pub use optimizer::{MinimumLength, PassThrough, SegmentOptimizer};
pub use report::{GenerationReport, LayerReport};
pub use resample::{interpolate_edge, resample_polygon, resample_polygons};
pub use segmenter::{
    segment_points, transition, PathPoint, PathSegment, PathSegmenter, SegmenterState,
};
pub use visibility::{ObstructionStats, PointStatus, PointVisibility, VisibilityAngleAnalyzer};
