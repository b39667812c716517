//! # Rotocarve
//!
//! Four-axis rotary CNC carving from sliced 3D meshes. Every layer of the
//! mesh is analysed for the tool orientations that reach each contour point
//! without gouging, points are stitched into orientation-continuous passes,
//! and passes are emitted as X/Y/Z/B motion with a continuous rotary axis.
//!
//! ## Architecture
//!
//! 1. **rotocarve-core** - Points, polygons, angular interval algebra, errors
//! 2. **rotocarve-mesh** - STL import and Z-plane slicing
//! 3. **rotocarve-toolpath** - Motion command builder with axis state and time estimate
//! 4. **rotocarve-camtools** - Visibility analysis, segmentation, emission, job generator
//! 5. **rotocarve-settings** - Machining descriptor and G-code configuration
//! 6. **rotocarve** - Logging setup and the command-line front end

use anyhow::Context;
use std::path::Path;

pub use rotocarve_camtools::{
    CamToolError, CncMeshToolPathGenerator, GenerationReport, LayerReport, ToolPathResult,
};
pub use rotocarve_core::{AngleInterval, AngleIntervalSet, Point2, Polygon, Polygons};
pub use rotocarve_mesh::{MeshSlicer, SliceProvider, SlicedModel};
pub use rotocarve_settings::{default_upload_dir, GcodeConfig, MachiningDescriptor};
pub use rotocarve_toolpath::{MotionCommand, RotaryToolPath};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Output style of the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for job results
/// - RUST_LOG environment variable support
/// - INFO as the baseline level
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging with an explicit output format.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// Load a descriptor, slice its mesh from `upload_dir` and generate the job.
pub fn run_job(
    descriptor_path: &Path,
    upload_dir: &Path,
) -> anyhow::Result<(ToolPathResult, GenerationReport)> {
    let descriptor = MachiningDescriptor::load_from_file(descriptor_path)
        .with_context(|| format!("Failed to load descriptor {}", descriptor_path.display()))?;

    let generator = CncMeshToolPathGenerator::new(descriptor)?;
    let slicer = generator
        .mesh_slicer(upload_dir)
        .with_context(|| format!("Failed to load mesh from {}", upload_dir.display()))?;

    let mut done = 0usize;
    let output = generator.generate_with_progress(&slicer, |layer| {
        done += 1;
        tracing::debug!(
            "Layer {} done: {} segments, {} infeasible points",
            layer.layer_index,
            layer.segment_count(),
            layer.infeasible_points()
        );
    })?;

    tracing::info!("Processed {} layers", done);
    Ok(output)
}
