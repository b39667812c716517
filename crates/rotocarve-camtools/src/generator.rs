//! # Rotary Mesh Tool Path Generator
//!
//! Drives a whole job: slice the mesh, then for each layer resample the
//! cuttable contours, find admissible approach arcs, segment, and emit. The
//! job is bracketed by a retract to the workpiece surface with the spindle
//! switched on, and ends with the spindle switched off.
//!
//! Layers run in order and share one motion builder, so the rotary axis
//! stays continuous across layer boundaries.

use crate::emitter::ToolPathEmitter;
use crate::error::CamToolResult;
use crate::optimizer::{PassThrough, SegmentOptimizer};
use crate::report::{GenerationReport, LayerReport};
use crate::resample::resample_polygons;
use crate::segmenter::{PathSegment, PathSegmenter};
use crate::visibility::{ObstructionStats, PointStatus, VisibilityAngleAnalyzer};
use rotocarve_core::BoundingBox;
use rotocarve_mesh::{Mesh3D, MeshSlicer, SliceProvider, SlicerLayer, SlicingParams};
use rotocarve_settings::MachiningDescriptor;
use rotocarve_toolpath::{MotionCommand, RotaryToolPath};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Finished job as handed to the machine front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPathResult {
    pub head_type: String,
    pub mode: String,
    pub movement_mode: String,
    /// Motion commands in execution order
    pub data: Vec<MotionCommand>,
    /// Calibrated machining time in seconds
    pub estimated_time: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    /// Rotary offset replacing X placement on a rotary job
    pub rotation_b: f64,
    pub bounding_box: BoundingBox,
    pub is_rotate: bool,
    pub diameter: f64,
}

impl ToolPathResult {
    /// Pretty-printed JSON, as written by the command-line tool.
    pub fn to_json_pretty(&self) -> CamToolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct CncMeshToolPathGenerator {
    descriptor: MachiningDescriptor,
    analyzer: VisibilityAngleAnalyzer,
    emitter: ToolPathEmitter,
    optimizer: Box<dyn SegmentOptimizer>,
}

impl CncMeshToolPathGenerator {
    /// Create a generator for a validated descriptor.
    pub fn new(descriptor: MachiningDescriptor) -> CamToolResult<Self> {
        descriptor.validate()?;

        let cfg = &descriptor.gcode_config;
        let analyzer = VisibilityAngleAnalyzer::new(cfg.tool_angle);
        let emitter = ToolPathEmitter::new(
            descriptor.initial_z(),
            cfg.jog_speed,
            cfg.work_speed,
            cfg.plunge_speed,
        );

        Ok(Self {
            descriptor,
            analyzer,
            emitter,
            optimizer: Box::new(PassThrough),
        })
    }

    /// Replace the segment optimiser applied before emission.
    pub fn with_optimizer(mut self, optimizer: impl SegmentOptimizer + 'static) -> Self {
        self.optimizer = Box::new(optimizer);
        self
    }

    pub fn descriptor(&self) -> &MachiningDescriptor {
        &self.descriptor
    }

    /// Slicer for the descriptor's mesh inside `upload_dir`, at the
    /// configured layer height.
    pub fn mesh_slicer(&self, upload_dir: &Path) -> CamToolResult<MeshSlicer> {
        let path = self.descriptor.resolve_upload(upload_dir);
        let params = SlicingParams::new(self.descriptor.gcode_config.effective_layer_height());
        let slicer = MeshSlicer::from_file(&path, params)?;

        let clearance = self.stock_clearance(slicer.mesh());
        if clearance < 0.0 {
            warn!(
                mesh_radius = slicer.mesh().max_radius(),
                stock_radius = self.descriptor.radius(),
                "Mesh extends past the stock diameter; retract height is inside material"
            );
        }
        Ok(slicer)
    }

    /// Stock radius minus the largest mesh radius. Negative when the mesh
    /// reaches past the retract height.
    pub fn stock_clearance(&self, mesh: &Mesh3D) -> f64 {
        self.descriptor.radius() - mesh.max_radius()
    }

    /// Generate the full tool path.
    pub fn generate<P>(&self, provider: &P) -> CamToolResult<(ToolPathResult, GenerationReport)>
    where
        P: SliceProvider + ?Sized,
    {
        self.generate_with_progress(provider, |_| {})
    }

    /// Generate the full tool path, calling `progress` after each layer.
    pub fn generate_with_progress<P, F>(
        &self,
        provider: &P,
        mut progress: F,
    ) -> CamToolResult<(ToolPathResult, GenerationReport)>
    where
        P: SliceProvider + ?Sized,
        F: FnMut(&LayerReport),
    {
        let d = &self.descriptor;
        let cfg = &d.gcode_config;

        let model = provider.slice()?;
        info!(
            "Generating rotary tool path for {} ({} layers, diameter {})",
            d.upload_name,
            model.layers.len(),
            d.diameter
        );

        let mut toolpath = RotaryToolPath::new(d.is_rotate, d.radius());
        toolpath.travel_z(d.initial_z(), cfg.jog_speed);
        toolpath.spindle_on(cfg.spindle_power);

        let mut report = GenerationReport::default();
        for layer in &model.layers {
            let (segments, mut layer_report) = self.plan_layer(layer);
            let segments = self.optimizer.optimize(segments);
            layer_report.segment_lengths = segments.iter().map(PathSegment::len).collect();

            self.emitter.emit_all(&mut toolpath, &segments, layer.z);

            progress(&layer_report);
            report.layers.push(layer_report);
        }

        toolpath.spindle_off();

        let estimated_time = toolpath.estimated_time() * cfg.time_calibration;
        let t = &d.transformation;
        let result = ToolPathResult {
            head_type: d.head_type.clone(),
            mode: d.mode.clone(),
            movement_mode: String::new(),
            estimated_time,
            position_x: if d.is_rotate { 0.0 } else { t.position_x },
            position_y: t.position_y,
            position_z: t.position_z,
            rotation_b: if d.is_rotate {
                toolpath.angle_to_rotation_offset(t.position_x)
            } else {
                0.0
            },
            bounding_box: model.bounds,
            is_rotate: d.is_rotate,
            diameter: d.diameter,
            data: toolpath.into_commands(),
        };

        info!(
            "Tool path complete: {} commands, {} segments, {} infeasible points, est. {:.1}s",
            result.data.len(),
            report.total_segments(),
            report.total_infeasible(),
            result.estimated_time
        );

        Ok((result, report))
    }

    /// Analyse and segment one layer without emitting anything.
    pub fn plan_layer(&self, layer: &SlicerLayer) -> (Vec<PathSegment>, LayerReport) {
        let cfg = &self.descriptor.gcode_config;
        let polygons = resample_polygons(
            &layer.polygons_part,
            cfg.sampling_interval(),
            cfg.resample_mode,
        );

        let mut report = LayerReport {
            layer_index: layer.index,
            z: layer.z,
            polygon_count: polygons.len(),
            point_count: polygons.point_count(),
            ..Default::default()
        };

        if polygons.is_empty() {
            warn!("Layer {} at Z={:.4} has no cuttable contours", layer.index, layer.z);
            return (Vec::new(), report);
        }

        let mut stats = ObstructionStats::default();
        let mut segments = Vec::new();

        for polygon_index in 0..polygons.len() {
            let mut segmenter = PathSegmenter::new();
            for vis in self.analyzer.analyze_polygon(&polygons, polygon_index, &mut stats) {
                match vis.status {
                    PointStatus::Feasible => {
                        report.feasible_points += 1;
                        segmenter.push(vis.point, vis.admissible);
                    }
                    PointStatus::Enclosed => report.enclosed_points += 1,
                    PointStatus::TooNarrow => report.too_narrow_points += 1,
                }
            }
            let produced = segmenter.finish();
            debug!(
                "Layer {} polygon {}: {} segments",
                layer.index,
                polygon_index,
                produced.len()
            );
            segments.extend(produced);
        }

        report.non_finite_bearings = stats.non_finite_bearings;
        report.degenerate_edges = stats.degenerate_edges;

        if stats.non_finite_bearings > 0 {
            warn!(
                layer = layer.index,
                z = layer.z,
                skipped = stats.non_finite_bearings,
                "non-finite bearings skipped; contour has invalid coordinates"
            );
        }
        debug!(
            layer = layer.index,
            z = layer.z,
            feasible = report.feasible_points,
            enclosed = report.enclosed_points,
            too_narrow = report.too_narrow_points,
            "layer analysed"
        );

        (segments, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotocarve_core::{Point2, Polygon, Polygons};
    use rotocarve_mesh::SlicedModel;

    fn square_layer() -> SlicerLayer {
        let square = Polygon::from_points(&[
            Point2::new(-5.0, -5.0),
            Point2::new(5.0, -5.0),
            Point2::new(5.0, 5.0),
            Point2::new(-5.0, 5.0),
        ]);
        let part: Polygons = vec![square].into_iter().collect();
        SlicerLayer {
            index: 0,
            z: 1.0,
            polygons: part.clone(),
            polygons_part: part,
        }
    }

    fn descriptor(density: f64) -> MachiningDescriptor {
        let mut d = MachiningDescriptor::new("square.stl", 20.0);
        d.gcode_config.density = density;
        d
    }

    #[test]
    fn test_rejects_invalid_descriptor() {
        assert!(CncMeshToolPathGenerator::new(MachiningDescriptor::new("a.stl", -1.0)).is_err());
    }

    #[test]
    fn test_plan_layer_square() {
        let gen = CncMeshToolPathGenerator::new(descriptor(1.0)).unwrap();
        let (segments, report) = gen.plan_layer(&square_layer());
        assert_eq!(report.point_count, 40);
        assert_eq!(report.feasible_points, 40);
        assert_eq!(report.infeasible_points(), 0);
        assert!(!segments.is_empty());
        assert!(segments.iter().all(PathSegment::is_continuous));
    }

    #[test]
    fn test_empty_layer_reports_nothing() {
        let gen = CncMeshToolPathGenerator::new(descriptor(1.0)).unwrap();
        let layer = SlicerLayer {
            index: 3,
            z: 2.0,
            ..Default::default()
        };
        let (segments, report) = gen.plan_layer(&layer);
        assert!(segments.is_empty());
        assert_eq!(report.layer_index, 3);
        assert_eq!(report.point_count, 0);
    }

    #[test]
    fn test_generate_brackets_job() {
        let gen = CncMeshToolPathGenerator::new(descriptor(1.0)).unwrap();
        let model = SlicedModel {
            layers: vec![square_layer()],
            bounds: BoundingBox::default(),
        };
        let mut seen = Vec::new();
        let (result, report) = gen
            .generate_with_progress(&model, |r| seen.push(r.layer_index))
            .unwrap();

        assert_eq!(seen, vec![0]);
        assert_eq!(report.layers.len(), 1);
        assert_eq!(
            result.data.first(),
            Some(&MotionCommand::Rapid(
                rotocarve_toolpath::AxisMove::new(300.0).z(10.0)
            ))
        );
        assert_eq!(result.data[1], MotionCommand::SpindleOn { power: 100.0 });
        assert_eq!(result.data.last(), Some(&MotionCommand::SpindleOff));
        assert_eq!(result.head_type, "cnc");
        assert_eq!(result.movement_mode, "");

        let json = result.to_json_pretty().unwrap();
        assert!(json.contains("\"estimatedTime\""));
        assert!(json.contains("\"type\": \"spindleOn\""));
    }
}
