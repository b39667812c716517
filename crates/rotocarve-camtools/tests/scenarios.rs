use rotocarve_camtools::{
    segment_points, CncMeshToolPathGenerator, ObstructionStats, PointStatus,
    VisibilityAngleAnalyzer,
};
use rotocarve_core::{BoundingBox, Coord3, Point2, Polygon, Polygons};
use rotocarve_mesh::{SlicedModel, SlicerLayer};
use rotocarve_settings::MachiningDescriptor;
use rotocarve_toolpath::MotionCommand;

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::from_points(&[
        Point2::new(x0, y0),
        Point2::new(x0 + side, y0),
        Point2::new(x0 + side, y0 + side),
        Point2::new(x0, y0 + side),
    ])
}

fn layer(index: usize, z: f64, polygons: Vec<Polygon>) -> SlicerLayer {
    let part: Polygons = polygons.into_iter().collect();
    SlicerLayer {
        index,
        z,
        polygons: part.clone(),
        polygons_part: part,
    }
}

fn model(layers: Vec<SlicerLayer>) -> SlicedModel {
    SlicedModel {
        layers,
        bounds: BoundingBox::new(Coord3::new(-10.0, -10.0, 0.0), Coord3::new(10.0, 10.0, 10.0)),
    }
}

#[test]
fn test_square_vertices_form_one_segment() {
    let polygons: Polygons = vec![square(0.0, 0.0, 10.0)].into_iter().collect();
    let analyzer = VisibilityAngleAnalyzer::new(30.0);
    let mut stats = ObstructionStats::default();
    let points = analyzer.analyze_polygon(&polygons, 0, &mut stats);

    assert_eq!(points.len(), 4);
    for vis in &points {
        assert_eq!(vis.status, PointStatus::Feasible);
        // full circle minus the quarter turn facing the interior
        assert_eq!(vis.admissible.len(), 1);
        assert!((vis.admissible.total_width() - 270.0).abs() < 1e-9);
    }

    let segments = segment_points(points.into_iter().map(|v| (v.point, v.admissible)));
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 4);
    assert!(segments[0].is_continuous());
}

#[test]
fn test_square_job_end_to_end() {
    // edges shorter than two sampling intervals keep only the vertices
    let mut d = MachiningDescriptor::new("square.stl", 40.0);
    d.gcode_config.density = 0.05;

    let gen = CncMeshToolPathGenerator::new(d).unwrap();
    let (result, report) = gen
        .generate(&model(vec![layer(0, 3.0, vec![square(0.0, 0.0, 10.0)])]))
        .unwrap();

    assert_eq!(report.layers[0].point_count, 4);
    assert_eq!(report.layers[0].segment_lengths, vec![4]);

    // retract, spindle on, retract, B, XY, plunge, 3 cuts, spindle off
    assert_eq!(result.data.len(), 10);
    let cuts = result
        .data
        .iter()
        .filter(|c| matches!(c, MotionCommand::Linear(m) if m.b.is_some()))
        .count();
    assert_eq!(cuts, 3);
    for cmd in &result.data {
        if let Some(m) = cmd.axis_move() {
            if m.x.is_some() {
                assert_eq!(m.y, Some(3.0));
            }
        }
    }
}

#[test]
fn test_separated_polygons_do_not_interfere() {
    let near = square(0.0, 0.0, 10.0);
    let far = square(1000.0, 1000.0, 1.0);

    let alone: Polygons = vec![near.clone()].into_iter().collect();
    let both: Polygons = vec![near, far].into_iter().collect();
    let analyzer = VisibilityAngleAnalyzer::new(30.0);
    let mut stats = ObstructionStats::default();

    for i in 0..4 {
        let a = analyzer.analyze_point(&alone, 0, i, &mut stats);
        let b = analyzer.analyze_point(&both, 0, i, &mut stats);
        assert_eq!(b.status, PointStatus::Feasible);
        // the distant square subtends well under a tenth of a degree
        assert!(a.admissible.total_width() - b.admissible.total_width() < 0.1);
    }

    // seen from the far corner the distant square hides behind the near one
    let a = analyzer.analyze_point(&alone, 0, 0, &mut stats);
    let b = analyzer.analyze_point(&both, 0, 0, &mut stats);
    assert_eq!(a.admissible, b.admissible);

    // the near square does not narrow the distant one below the tool angle
    for i in 0..4 {
        let vis = analyzer.analyze_point(&both, 1, i, &mut stats);
        assert_eq!(vis.status, PointStatus::Feasible);
        assert!(vis.admissible.total_width() > 269.0);
    }
}

#[test]
fn test_estimated_time_applies_calibration() {
    let layers = vec![
        layer(0, 1.0, vec![square(-5.0, -5.0, 10.0)]),
        layer(1, 2.0, vec![square(-4.0, -4.0, 8.0)]),
    ];

    let mut raw = MachiningDescriptor::new("part.stl", 30.0);
    raw.gcode_config.time_calibration = 1.0;
    let (uncalibrated, _) = CncMeshToolPathGenerator::new(raw)
        .unwrap()
        .generate(&model(layers.clone()))
        .unwrap();

    let calibrated_desc = MachiningDescriptor::new("part.stl", 30.0);
    assert_eq!(calibrated_desc.gcode_config.time_calibration, 1.6);
    let (calibrated, _) = CncMeshToolPathGenerator::new(calibrated_desc)
        .unwrap()
        .generate(&model(layers))
        .unwrap();

    assert!(uncalibrated.estimated_time > 0.0);
    assert_eq!(calibrated.estimated_time, uncalibrated.estimated_time * 1.6);
    assert_eq!(calibrated.data, uncalibrated.data);
}

#[test]
fn test_result_metadata() {
    let radius = 20.0;
    let mut d = MachiningDescriptor::new("part.stl", radius * 2.0);
    d.transformation.position_x = std::f64::consts::PI * radius / 2.0;
    d.transformation.position_y = 7.0;
    d.transformation.position_z = -1.0;
    d.head_type = "cnc".to_string();
    d.mode = "greyscale".to_string();

    let sliced = model(vec![layer(0, 1.0, vec![square(-5.0, -5.0, 10.0)])]);
    let (result, _) = CncMeshToolPathGenerator::new(d.clone())
        .unwrap()
        .generate(&sliced)
        .unwrap();

    assert_eq!(result.position_x, 0.0);
    assert!((result.rotation_b - 90.0).abs() < 1e-9);
    assert_eq!(result.position_y, 7.0);
    assert_eq!(result.position_z, -1.0);
    assert_eq!(result.bounding_box, sliced.bounds);
    assert!(result.is_rotate);
    assert_eq!(result.diameter, 40.0);

    d.is_rotate = false;
    let (flat, _) = CncMeshToolPathGenerator::new(d.clone())
        .unwrap()
        .generate(&sliced)
        .unwrap();
    assert_eq!(flat.position_x, d.transformation.position_x);
    assert_eq!(flat.rotation_b, 0.0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["headType"], "cnc");
    assert_eq!(json["movementMode"], "");
    assert!(json["data"].is_array());
    assert!(json["boundingBox"]["max"]["z"].is_number());
}

#[test]
fn test_enclosed_layer_emits_no_cuts() {
    // a small square sitting inside a larger ring is walled in on all sides
    let ring = square(-50.0, -50.0, 100.0);
    let inner = square(-1.0, -1.0, 2.0);
    let mut d = MachiningDescriptor::new("part.stl", 120.0);
    d.gcode_config.density = 0.1;

    let gen = CncMeshToolPathGenerator::new(d).unwrap();
    let (segments, report) = gen.plan_layer(&layer(0, 0.0, vec![inner, ring]));

    assert_eq!(report.polygon_count, 2);
    assert!(report.enclosed_points >= 4);
    assert_eq!(report.feasible_points + report.infeasible_points(), report.point_count);
    assert!(segments.iter().all(|s| s.is_continuous()));
}
