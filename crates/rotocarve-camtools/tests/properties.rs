//! Property tests for resampling, angle unwrapping and whole-job invariants.

use proptest::prelude::*;
use rotocarve_camtools::{interpolate_edge, unwrap_angle, CncMeshToolPathGenerator};
use rotocarve_core::{BoundingBox, Point2, Polygon, Polygons};
use rotocarve_mesh::{SlicedModel, SlicerLayer};
use rotocarve_settings::MachiningDescriptor;

/// A star-shaped polygon around `center` with vertices at sorted angles.
fn star_polygon(center: (f64, f64)) -> impl Strategy<Value = Polygon> {
    prop::collection::vec((0.0f64..360.0, 2.0f64..10.0), 3..9).prop_map(move |mut spokes| {
        spokes.sort_by(|a, b| a.0.total_cmp(&b.0));
        let points: Vec<Point2> = spokes
            .iter()
            .map(|&(deg, r)| {
                let (s, c) = deg.to_radians().sin_cos();
                Point2::new(center.0 + r * c, center.1 + r * s)
            })
            .collect();
        Polygon::from_points(&points)
    })
}

fn sliced(polygons: Vec<Polygon>) -> SlicedModel {
    let part: Polygons = polygons.into_iter().collect();
    SlicedModel {
        layers: vec![
            SlicerLayer {
                index: 0,
                z: 0.5,
                polygons: part.clone(),
                polygons_part: part.clone(),
            },
            SlicerLayer {
                index: 1,
                z: 1.5,
                polygons: part.clone(),
                polygons_part: part,
            },
        ],
        bounds: BoundingBox::default(),
    }
}

proptest! {
    #[test]
    fn resample_count_and_spacing(
        x1 in -100.0f64..100.0, y1 in -100.0f64..100.0,
        x2 in -100.0f64..100.0, y2 in -100.0f64..100.0,
        interval in 0.1f64..5.0,
    ) {
        let p1 = Point2::new(x1, y1);
        let p2 = Point2::new(x2, y2);
        let d = p1.distance_to(&p2);
        let points = interpolate_edge(p1, p2, interval);

        let expected = ((d / interval).floor() - 1.0).max(0.0) as usize;
        prop_assert_eq!(points.len(), expected);

        let mut last = 0.0;
        for p in &points {
            let from_start = p1.distance_to(p);
            prop_assert!(from_start > last);
            prop_assert!(from_start < d);
            prop_assert!(p.distance_to(&p2) > 0.0);
            last = from_start;
        }
    }

    #[test]
    fn unwrap_stays_within_half_turn(previous in -1e5f64..1e5, raw in -1e5f64..1e5) {
        let b = unwrap_angle(previous, raw);
        prop_assert!((previous - b).abs() <= 180.0 + 1e-6);
        // only whole turns are added
        let turns = (b - raw) / 360.0;
        prop_assert!((turns - turns.round()).abs() < 1e-6);
    }

    #[test]
    fn generated_b_is_continuous(
        a in star_polygon((0.0, 0.0)),
        b in star_polygon((30.0, 5.0)),
        tool_angle in 0.0f64..90.0,
    ) {
        let mut d = MachiningDescriptor::new("p.stl", 80.0);
        d.gcode_config.density = 1.0;
        d.gcode_config.tool_angle = tool_angle;
        let gen = CncMeshToolPathGenerator::new(d).unwrap();

        let (result, report) = gen.generate(&sliced(vec![a, b])).unwrap();

        let bs: Vec<f64> = result.data.iter().filter_map(|c| c.b()).collect();
        for w in bs.windows(2) {
            prop_assert!((w[1] - w[0]).abs() <= 180.0 + 1e-9);
        }

        for layer in &report.layers {
            prop_assert_eq!(layer.feasible_points + layer.infeasible_points(), layer.point_count);
            prop_assert!(layer.segment_lengths.iter().sum::<usize>() <= layer.feasible_points);
        }
    }

    #[test]
    fn planned_segments_are_continuous(a in star_polygon((0.0, 0.0)), tool_angle in 0.0f64..60.0) {
        let mut d = MachiningDescriptor::new("p.stl", 40.0);
        d.gcode_config.density = 2.0;
        d.gcode_config.tool_angle = tool_angle;
        let gen = CncMeshToolPathGenerator::new(d).unwrap();

        let model = sliced(vec![a]);
        let (segments, _) = gen.plan_layer(&model.layers[0]);
        for segment in &segments {
            prop_assert!(!segment.is_empty());
            prop_assert!(segment.is_continuous());
            for p in segment.points() {
                prop_assert!(p.interval.width() >= tool_angle);
                prop_assert!(p.interval.contains(p.normal));
            }
        }
    }
}
