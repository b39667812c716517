//! Property tests for angle interval algebra and planar rotation.

use proptest::prelude::*;
use rotocarve_core::{AngleInterval, AngleIntervalSet, Point2};

fn arc() -> impl Strategy<Value = AngleInterval> {
    (0.0f64..360.0, 0.0f64..360.0).prop_map(|(s, e)| AngleInterval::new(s, e))
}

proptest! {
    #[test]
    fn complement_is_involutive(arcs in prop::collection::vec(arc(), 0..12)) {
        let set = AngleIntervalSet::from_intervals(arcs);
        let back = set.complement().complement();
        prop_assert_eq!(back, set);
    }

    #[test]
    fn set_and_complement_cover_circle(arcs in prop::collection::vec(arc(), 0..12)) {
        let set = AngleIntervalSet::from_intervals(arcs);
        let total = set.total_width() + set.complement().total_width();
        prop_assert!((total - 360.0).abs() < 1e-9);
    }

    #[test]
    fn spanning_never_exceeds_half_turn(a in 0.0f64..360.0, b in 0.0f64..360.0) {
        let arc = AngleInterval::spanning(a, b);
        prop_assert!(arc.width() <= 180.0 + 1e-9);
    }

    #[test]
    fn set_arcs_are_disjoint(arcs in prop::collection::vec(arc(), 1..12)) {
        let set = AngleIntervalSet::from_intervals(arcs);
        for (i, a) in set.iter().enumerate() {
            for b in set.iter().skip(i + 1) {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn rotation_round_trip(x in -500.0f64..500.0, y in -500.0f64..500.0, b in -720.0f64..720.0) {
        let p = Point2::new(x, y);
        let back = p.rotate(b).rotate(-b);
        prop_assert!((back.x - x).abs() < 1e-6);
        prop_assert!((back.y - y).abs() < 1e-6);
    }
}

#[test]
fn test_normal_lies_inside_arc() {
    for (s, e) in [(10.0, 50.0), (300.0, 20.0), (90.0, 0.0)] {
        let arc = AngleInterval::new(s, e);
        assert!(arc.contains(arc.normal()));
    }
}
