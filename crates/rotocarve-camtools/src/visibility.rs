//! # Visibility Angle Analysis
//!
//! For a boundary point `p` on a layer, every other edge of the layer hides
//! the arc of bearings it subtends as seen from `p`. The union of those arcs
//! is the obstruction set; its complement is where the tool may come from.
//! Arcs narrower than the tool's angular footprint are then discarded.
//!
//! On the point's own polygon the two edges meeting at `p` are skipped, since
//! they touch `p` and would otherwise block every direction.

use rotocarve_core::{approx_eq, AngleInterval, AngleIntervalSet, Point2, Polygon, Polygons};
use serde::{Deserialize, Serialize};

/// Outcome of analysing one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    /// At least one admissible arc is wide enough for the tool.
    Feasible,
    /// Surrounding material blocks every bearing.
    Enclosed,
    /// Some bearings are clear, but none of the clear arcs is wide enough.
    TooNarrow,
}

/// Admissible approach arcs at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointVisibility {
    pub point: Point2,
    pub admissible: AngleIntervalSet,
    pub status: PointStatus,
}

impl PointVisibility {
    pub fn is_feasible(&self) -> bool {
        self.status == PointStatus::Feasible
    }
}

/// Edges skipped while building obstruction sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstructionStats {
    /// Edges whose bearing from the point was NaN or infinite
    pub non_finite_bearings: usize,
    /// Edges touching the point or seen edge-on
    pub degenerate_edges: usize,
}

/// Computes admissible approach arcs for the points of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityAngleAnalyzer {
    tool_angle: f64,
}

impl VisibilityAngleAnalyzer {
    /// `tool_angle` is the narrowest arc, in degrees, the tool fits into.
    pub fn new(tool_angle: f64) -> Self {
        Self { tool_angle }
    }

    pub fn tool_angle(&self) -> f64 {
        self.tool_angle
    }

    /// Arcs hidden from point `point_index` of polygon `polygon_index` by the
    /// rest of the layer.
    pub fn obstruction(
        &self,
        layer: &Polygons,
        polygon_index: usize,
        point_index: usize,
        stats: &mut ObstructionStats,
    ) -> AngleIntervalSet {
        let Some(p) = layer
            .get(polygon_index)
            .and_then(|polygon| polygon.get(point_index))
            .copied()
        else {
            return AngleIntervalSet::new();
        };

        let mut arcs = Vec::new();
        for (index, polygon) in layer.iter().enumerate() {
            let n = polygon.len();
            let edges = if index == polygon_index {
                // every edge except the two that meet at p
                (point_index + 1)..(point_index + n.saturating_sub(1))
            } else {
                0..n
            };
            for i in edges {
                let (p1, p2) = polygon.edge(i);
                if let Some(arc) = subtended_arc(p, p1, p2, stats) {
                    arcs.push(arc);
                }
            }
        }

        AngleIntervalSet::from_intervals(arcs)
    }

    /// Full analysis of one point: complement of the obstruction set with
    /// narrow arcs removed.
    pub fn analyze_point(
        &self,
        layer: &Polygons,
        polygon_index: usize,
        point_index: usize,
        stats: &mut ObstructionStats,
    ) -> PointVisibility {
        let point = layer
            .get(polygon_index)
            .and_then(|polygon| polygon.get(point_index))
            .copied()
            .unwrap_or_default();

        let mut admissible = self
            .obstruction(layer, polygon_index, point_index, stats)
            .complement();

        let status = if admissible.is_empty() {
            PointStatus::Enclosed
        } else {
            admissible.remove_narrower_than(self.tool_angle);
            if admissible.is_empty() {
                PointStatus::TooNarrow
            } else {
                PointStatus::Feasible
            }
        };

        PointVisibility {
            point,
            admissible,
            status,
        }
    }

    /// Analyse every point of one polygon, in path order.
    pub fn analyze_polygon(
        &self,
        layer: &Polygons,
        polygon_index: usize,
        stats: &mut ObstructionStats,
    ) -> Vec<PointVisibility> {
        let len = layer.get(polygon_index).map(Polygon::len).unwrap_or(0);
        (0..len)
            .map(|i| self.analyze_point(layer, polygon_index, i, stats))
            .collect()
    }
}

/// The arc of bearings edge `(p1, p2)` covers as seen from `p`, or `None`
/// when the edge contributes no obstruction.
fn subtended_arc(
    p: Point2,
    p1: Point2,
    p2: Point2,
    stats: &mut ObstructionStats,
) -> Option<AngleInterval> {
    let a1 = (p1 - p).angle();
    let a2 = (p2 - p).angle();

    if !a1.is_finite() || !a2.is_finite() {
        stats.non_finite_bearings += 1;
        return None;
    }
    if approx_eq(a1, a2) || p.approx_eq(&p1) || p.approx_eq(&p2) {
        stats.degenerate_edges += 1;
        return None;
    }

    Some(AngleInterval::spanning(a1, a2))
}
