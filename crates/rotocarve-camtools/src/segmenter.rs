//! # Path Segmentation
//!
//! Groups the feasible points of one polygon into segments the tool can
//! follow without re-clamping its orientation: within a segment, the arc
//! chosen for each point overlaps the arc chosen for the point before it.
//!
//! Segmentation is an explicit state machine driven by [`transition`]:
//!
//! - `Idle`: nothing pending.
//! - `Anchored`: one point is held until a successor shows which of its
//!   arcs to use.
//! - `Open`: a segment of two or more points is being extended.
//!
//! An anchor with no compatible successor is flushed as a one-point segment
//! using its first arc. An anchor still pending when the polygon ends is
//! dropped.

use rotocarve_core::{AngleInterval, AngleIntervalSet, Point2};
use serde::{Deserialize, Serialize};

/// A contact point with the arc chosen for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    /// Commanded tool orientation in degrees (bisector of `interval`)
    pub normal: f64,
    pub interval: AngleInterval,
}

impl PathPoint {
    pub fn new(point: Point2, interval: AngleInterval) -> Self {
        Self {
            x: point.x,
            y: point.y,
            normal: interval.normal(),
            interval,
        }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A non-empty run of path points machined in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentPoints")]
pub struct PathSegment {
    points: Vec<PathPoint>,
}

#[derive(Deserialize)]
struct SegmentPoints {
    points: Vec<PathPoint>,
}

impl TryFrom<SegmentPoints> for PathSegment {
    type Error = String;

    fn try_from(raw: SegmentPoints) -> Result<Self, Self::Error> {
        if raw.points.is_empty() {
            return Err("path segment needs at least one point".to_string());
        }
        Ok(Self { points: raw.points })
    }
}

impl PathSegment {
    pub fn new(first: PathPoint) -> Self {
        Self {
            points: vec![first],
        }
    }

    pub fn push(&mut self, point: PathPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: segments start with one point and empty lists are
    /// rejected on deserialization.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn first(&self) -> &PathPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PathPoint {
        &self.points[self.points.len() - 1]
    }

    /// True when every consecutive pair of chosen arcs overlaps.
    pub fn is_continuous(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].interval.overlaps(&w[1].interval))
    }
}

/// Segmenter state between two points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SegmenterState {
    #[default]
    Idle,
    Anchored {
        point: Point2,
        arcs: AngleIntervalSet,
    },
    Open {
        segment: PathSegment,
    },
}

/// Feed one feasible point into the state machine. Returns the next state and
/// any segment closed by this step.
pub fn transition(
    state: SegmenterState,
    point: Point2,
    arcs: AngleIntervalSet,
) -> (SegmenterState, Option<PathSegment>) {
    match state {
        SegmenterState::Idle => (SegmenterState::Anchored { point, arcs }, None),

        SegmenterState::Anchored {
            point: anchor,
            arcs: anchor_arcs,
        } => {
            let matched = anchor_arcs.iter().find_map(|anchor_arc| {
                arcs.first_overlapping(anchor_arc)
                    .and_then(|k| arcs.get(k))
                    .map(|arc| (*anchor_arc, *arc))
            });

            match matched {
                Some((anchor_arc, arc)) => {
                    let mut segment = PathSegment::new(PathPoint::new(anchor, anchor_arc));
                    segment.push(PathPoint::new(point, arc));
                    (SegmenterState::Open { segment }, None)
                }
                None => {
                    let flushed = anchor_arcs
                        .get(0)
                        .map(|arc| PathSegment::new(PathPoint::new(anchor, *arc)));
                    (SegmenterState::Anchored { point, arcs }, flushed)
                }
            }
        }

        SegmenterState::Open { mut segment } => {
            let chosen = segment.last().interval;
            match arcs.first_overlapping(&chosen).and_then(|k| arcs.get(k)) {
                Some(arc) => {
                    segment.push(PathPoint::new(point, *arc));
                    (SegmenterState::Open { segment }, None)
                }
                None => (SegmenterState::Anchored { point, arcs }, Some(segment)),
            }
        }
    }
}

/// Collects the segments of one polygon.
#[derive(Debug, Default)]
pub struct PathSegmenter {
    state: SegmenterState,
    segments: Vec<PathSegment>,
}

impl PathSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SegmenterState {
        &self.state
    }

    /// Offer the next feasible point. Points with no arcs are ignored.
    pub fn push(&mut self, point: Point2, arcs: AngleIntervalSet) {
        if arcs.is_empty() {
            return;
        }
        let state = std::mem::take(&mut self.state);
        let (next, closed) = transition(state, point, arcs);
        self.state = next;
        self.segments.extend(closed);
    }

    /// End of polygon: close the open segment, drop a lone anchor.
    pub fn finish(mut self) -> Vec<PathSegment> {
        if let SegmenterState::Open { segment } = self.state {
            self.segments.push(segment);
        }
        self.segments
    }
}

/// Segment a polygon's feasible points in path order.
pub fn segment_points<I>(points: I) -> Vec<PathSegment>
where
    I: IntoIterator<Item = (Point2, AngleIntervalSet)>,
{
    let mut segmenter = PathSegmenter::new();
    for (point, arcs) in points {
        segmenter.push(point, arcs);
    }
    segmenter.finish()
}
