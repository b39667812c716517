//! Angular interval algebra over the circle `[0°, 360°)`.
//!
//! An [`AngleInterval`] is a half-open arc swept counter-clockwise from
//! `start` to `end`; it may wrap through 0°. An [`AngleIntervalSet`] keeps its
//! arcs sorted by start angle and pairwise disjoint: touching arcs are merged
//! on insertion, and at most the last arc wraps through 0°.
//!
//! Set operations work on the linear pieces of each arc (`[s, e)` with
//! `0 <= s < e <= 360`) and rebuild the circular form afterwards, so arc
//! endpoints are copied rather than recomputed and round trips are exact.

use serde::{Deserialize, Serialize};

/// Degrees in a full turn.
pub const FULL_CIRCLE: f64 = 360.0;

/// Maps any finite angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_CIRCLE);
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// A contiguous, half-open arc of orientations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleInterval {
    start: f64,
    end: f64,
    full: bool,
}

impl AngleInterval {
    /// The arc swept counter-clockwise from `start` to `end`.
    ///
    /// Equal endpoints produce the empty arc; use [`AngleInterval::full`] for
    /// the whole circle.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: normalize_degrees(start),
            end: normalize_degrees(end),
            full: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            full: false,
        }
    }

    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            full: true,
        }
    }

    /// The shorter of the two arcs joining bearings `a` and `b`.
    ///
    /// When the raw difference exceeds 180° the arc runs from the larger
    /// bearing through 0° to the smaller one, so the result never spans more
    /// than a half turn.
    pub fn spanning(a: f64, b: f64) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if (a - b).abs() <= 180.0 {
            Self::new(lo, hi)
        } else {
            Self::new(hi, lo)
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Angular extent in degrees, `0..=360`.
    pub fn width(&self) -> f64 {
        if self.full {
            FULL_CIRCLE
        } else {
            (self.end - self.start).rem_euclid(FULL_CIRCLE)
        }
    }

    /// True for zero-width arcs and arcs built from NaN bounds.
    pub fn is_empty(&self) -> bool {
        let width = self.width();
        !self.full && (width.is_nan() || width <= 0.0)
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// True when the arc wraps through 0°.
    pub fn wraps(&self) -> bool {
        !self.full && self.end < self.start && self.end > 0.0
    }

    pub fn contains(&self, angle: f64) -> bool {
        if self.full {
            return true;
        }
        let width = self.width();
        width > 0.0 && (angle - self.start).rem_euclid(FULL_CIRCLE) < width
    }

    /// True when the two arcs share a region of positive width.
    pub fn overlaps(&self, other: &AngleInterval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.contains(other.start) || other.contains(self.start)
    }

    /// The bisector of the arc, used as the commanded tool orientation.
    pub fn normal(&self) -> f64 {
        normalize_degrees(self.start + self.width() / 2.0)
    }

    /// The rest of the circle.
    pub fn complement(&self) -> AngleInterval {
        if self.full {
            Self::empty()
        } else if self.is_empty() {
            Self::full()
        } else {
            Self::new(self.end, self.start)
        }
    }

    /// Merges two arcs that overlap or touch; `None` when they are apart.
    pub fn union(&self, other: &AngleInterval) -> Option<AngleInterval> {
        if self.is_empty() {
            return Some(*other);
        }
        if other.is_empty() {
            return Some(*self);
        }
        let merged = AngleIntervalSet::from_intervals([*self, *other]);
        match merged.intervals.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Linear pieces of the arc inside `[0, 360]`.
    fn pieces(&self) -> impl Iterator<Item = (f64, f64)> {
        let (first, second) = if self.full {
            (Some((0.0, FULL_CIRCLE)), None)
        } else if self.is_empty() {
            (None, None)
        } else if self.end > self.start {
            (Some((self.start, self.end)), None)
        } else {
            (Some((self.start, FULL_CIRCLE)), Some((0.0, self.end)))
        };
        first.into_iter().chain(second)
    }
}

impl Default for AngleInterval {
    fn default() -> Self {
        Self::empty()
    }
}

/// Ordered, disjoint arcs admissible (or obstructed) at one point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleIntervalSet {
    intervals: Vec<AngleInterval>,
}

impl AngleIntervalSet {
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    pub fn full() -> Self {
        Self {
            intervals: vec![AngleInterval::full()],
        }
    }

    /// Builds a canonical set from arbitrary, possibly overlapping arcs.
    pub fn from_intervals<I: IntoIterator<Item = AngleInterval>>(intervals: I) -> Self {
        Self::from_pieces(intervals.into_iter().flat_map(|i| i.pieces()).collect())
    }

    /// Merge-inserts one arc.
    pub fn insert(&mut self, interval: AngleInterval) {
        if interval.is_empty() {
            return;
        }
        let pieces = self
            .intervals
            .iter()
            .chain(std::iter::once(&interval))
            .flat_map(|i| i.pieces())
            .collect();
        *self = Self::from_pieces(pieces);
    }

    /// Everything on the circle not covered by this set.
    pub fn complement(&self) -> AngleIntervalSet {
        let mut pieces: Vec<(f64, f64)> = self.intervals.iter().flat_map(|i| i.pieces()).collect();
        pieces.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut gaps = Vec::with_capacity(pieces.len() + 1);
        let mut cursor = 0.0_f64;
        for (s, e) in pieces {
            if s > cursor {
                gaps.push((cursor, s));
            }
            cursor = cursor.max(e);
        }
        if cursor < FULL_CIRCLE {
            gaps.push((cursor, FULL_CIRCLE));
        }
        Self::from_pieces(gaps)
    }

    /// Drops every arc narrower than `min_degrees`.
    pub fn remove_narrower_than(&mut self, min_degrees: f64) {
        self.intervals.retain(|i| i.width() >= min_degrees);
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AngleInterval> {
        self.intervals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AngleInterval> {
        self.intervals.iter()
    }

    pub fn contains(&self, angle: f64) -> bool {
        self.intervals.iter().any(|i| i.contains(angle))
    }

    /// Sum of arc widths.
    pub fn total_width(&self) -> f64 {
        self.intervals.iter().map(AngleInterval::width).sum()
    }

    /// Index of the first arc (in set order) overlapping `interval`.
    pub fn first_overlapping(&self, interval: &AngleInterval) -> Option<usize> {
        self.intervals.iter().position(|i| i.overlaps(interval))
    }

    fn from_pieces(mut pieces: Vec<(f64, f64)>) -> Self {
        // also discards NaN pieces, whose comparisons are false
        pieces.retain(|(s, e)| e > s);
        if pieces.is_empty() {
            return Self::new();
        }
        pieces.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f64, f64)> = Vec::with_capacity(pieces.len());
        for (s, e) in pieces {
            match merged.last_mut() {
                Some(last) if s <= last.1 => last.1 = last.1.max(e),
                _ => merged.push((s, e)),
            }
        }

        let first = merged[0];
        let last = merged[merged.len() - 1];
        if merged.len() == 1 && first.0 <= 0.0 && first.1 >= FULL_CIRCLE {
            return Self::full();
        }

        let mut intervals: Vec<AngleInterval> = Vec::with_capacity(merged.len());
        if merged.len() > 1 && first.0 <= 0.0 && last.1 >= FULL_CIRCLE {
            // the arcs touching 0° and 360° are one arc wrapping through 0°
            intervals.extend(
                merged[1..merged.len() - 1]
                    .iter()
                    .map(|&(s, e)| AngleInterval::new(s, e)),
            );
            intervals.push(AngleInterval::new(last.0, first.1));
        } else {
            intervals.extend(merged.iter().map(|&(s, e)| AngleInterval::new(s, e)));
        }
        Self { intervals }
    }
}

impl FromIterator<AngleInterval> for AngleIntervalSet {
    fn from_iter<I: IntoIterator<Item = AngleInterval>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl<'a> IntoIterator for &'a AngleIntervalSet {
    type Item = &'a AngleInterval;
    type IntoIter = std::slice::Iter<'a, AngleInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
