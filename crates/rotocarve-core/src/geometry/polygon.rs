//! Closed planar polygons and per-layer polygon sets.

use super::point::Point2;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// An ordered loop of points. The edge from the last point back to the
/// first is implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    path: Vec<Point2>,
}

impl Polygon {
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Builds a polygon from raw points, dropping consecutive duplicates and
    /// an explicit closing point equal to the first.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut polygon = Self::new();
        for &p in points {
            polygon.add(p);
        }
        if polygon.path.len() > 1 {
            let first = polygon.path[0];
            if polygon.path.last().is_some_and(|last| last.approx_eq(&first)) {
                polygon.path.pop();
            }
        }
        polygon
    }

    /// Like [`Polygon::from_points`], but rejects loops with fewer than three
    /// distinct points or any non-finite coordinate.
    pub fn try_from_points(points: &[Point2]) -> Result<Self, GeometryError> {
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            let value = if bad.x.is_finite() { bad.y } else { bad.x };
            return Err(GeometryError::NonFinite {
                name: "polygon vertex".to_string(),
                value,
            });
        }
        let polygon = Self::from_points(points);
        if polygon.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                min: 3,
                actual: polygon.len(),
            });
        }
        Ok(polygon)
    }

    /// Appends a point unless it repeats the previous one.
    pub fn add(&mut self, point: Point2) {
        if self.path.last().is_some_and(|last| last.approx_eq(&point)) {
            return;
        }
        self.path.push(point);
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point2> {
        self.path.get(index)
    }

    pub fn points(&self) -> &[Point2] {
        &self.path
    }

    /// The edge starting at `index`, wrapping around the loop.
    pub fn edge(&self, index: usize) -> (Point2, Point2) {
        let n = self.path.len();
        (self.path[index % n], self.path[(index + 1) % n])
    }

    /// All edges of the closed loop, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.path.len();
        (0..n).map(move |i| (self.path[i], self.path[(i + 1) % n]))
    }

    /// Total loop length including the closing edge.
    pub fn perimeter(&self) -> f64 {
        if self.path.len() < 2 {
            return 0.0;
        }
        self.edges().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// Signed area (positive for counter-clockwise loops).
    pub fn signed_area(&self) -> f64 {
        if self.path.len() < 3 {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            * 0.5
    }
}

/// The set of polygons belonging to one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygons {
    polygons: Vec<Polygon>,
}

impl Polygons {
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    pub fn add(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    /// Number of points across every polygon.
    pub fn point_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }
}

impl FromIterator<Polygon> for Polygons {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self {
            polygons: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Polygons {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}
