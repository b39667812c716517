//! Uniform densification of polygon edges.
//!
//! Each edge of length `d` receives `floor(d / interval) - 1` evenly spaced
//! interior points, so the gap before the next original vertex is always at
//! least one interval.

use rotocarve_core::{Point2, Polygon, Polygons};
use rotocarve_settings::ResampleMode;

/// Interior points strictly between `p1` and `p2`, spaced `interval` apart
/// starting from `p1`. Zero-length edges yield nothing.
pub fn interpolate_edge(p1: Point2, p2: Point2, interval: f64) -> Vec<Point2> {
    let v = p2 - p1;
    let d = v.length();
    if !d.is_finite() || d <= 0.0 || !interval.is_finite() || interval <= 0.0 {
        return Vec::new();
    }

    let n = (d / interval).floor() - 1.0;
    if n < 1.0 {
        return Vec::new();
    }

    let dir = v.div_scale(d);
    (1..=n as usize)
        .map(|i| p1 + dir.scale(i as f64 * interval))
        .collect()
}

/// Resample one polygon, keeping vertex order.
pub fn resample_polygon(polygon: &Polygon, interval: f64, mode: ResampleMode) -> Polygon {
    let path = polygon.points();
    let edge_count = match mode {
        ResampleMode::ClosedLoop => path.len(),
        ResampleMode::LegacyOpenChain => path.len().saturating_sub(1),
    };

    let mut points = Vec::with_capacity(path.len());
    for i in 0..edge_count {
        let p1 = path[i];
        let p2 = path[(i + 1) % path.len()];
        points.push(p1);
        points.extend(interpolate_edge(p1, p2, interval));
    }

    Polygon::from_points(&points)
}

/// Resample every polygon of a layer, preserving polygon order.
pub fn resample_polygons(polygons: &Polygons, interval: f64, mode: ResampleMode) -> Polygons {
    polygons
        .iter()
        .map(|polygon| resample_polygon(polygon, interval, mode))
        .collect()
}
