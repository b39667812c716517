//! # Slicer Module
//!
//! Cuts a [`Mesh3D`] with horizontal planes and stitches the resulting
//! triangle/plane segments into closed contours, one [`SlicerLayer`] per
//! plane. The rotary carving pipeline only sees the [`SliceProvider`] trait.

use crate::error::{MeshError, MeshResult};
use crate::mesh3d::{Mesh3D, Model3DImporter};
use rotocarve_core::{BoundingBox, Point2, Polygon, Polygons, EPSILON};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Endpoint matching tolerance used when stitching contour segments.
pub const STITCH_TOLERANCE: f64 = 1e-6;

/// Parameters for multi-layer slicing
#[derive(Debug, Clone, PartialEq)]
pub struct SlicingParams {
    /// Distance between consecutive cutting planes
    pub layer_height: f64,
}

impl SlicingParams {
    pub fn new(layer_height: f64) -> Self {
        Self { layer_height }
    }

    fn validate(&self) -> MeshResult<()> {
        if !self.layer_height.is_finite() || self.layer_height <= 0.0 {
            return Err(MeshError::InvalidSlicing(format!(
                "layer height must be positive, got {}",
                self.layer_height
            )));
        }
        Ok(())
    }
}

impl Default for SlicingParams {
    fn default() -> Self {
        Self { layer_height: 0.2 }
    }
}

/// One horizontal cross-section of the mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlicerLayer {
    pub index: usize,
    pub z: f64,
    /// Every stitched contour, open chains included.
    pub polygons: Polygons,
    /// Closed contours with non-trivial area, used for cut planning.
    pub polygons_part: Polygons,
}

/// All layers of a sliced mesh plus the mesh bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedModel {
    pub layers: Vec<SlicerLayer>,
    pub bounds: BoundingBox,
}

/// Source of sliced layers for tool path generation.
pub trait SliceProvider {
    fn slice(&self) -> MeshResult<SlicedModel>;
}

/// Already-sliced layers can be fed back in directly.
impl SliceProvider for SlicedModel {
    fn slice(&self) -> MeshResult<SlicedModel> {
        Ok(self.clone())
    }
}

/// Slices a triangle mesh at uniform Z spacing.
#[derive(Debug, Clone)]
pub struct MeshSlicer {
    mesh: Mesh3D,
    params: SlicingParams,
}

impl MeshSlicer {
    pub fn new(mesh: Mesh3D, params: SlicingParams) -> MeshResult<Self> {
        params.validate()?;
        if mesh.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        Ok(Self { mesh, params })
    }

    /// Import an STL file, center it on the rotary axis and prepare slicing.
    pub fn from_file(path: &Path, params: SlicingParams) -> MeshResult<Self> {
        let mesh = Model3DImporter::new().import_file(path)?;
        Self::new(mesh, params)
    }

    pub fn mesh(&self) -> &Mesh3D {
        &self.mesh
    }

    pub fn params(&self) -> &SlicingParams {
        &self.params
    }

    /// Heights of the cutting planes, centred within each layer band.
    pub fn plane_heights(&self) -> Vec<f64> {
        let z_min = self.mesh.bounds_min.z;
        let z_max = self.mesh.bounds_max.z;
        let h = self.params.layer_height;
        let count = ((z_max - z_min) / h).ceil().max(0.0) as usize;
        (0..count)
            .map(|k| z_min + h * 0.5 + k as f64 * h)
            .filter(|z| *z < z_max)
            .collect()
    }

    /// Cut the mesh at a single height.
    pub fn slice_at_z(&self, index: usize, z: f64) -> SlicerLayer {
        let segments: Vec<(Point2, Point2)> = self
            .mesh
            .get_intersecting_triangles(z)
            .into_iter()
            .filter_map(|tri| tri.intersect_plane_z(z))
            .map(|(a, b)| (Point2::new(a.x, a.y), Point2::new(b.x, b.y)))
            .collect();

        let contours = build_contours(&segments);
        let mut layer = SlicerLayer {
            index,
            z,
            ..Default::default()
        };

        for contour in contours {
            if contour.closed {
                match Polygon::try_from_points(&contour.points) {
                    Ok(part) if part.signed_area().abs() > EPSILON => {
                        layer.polygons_part.add(part)
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Layer {}: contour rejected: {}", index, e),
                }
            }
            layer.polygons.add(Polygon::from_points(&contour.points));
        }

        let open = layer.polygons.len() - layer.polygons_part.len();
        if open > 0 {
            warn!(
                "Layer {} at Z={:.4}: {} contour(s) left open or degenerate",
                index, z, open
            );
        }
        debug!(
            "Layer {} at Z={:.4}: {} segments, {} closed contours",
            index,
            z,
            segments.len(),
            layer.polygons_part.len()
        );

        layer
    }
}

impl SliceProvider for MeshSlicer {
    fn slice(&self) -> MeshResult<SlicedModel> {
        let heights = self.plane_heights();
        info!(
            "Slicing mesh from Z={:.4} to Z={:.4} with layer height {} ({} layers)",
            self.mesh.bounds_min.z,
            self.mesh.bounds_max.z,
            self.params.layer_height,
            heights.len()
        );

        let layers: Vec<SlicerLayer> = heights
            .into_iter()
            .enumerate()
            .map(|(index, z)| self.slice_at_z(index, z))
            .collect();

        info!("Generated {} layers", layers.len());
        Ok(SlicedModel {
            layers,
            bounds: self.mesh.bounding_box(),
        })
    }
}

/// A chain of stitched points.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point2>,
    pub closed: bool,
}

type PointKey = (i64, i64);

fn point_key(p: &Point2) -> PointKey {
    (
        (p.x / STITCH_TOLERANCE).round() as i64,
        (p.y / STITCH_TOLERANCE).round() as i64,
    )
}

/// Stitch unordered segments into contours by matching shared endpoints.
pub fn build_contours(segments: &[(Point2, Point2)]) -> Vec<Contour> {
    let segments: Vec<&(Point2, Point2)> = segments
        .iter()
        .filter(|(a, b)| point_key(a) != point_key(b))
        .collect();

    let mut by_endpoint: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, (a, b)) in segments.iter().enumerate() {
        by_endpoint.entry(point_key(a)).or_default().push(i);
        by_endpoint.entry(point_key(b)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = *segments[start];
        let start_key = point_key(&a);

        let mut points = vec![a, b];
        let mut closed = false;
        let mut current = b;
        while let Some(next) = next_point(&segments, &by_endpoint, &mut used, &current) {
            if point_key(&next) == start_key {
                closed = true;
                break;
            }
            points.push(next);
            current = next;
        }

        if !closed {
            // walk backwards from the start to pick up the rest of an open chain
            let mut head = Vec::new();
            let mut current = a;
            while let Some(prev) = next_point(&segments, &by_endpoint, &mut used, &current) {
                head.push(prev);
                current = prev;
            }
            if !head.is_empty() {
                head.reverse();
                head.extend(points);
                points = head;
            }
        }

        contours.push(Contour { points, closed });
    }

    contours
}

fn next_point(
    segments: &[&(Point2, Point2)],
    by_endpoint: &HashMap<PointKey, Vec<usize>>,
    used: &mut [bool],
    at: &Point2,
) -> Option<Point2> {
    let key = point_key(at);
    let candidates = by_endpoint.get(&key)?;
    let &j = candidates.iter().find(|&&j| !used[j])?;
    used[j] = true;
    let (a, b) = *segments[j];
    Some(if point_key(&a) == key { b } else { a })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (f64, f64), b: (f64, f64)) -> (Point2, Point2) {
        (Point2::from(a), Point2::from(b))
    }

    #[test]
    fn test_build_contours_closes_shuffled_square() {
        let segments = vec![
            seg((1.0, 1.0), (0.0, 1.0)),
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((0.0, 1.0), (0.0, 0.0)),
            seg((1.0, 0.0), (1.0, 1.0)),
        ];
        let contours = build_contours(&segments);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(contours[0].points.len(), 4);
    }

    #[test]
    fn test_build_contours_handles_reversed_segments() {
        let segments = vec![
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((1.0, 1.0), (1.0, 0.0)),
            seg((1.0, 1.0), (0.0, 0.0)),
        ];
        let contours = build_contours(&segments);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(contours[0].points.len(), 3);
    }

    #[test]
    fn test_build_contours_open_chain() {
        let segments = vec![seg((1.0, 0.0), (2.0, 0.0)), seg((0.0, 0.0), (1.0, 0.0))];
        let contours = build_contours(&segments);
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].closed);
        assert_eq!(
            contours[0].points,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_build_contours_skips_zero_length() {
        let segments = vec![seg((0.5, 0.5), (0.5, 0.5))];
        assert!(build_contours(&segments).is_empty());
    }

    #[test]
    fn test_invalid_layer_height() {
        assert!(SlicingParams::new(0.0).validate().is_err());
        assert!(SlicingParams::new(f64::NAN).validate().is_err());
        assert!(SlicingParams::new(0.5).validate().is_ok());
    }

    #[test]
    fn test_sliced_model_is_its_own_provider() {
        let model = SlicedModel {
            layers: vec![SlicerLayer::default()],
            bounds: BoundingBox::default(),
        };
        assert_eq!(model.slice().unwrap(), model);
    }
}
