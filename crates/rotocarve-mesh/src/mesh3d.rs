//! # 3D Model Module
//!
//! Triangle meshes for rotary carving. Meshes are imported from STL and
//! positioned so the rotary axis runs along Z through the XY origin.

use crate::error::{MeshError, MeshResult};
use nalgebra::{Matrix4, Point3, Vector3};
use rotocarve_core::{BoundingBox, Coord3};
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

/// A 3D triangle made up of three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Triangle3D {
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        let normal = face_normal(&v1, &v2, &v3);
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }

    /// Lowest and highest Z of the triangle
    pub fn z_range(&self) -> (f64, f64) {
        let [a, b, c] = &self.vertices;
        (a.z.min(b.z).min(c.z), a.z.max(b.z).max(c.z))
    }

    /// Check if triangle straddles a horizontal plane at given Z height
    pub fn intersects_plane_z(&self, z: f64) -> bool {
        let (z_min, z_max) = self.z_range();
        z >= z_min && z <= z_max
    }

    /// Segment where the triangle crosses the plane at `z`, if any.
    ///
    /// Vertices lying exactly on the plane count as above it, so a triangle
    /// yields either no segment or exactly one. Each crossing edge is
    /// evaluated from its lower to its upper vertex, so neighbouring
    /// triangles sharing that edge produce bit-identical endpoints.
    pub fn intersect_plane_z(&self, z: f64) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut hits = [Point3::origin(); 2];
        let mut count = 0;

        for i in 0..3 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 3];
            let a_above = a.z >= z;
            let b_above = b.z >= z;
            if a_above == b_above {
                continue;
            }
            let (lo, hi) = if a_above { (b, a) } else { (a, b) };
            if count < 2 {
                hits[count] = intersect_edge_with_plane_z(lo, hi, z);
            }
            count += 1;
        }

        (count == 2).then_some((hits[0], hits[1]))
    }
}

fn face_normal(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    edge1
        .cross(&edge2)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Intersect an edge running from below to above the plane at `z`.
fn intersect_edge_with_plane_z(lo: Point3<f64>, hi: Point3<f64>, z: f64) -> Point3<f64> {
    let t = (z - lo.z) / (hi.z - lo.z);
    Point3::new(lo.x + t * (hi.x - lo.x), lo.y + t * (hi.y - lo.y), z)
}

/// A 3D mesh model
#[derive(Debug, Clone)]
pub struct Mesh3D {
    pub triangles: Vec<Triangle3D>,
    pub bounds_min: Point3<f64>,
    pub bounds_max: Point3<f64>,
}

impl Mesh3D {
    pub fn new(triangles: Vec<Triangle3D>) -> Self {
        let mut mesh = Self {
            triangles,
            bounds_min: Point3::origin(),
            bounds_max: Point3::origin(),
        };
        mesh.calculate_bounds();
        mesh
    }

    pub fn from_stl_mesh(stl_mesh: &stl_io::IndexedMesh) -> Self {
        let vertex = |idx: usize| {
            stl_mesh
                .vertices
                .get(idx)
                .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        };

        let triangles = stl_mesh
            .faces
            .iter()
            .filter_map(|face| {
                let v1 = vertex(face.vertices[0])?;
                let v2 = vertex(face.vertices[1])?;
                let v3 = vertex(face.vertices[2])?;
                Some(Triangle3D::new(v1, v2, v3))
            })
            .collect();

        Self::new(triangles)
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn calculate_bounds(&mut self) {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let Some(first) = vertices.next() else {
            return;
        };

        let mut min = *first;
        let mut max = *first;
        for v in vertices {
            min = min.inf(v);
            max = max.sup(v);
        }

        self.bounds_min = min;
        self.bounds_max = max;
    }

    /// Mesh bounds as a serializable box.
    pub fn bounding_box(&self) -> BoundingBox {
        let c = |p: &Point3<f64>| Coord3::new(p.x, p.y, p.z);
        BoundingBox::new(c(&self.bounds_min), c(&self.bounds_max))
    }

    /// Transform the mesh using a 4x4 transformation matrix
    pub fn transform(&mut self, transform: &Matrix4<f64>) {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                *vertex = transform.transform_point(vertex);
            }
            let [v1, v2, v3] = &triangle.vertices;
            triangle.normal = face_normal(v1, v2, v3);
        }

        self.calculate_bounds();
    }

    /// Scale the mesh uniformly
    pub fn scale(&mut self, factor: f64) {
        self.transform(&Matrix4::new_scaling(factor));
    }

    /// Translate the mesh
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.transform(&Matrix4::new_translation(&offset));
    }

    /// Move the XY centre of the bounds onto the rotary axis, keeping Z.
    pub fn center_on_axis(&mut self) {
        let cx = (self.bounds_min.x + self.bounds_max.x) * 0.5;
        let cy = (self.bounds_min.y + self.bounds_max.y) * 0.5;
        self.translate(Vector3::new(-cx, -cy, 0.0));
    }

    /// Get all triangles that intersect with a horizontal plane at Z height
    pub fn get_intersecting_triangles(&self, z: f64) -> Vec<&Triangle3D> {
        self.triangles
            .iter()
            .filter(|tri| tri.intersects_plane_z(z))
            .collect()
    }

    /// Largest distance of any vertex from the rotary axis.
    pub fn max_radius(&self) -> f64 {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.x.hypot(v.y))
            .fold(0.0, f64::max)
    }
}

/// Supported 3D file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model3DFormat {
    /// STL (STereoLithography) format
    Stl,
}

/// 3D model importer for converting 3D files to mesh representations
#[derive(Debug, Clone)]
pub struct Model3DImporter {
    pub scale: f64,
    pub center_on_axis: bool,
}

impl Model3DImporter {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            center_on_axis: true,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_centering(mut self, center: bool) -> Self {
        self.center_on_axis = center;
        self
    }

    /// Import 3D model from file path
    pub fn import_file(&self, path: &Path) -> MeshResult<Mesh3D> {
        match detect_format(path)? {
            Model3DFormat::Stl => {
                debug!("Importing STL file: {}", path.display());
                let mut file = std::fs::File::open(path)?;
                self.import_stl(&mut file)
            }
        }
    }

    /// Import STL from in-memory bytes (ASCII or binary)
    pub fn import_stl_data(&self, data: &[u8]) -> MeshResult<Mesh3D> {
        debug!("Importing STL from binary data ({} bytes)", data.len());
        let mut cursor = std::io::Cursor::new(data);
        self.import_stl(&mut cursor)
    }

    fn import_stl<R: Read + Seek>(&self, reader: &mut R) -> MeshResult<Mesh3D> {
        let stl = stl_io::read_stl(reader).map_err(|e| MeshError::StlParse(e.to_string()))?;
        debug!("STL contains {} faces", stl.faces.len());

        let mut mesh = Mesh3D::from_stl_mesh(&stl);
        if mesh.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        if self.scale != 1.0 {
            debug!("Scaling mesh by factor {}", self.scale);
            mesh.scale(self.scale);
        }

        if self.center_on_axis {
            debug!("Centering mesh on rotary axis");
            mesh.center_on_axis();
        }

        debug!(
            "Final mesh bounds: {:?} to {:?}",
            mesh.bounds_min, mesh.bounds_max
        );

        Ok(mesh)
    }
}

impl Default for Model3DImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect file format from file extension
fn detect_format(path: &Path) -> MeshResult<Model3DFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| MeshError::UnsupportedFormat(path.display().to_string()))?;

    match extension.as_str() {
        "stl" => Ok(Model3DFormat::Stl),
        _ => Err(MeshError::UnsupportedFormat(format!(".{}", extension))),
    }
}
