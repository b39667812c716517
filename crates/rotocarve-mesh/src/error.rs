//! Error types for mesh import and slicing.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or slicing a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// I/O error while reading a mesh file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The STL data could not be parsed.
    #[error("STL parse error: {0}")]
    StlParse(String),

    /// The file extension is not a supported mesh format.
    #[error("Unsupported 3D file format: {0}")]
    UnsupportedFormat(String),

    /// The mesh contains no triangles.
    #[error("Mesh contains no triangles")]
    EmptyMesh,

    /// Slicing parameters were rejected.
    #[error("Invalid slicing parameters: {0}")]
    InvalidSlicing(String),
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
