//! # Rotocarve Mesh
//!
//! Triangle mesh loading and horizontal layer slicing.
//!
//! - [`Model3DImporter`] reads STL (ASCII or binary) via `stl_io` and centres
//!   the part on the rotary axis
//! - [`MeshSlicer`] cuts the mesh into [`SlicerLayer`]s and implements
//!   [`SliceProvider`], the interface the tool path generator consumes

pub mod error;
pub mod mesh3d;
pub mod slicer;

pub use error::{MeshError, MeshResult};
pub use mesh3d::{Mesh3D, Model3DFormat, Model3DImporter, Triangle3D};
pub use slicer::{
    build_contours, Contour, MeshSlicer, SliceProvider, SlicedModel, SlicerLayer, SlicingParams,
    STITCH_TOLERANCE,
};
