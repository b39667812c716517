//! Planar geometry primitives consumed by the carving pipeline.

mod bounds;
mod point;
mod polygon;

pub use bounds::{BoundingBox, Coord3};
pub use point::{approx_eq, round_to, Point2, EPSILON};
pub use polygon::{Polygon, Polygons};
