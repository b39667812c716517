//! # Rotocarve Core
//!
//! Core types shared by every Rotocarve crate:
//!
//! - **Geometry**: [`Point2`] vector primitives, closed [`Polygon`] loops,
//!   per-layer [`Polygons`], and [`BoundingBox`]
//! - **Angles**: [`AngleInterval`] arcs and [`AngleIntervalSet`] with merge,
//!   complement, and width filtering
//! - **Errors**: [`GeometryError`] for rejected construction input

pub mod angle;
pub mod error;
pub mod geometry;

pub use angle::{normalize_degrees, AngleInterval, AngleIntervalSet, FULL_CIRCLE};
pub use error::GeometryError;
pub use geometry::{
    approx_eq, round_to, BoundingBox, Coord3, Point2, Polygon, Polygons, EPSILON,
};
