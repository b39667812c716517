//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// A plain 3D coordinate used in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned box enclosing a workpiece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Coord3,
    pub max: Coord3,
}

impl BoundingBox {
    pub fn new(min: Coord3, max: Coord3) -> Self {
        Self { min, max }
    }
}
