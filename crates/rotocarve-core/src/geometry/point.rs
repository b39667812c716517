//! Planar point and vector arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Tolerance used by every approximate comparison in the workspace.
pub const EPSILON: f64 = 1e-5;

/// Returns true when `a` and `b` differ by less than [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Rounds `value` to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // avoid emitting "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A point (or free vector) in layer-local planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiplies both components by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divides both components by `divisor`.
    ///
    /// Dividing by zero yields non-finite components; callers guard against
    /// zero-length vectors before normalizing.
    pub fn div_scale(&self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (*other - *self).length()
    }

    /// Bearing of the vector in degrees, normalized to `[0, 360)`.
    ///
    /// Returns NaN when either component is NaN.
    pub fn angle(&self) -> f64 {
        let deg = self.y.atan2(self.x).to_degrees();
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can return exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// Rotates the point counter-clockwise about the origin by `angle_deg`.
    pub fn rotate(&self, angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Component-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: &Point2) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
