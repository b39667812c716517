//! # Tool Path Emission
//!
//! Turns path segments into rotary motion. Each point's orientation becomes a
//! B angle `90 - normal`, unwrapped against the last commanded B so the axis
//! never turns more than half a revolution between two commands. The point
//! is then rotated by B into the machine frame, where its planar coordinates
//! become machine X and Z and the layer height becomes machine Y.

use crate::segmenter::PathSegment;
use rotocarve_core::{round_to, FULL_CIRCLE};
use rotocarve_toolpath::RotaryToolPath;

/// Decimal places kept on emitted X and Z.
pub const COORDINATE_PRECISION: u32 = 2;

const HALF_TURN: f64 = FULL_CIRCLE / 2.0;

/// Shift `raw` by whole turns until it lies within half a turn of `previous`.
///
/// Equivalent to repeatedly adding (or subtracting) 360 while the gap exceeds
/// 180, but computes the number of turns directly so the work is bounded for
/// any finite input. Non-finite inputs are returned unchanged.
pub fn unwrap_angle(previous: f64, raw: f64) -> f64 {
    if !previous.is_finite() || !raw.is_finite() {
        return raw;
    }

    let gap = previous - raw;
    let mut b = if gap > HALF_TURN {
        raw + ((gap - HALF_TURN) / FULL_CIRCLE).ceil() * FULL_CIRCLE
    } else if gap < -HALF_TURN {
        raw - ((-gap - HALF_TURN) / FULL_CIRCLE).ceil() * FULL_CIRCLE
    } else {
        raw
    };

    // absorb rounding in the turn count; at most one step either way
    for _ in 0..2 {
        if previous - b > HALF_TURN {
            b += FULL_CIRCLE;
        } else if b - previous > HALF_TURN {
            b -= FULL_CIRCLE;
        } else {
            break;
        }
    }
    b
}

/// Machine B for a tool orientation `normal`, before unwrapping.
pub fn rotary_angle(normal: f64) -> f64 {
    90.0 - normal
}

/// Feeds and clearance used while emitting segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPathEmitter {
    /// Retract height before each segment
    pub safe_z: f64,
    pub jog_speed: f64,
    pub work_speed: f64,
    pub plunge_speed: f64,
}

impl ToolPathEmitter {
    pub fn new(safe_z: f64, jog_speed: f64, work_speed: f64, plunge_speed: f64) -> Self {
        Self {
            safe_z,
            jog_speed,
            work_speed,
            plunge_speed,
        }
    }

    /// Emit one segment at layer height `layer_z`.
    ///
    /// The first point is approached by turning B, positioning XY and only
    /// then plunging; later points are single four-axis cutting moves.
    pub fn emit_segment(&self, builder: &mut RotaryToolPath, segment: &PathSegment, layer_z: f64) {
        builder.travel_z(self.safe_z, self.jog_speed);

        for (i, point) in segment.points().iter().enumerate() {
            let b = unwrap_angle(builder.state().b, rotary_angle(point.normal));
            let machine = point.position().rotate(b);
            let x = round_to(machine.x, COORDINATE_PRECISION);
            let z = round_to(machine.y, COORDINATE_PRECISION);

            if i == 0 {
                builder.travel_b(b, self.jog_speed);
                builder.travel_xy(x, layer_z, self.work_speed);
                builder.plunge_z(z, self.plunge_speed);
            } else {
                builder.linear_xyzb(x, layer_z, z, b, self.work_speed);
            }
        }
    }

    /// Emit segments in order.
    pub fn emit_all<'a, I>(&self, builder: &mut RotaryToolPath, segments: I, layer_z: f64)
    where
        I: IntoIterator<Item = &'a PathSegment>,
    {
        for segment in segments {
            self.emit_segment(builder, segment, layer_z);
        }
    }
}
