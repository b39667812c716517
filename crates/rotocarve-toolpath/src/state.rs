//! Last commanded axis position.

use serde::{Deserialize, Serialize};

/// Axis state after the most recent command. `b` is in degrees and is never
/// wrapped, so it may grow past 360 as the rotary axis keeps turning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ToolPathState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub b: f64,
}
