//! Motion command records.

use serde::{Deserialize, Serialize};

/// Target axis values for a single move. Axes left as `None` keep their
/// previous position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisMove {
    #[serde(rename = "X", default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(rename = "Y", default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(rename = "Z", default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    /// Feed rate in mm/min
    #[serde(rename = "F")]
    pub feed: f64,
}

impl AxisMove {
    pub fn new(feed: f64) -> Self {
        Self {
            feed,
            ..Default::default()
        }
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn b(mut self, b: f64) -> Self {
        self.b = Some(b);
        self
    }
}

/// One recorded machine command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MotionCommand {
    /// Positioning move (G0)
    Rapid(AxisMove),
    /// Cutting move (G1)
    Linear(AxisMove),
    /// Spindle start with power `P`
    SpindleOn { power: f64 },
    /// Spindle stop
    SpindleOff,
}

impl MotionCommand {
    /// The move carried by this command, if it is a motion.
    pub fn axis_move(&self) -> Option<&AxisMove> {
        match self {
            MotionCommand::Rapid(m) | MotionCommand::Linear(m) => Some(m),
            _ => None,
        }
    }

    /// Rotary target of this command, if it sets B.
    pub fn b(&self) -> Option<f64> {
        self.axis_move().and_then(|m| m.b)
    }

    pub fn is_motion(&self) -> bool {
        self.axis_move().is_some()
    }
}
