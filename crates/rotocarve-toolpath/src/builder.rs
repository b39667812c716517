//! # Rotary Tool Path Builder
//!
//! Accumulates [`MotionCommand`]s for a 4-axis machine whose B axis turns
//! the workpiece about the machine Y axis. The builder is the only writer of
//! [`ToolPathState`]; callers read it back through [`RotaryToolPath::state`].
//!
//! Time estimates treat every move as a straight line at its feed rate, with
//! rotary travel converted to surface distance at the workpiece radius.

use crate::command::{AxisMove, MotionCommand};
use crate::state::ToolPathState;
use std::f64::consts::PI;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct RotaryToolPath {
    commands: Vec<MotionCommand>,
    state: ToolPathState,
    estimated_time: f64,
    is_rotate: bool,
    radius: f64,
}

impl RotaryToolPath {
    pub fn new(is_rotate: bool, radius: f64) -> Self {
        Self {
            is_rotate,
            radius,
            ..Default::default()
        }
    }

    pub fn is_rotate(&self) -> bool {
        self.is_rotate
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Last commanded axis position.
    pub fn state(&self) -> ToolPathState {
        self.state
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<MotionCommand> {
        self.commands
    }

    /// Accumulated machining time in seconds.
    pub fn estimated_time(&self) -> f64 {
        self.estimated_time
    }

    /// Retract or approach along Z at rapid.
    pub fn travel_z(&mut self, z: f64, speed: f64) {
        self.rapid(AxisMove::new(speed).z(z));
    }

    /// Turn the rotary axis at rapid.
    pub fn travel_b(&mut self, b: f64, speed: f64) {
        self.rapid(AxisMove::new(speed).b(b));
    }

    /// Position in the XY plane at rapid.
    pub fn travel_xy(&mut self, x: f64, y: f64, speed: f64) {
        self.rapid(AxisMove::new(speed).x(x).y(y));
    }

    /// Feed straight down (or up) along Z.
    pub fn plunge_z(&mut self, z: f64, speed: f64) {
        self.linear(AxisMove::new(speed).z(z));
    }

    /// Coordinated cutting move on all four axes.
    pub fn linear_xyzb(&mut self, x: f64, y: f64, z: f64, b: f64, speed: f64) {
        self.linear(AxisMove::new(speed).x(x).y(y).z(z).b(b));
    }

    pub fn spindle_on(&mut self, power: f64) {
        debug!("Spindle on, power {}", power);
        self.commands.push(MotionCommand::SpindleOn { power });
    }

    pub fn spindle_off(&mut self) {
        debug!("Spindle off");
        self.commands.push(MotionCommand::SpindleOff);
    }

    /// Rotation in degrees that moves a point on the workpiece surface by
    /// `x` millimetres.
    pub fn angle_to_rotation_offset(&self, x: f64) -> f64 {
        if self.radius == 0.0 {
            return 0.0;
        }
        (x / self.radius).to_degrees()
    }

    fn rapid(&mut self, target: AxisMove) {
        self.record(target);
        self.commands.push(MotionCommand::Rapid(target));
    }

    fn linear(&mut self, target: AxisMove) {
        self.record(target);
        self.commands.push(MotionCommand::Linear(target));
    }

    /// Advance the axis state to `target` and add its travel time.
    fn record(&mut self, target: AxisMove) {
        let from = self.state;
        let to = ToolPathState {
            x: target.x.unwrap_or(from.x),
            y: target.y.unwrap_or(from.y),
            z: target.z.unwrap_or(from.z),
            b: target.b.unwrap_or(from.b),
        };

        let arc = (to.b - from.b).abs() * PI / 180.0 * self.radius;
        let distance = ((to.x - from.x).powi(2)
            + (to.y - from.y).powi(2)
            + (to.z - from.z).powi(2)
            + arc.powi(2))
        .sqrt();

        if target.feed.is_finite() && target.feed > 0.0 && distance.is_finite() {
            self.estimated_time += distance / target.feed * 60.0;
        } else {
            trace!("Skipping time estimate for move at feed {}", target.feed);
        }

        self.state = to;
    }
}
