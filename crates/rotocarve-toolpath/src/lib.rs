//! # Rotocarve Toolpath
//!
//! Motion command recording for 4-axis rotary machining. [`RotaryToolPath`]
//! owns the axis state, records [`MotionCommand`]s and keeps a running time
//! estimate.

pub mod builder;
pub mod command;
pub mod state;

pub use builder::RotaryToolPath;
pub use command::{AxisMove, MotionCommand};
pub use state::ToolPathState;
