//! # Rotocarve Settings
//!
//! Machining descriptor and G-code configuration, with JSON/TOML
//! persistence and validation.

pub mod config;
pub mod error;

pub use config::{
    default_upload_dir, GcodeConfig, MachiningDescriptor, ResampleMode, Transformation,
};
pub use error::{ConfigError, ConfigResult};
