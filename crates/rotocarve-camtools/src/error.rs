//! Error types for the CAM tools crate.
//!
//! The planning stages never fail on awkward geometry. Errors come from I/O
//! and from rejected descriptors.

use rotocarve_mesh::MeshError;
use rotocarve_settings::ConfigError;
use thiserror::Error;

/// Errors that can occur while generating a rotary tool path.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The mesh could not be loaded or sliced.
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// The machining descriptor was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A result could not be written as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
