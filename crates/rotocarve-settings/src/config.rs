//! # Machining Configuration
//!
//! The job descriptor handed to the tool path generator: which mesh to
//! carve, the workpiece diameter, placement offsets, and the
//! [`GcodeConfig`] options steering sampling, tool clearance and feeds.
//!
//! Field names serialize in camelCase so existing descriptor files load
//! unchanged. Descriptors can be stored as JSON or TOML.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How polygon edges are densified before visibility analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMode {
    /// Densify every edge, including the closing edge back to the first
    /// vertex.
    #[default]
    ClosedLoop,
    /// Densify edges `0..n-1` only. The last vertex and the closing edge
    /// are left out, as older releases did.
    LegacyOpenChain,
}

impl std::fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleMode::ClosedLoop => write!(f, "closed_loop"),
            ResampleMode::LegacyOpenChain => write!(f, "legacy_open_chain"),
        }
    }
}

/// G-code generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GcodeConfig {
    /// Samples per millimetre along polygon edges
    pub density: f64,
    /// Narrowest admissible approach arc in degrees
    pub tool_angle: f64,
    /// Rapid feed (mm/min)
    pub jog_speed: f64,
    /// Cutting feed (mm/min)
    pub work_speed: f64,
    /// Plunge feed (mm/min)
    pub plunge_speed: f64,
    /// Slice spacing in mm; `1 / density` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_height: Option<f64>,
    /// Spindle power sent with the spindle-on command
    pub spindle_power: f64,
    /// Multiplier applied to the raw time estimate
    pub time_calibration: f64,
    pub resample_mode: ResampleMode,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            density: 5.0,
            tool_angle: 30.0,
            jog_speed: 300.0,
            work_speed: 300.0,
            plunge_speed: 300.0,
            layer_height: None,
            spindle_power: 100.0,
            time_calibration: 1.6,
            resample_mode: ResampleMode::ClosedLoop,
        }
    }
}

impl GcodeConfig {
    /// Spacing between resampled points along an edge.
    pub fn sampling_interval(&self) -> f64 {
        1.0 / self.density
    }

    pub fn effective_layer_height(&self) -> f64 {
        self.layer_height.unwrap_or_else(|| self.sampling_interval())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("gcodeConfig.density", self.density)?;
        require_positive("gcodeConfig.jogSpeed", self.jog_speed)?;
        require_positive("gcodeConfig.workSpeed", self.work_speed)?;
        require_positive("gcodeConfig.plungeSpeed", self.plunge_speed)?;
        require_positive("gcodeConfig.timeCalibration", self.time_calibration)?;

        if !self.tool_angle.is_finite() || !(0.0..=360.0).contains(&self.tool_angle) {
            return Err(ConfigError::invalid(
                "gcodeConfig.toolAngle",
                format!("must be within 0..=360 degrees, got {}", self.tool_angle),
            ));
        }

        if let Some(h) = self.layer_height {
            require_positive("gcodeConfig.layerHeight", h)?;
        }

        if !self.spindle_power.is_finite() || self.spindle_power < 0.0 {
            return Err(ConfigError::invalid(
                "gcodeConfig.spindlePower",
                format!("must be >= 0, got {}", self.spindle_power),
            ));
        }

        Ok(())
    }
}

/// Placement offsets of the model on the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transformation {
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
}

fn default_true() -> bool {
    true
}

fn default_head_type() -> String {
    "cnc".to_string()
}

fn default_mode() -> String {
    "greyscale".to_string()
}

/// Everything needed to generate one rotary carving job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachiningDescriptor {
    /// Mesh file name, resolved against the upload directory
    pub upload_name: String,
    #[serde(default = "default_true")]
    pub is_rotate: bool,
    /// Workpiece diameter in mm
    pub diameter: f64,
    #[serde(default)]
    pub transformation: Transformation,
    #[serde(default = "default_head_type")]
    pub head_type: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub gcode_config: GcodeConfig,
}

impl MachiningDescriptor {
    pub fn new(upload_name: impl Into<String>, diameter: f64) -> Self {
        Self {
            upload_name: upload_name.into(),
            is_rotate: true,
            diameter,
            transformation: Transformation::default(),
            head_type: default_head_type(),
            mode: default_mode(),
            gcode_config: GcodeConfig::default(),
        }
    }

    /// Safe standoff height: the workpiece surface.
    pub fn initial_z(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Path of the mesh file inside `upload_dir`.
    pub fn resolve_upload(&self, upload_dir: &Path) -> PathBuf {
        upload_dir.join(&self.upload_name)
    }

    /// Load descriptor from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let descriptor: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(
                    "descriptor file must be .json or .toml".to_string(),
                ))
            }
        };

        descriptor.validate()?;
        debug!("Loaded machining descriptor from {}", path.display());
        Ok(descriptor)
    }

    /// Save descriptor to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(
                    "descriptor file must be .json or .toml".to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate descriptor
    pub fn validate(&self) -> ConfigResult<()> {
        if self.upload_name.trim().is_empty() {
            return Err(ConfigError::invalid("uploadName", "must not be empty"));
        }

        require_positive("diameter", self.diameter)?;

        let t = &self.transformation;
        for (field, value) in [
            ("transformation.positionX", t.position_x),
            ("transformation.positionY", t.position_y),
            ("transformation.positionZ", t.position_z),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        self.gcode_config.validate()
    }
}

/// Default place to look for uploaded meshes.
pub fn default_upload_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("rotocarve").join("uploads"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn require_positive(field: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be > 0, got {}", value),
        ));
    }
    Ok(())
}
