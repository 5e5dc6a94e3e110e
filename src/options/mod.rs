//! Camera and control options with TOML preset support.
//!
//! Projection defaults, the starting pose, input sensitivity, damping and
//! zoom limits are consolidated here. Options serialize to/from TOML and
//! expose a JSON schema for settings panels.

mod camera;
mod controls;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Projection and starting pose.
    pub camera: CameraOptions,
    /// Sensitivity, damping and zoom limits.
    pub controls: ControlOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string and validate them.
    pub fn from_toml(content: &str) -> Result<Self, CameraError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CameraError> {
        let content = std::fs::read_to_string(path).map_err(CameraError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded camera options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CameraError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CameraError::Io)?;
        }
        std::fs::write(path, content).map_err(CameraError::Io)
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), CameraError> {
        self.camera.validate()?;
        self.controls.validate()
    }
}
