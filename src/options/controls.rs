use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Input sensitivity, inertia and zoom limits of the orbit controller.
pub struct ControlOptions {
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier (wheel, pinch and gamepad).
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Fraction of accumulated input kept after each frame. Lower values
    /// stop the camera sooner.
    #[schemars(title = "Damping", range(min = 0.0, max = 0.95), extend("step" = 0.05))]
    pub damping: f32,
    /// Lowest zoom value (furthest out, as a multiple of the ideal distance
    /// minus one).
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Highest zoom value. Must stay below 1 so the camera never reaches
    /// the target.
    #[schemars(skip)]
    pub max_zoom: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            damping: 0.75,
            min_zoom: -5.0,
            max_zoom: 0.99,
        }
    }
}

impl ControlOptions {
    pub(super) fn validate(&self) -> Result<(), CameraError> {
        for (field, speed) in [
            ("controls.rotate_speed", self.rotate_speed),
            ("controls.zoom_speed", self.zoom_speed),
            ("controls.pan_speed", self.pan_speed),
        ] {
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(CameraError::invalid(
                    field,
                    format!("{speed} must be finite and non-negative"),
                ));
            }
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(CameraError::invalid(
                "controls.damping",
                format!("{} is outside [0, 1)", self.damping),
            ));
        }
        if !(self.min_zoom.is_finite() && self.min_zoom < self.max_zoom) {
            return Err(CameraError::invalid(
                "controls.min_zoom",
                format!(
                    "{} must be finite and below max_zoom ({})",
                    self.min_zoom, self.max_zoom
                ),
            ));
        }
        if !(self.max_zoom < 1.0) {
            return Err(CameraError::invalid(
                "controls.max_zoom",
                format!("{} must be below 1", self.max_zoom),
            ));
        }
        Ok(())
    }
}
