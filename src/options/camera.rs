use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and the pose a new session starts from.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance until the first scene fit.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance until the first scene fit.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position before any model is loaded.
    #[schemars(skip)]
    pub default_position: [f32; 3],
    /// Orbit pivot before any model is loaded.
    #[schemars(skip)]
    pub default_target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 1000.0,
            default_position: [-3.0, 3.0, 6.0],
            default_target: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraOptions {
    /// Vertical field of view in radians.
    #[must_use]
    pub fn yfov_radians(&self) -> f32 {
        self.fovy.to_radians()
    }

    pub(super) fn validate(&self) -> Result<(), CameraError> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(CameraError::invalid(
                "camera.fovy",
                format!("{} is outside (0, 180) degrees", self.fovy),
            ));
        }
        if !(self.znear > 0.0) {
            return Err(CameraError::invalid(
                "camera.znear",
                format!("{} must be positive", self.znear),
            ));
        }
        if !(self.zfar > self.znear) {
            return Err(CameraError::invalid(
                "camera.zfar",
                format!("{} must exceed znear ({})", self.zfar, self.znear),
            ));
        }
        let finite = |v: [f32; 3]| v.iter().all(|c| c.is_finite());
        if !finite(self.default_position) {
            return Err(CameraError::invalid(
                "camera.default_position",
                "components must be finite",
            ));
        }
        if !finite(self.default_target) {
            return Err(CameraError::invalid(
                "camera.default_target",
                "components must be finite",
            ));
        }
        Ok(())
    }
}
