use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians.
    pub yfov: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Perspective {
    /// Right-handed projection matrix with [0,1] depth range.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.yfov, self.aspect, self.znear, self.zfar)
    }
}

/// The camera node handed to the renderer: a world pose plus projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World-from-camera transform (the inverse of the view matrix).
    pub transform: Mat4,
    /// Projection parameters.
    pub projection: Perspective,
}

impl Camera {
    /// Camera-from-world (view) matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    /// Eye position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Viewing direction in world space (camera -Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        -self.transform.z_axis.truncate()
    }

    /// Clip-from-world matrix a renderer uploads each frame.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }
}

/// Translation plus rotation, no scale or shear.
///
/// Serializes as `{"position":[x,y,z],"orientation":[x,y,z,w]}`, the shape
/// of an XR rigid-transform constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Translation component.
    pub position: Vec3,
    /// Unit rotation quaternion.
    pub orientation: Quat,
}

impl RigidTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Decompose a rigid matrix into translation and rotation. Any scale
    /// in `matrix` is discarded.
    #[must_use]
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (_, orientation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Recompose into a 4x4 matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// The transform that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let orientation = self.orientation.inverse();
        Self {
            position: orientation * -self.position,
            orientation,
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
