use glam::Vec2;

/// Magnitude below which an accumulated delta is treated as exhausted.
pub const REST_EPSILON: f32 = 1e-6;

/// Input deltas gathered between frames.
///
/// Event handlers add to these fields; each frame the controller consumes
/// them and then multiplies every field by the damping factor, so motion
/// eases out after the input stops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputAccumulator {
    /// Azimuth delta in radians (subtracted from theta).
    pub roll: f32,
    /// Polar delta in radians (subtracted from phi).
    pub pitch: f32,
    /// Zoom delta (added to the zoom value).
    pub zoom: f32,
    /// Pan delta along the camera's right (x) and up (y) axes, world units.
    pub pan: Vec2,
}

impl InputAccumulator {
    /// Scale every field by `damping`, snapping near-zero values to 0.
    pub fn decay(&mut self, damping: f32) {
        self.roll = settle(self.roll * damping);
        self.pitch = settle(self.pitch * damping);
        self.zoom = settle(self.zoom * damping);
        self.pan = Vec2::new(
            settle(self.pan.x * damping),
            settle(self.pan.y * damping),
        );
    }

    /// Whether no inertia remains.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        *self == Self::default()
    }

    /// Drop all pending input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < REST_EPSILON {
        0.0
    } else {
        value
    }
}
