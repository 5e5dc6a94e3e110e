use glam::Vec2;

/// Thumbstick deflection below which an axis is ignored.
pub const THUMBSTICK_DEAD_ZONE: f32 = 0.01;

/// One XR controller's state, sampled once per XR frame.
///
/// While the trigger is held the thumbstick pans; otherwise, while the
/// squeeze button is held, its vertical axis zooms; otherwise it orbits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadInput {
    /// Trigger button pressed.
    pub trigger: bool,
    /// Squeeze (grip) button pressed.
    pub squeeze: bool,
    /// Thumbstick axes in `[-1, 1]`.
    pub thumbstick: Vec2,
}

impl GamepadInput {
    /// Thumbstick with each axis inside the dead zone zeroed.
    #[must_use]
    pub fn filtered_thumbstick(&self) -> Vec2 {
        let axis = |v: f32| if v.abs() > THUMBSTICK_DEAD_ZONE { v } else { 0.0 };
        Vec2::new(axis(self.thumbstick.x), axis(self.thumbstick.y))
    }
}
