//! Orbit camera for glTF scene viewing.
//!
//! Provides a damped orbit controller with rotation, panning and zoom
//! driven by pointer, wheel, touch and XR gamepad input, plus automatic
//! framing of scene bounds.

/// Orbit camera controller: input handlers, per-frame update and framing.
pub mod controller;
/// Camera node, perspective projection and rigid transforms.
pub mod core;
/// Damped per-frame input accumulator.
pub mod input;
/// Active pointer bookkeeping and gesture detection.
pub mod pointers;

pub use controller::{
    OrbitCameraController, MIN_DISTANCE, MIN_IDEAL_DISTANCE, POLE_EPSILON,
};
pub use core::{Camera, Perspective, RigidTransform};
pub use input::{InputAccumulator, REST_EPSILON};
pub use pointers::{Gesture, PointerMotion, PointerTracker};
