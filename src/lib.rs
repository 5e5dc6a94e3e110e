// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Damped orbit camera controller for glTF model viewers.
//!
//! The controller turns raw pointer, wheel, touch and XR gamepad input into
//! a smooth spherical-orbit camera transform, frames newly loaded scenes
//! automatically, and exports the pose as a rigid transform for XR
//! reference spaces. Rendering is left to the host: the only value a
//! renderer needs is [`camera::Camera::transform`], read once per frame
//! after [`OrbitCameraController::update`].
//!
//! # Key entry points
//!
//! - [`OrbitCameraController`] - the camera state machine
//! - [`input::EventQueue`] - host-side event source the controller
//!   subscribes to
//! - [`scene::Scene`] / [`scene::SceneBounds`] - content bounds for
//!   auto-framing
//! - [`options::Options`] - speeds, damping, zoom limits and projection
//!   defaults, loadable from TOML
//!
//! # Frame loop
//!
//! ```
//! use gltf_orbit::input::{EventQueue, InputEvent};
//! use gltf_orbit::scene::Aabb;
//! use gltf_orbit::OrbitCameraController;
//! use glam::Vec3;
//!
//! let mut events = EventQueue::new();
//! let mut controller = OrbitCameraController::default();
//! controller.attach(&mut events);
//! controller.reset_to_scene(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
//!
//! events.push(InputEvent::PointerDown { pointer_id: 1, x: 10.0, y: 10.0, is_primary: true });
//! events.push(InputEvent::PointerMove {
//!     pointer_id: 1,
//!     x: 30.0,
//!     y: 10.0,
//!     is_primary: true,
//!     shift: false,
//! });
//!
//! controller.process_events();
//! controller.update(16.0);
//! let _world_from_camera = controller.transform();
//! let _clip_from_world = controller.camera().view_projection();
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::{OrbitCameraController, RigidTransform};
pub use error::CameraError;
pub use input::{InputEvent, WheelDeltaMode};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
