//! Input plumbing: platform-agnostic event types, XR gamepad state, and the
//! event-source port the camera subscribes to.

/// Platform-agnostic input events.
pub mod event;
/// XR controller thumbstick and button state.
pub mod gamepad;
/// Event-source port and the host-side queue.
pub mod source;

pub use event::{InputEvent, WheelDeltaMode, DEFAULT_LINE_HEIGHT_PX};
pub use gamepad::GamepadInput;
pub use source::{EventQueue, EventSource, Subscription};
