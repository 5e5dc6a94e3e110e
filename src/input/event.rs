use super::gamepad::GamepadInput;

/// Platform-agnostic input events.
///
/// Hosts translate their native pointer/wheel events into these and push
/// them into an [`EventQueue`](super::EventQueue); the controller drains
/// them in [`process_events`](crate::OrbitCameraController::process_events).
///
/// # Example
///
/// ```ignore
/// events.push(InputEvent::PointerMove {
///     pointer_id: 1,
///     x: 100.0,
///     y: 200.0,
///     is_primary: true,
///     shift: false,
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer (mouse button, pen or finger) went down.
    PointerDown {
        /// Host-assigned pointer identifier.
        pointer_id: i32,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (down is positive).
        y: f32,
        /// Whether this is the primary pointer of its kind.
        is_primary: bool,
    },
    /// A pointer moved.
    PointerMove {
        /// Host-assigned pointer identifier.
        pointer_id: i32,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels (down is positive).
        y: f32,
        /// Whether this is the primary pointer of its kind.
        is_primary: bool,
        /// Whether the shift key is held.
        shift: bool,
    },
    /// A pointer was released.
    PointerUp {
        /// Host-assigned pointer identifier.
        pointer_id: i32,
    },
    /// A pointer left the window; treated like a release.
    PointerLeave {
        /// Host-assigned pointer identifier.
        pointer_id: i32,
    },
    /// Wheel scroll (positive = scroll down = zoom out).
    Wheel {
        /// Vertical scroll amount in `mode` units.
        delta_y: f32,
        /// Unit of `delta_y`.
        mode: WheelDeltaMode,
        /// Pixel height of one line, used when `mode` is `Line`.
        line_height_px: f32,
    },
    /// XR controller state sampled this frame.
    Gamepad(GamepadInput),
}

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDeltaMode {
    /// Delta is in pixels.
    Pixel,
    /// Delta is in lines.
    Line,
    /// Delta is in pages (viewport heights).
    Page,
}

impl WheelDeltaMode {
    /// Map a DOM `WheelEvent.deltaMode` value (0, 1, 2).
    #[must_use]
    pub fn from_dom(mode: u32) -> Option<Self> {
        match mode {
            0 => Some(Self::Pixel),
            1 => Some(Self::Line),
            2 => Some(Self::Page),
            _ => None,
        }
    }
}

/// Line height assumed for wheel events from hosts that report lines but
/// not a font size.
pub const DEFAULT_LINE_HEIGHT_PX: f32 = 16.0;

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Convert a winit scroll delta. winit reports scrolling up/away as
    /// positive, the opposite of the DOM convention used here.
    #[must_use]
    pub fn from_winit_scroll(delta: winit::event::MouseScrollDelta) -> Self {
        use winit::event::MouseScrollDelta;

        match delta {
            MouseScrollDelta::LineDelta(_, y) => Self::Wheel {
                delta_y: -y,
                mode: WheelDeltaMode::Line,
                line_height_px: DEFAULT_LINE_HEIGHT_PX,
            },
            MouseScrollDelta::PixelDelta(pos) => Self::Wheel {
                delta_y: -pos.y as f32,
                mode: WheelDeltaMode::Pixel,
                line_height_px: DEFAULT_LINE_HEIGHT_PX,
            },
        }
    }
}

#[cfg(feature = "web")]
impl InputEvent {
    /// `pointerdown` listener payload.
    #[must_use]
    pub fn web_pointer_down(event: &web_sys::PointerEvent) -> Self {
        Self::PointerDown {
            pointer_id: event.pointer_id(),
            x: event.client_x() as f32,
            y: event.client_y() as f32,
            is_primary: event.is_primary(),
        }
    }

    /// `pointermove` listener payload.
    #[must_use]
    pub fn web_pointer_move(event: &web_sys::PointerEvent) -> Self {
        Self::PointerMove {
            pointer_id: event.pointer_id(),
            x: event.client_x() as f32,
            y: event.client_y() as f32,
            is_primary: event.is_primary(),
            shift: event.shift_key(),
        }
    }

    /// `pointerup` listener payload.
    #[must_use]
    pub fn web_pointer_up(event: &web_sys::PointerEvent) -> Self {
        Self::PointerUp {
            pointer_id: event.pointer_id(),
        }
    }

    /// `pointerout` listener payload.
    #[must_use]
    pub fn web_pointer_leave(event: &web_sys::PointerEvent) -> Self {
        Self::PointerLeave {
            pointer_id: event.pointer_id(),
        }
    }

    /// `wheel` listener payload. `line_height_px` is the computed line
    /// height of the element receiving the event. Returns `None` for an
    /// unknown delta mode.
    #[must_use]
    pub fn web_wheel(event: &web_sys::WheelEvent, line_height_px: f32) -> Option<Self> {
        Some(Self::Wheel {
            delta_y: event.delta_y() as f32,
            mode: WheelDeltaMode::from_dom(event.delta_mode())?,
            line_height_px,
        })
    }
}
