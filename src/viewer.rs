//! Standalone preview window backed by winit.
//!
//! Nothing is rendered: the window exists to exercise the controller with
//! real mouse, wheel and touch input. The title bar reports the camera
//! state, and `RUST_LOG=debug` shows the framing decisions.
//!
//! ```no_run
//! # use gltf_orbit::Viewer;
//! Viewer::builder()
//!     .with_title("orbit preview")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Duration};

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    error::CameraError,
    input::{EventQueue, InputEvent},
    options::Options,
    scene::{Scene, SceneNode},
    OrbitCameraController,
};

/// Pointer id used for the mouse. Touches are numbered from 1.
const MOUSE_POINTER_ID: i32 = 0;

const TITLE_REFRESH: Duration = Duration::from_millis(250);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    scene: Option<Scene>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default options, a unit-cube scene and the
    /// title "gltf-orbit".
    fn new() -> Self {
        Self {
            options: None,
            scene: None,
            title: "gltf-orbit".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the scene framed at startup and on `R`.
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            scene: self.scene.unwrap_or_else(unit_cube),
            title: self.title,
        }
    }
}

fn unit_cube() -> Scene {
    Scene {
        nodes: vec![SceneNode::with_extent(
            glam::Vec3::splat(-1.0),
            glam::Vec3::ONE,
        )],
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window driving an [`OrbitCameraController`].
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    scene: Scene,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), CameraError> {
        let event_loop =
            EventLoop::new().map_err(|e| CameraError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut events = EventQueue::new();
        let mut controller = OrbitCameraController::new(&self.options);
        controller.attach(&mut events);
        controller.fit_scene(&self.scene);

        let mut app = ViewerApp {
            window: None,
            controller,
            events,
            scene: self.scene,
            title: self.title,
            clock: Instant::now(),
            last_title_push: Instant::now(),
            shift: false,
            cursor: (0.0, 0.0),
            active_touches: 0,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CameraError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    controller: OrbitCameraController,
    events: EventQueue,
    scene: Scene,
    title: String,
    clock: Instant,
    last_title_push: Instant,
    shift: bool,
    /// Last cursor position in physical pixels.
    cursor: (f32, f32),
    active_touches: usize,
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn push_touch(&mut self, touch: Touch) {
        let pointer_id = 1 + touch.id as i32;
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        let event = match touch.phase {
            TouchPhase::Started => {
                let is_primary = self.active_touches == 0;
                self.active_touches += 1;
                InputEvent::PointerDown {
                    pointer_id,
                    x,
                    y,
                    is_primary,
                }
            }
            TouchPhase::Moved => InputEvent::PointerMove {
                pointer_id,
                x,
                y,
                is_primary: self.active_touches == 1,
                shift: self.shift,
            },
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active_touches = self.active_touches.saturating_sub(1);
                InputEvent::PointerUp { pointer_id }
            }
        };
        self.events.push(event);
    }

    fn refresh_title(&mut self, now: Instant) {
        if now.duration_since(self.last_title_push) < TITLE_REFRESH {
            return;
        }
        self.last_title_push = now;
        if let Some(w) = &self.window {
            let c = &self.controller;
            w.set_title(&format!(
                "{} - distance {:.3}, zoom {:.2}, {:?}",
                self.title,
                c.distance(),
                c.zoom(),
                c.gesture()
            ));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        self.controller
            .set_viewport(inner.width as f32, inner.height as f32);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                self.controller
                    .set_viewport(size.width as f32, size.height as f32);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let now_ms =
                    now.duration_since(self.clock).as_secs_f64() * 1000.0;
                self.controller.process_events();
                self.controller.update(now_ms);
                self.refresh_title(now);
                self.request_redraw();
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let (x, y) = self.cursor;
                self.events.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown {
                        pointer_id: MOUSE_POINTER_ID,
                        x,
                        y,
                        is_primary: true,
                    },
                    ElementState::Released => InputEvent::PointerUp {
                        pointer_id: MOUSE_POINTER_ID,
                    },
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                self.events.push(InputEvent::PointerMove {
                    pointer_id: MOUSE_POINTER_ID,
                    x: self.cursor.0,
                    y: self.cursor.1,
                    is_primary: true,
                    shift: self.shift,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.events.push(InputEvent::PointerLeave {
                    pointer_id: MOUSE_POINTER_ID,
                });
            }

            WindowEvent::Touch(touch) => self.push_touch(touch),

            WindowEvent::MouseWheel { delta, .. } => {
                self.events.push(InputEvent::from_winit_scroll(delta));
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match code {
                    KeyCode::KeyR => {
                        log::info!("refitting camera to scene");
                        self.controller.fit_scene(&self.scene);
                    }
                    KeyCode::Escape => event_loop.exit(),
                    _ => {}
                }
            }

            _ => (),
        }
    }
}
