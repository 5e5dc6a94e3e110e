use std::f64::consts::PI;

use glam::{DVec3, Mat4, Vec2, Vec3};

use super::core::{Camera, Perspective, RigidTransform};
use super::input::InputAccumulator;
use super::pointers::{Gesture, PointerMotion, PointerTracker};
use crate::input::{
    EventSource, GamepadInput, InputEvent, Subscription, WheelDeltaMode,
};
use crate::options::{ControlOptions, Options};
use crate::scene::{Aabb, SceneBounds};

/// Margin keeping the polar angle off the poles, where look-at with a
/// fixed up axis degenerates.
pub const POLE_EPSILON: f64 = 1.0 / 8_388_608.0; // 2^-23
/// Smallest eye-to-target distance.
pub const MIN_DISTANCE: f32 = 1.0 / 8192.0; // 2^-13
/// Smallest ideal distance a scene fit may produce.
pub const MIN_IDEAL_DISTANCE: f32 = 1.0 / 8192.0; // 2^-13

/// Radians of orbit per pixel of drag at rotate speed 1.
const ROTATE_K: f32 = 0.0025;
/// Zoom units per wheel pixel at zoom speed 1.
const ZOOM_K: f32 = 0.0001;
/// Pan per pixel of drag, per ten units of distance, at pan speed 1.
const PAN_K: f32 = 0.005;
/// Pinch spread is ten times as strong as wheel pixels.
const PINCH_ZOOM_SCALE: f32 = 10.0;
/// Gamepad thumbstick gain per XR frame.
const GAMEPAD_K: f32 = 0.025;

const WORLD_UP: Vec3 = Vec3::Y;

type FocusHook = Box<dyn FnMut(Vec2)>;

/// Damped orbit camera driven by pointer, wheel, touch and gamepad input.
///
/// Event handlers only accumulate deltas; [`update`](Self::update), called
/// once per frame, consumes them, commits the new pose and decays the
/// accumulators so motion eases out.
pub struct OrbitCameraController {
    camera: Camera,
    position: Vec3,
    target: Vec3,
    distance: f32,
    ideal_distance: f32,
    zoom: f32,
    /// Azimuth of the eye around the target, from +Z towards +X.
    theta: f64,
    /// Polar angle of the eye from +Y, kept within the pole margins.
    phi: f64,

    input: InputAccumulator,
    pointers: PointerTracker,
    controls: ControlOptions,
    viewport: Vec2,
    last_update_ms: Option<f64>,

    focus_hook: Option<FocusHook>,
    subscription: Option<Subscription>,
}

impl OrbitCameraController {
    /// Create a controller at the configured default pose.
    ///
    /// The ideal distance starts as the default eye-to-target distance, so
    /// updating a fresh controller leaves it where it is.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let position = Vec3::from_array(options.camera.default_position);
        let target = Vec3::from_array(options.camera.default_target);
        let distance = position.distance(target).max(MIN_DISTANCE);
        let ideal_distance = distance.max(MIN_IDEAL_DISTANCE);
        let (theta, phi) = spherical_angles(position - target);

        let mut controller = Self {
            camera: Camera {
                transform: Mat4::IDENTITY,
                projection: Perspective {
                    yfov: options.camera.yfov_radians(),
                    aspect: 1.0,
                    znear: options.camera.znear,
                    zfar: options.camera.zfar,
                },
            },
            position,
            target,
            distance,
            ideal_distance,
            zoom: 0.0,
            theta,
            phi: phi.clamp(POLE_EPSILON, PI - POLE_EPSILON),
            input: InputAccumulator::default(),
            pointers: PointerTracker::new(),
            controls: options.controls.clone(),
            viewport: Vec2::new(1.0, 1.0),
            last_update_ms: None,
            focus_hook: None,
            subscription: None,
        };
        controller.rebuild_transform();
        controller
    }

    // -- Accessors --

    /// The camera node: world transform and projection.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// World-from-camera transform, the value a renderer reads each frame.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.camera.transform
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orbit pivot in world space.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current eye-to-target distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Distance that frames the last fitted scene at zoom 0.
    #[must_use]
    pub fn ideal_distance(&self) -> f32 {
        self.ideal_distance
    }

    /// Current zoom value (0 = ideal distance, towards 1 = closer).
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pending, not yet consumed input.
    #[must_use]
    pub fn input(&self) -> &InputAccumulator {
        &self.input
    }

    /// Mutable access to the pending input, for hosts that inject deltas
    /// directly.
    pub fn input_mut(&mut self) -> &mut InputAccumulator {
        &mut self.input
    }

    /// Gesture implied by the active pointers.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.pointers.gesture()
    }

    /// Timestamp passed to the most recent [`update`](Self::update).
    #[must_use]
    pub fn last_update_ms(&self) -> Option<f64> {
        self.last_update_ms
    }

    /// Current control settings.
    #[must_use]
    pub fn controls(&self) -> &ControlOptions {
        &self.controls
    }

    // -- Configuration --

    /// Apply new options. Speeds, damping and zoom limits take effect on
    /// the next event; the field of view immediately. Near/far planes are
    /// only taken from the options until the next scene fit.
    pub fn apply_options(&mut self, options: &Options) {
        self.controls = options.controls.clone();
        self.camera.projection.yfov = options.camera.yfov_radians();
        self.zoom = self
            .zoom
            .clamp(self.controls.min_zoom, self.controls.max_zoom);
    }

    /// Record the viewport size in pixels. Sets the projection aspect and
    /// the page height used by page-mode wheel events.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.camera.projection.aspect = self.viewport.x / self.viewport.y;
    }

    /// Install a callback invoked with the screen position of every new
    /// pointer press (e.g. to pick a depth-of-field focus point).
    pub fn set_focus_hook(&mut self, hook: impl FnMut(Vec2) + 'static) {
        self.focus_hook = Some(Box::new(hook));
    }

    /// Remove the focus callback.
    pub fn clear_focus_hook(&mut self) {
        self.focus_hook = None;
    }

    // -- Event source --

    /// Subscribe to `source`. Replaces any previous subscription.
    pub fn attach(&mut self, source: &mut impl EventSource) {
        if self.subscription.is_some() {
            log::debug!("camera re-attached; previous subscription dropped");
        }
        self.subscription = Some(source.subscribe());
    }

    /// Unsubscribe from the event source and forget active pointers.
    /// Undelivered events are discarded.
    pub fn detach(&mut self) {
        if self.subscription.take().is_some() {
            log::debug!("camera detached from event source");
        }
        if !self.pointers.is_empty() {
            log::debug!("forgetting {} active pointers", self.pointers.len());
        }
        self.pointers.clear();
    }

    /// Whether the controller is subscribed to an event source.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Dispatch every event delivered since the last call.
    pub fn process_events(&mut self) {
        let Some(subscription) = &self.subscription else {
            return;
        };
        for event in subscription.drain() {
            self.handle_event(event);
        }
    }

    /// Dispatch a single event to the matching handler.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                pointer_id,
                x,
                y,
                is_primary,
            } => self.pointer_down(pointer_id, Vec2::new(x, y), is_primary),
            InputEvent::PointerMove {
                pointer_id,
                x,
                y,
                shift,
                ..
            } => self.handle_pointer_move(pointer_id, x, y, shift),
            InputEvent::PointerUp { pointer_id } => {
                self.handle_pointer_up(pointer_id);
            }
            InputEvent::PointerLeave { pointer_id } => {
                self.handle_pointer_leave(pointer_id);
            }
            InputEvent::Wheel {
                delta_y,
                mode,
                line_height_px,
            } => self.handle_wheel(delta_y, mode, line_height_px),
            InputEvent::Gamepad(pad) => self.handle_gamepad(&pad),
        }
    }

    // -- Input handlers --

    /// Register a pressed primary pointer.
    pub fn handle_pointer_down(&mut self, pointer_id: i32, x: f32, y: f32) {
        self.pointer_down(pointer_id, Vec2::new(x, y), true);
    }

    fn pointer_down(&mut self, pointer_id: i32, position: Vec2, is_primary: bool) {
        if self.pointers.contains(pointer_id) {
            log::trace!("pointer {pointer_id} pressed again; position refreshed");
        }
        self.pointers.press(pointer_id, position, is_primary);
        if let Some(hook) = self.focus_hook.as_mut() {
            hook(position);
        }
    }

    /// Move a tracked pointer. One pointer rotates (or pans with shift),
    /// two pointers pinch-zoom; spreading them apart zooms in.
    pub fn handle_pointer_move(
        &mut self,
        pointer_id: i32,
        x: f32,
        y: f32,
        shift_held: bool,
    ) {
        match self.pointers.move_to(pointer_id, Vec2::new(x, y)) {
            PointerMotion::Drag(delta) if shift_held => {
                let scale = self.controls.pan_speed * PAN_K * (self.distance / 10.0);
                self.input.pan += delta * scale;
            }
            PointerMotion::Drag(delta) => {
                let scale = self.controls.rotate_speed * ROTATE_K;
                self.input.roll += delta.x * scale;
                self.input.pitch += delta.y * scale;
            }
            PointerMotion::Pinch(spread) => {
                self.input.zoom +=
                    spread * self.controls.zoom_speed * ZOOM_K * PINCH_ZOOM_SCALE;
            }
            PointerMotion::None => {}
        }
    }

    /// Release a pointer.
    pub fn handle_pointer_up(&mut self, pointer_id: i32) {
        self.pointers.release(pointer_id);
    }

    /// A pointer left the window; same as a release.
    pub fn handle_pointer_leave(&mut self, pointer_id: i32) {
        self.pointers.release(pointer_id);
    }

    /// Wheel zoom. A positive delta (scrolling down) zooms out.
    pub fn handle_wheel(
        &mut self,
        delta_y: f32,
        mode: WheelDeltaMode,
        line_height_px: f32,
    ) {
        let pixels = match mode {
            WheelDeltaMode::Pixel => delta_y,
            WheelDeltaMode::Line => delta_y * line_height_px,
            WheelDeltaMode::Page => delta_y * self.viewport.y,
        };
        self.input.zoom -= pixels * self.controls.zoom_speed * ZOOM_K;
    }

    /// Apply one XR frame of controller input.
    pub fn handle_gamepad(&mut self, pad: &GamepadInput) {
        let thumb = pad.filtered_thumbstick();
        // One mode per frame: panning never orbits, and squeeze zoom goes
        // through the damped accumulator like every other zoom source.
        if pad.trigger {
            self.input.pan += thumb * GAMEPAD_K;
        } else if pad.squeeze {
            self.input.zoom += thumb.y * GAMEPAD_K;
        } else {
            let scale = self.controls.rotate_speed * GAMEPAD_K;
            self.input.roll += thumb.x * scale;
            self.input.pitch += thumb.y * scale;
        }
    }

    // -- Frame update --

    /// Advance the camera by one frame.
    ///
    /// Consumes the accumulated input (pan, then orbit, then zoom), rebuilds
    /// the transform, then damps the accumulators. Without pending input
    /// the pose is left unchanged.
    pub fn update(&mut self, now_ms: f64) {
        self.step();
        self.last_update_ms = Some(now_ms);
    }

    fn step(&mut self) {
        self.apply_pan();

        // The angles persist in f64: near a pole the horizontal part of the
        // offset falls below f32 spacing at large target coordinates, so it
        // cannot be recovered from `position`.
        self.theta -= f64::from(self.input.roll);
        self.phi = (self.phi - f64::from(self.input.pitch))
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        self.zoom = (self.zoom + self.input.zoom)
            .clamp(self.controls.min_zoom, self.controls.max_zoom);
        self.distance =
            (self.ideal_distance * (1.0 - self.zoom)).max(MIN_DISTANCE);

        let direction = spherical_direction(self.theta, self.phi);
        self.position = self.target + direction * self.distance;
        self.rebuild_transform_towards(-direction);

        self.input.decay(self.controls.damping);
    }

    /// Move eye and target together along the camera's right/up axes.
    fn apply_pan(&mut self) {
        if self.input.pan == Vec2::ZERO {
            return;
        }
        let right = self.camera.transform.x_axis.truncate();
        let up = self.camera.transform.y_axis.truncate();
        let offset = right * -self.input.pan.x + up * self.input.pan.y;
        self.position += offset;
        self.target += offset;
    }

    fn rebuild_transform(&mut self) {
        let to_target = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        self.rebuild_transform_towards(to_target);
    }

    fn rebuild_transform_towards(&mut self, forward: Vec3) {
        let view = Mat4::look_to_rh(self.position, forward, WORLD_UP);
        self.camera.transform = view.inverse();
    }

    // -- Scene framing --

    /// Frame `bounds`: center the target, derive the ideal distance from
    /// the box height and vertical field of view, place the eye in front
    /// (+Z) of the target, reset zoom and inertia, and rescale the clip
    /// planes around the new distance.
    pub fn reset_to_scene(&mut self, bounds: Aabb) {
        let bounds = if bounds.is_empty() {
            log::warn!("scene has no renderable content; framing the origin");
            Aabb::new(Vec3::ZERO, Vec3::ZERO)
        } else {
            bounds
        };

        self.target = bounds.center();
        let half_height = bounds.max.y - self.target.y;
        let fitted =
            half_height / (self.camera.projection.yfov / 2.0).tan();
        self.ideal_distance = if fitted.is_finite() && fitted >= MIN_IDEAL_DISTANCE {
            fitted
        } else {
            log::warn!(
                "degenerate scene bounds (half height {half_height}); \
                 ideal distance floored to {MIN_IDEAL_DISTANCE}"
            );
            MIN_IDEAL_DISTANCE
        };

        self.camera.projection.znear = self.ideal_distance / 100.0;
        self.camera.projection.zfar = self.ideal_distance * 100.0;

        self.position = self.target + Vec3::new(0.0, 0.0, self.ideal_distance);
        self.distance = self.ideal_distance;
        self.theta = 0.0;
        self.phi = PI / 2.0;
        self.zoom = 0.0;
        self.input.clear();

        log::debug!(
            "camera fitted to scene: target {:?}, ideal distance {}",
            self.target,
            self.ideal_distance
        );

        self.step();
    }

    /// Gather the content bounds of `scene` and frame them.
    pub fn fit_scene(&mut self, scene: &impl SceneBounds) {
        self.reset_to_scene(scene.content_bounds());
    }

    // -- XR --

    /// Inverse of the camera transform as translation + rotation, for
    /// offsetting an XR reference space.
    #[must_use]
    pub fn rigid_transform(&self) -> RigidTransform {
        RigidTransform::from_matrix(&self.camera.transform.inverse())
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl std::fmt::Debug for OrbitCameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitCameraController")
            .field("position", &self.position)
            .field("target", &self.target)
            .field("distance", &self.distance)
            .field("ideal_distance", &self.ideal_distance)
            .field("zoom", &self.zoom)
            .field("input", &self.input)
            .field("gesture", &self.pointers.gesture())
            .field("attached", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

/// Azimuth (around +Y, from +Z towards +X) and polar angle (from +Y) of
/// `offset`, in f64 so the pole clamp survives near pi.
fn spherical_angles(offset: Vec3) -> (f64, f64) {
    let o = offset.as_dvec3();
    let theta = o.x.atan2(o.z);
    let phi = o.x.hypot(o.z).atan2(o.y);
    (theta, phi)
}

/// Unit vector for the given azimuth and polar angle.
fn spherical_direction(theta: f64, phi: f64) -> Vec3 {
    DVec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
        .as_vec3()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Quat;

    use super::*;
    use crate::input::EventQueue;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::ONE)
    }

    fn fitted() -> OrbitCameraController {
        let mut controller = OrbitCameraController::default();
        controller.reset_to_scene(unit_box());
        controller
    }

    fn azimuth(controller: &OrbitCameraController) -> f64 {
        spherical_angles(controller.position() - controller.target()).0
    }

    #[test]
    fn fresh_controller_is_at_rest() {
        let mut controller = OrbitCameraController::default();
        let position = controller.position();
        let transform = controller.transform();
        assert!(position.abs_diff_eq(Vec3::new(-3.0, 3.0, 6.0), 1e-6));

        controller.update(0.0);
        assert!(controller.position().abs_diff_eq(position, 1e-4));
        assert!(controller.transform().abs_diff_eq(transform, 1e-4));
        assert!((controller.distance() - 54.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn update_without_input_is_idempotent() {
        let mut controller = fitted();
        controller.input_mut().roll = 0.4;
        controller.input_mut().pitch = -0.2;
        controller.update(0.0);
        controller.input_mut().clear();

        let position = controller.position();
        let target = controller.target();
        let transform = controller.transform();
        for frame in 1..=20 {
            controller.update(f64::from(frame) * 16.0);
        }
        assert!(controller.position().abs_diff_eq(position, 1e-4));
        assert_eq!(controller.target(), target);
        assert!(controller.transform().abs_diff_eq(transform, 1e-4));
    }

    #[test]
    fn drag_without_shift_rotates() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 100.0, 100.0);
        controller.handle_pointer_move(1, 140.0, 100.0, false);
        let small = *controller.input();
        assert!((small.roll - 40.0 * ROTATE_K).abs() < 1e-6);
        assert_eq!(small.pitch, 0.0);
        assert_eq!(small.pan, Vec2::ZERO);

        controller.handle_pointer_move(1, 240.0, 130.0, false);
        let large = *controller.input();
        assert!(large.roll > small.roll);
        assert!((large.pitch - 30.0 * ROTATE_K).abs() < 1e-6);
    }

    #[test]
    fn rotate_speed_scales_drag() {
        let mut options = Options::default();
        options.controls.rotate_speed = 2.0;
        let mut controller = OrbitCameraController::new(&options);
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.handle_pointer_move(1, 10.0, 0.0, false);
        assert!((controller.input().roll - 20.0 * ROTATE_K).abs() < 1e-6);
    }

    #[test]
    fn drag_with_shift_pans() {
        let mut controller = fitted();
        let distance = controller.distance();
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.handle_pointer_move(1, 20.0, -10.0, true);

        let input = *controller.input();
        assert_eq!(input.roll, 0.0);
        assert_eq!(input.pitch, 0.0);
        let scale = PAN_K * distance / 10.0;
        assert!(input.pan.abs_diff_eq(Vec2::new(20.0 * scale, -10.0 * scale), 1e-6));
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut controller = fitted();
        let offset = controller.position() - controller.target();
        controller.input_mut().pan = Vec2::new(-1.0, 0.5);
        controller.update(0.0);

        // Looking down -Z: right is +X, up is +Y.
        assert!(controller
            .target()
            .abs_diff_eq(Vec3::new(1.0, 0.5, 0.0), 1e-5));
        assert!((controller.position() - controller.target())
            .abs_diff_eq(offset, 1e-4));
    }

    #[test]
    fn spreading_fingers_zooms_in() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 100.0, 100.0);
        controller.handle_pointer_down(2, 200.0, 100.0);
        assert_eq!(controller.gesture(), Gesture::Pinching);

        controller.handle_pointer_move(2, 200.0, 100.0, false);
        assert_eq!(controller.input().zoom, 0.0);

        controller.handle_pointer_move(2, 250.0, 100.0, false);
        let expected = 50.0 * ZOOM_K * PINCH_ZOOM_SCALE;
        assert!((controller.input().zoom - expected).abs() < 1e-6);
        assert_eq!(controller.input().roll, 0.0);
    }

    #[test]
    fn pinching_together_zooms_out() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 100.0, 100.0);
        controller.handle_pointer_down(2, 300.0, 100.0);
        controller.handle_pointer_move(1, 100.0, 100.0, false);
        controller.handle_pointer_move(1, 150.0, 100.0, false);
        assert!(controller.input().zoom < 0.0);

        let distance = controller.distance();
        controller.update(0.0);
        assert!(controller.distance() > distance);
    }

    #[test]
    fn releasing_a_finger_resets_pinch() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.handle_pointer_down(2, 100.0, 0.0);
        controller.handle_pointer_move(2, 100.0, 0.0, false);
        controller.handle_pointer_up(2);
        assert_eq!(controller.gesture(), Gesture::Dragging);

        controller.handle_pointer_down(3, 400.0, 0.0);
        controller.handle_pointer_move(3, 400.0, 0.0, false);
        // Baseline is fresh: the 100 -> 400 jump is not a pinch delta.
        assert_eq!(controller.input().zoom, 0.0);
    }

    #[test]
    fn unknown_pointer_changes_nothing() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.handle_pointer_move(42, 500.0, 500.0, false);
        controller.handle_pointer_up(42);
        assert!(controller.input().is_at_rest());
        assert_eq!(controller.gesture(), Gesture::Dragging);
    }

    #[test]
    fn third_pointer_defines_no_gesture() {
        let mut controller = fitted();
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.handle_pointer_down(2, 50.0, 0.0);
        controller.handle_pointer_down(3, 90.0, 0.0);
        controller.handle_pointer_move(1, 30.0, 30.0, false);
        controller.handle_pointer_move(2, 80.0, 0.0, false);
        controller.handle_pointer_move(2, 10.0, 0.0, true);
        assert_eq!(controller.gesture(), Gesture::Ignored);
        assert!(controller.input().is_at_rest());
    }

    #[test]
    fn scrolling_down_zooms_out() {
        let mut controller = fitted();
        controller.handle_wheel(100.0, WheelDeltaMode::Pixel, 16.0);
        assert!((controller.input().zoom + 100.0 * ZOOM_K).abs() < 1e-7);

        let distance = controller.distance();
        controller.update(0.0);
        assert!(controller.distance() > distance);
    }

    #[test]
    fn wheel_modes_scale_delta() {
        let mut lines = fitted();
        lines.handle_wheel(-3.0, WheelDeltaMode::Line, 20.0);
        assert!((lines.input().zoom - 60.0 * ZOOM_K).abs() < 1e-7);

        let mut pages = fitted();
        pages.set_viewport(800.0, 600.0);
        pages.handle_wheel(-1.0, WheelDeltaMode::Page, 20.0);
        assert!((pages.input().zoom - 600.0 * ZOOM_K).abs() < 1e-6);
    }

    #[test]
    fn huge_zoom_is_clamped_to_upper_bound() {
        let mut controller = fitted();
        controller.input_mut().zoom = 1000.0;
        controller.update(0.0);
        assert_eq!(controller.zoom(), 0.99);
        assert!(controller.distance() > 0.0);
        assert!(controller.transform().is_finite());

        controller.input_mut().zoom = -1000.0;
        controller.update(0.0);
        assert_eq!(controller.zoom(), -5.0);
    }

    #[test]
    fn distance_stays_positive_at_max_zoom() {
        let mut options = Options::default();
        options.controls.max_zoom = 0.999_999_9;
        let mut controller = OrbitCameraController::new(&options);
        controller.reset_to_scene(Aabb::new(Vec3::ZERO, Vec3::ZERO));
        for _ in 0..10 {
            controller.input_mut().zoom = 10.0;
            controller.update(0.0);
            assert!(controller.distance() >= MIN_DISTANCE);
            assert!(controller.position().is_finite());
        }
    }

    #[test]
    fn fit_unit_box_at_default_fov() {
        let controller = fitted();
        let expected = 1.0 / 22.5_f32.to_radians().tan();
        assert!((controller.ideal_distance() - expected).abs() < 1e-4);
        assert!((controller.ideal_distance() - 2.414).abs() < 1e-3);
        assert_eq!(controller.zoom(), 0.0);
        assert!(controller.target().abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(controller
            .position()
            .abs_diff_eq(Vec3::new(0.0, 0.0, expected), 1e-4));

        let projection = controller.camera().projection;
        assert!((projection.znear - expected / 100.0).abs() < 1e-6);
        assert!((projection.zfar - expected * 100.0).abs() < 1e-2);
    }

    #[test]
    fn fit_clears_pending_input() {
        let mut controller = OrbitCameraController::default();
        controller.input_mut().roll = 3.0;
        controller.input_mut().zoom = 0.5;
        controller.reset_to_scene(unit_box());
        assert!(controller.input().is_at_rest());
        assert_eq!(controller.zoom(), 0.0);
    }

    #[test]
    fn fit_degenerate_scene_uses_floor() {
        let mut controller = OrbitCameraController::default();
        controller.reset_to_scene(Aabb::new(Vec3::ZERO, Vec3::ZERO));
        let ideal = controller.ideal_distance();
        assert!(ideal > 0.0 && ideal.is_finite());
        assert_eq!(ideal, MIN_IDEAL_DISTANCE);
        assert!(controller.transform().is_finite());

        controller.reset_to_scene(Aabb::EMPTY);
        assert_eq!(controller.ideal_distance(), MIN_IDEAL_DISTANCE);
        assert!(controller.target().abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn fit_scene_uses_content_bounds() {
        use crate::scene::{Scene, SceneNode};

        let scene = Scene {
            nodes: vec![SceneNode {
                transform: Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)),
                ..SceneNode::with_extent(Vec3::ZERO, Vec3::ZERO)
            }],
        };
        let mut controller = OrbitCameraController::default();
        controller.fit_scene(&scene);
        assert!(controller.target().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn roll_decays_geometrically() {
        let mut controller = fitted();
        controller.input_mut().roll = 1.0;

        let rest = azimuth(&controller);
        let mut previous_step = f64::INFINITY;
        let mut previous = rest;
        for n in 1..=10 {
            controller.update(0.0);
            let expected = 0.75_f32.powi(n);
            assert!((controller.input().roll - expected).abs() < 1e-5);

            // Each frame turns the camera by a shrinking amount.
            let current = azimuth(&controller);
            let step = (current - previous).rem_euclid(2.0 * PI);
            let step = step.min(2.0 * PI - step);
            assert!(step < previous_step);
            previous_step = step;
            previous = current;
        }
    }

    #[test]
    fn pitch_is_clamped_off_the_poles() {
        let mut controller = fitted();
        controller.input_mut().pitch = 10.0;
        controller.update(0.0);
        let offset = controller.position() - controller.target();
        assert!(offset.y > 0.0);
        assert!(controller.transform().is_finite());

        controller.input_mut().pitch = -20.0;
        controller.update(0.0);
        let offset = controller.position() - controller.target();
        assert!(offset.y < 0.0);
        assert!(controller.transform().is_finite());
    }

    #[test]
    fn heading_survives_idle_frames_at_the_pole() {
        let mut controller = OrbitCameraController::default();
        controller.reset_to_scene(Aabb::new(
            Vec3::new(99.0, -1.0, -1.0),
            Vec3::new(101.0, 1.0, 1.0),
        ));
        controller.input_mut().roll = 0.9;
        controller.input_mut().pitch = 10.0;
        controller.update(0.0);
        controller.input_mut().clear();

        let transform = controller.transform();
        let position = controller.position();
        for frame in 1..=5 {
            controller.update(f64::from(frame) * 16.0);
            assert!(controller.transform().abs_diff_eq(transform, 1e-5));
            assert!(controller.position().abs_diff_eq(position, 1e-4));
        }
        // Still looking straight down with the heading from the first frame.
        assert!(controller.camera().forward().abs_diff_eq(Vec3::NEG_Y, 1e-4));
        assert!(controller.transform().x_axis.x < 0.9);
    }

    #[test]
    fn theta_wraps_freely() {
        let mut controller = fitted();
        controller.input_mut().roll = 2.0 * std::f32::consts::PI;
        controller.update(0.0);
        assert!(controller
            .position()
            .abs_diff_eq(Vec3::new(0.0, 0.0, controller.ideal_distance()), 1e-3));
    }

    #[test]
    fn transform_looks_at_target() {
        let mut controller = fitted();
        controller.input_mut().roll = 0.7;
        controller.input_mut().pitch = 0.3;
        controller.update(0.0);

        let camera = controller.camera();
        let to_target = (controller.target() - controller.position()).normalize();
        assert!(camera.forward().abs_diff_eq(to_target, 1e-4));
        assert!(camera.eye().abs_diff_eq(controller.position(), 1e-4));
    }

    #[test]
    fn rigid_transform_inverts_camera_transform() {
        let mut controller = fitted();
        controller.input_mut().roll = 1.1;
        controller.input_mut().pitch = -0.4;
        controller.input_mut().pan = Vec2::new(0.3, 0.2);
        controller.update(0.0);

        let rigid = controller.rigid_transform();
        let product = rigid.to_matrix() * controller.transform();
        let back = RigidTransform::from_matrix(&product);
        assert!(back.position.abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(back.orientation.abs_diff_eq(Quat::IDENTITY, 1e-4)
            || back.orientation.abs_diff_eq(-Quat::IDENTITY, 1e-4));
    }

    #[test]
    fn gamepad_modes() {
        let stick = Vec2::new(0.5, -0.5);

        let mut pan = fitted();
        pan.handle_gamepad(&GamepadInput {
            trigger: true,
            squeeze: true,
            thumbstick: stick,
        });
        assert!(pan.input().pan.abs_diff_eq(stick * GAMEPAD_K, 1e-7));
        assert_eq!(pan.input().zoom, 0.0);

        let mut pan_only = fitted();
        pan_only.handle_gamepad(&GamepadInput {
            trigger: true,
            squeeze: false,
            thumbstick: stick,
        });
        assert_eq!(pan_only.input().roll, 0.0);
        assert_eq!(pan_only.input().pitch, 0.0);

        let mut zoom = fitted();
        zoom.handle_gamepad(&GamepadInput {
            trigger: false,
            squeeze: true,
            thumbstick: stick,
        });
        assert!((zoom.input().zoom + 0.5 * GAMEPAD_K).abs() < 1e-7);
        assert_eq!(zoom.input().roll, 0.0);

        let mut orbit = fitted();
        orbit.handle_gamepad(&GamepadInput {
            thumbstick: Vec2::new(0.005, 0.5),
            ..Default::default()
        });
        assert_eq!(orbit.input().roll, 0.0);
        assert!((orbit.input().pitch - 0.5 * GAMEPAD_K).abs() < 1e-7);
    }

    #[test]
    fn focus_hook_sees_presses() {
        let pressed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pressed);

        let mut controller = fitted();
        controller.set_focus_hook(move |at| sink.borrow_mut().push(at));
        controller.handle_pointer_down(1, 12.0, 34.0);
        controller.handle_pointer_move(1, 20.0, 34.0, false);
        controller.handle_pointer_up(1);

        assert_eq!(*pressed.borrow(), vec![Vec2::new(12.0, 34.0)]);
    }

    #[test]
    fn cleared_focus_hook_stops_firing() {
        let presses = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&presses);

        let mut controller = fitted();
        controller.set_focus_hook(move |_| *sink.borrow_mut() += 1);
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.clear_focus_hook();
        controller.handle_pointer_down(2, 5.0, 5.0);

        assert_eq!(*presses.borrow(), 1);
    }

    #[test]
    fn events_flow_through_subscription() {
        let mut events = EventQueue::new();
        let mut controller = fitted();
        controller.attach(&mut events);
        assert!(controller.is_attached());

        events.push(InputEvent::PointerDown {
            pointer_id: 1,
            x: 0.0,
            y: 0.0,
            is_primary: true,
        });
        events.push(InputEvent::PointerMove {
            pointer_id: 1,
            x: 10.0,
            y: 0.0,
            is_primary: true,
            shift: false,
        });
        assert!(controller.input().is_at_rest());

        controller.process_events();
        assert!(controller.input().roll > 0.0);
        assert_eq!(controller.gesture(), Gesture::Dragging);

        events.push(InputEvent::PointerLeave { pointer_id: 1 });
        controller.process_events();
        assert_eq!(controller.gesture(), Gesture::Idle);
    }

    #[test]
    fn detached_controller_stops_receiving() {
        let mut events = EventQueue::new();
        let mut controller = fitted();
        controller.attach(&mut events);
        controller.handle_pointer_down(1, 0.0, 0.0);
        controller.detach();
        assert!(!controller.is_attached());
        assert_eq!(controller.gesture(), Gesture::Idle);
        assert_eq!(events.subscriber_count(), 0);

        events.push(InputEvent::Wheel {
            delta_y: 100.0,
            mode: WheelDeltaMode::Pixel,
            line_height_px: 16.0,
        });
        controller.process_events();
        assert!(controller.input().is_at_rest());
    }

    #[test]
    fn dropping_controller_unsubscribes() {
        let mut events = EventQueue::new();
        {
            let mut controller = OrbitCameraController::default();
            controller.attach(&mut events);
            assert_eq!(events.subscriber_count(), 1);
        }
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn applying_options_reclamps_zoom() {
        let mut controller = fitted();
        controller.input_mut().zoom = 0.9;
        controller.update(0.0);

        let mut options = Options::default();
        options.controls.max_zoom = 0.5;
        options.camera.fovy = 60.0;
        controller.apply_options(&options);
        assert_eq!(controller.zoom(), 0.5);
        assert!(
            (controller.camera().projection.yfov - 60.0_f32.to_radians()).abs()
                < 1e-6
        );
    }

    #[test]
    fn update_records_timestamp() {
        let mut controller = OrbitCameraController::default();
        assert_eq!(controller.last_update_ms(), None);
        controller.update(1234.5);
        assert_eq!(controller.last_update_ms(), Some(1234.5));
    }

    #[test]
    fn fitting_does_not_record_a_frame() {
        let mut controller = OrbitCameraController::default();
        controller.reset_to_scene(unit_box());
        assert_eq!(controller.last_update_ms(), None);

        controller.update(50.0);
        controller.reset_to_scene(unit_box());
        assert_eq!(controller.last_update_ms(), Some(50.0));
    }
}
