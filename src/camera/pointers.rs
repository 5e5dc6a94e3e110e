//! Active pointer tracking and the drag / pinch gesture state machine.

use glam::Vec2;
use rustc_hash::FxHashMap;

/// Gesture implied by the number of active pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// No pointer is down.
    Idle,
    /// One pointer: rotate, or pan while shift is held.
    Dragging,
    /// Two pointers: pinch zoom.
    Pinching,
    /// Three or more pointers: no gesture.
    Ignored,
}

/// Camera-relevant outcome of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMotion {
    /// The move produced no gesture input.
    None,
    /// Single-pointer drag by a screen-space delta.
    Drag(Vec2),
    /// Change of the distance between two pointers (positive = apart).
    Pinch(f32),
}

#[derive(Debug, Clone, Copy)]
struct TrackedPointer {
    position: Vec2,
    is_primary: bool,
}

/// Last known screen position of every active pointer, plus the pinch
/// baseline.
///
/// The baseline is the inter-pointer distance at the previous two-pointer
/// move. It is cleared whenever the pointer count changes, so the first
/// move after entering [`Gesture::Pinching`] only re-establishes it.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pointers: FxHashMap<i32, TrackedPointer>,
    pinch_baseline: Option<f32>,
}

impl PointerTracker {
    /// Create a tracker with no active pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Whether no pointer is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Whether `pointer_id` is currently tracked.
    #[must_use]
    pub fn contains(&self, pointer_id: i32) -> bool {
        self.pointers.contains_key(&pointer_id)
    }

    /// Current gesture state.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        match self.pointers.len() {
            0 => Gesture::Idle,
            1 => Gesture::Dragging,
            2 => Gesture::Pinching,
            _ => Gesture::Ignored,
        }
    }

    /// Distance between the two pointers at the last pinch sample, if a
    /// baseline has been established.
    #[must_use]
    pub fn pinch_baseline(&self) -> Option<f32> {
        self.pinch_baseline
    }

    /// Register a pressed pointer. Pressing an already tracked pointer only
    /// refreshes its position.
    pub fn press(&mut self, pointer_id: i32, position: Vec2, is_primary: bool) {
        let pointer = TrackedPointer {
            position,
            is_primary,
        };
        if self.pointers.insert(pointer_id, pointer).is_none() {
            self.pinch_baseline = None;
        }
    }

    /// Forget a released pointer. Unknown ids are ignored.
    pub fn release(&mut self, pointer_id: i32) {
        if self.pointers.remove(&pointer_id).is_some() {
            self.pinch_baseline = None;
        } else {
            log::trace!("release of untracked pointer {pointer_id}");
        }
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.pinch_baseline = None;
    }

    /// Record a new position for `pointer_id` and report the gesture input
    /// it produced.
    pub fn move_to(&mut self, pointer_id: i32, position: Vec2) -> PointerMotion {
        let Some(pointer) = self.pointers.get_mut(&pointer_id) else {
            log::trace!("move of untracked pointer {pointer_id}");
            return PointerMotion::None;
        };
        let previous = pointer.position;
        pointer.position = position;
        let is_primary = pointer.is_primary;

        match self.gesture() {
            Gesture::Dragging if is_primary => {
                PointerMotion::Drag(position - previous)
            }
            Gesture::Pinching => {
                let spread = self.spread();
                let motion = self
                    .pinch_baseline
                    .map_or(PointerMotion::None, |baseline| {
                        PointerMotion::Pinch(spread - baseline)
                    });
                self.pinch_baseline = Some(spread);
                motion
            }
            _ => PointerMotion::None,
        }
    }

    /// Distance between the first two tracked pointers.
    fn spread(&self) -> f32 {
        let mut positions = self.pointers.values().map(|p| p.position);
        match (positions.next(), positions.next()) {
            (Some(a), Some(b)) => a.distance(b),
            _ => 0.0,
        }
    }
}
