//! Event-source port between the host UI and the camera.
//!
//! The host owns an [`EventSource`] (usually an [`EventQueue`]) and feeds it
//! native events as they arrive. The controller subscribes at attach time
//! and holds the returned [`Subscription`]; dropping the subscription is
//! the unsubscribe, after which the source stops queuing for it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use super::event::InputEvent;

type SharedQueue = Rc<RefCell<VecDeque<InputEvent>>>;

/// Something the controller can subscribe to for input events.
pub trait EventSource {
    /// Start delivering events to a new subscription.
    fn subscribe(&mut self) -> Subscription;
}

/// Receiving end of an event subscription.
#[derive(Debug)]
pub struct Subscription {
    queue: SharedQueue,
}

impl Subscription {
    /// Take every event delivered since the last drain, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of events waiting to be drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

/// Single-threaded fan-out queue the host pushes native events into.
#[derive(Debug, Default)]
pub struct EventQueue {
    subscribers: Vec<Weak<RefCell<VecDeque<InputEvent>>>>,
}

impl EventQueue {
    /// Create a queue with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live subscription. Subscriptions that have
    /// been dropped are pruned.
    pub fn push(&mut self, event: InputEvent) {
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(event);
                true
            }
            None => false,
        });
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl EventSource for EventQueue {
    fn subscribe(&mut self) -> Subscription {
        let queue = SharedQueue::default();
        self.subscribers.push(Rc::downgrade(&queue));
        Subscription { queue }
    }
}
