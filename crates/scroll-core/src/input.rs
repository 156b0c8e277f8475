//! Scroll input source.
//!
//! Hosts forward wheel, touch, programmatic, and resize input as
//! [`ScrollEvent`]s. Listeners receive them in registration order.

use cinescroll_story_model::scroll::ScrollEvent;

use crate::registry::{CallbackRegistry, Registration};

/// Fan-out point for scroll input.
#[derive(Default)]
pub struct ScrollEventHub {
    listeners: CallbackRegistry<ScrollEvent>,
}

impl ScrollEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every dispatched event until the registration is dropped.
    pub fn listen(&self, callback: impl FnMut(&ScrollEvent) + 'static) -> Registration {
        self.listeners.register(callback)
    }

    pub fn dispatch(&self, event: ScrollEvent) {
        tracing::trace!(?event, "Dispatching scroll input");
        self.listeners.emit(&event);
    }

    /// Dispatch a batch in order.
    pub fn dispatch_all(&self, events: impl IntoIterator<Item = ScrollEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
