//! The single per-frame driver.
//!
//! The host calls [`FrameLoop::tick`] once per display frame (from
//! `requestAnimationFrame`, a native loop, or a test). Registered callbacks
//! run in registration order with the same [`FrameTime`].

use std::cell::RefCell;

use cinescroll_common::clock::{FrameClock, FrameTime};

use crate::registry::{CallbackRegistry, Registration};

/// Frame callback scheduler.
pub struct FrameLoop {
    clock: RefCell<FrameClock>,
    callbacks: CallbackRegistry<FrameTime>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            clock: RefCell::new(FrameClock::start()),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Run `callback` every frame until the registration is dropped.
    pub fn register(&self, callback: impl FnMut(&FrameTime) + 'static) -> Registration {
        let registration = self.callbacks.register(callback);
        tracing::trace!(callbacks = self.callbacks.len(), "Frame callback registered");
        registration
    }

    /// Advance the clock to `time_ms` and run every callback.
    pub fn tick(&self, time_ms: f64) -> FrameTime {
        let frame = self.clock.borrow_mut().advance(time_ms);
        self.callbacks.emit(&frame);
        frame
    }

    /// Number of live frame callbacks.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.clock.borrow().frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_tick_runs_callbacks_with_deltas() {
        let frame_loop = FrameLoop::new();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let _reg = {
            let deltas = deltas.clone();
            frame_loop.register(move |ft| deltas.borrow_mut().push(ft.delta_ms))
        };

        frame_loop.tick(1000.0);
        frame_loop.tick(1016.0);
        frame_loop.tick(1032.0);

        assert_eq!(*deltas.borrow(), vec![0.0, 16.0, 16.0]);
        assert_eq!(frame_loop.frames(), 3);
    }

    #[test]
    fn test_dropped_registration_stops_callbacks() {
        let frame_loop = FrameLoop::new();
        let count = Rc::new(Cell::new(0));
        let reg = {
            let count = count.clone();
            frame_loop.register(move |_| count.set(count.get() + 1))
        };

        frame_loop.tick(0.0);
        assert_eq!(frame_loop.callback_count(), 1);
        drop(reg);
        frame_loop.tick(16.0);

        assert_eq!(count.get(), 1);
        assert_eq!(frame_loop.callback_count(), 0);
    }
}
