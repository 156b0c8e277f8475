//! Scroll offset to normalized progress.
//!
//! The engine is the only writer of [`Progress`]. Each [`ProgressEngine::update`]
//! emits exactly once to subscribers, so a subscriber never sees stale
//! intermediate values within a frame.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use cinescroll_story_model::scroll::{Progress, ScrollLayout};

use crate::registry::{CallbackRegistry, Registration};

/// Crossing events for a watched progress range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeEvent {
    /// Entered scrolling forward.
    Enter,
    /// Left past the end scrolling forward.
    Leave,
    /// Re-entered from past the end scrolling backward.
    EnterBack,
    /// Left before the start scrolling backward.
    LeaveBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

fn zone(progress: f64, start: f64, end: f64) -> Zone {
    if progress < start {
        Zone::Before
    } else if progress > end {
        Zone::After
    } else {
        Zone::Inside
    }
}

/// Events fired when progress moves from zone `from` to zone `to`.
///
/// Jumping over the whole range in one update fires both the entry and the
/// exit event, in that order.
fn crossing(from: Zone, to: Zone) -> &'static [RangeEvent] {
    match (from, to) {
        (Zone::Before, Zone::Inside) => &[RangeEvent::Enter],
        (Zone::Inside, Zone::After) => &[RangeEvent::Leave],
        (Zone::After, Zone::Inside) => &[RangeEvent::EnterBack],
        (Zone::Inside, Zone::Before) => &[RangeEvent::LeaveBack],
        (Zone::Before, Zone::After) => &[RangeEvent::Enter, RangeEvent::Leave],
        (Zone::After, Zone::Before) => &[RangeEvent::EnterBack, RangeEvent::LeaveBack],
        _ => &[],
    }
}

/// Maps the smoothed scroll offset onto `[0, 1]`.
pub struct ProgressEngine {
    layout: ScrollLayout,
    offset: f64,
    current: Rc<Cell<Progress>>,
    subscribers: CallbackRegistry<Progress>,
}

impl ProgressEngine {
    pub fn new(layout: ScrollLayout) -> Self {
        Self {
            layout,
            offset: 0.0,
            current: Rc::new(Cell::new(Progress::ZERO)),
            subscribers: CallbackRegistry::new(),
        }
    }

    /// Recompute progress for `offset` and notify subscribers once.
    pub fn update(&mut self, offset: f64) -> Progress {
        self.offset = offset;
        let progress = Progress::from_offset(offset, self.layout.extent());
        self.current.set(progress);
        self.subscribers.emit(&progress);
        progress
    }

    /// Recompute the scrollable extent. Subscribers hear about the new
    /// value on the next update.
    pub fn resize(&mut self, viewport_height: f64, document_height: f64) {
        self.layout = ScrollLayout::new(viewport_height, document_height);
        self.current
            .set(Progress::from_offset(self.offset, self.layout.extent()));
        tracing::debug!(
            viewport_height,
            document_height,
            extent = self.layout.extent(),
            "Progress extent recomputed"
        );
    }

    pub fn current_progress(&self) -> Progress {
        self.current.get()
    }

    /// Shared cell always holding the latest progress.
    pub fn progress_cell(&self) -> Rc<Cell<Progress>> {
        Rc::clone(&self.current)
    }

    pub fn layout(&self) -> ScrollLayout {
        self.layout
    }

    /// Maximum scroll offset.
    pub fn extent(&self) -> f64 {
        self.layout.extent()
    }

    /// Receive every emitted progress value.
    pub fn subscribe(&self, callback: impl FnMut(&Progress) + 'static) -> Registration {
        self.subscribers.register(callback)
    }

    /// Handle to the subscriber list, for owners that register on behalf of
    /// others.
    pub fn subscribers(&self) -> CallbackRegistry<Progress> {
        self.subscribers.clone()
    }

    /// Watch `[start, end]` and receive crossing events.
    pub fn watch_range(
        &self,
        start: f64,
        end: f64,
        callback: impl FnMut(RangeEvent) + 'static,
    ) -> Registration {
        watch_range_on(&self.subscribers, self.current.get(), start, end, callback)
    }

    /// Watch `[threshold, 1]`.
    pub fn watch_threshold(
        &self,
        threshold: f64,
        callback: impl FnMut(RangeEvent) + 'static,
    ) -> Registration {
        self.watch_range(threshold, 1.0, callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber and watch.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

/// Register a range watch on an arbitrary progress registry, starting from
/// `initial`. No event fires for the initial position.
pub fn watch_range_on(
    subscribers: &CallbackRegistry<Progress>,
    initial: Progress,
    start: f64,
    end: f64,
    mut callback: impl FnMut(RangeEvent) + 'static,
) -> Registration {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let mut last = zone(initial.value(), start, end);
    subscribers.register(move |progress: &Progress| {
        let now = zone(progress.value(), start, end);
        for event in crossing(last, now) {
            callback(*event);
        }
        last = now;
    })
}
