//! The single authority for the current act.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use cinescroll_story_model::act::{ActId, ActTable};
use cinescroll_story_model::scroll::Progress;

use crate::registry::{CallbackRegistry, Registration};

/// The current act changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActChange {
    pub from: ActId,
    pub to: ActId,
    /// Progress that caused the change.
    pub progress: Progress,
}

/// Resolves progress to an act once per tick and reports changes.
pub struct ActResolver {
    table: ActTable,
    current: Rc<Cell<ActId>>,
    listeners: CallbackRegistry<ActChange>,
}

impl ActResolver {
    /// Starts in the table's first act.
    pub fn new(table: ActTable) -> Self {
        let current = Rc::new(Cell::new(table.first()));
        Self {
            table,
            current,
            listeners: CallbackRegistry::new(),
        }
    }

    /// Resolve `progress`. Listeners hear about a change exactly once.
    pub fn resolve(&mut self, progress: Progress) -> Option<ActChange> {
        let act = self.table.resolve(progress.value());
        if act == self.current.get() {
            return None;
        }

        let change = ActChange {
            from: self.current.get(),
            to: act,
            progress,
        };
        self.current.set(act);
        tracing::debug!(from = %change.from, to = %change.to, %progress, "Act changed");
        self.listeners.emit(&change);
        Some(change)
    }

    pub fn current(&self) -> ActId {
        self.current.get()
    }

    /// Shared cell always holding the current act.
    pub fn act_cell(&self) -> Rc<Cell<ActId>> {
        Rc::clone(&self.current)
    }

    /// Handle to the listener list.
    pub fn listeners(&self) -> CallbackRegistry<ActChange> {
        self.listeners.clone()
    }

    pub fn table(&self) -> &ActTable {
        &self.table
    }

    pub fn on_change(&self, callback: impl FnMut(&ActChange) + 'static) -> Registration {
        self.listeners.register(callback)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_changes_reported_once() {
        let mut resolver = ActResolver::new(ActTable::five_act());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let _reg = {
            let changes = changes.clone();
            resolver.on_change(move |c| changes.borrow_mut().push((c.from, c.to)))
        };

        for p in [0.0, 0.1, 0.2, 0.25, 0.34, 0.5, 1.0, 1.0, 0.0] {
            resolver.resolve(Progress::new(p));
        }

        assert_eq!(
            *changes.borrow(),
            vec![
                (ActId(1), ActId(2)),
                (ActId(2), ActId(3)),
                (ActId(3), ActId(5)),
                (ActId(5), ActId(1)),
            ]
        );
        assert_eq!(resolver.current(), ActId(1));
    }

    #[test]
    fn test_starts_in_first_act() {
        let mut resolver = ActResolver::new(ActTable::five_act());
        assert_eq!(resolver.current(), ActId(1));
        assert!(resolver.resolve(Progress::ZERO).is_none());
    }
}
