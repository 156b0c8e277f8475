//! Callback registries with scoped registrations.
//!
//! Every subscription in the scroll core returns a [`Registration`]. Dropping
//! it (or calling [`Registration::cancel`]) removes the callback, so a
//! component that owns its registrations cannot leak listeners.
//!
//! Emission iterates over a snapshot of the callbacks, so a callback may
//! register or cancel other callbacks (including itself) while it runs.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<A> = Rc<RefCell<dyn FnMut(&A)>>;

struct Entry<A> {
    id: u64,
    callback: Callback<A>,
}

struct Inner<A> {
    next_id: u64,
    entries: Vec<Entry<A>>,
}

/// An ordered list of callbacks receiving `&A`.
///
/// Cloning yields another handle to the same list.
pub struct CallbackRegistry<A> {
    inner: Rc<RefCell<Inner<A>>>,
}

impl<A> Clone for CallbackRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: 'static> Default for CallbackRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> CallbackRegistry<A> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Append a callback. It stays registered until the returned guard is
    /// dropped or cancelled, or the registry is cleared.
    pub fn register(&self, callback: impl FnMut(&A) + 'static) -> Registration {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                callback: Rc::new(RefCell::new(callback)),
            });
            id
        };

        let weak: Weak<RefCell<Inner<A>>> = Rc::downgrade(&self.inner);
        Registration::new(move || {
            if let Some(inner) = weak.upgrade() {
                // Dropped outside the borrow, like `clear`.
                let removed = {
                    let mut inner = inner.borrow_mut();
                    let index = inner.entries.iter().position(|e| e.id == id);
                    index.map(|index| inner.entries.remove(index))
                };
                drop(removed);
            }
        })
    }

    /// Call every registered callback in registration order.
    ///
    /// Callbacks removed during emission are skipped. A callback that is
    /// already running (re-entrant emit) is not called again.
    pub fn emit(&self, arg: &A) {
        let snapshot: Vec<(u64, Callback<A>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|e| (e.id, Rc::clone(&e.callback)))
            .collect();

        for (id, callback) in snapshot {
            if !self.contains(id) {
                continue;
            }
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(arg);
            }
        }
    }

    /// Number of live callbacks.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every callback. Outstanding guards become no-ops.
    pub fn clear(&self) {
        // Take the entries out first so callback destructors run without the
        // registry borrowed.
        let entries = std::mem::take(&mut self.inner.borrow_mut().entries);
        drop(entries);
    }

    fn contains(&self, id: u64) -> bool {
        self.inner.borrow().entries.iter().any(|e| e.id == id)
    }
}

/// Guard for one registered callback. Unsubscribes on drop.
#[must_use = "dropping a Registration immediately unsubscribes the callback"]
pub struct Registration {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    /// Whether this guard still owns a subscription.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.is_active())
            .finish()
    }
}
