//! Recording handlers and counting callbacks.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Records every avent handed to the handlers it creates.
///
/// Each handler carries a tag, so a single recorder shared by several
/// subscriptions also captures the order in which they were notified.
pub struct Recorder<E> {
    entries: Rc<RefCell<Vec<(&'static str, E)>>>,
}

impl<E: Clone + 'static> Recorder<E> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A handler that records each avent under `tag`.
    pub fn handler(&self, tag: &'static str) -> impl Fn(&E) + use<E> {
        let entries = Rc::clone(&self.entries);
        move |avent: &E| entries.borrow_mut().push((tag, avent.clone()))
    }

    /// Recorded avents in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, avent)| avent.clone())
            .collect()
    }

    /// Recorded avents with the tag of the handler that received them.
    #[must_use]
    pub fn tagged(&self) -> Vec<(&'static str, E)> {
        self.entries.borrow().clone()
    }

    /// Recorded avents received by handlers tagged `tag`.
    #[must_use]
    pub fn events_for(&self, tag: &str) -> Vec<E> {
        self.entries
            .borrow()
            .iter()
            .filter(|(t, _)| *t == tag)
            .map(|(_, avent)| avent.clone())
            .collect()
    }

    /// Number of recorded avents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<E: Clone + 'static> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<E> fmt::Debug for Recorder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("len", &self.entries.borrow().len())
            .finish()
    }
}

/// Counts invocations of the zero-argument callbacks it creates, e.g. the
/// enable and disable callbacks of a conservative notifier.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Rc<Cell<usize>>,
}

impl CallCounter {
    /// Create a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that bumps this counter.
    pub fn callback(&self) -> impl Fn() + use<> {
        let calls = Rc::clone(&self.calls);
        move || calls.set(calls.get().saturating_add(1))
    }

    /// Number of times any of this counter's callbacks ran.
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.get()
    }
}
