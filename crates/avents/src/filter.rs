//! Predicate filters for notifiers and subscriptions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Admits or rejects avents by way of a predicate.
///
/// Cloning a filter shares the predicate, so the same filter can be attached
/// to a notifier and to any number of subscriptions.
pub struct EventFilter<E> {
    predicate: Rc<dyn Fn(&E) -> bool>,
}

impl<E> EventFilter<E> {
    /// Create a filter from a predicate.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        Self {
            predicate: Rc::new(predicate),
        }
    }

    /// Returns `true` if the avent passes this filter.
    #[must_use]
    pub fn verify(&self, avent: &E) -> bool {
        (self.predicate)(avent)
    }
}

impl<E> Clone for EventFilter<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<E> fmt::Debug for EventFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFilter").finish_non_exhaustive()
    }
}

impl<E, P> From<P> for EventFilter<E>
where
    P: Fn(&E) -> bool + 'static,
{
    fn from(predicate: P) -> Self {
        Self::new(predicate)
    }
}

/// Walks a filter chain in insertion order, stopping at the first rejection.
///
/// The chain is re-read by position on every step and no borrow is held while
/// a predicate runs, so a predicate may append filters to the same chain.
pub(crate) fn admits<E>(filters: &RefCell<Vec<EventFilter<E>>>, avent: &E) -> bool {
    let mut index = 0;
    loop {
        let Some(filter) = filters.borrow().get(index).cloned() else {
            return true;
        };
        if !filter.verify(avent) {
            return false;
        }
        index = index.saturating_add(1);
    }
}
