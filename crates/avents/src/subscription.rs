//! Subscription handles linking a handler to its notifier.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;
use uuid::Uuid;

use crate::filter::{EventFilter, admits};

/// The owner a subscription routes its own `unsubscribe` through.
///
/// Implemented by the plain and the conservative notifier so that detaching
/// from a subscription handle goes through the same entry point a caller of
/// the owning notifier would use.
pub(crate) trait SubscriptionHost<E> {
    fn detach(&self, subscription: &EventSubscription<E>);
}

/// Identifier of a subscription, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription:{}", self.0)
    }
}

struct SubscriptionState<E> {
    id: SubscriptionId,
    host: RefCell<Option<Weak<dyn SubscriptionHost<E>>>>,
    filters: RefCell<Vec<EventFilter<E>>>,
    handler: Box<dyn Fn(&E)>,
}

/// An endpoint for avents distributed by a notifier.
///
/// Handles are cheap to clone; every clone denotes the same subscription and
/// equality is identity. A subscription only holds a weak link back to its
/// notifier, so keeping a handle around does not keep the notifier alive.
pub struct EventSubscription<E> {
    state: Rc<SubscriptionState<E>>,
}

impl<E> EventSubscription<E> {
    pub(crate) fn new(host: Weak<dyn SubscriptionHost<E>>, handler: Box<dyn Fn(&E)>) -> Self {
        Self {
            state: Rc::new(SubscriptionState {
                id: SubscriptionId::new(),
                host: RefCell::new(Some(host)),
                filters: RefCell::new(Vec::new()),
                handler,
            }),
        }
    }

    /// Identifier of this subscription.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.state.id
    }

    /// Add a filter that avents must pass before reaching this subscription's
    /// handler. Filters run in the order they were added.
    pub fn filter(&self, filter: EventFilter<E>) {
        self.state.filters.borrow_mut().push(filter);
    }

    /// Number of filters added to this subscription.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.state.filters.borrow().len()
    }

    /// Run the avent through this subscription's filters and, if every one of
    /// them admits it, hand it to the handler.
    ///
    /// Notifiers call this during dispatch. Calling it directly bypasses the
    /// notifier's own filters.
    pub fn handle_avent(&self, avent: &E) {
        if !admits(&self.state.filters, avent) {
            trace!(subscription_id = %self.state.id, "Avent rejected by subscription filter");
            return;
        }

        (self.state.handler)(avent);
    }

    /// Unlink this subscription from its notifier so it receives no further
    /// avents.
    ///
    /// Returns `false` if this subscription had already been unsubscribed.
    /// If the notifier itself is already gone the link is simply cleared.
    /// The link is only cleared once the notifier has removed the
    /// subscription, so a panic while detaching leaves it linked and a later
    /// call can retry.
    pub fn unsubscribe(&self) -> bool {
        let Some(host) = self.state.host.borrow().clone() else {
            return false;
        };

        if let Some(host) = host.upgrade() {
            host.detach(self);
        } else {
            trace!(subscription_id = %self.state.id, "Notifier already dropped");
        }

        // A re-entrant call from inside `detach` may have cleared it already.
        self.state.host.borrow_mut().take();
        true
    }

    /// Returns `true` while this subscription is linked to its notifier.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.state.host.borrow().is_some()
    }
}

impl<E> Clone for EventSubscription<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> PartialEq for EventSubscription<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<E> Eq for EventSubscription<E> {}

impl<E> fmt::Debug for EventSubscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("id", &self.state.id)
            .field("subscribed", &self.is_subscribed())
            .field("filter_count", &self.filter_count())
            .finish_non_exhaustive()
    }
}
