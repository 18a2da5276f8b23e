//! The notifier hub distributing avents to subscriptions.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

use crate::dispatch::DispatchMode;
use crate::filter::{EventFilter, admits};
use crate::source::EventSource;
use crate::subscription::{EventSubscription, SubscriptionHost};

/// Shared state behind an [`EventNotifier`] handle.
pub(crate) struct NotifierState<E> {
    filters: RefCell<Vec<EventFilter<E>>>,
    subscriptions: RefCell<Vec<EventSubscription<E>>>,
    mode: DispatchMode,
}

impl<E> NotifierState<E> {
    fn new(mode: DispatchMode) -> Self {
        Self {
            filters: RefCell::new(Vec::new()),
            subscriptions: RefCell::new(Vec::new()),
            mode,
        }
    }

    fn notify(&self, avent: &E) {
        if !admits(&self.filters, avent) {
            trace!("Avent rejected by notifier filter");
            return;
        }

        let visited = match self.mode {
            DispatchMode::Live => {
                let mut index: usize = 0;
                loop {
                    let Some(subscription) = self.subscriptions.borrow().get(index).cloned() else {
                        break index;
                    };
                    subscription.handle_avent(avent);
                    index = index.saturating_add(1);
                }
            },
            DispatchMode::Snapshot => {
                let snapshot = self.subscriptions.borrow().clone();
                for subscription in &snapshot {
                    subscription.handle_avent(avent);
                }
                snapshot.len()
            },
        };

        trace!(visited, "Avent dispatched");
    }

    fn push_filter(&self, filter: EventFilter<E>) {
        self.filters.borrow_mut().push(filter);
    }

    /// Create a subscription routed through `host` and append it to the list.
    pub(crate) fn attach(
        &self,
        host: Weak<dyn SubscriptionHost<E>>,
        handler: Box<dyn Fn(&E)>,
    ) -> EventSubscription<E> {
        let subscription = EventSubscription::new(host, handler);

        let count = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            subscriptions.push(subscription.clone());
            subscriptions.len()
        };

        debug!(
            subscription_id = %subscription.id(),
            subscription_count = count,
            "Subscription created"
        );
        subscription
    }

    /// Remove a subscription by identity. Unknown subscriptions are ignored.
    pub(crate) fn remove(&self, subscription: &EventSubscription<E>) {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let Some(index) = subscriptions.iter().position(|s| s == subscription) else {
            trace!(subscription_id = %subscription.id(), "Subscription not found");
            return;
        };
        let removed = subscriptions.remove(index);
        let count = subscriptions.len();
        drop(subscriptions);
        drop(removed);

        debug!(
            subscription_id = %subscription.id(),
            subscription_count = count,
            "Subscription removed"
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.subscriptions.borrow().is_empty()
    }
}

impl<E> SubscriptionHost<E> for NotifierState<E> {
    fn detach(&self, subscription: &EventSubscription<E>) {
        self.remove(subscription);
    }
}

/// A source of avents distributed to any number of [`EventSubscription`]s.
///
/// Dispatch is synchronous: [`notify`](Self::notify) returns once every
/// subscription has handled (or filtered out) the avent. A panicking filter or
/// handler unwinds straight out of `notify` and the remaining subscriptions
/// are not visited for that avent.
///
/// Cloning the handle shares the notifier. A handler that captures a handle to
/// its own notifier keeps the notifier alive until that subscription is
/// unsubscribed.
pub struct EventNotifier<E> {
    pub(crate) state: Rc<NotifierState<E>>,
}

impl<E: 'static> EventNotifier<E> {
    /// Create a notifier that dispatches over the live subscription list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatch_mode(DispatchMode::default())
    }

    /// Create a notifier with the given dispatch mode.
    #[must_use]
    pub fn with_dispatch_mode(mode: DispatchMode) -> Self {
        Self {
            state: Rc::new(NotifierState::new(mode)),
        }
    }

    /// Distribute an avent to every live subscription.
    ///
    /// The notifier's own filters run first; if any rejects the avent it is
    /// dropped silently. Otherwise each subscription, in the order it was
    /// created, runs its own filters and then its handler.
    pub fn notify(&self, avent: &E) {
        self.state.notify(avent);
    }

    /// Add a filter that every avent must pass before any subscription sees
    /// it. Filters cannot be removed.
    pub fn filter(&self, filter: EventFilter<E>) {
        self.state.push_filter(filter);
    }

    /// Create a subscription whose handler receives every avent that passes
    /// this notifier's filters and the subscription's own.
    ///
    /// Each call creates a distinct subscription, even for the same handler.
    pub fn subscribe<F>(&self, handler: F) -> EventSubscription<E>
    where
        F: Fn(&E) + 'static,
    {
        self.subscribe_boxed(Box::new(handler))
    }

    fn subscribe_boxed(&self, handler: Box<dyn Fn(&E)>) -> EventSubscription<E> {
        let host = Rc::downgrade(&self.state);
        let host: Weak<dyn SubscriptionHost<E>> = host;
        self.state.attach(host, handler)
    }

    /// Remove a subscription from this notifier.
    ///
    /// Subscriptions that are not (or no longer) registered here are ignored.
    /// The subscription's own link is left untouched; prefer
    /// [`EventSubscription::unsubscribe`].
    pub fn unsubscribe(&self, subscription: &EventSubscription<E>) {
        self.state.remove(subscription);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.state.len()
    }

    /// Number of notifier-level filters.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.state.filters.borrow().len()
    }

    /// The dispatch mode this notifier was created with.
    #[must_use]
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.state.mode
    }

    /// This notifier, exposed only through its ability to subscribe.
    #[must_use]
    pub fn as_event_source(&self) -> Rc<dyn EventSource<E>> {
        Rc::new(self.clone())
    }
}

impl<E: 'static> EventSource<E> for EventNotifier<E> {
    fn subscribe(&self, handler: Box<dyn Fn(&E)>) -> EventSubscription<E> {
        self.subscribe_boxed(handler)
    }
}

impl<E: 'static> Default for EventNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventNotifier<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> fmt::Debug for EventNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("subscription_count", &self.state.len())
            .field("filter_count", &self.state.filters.borrow().len())
            .field("dispatch_mode", &self.state.mode)
            .finish()
    }
}
