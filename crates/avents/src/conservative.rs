//! A notifier that only keeps its upstream source enabled while subscribed.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

use crate::dispatch::DispatchMode;
use crate::filter::EventFilter;
use crate::notifier::EventNotifier;
use crate::source::EventSource;
use crate::subscription::{EventSubscription, SubscriptionHost};

struct ConservativeState<E> {
    base: EventNotifier<E>,
    enable: Box<dyn Fn()>,
    disable: Box<dyn Fn()>,
    enabled: Cell<bool>,
}

impl<E> ConservativeState<E> {
    fn enable_if_idle(&self) {
        if self.base.state.is_empty() && !self.enabled.get() {
            self.enabled.set(true);
            debug!("Enabling conservative notifier");
            (self.enable)();
        }
    }
}

impl<E> SubscriptionHost<E> for ConservativeState<E> {
    fn detach(&self, subscription: &EventSubscription<E>) {
        // Fires on any unsubscribe while enabled, not only the one that
        // empties the list.
        if !self.base.state.is_empty() && self.enabled.get() {
            self.enabled.set(false);
            debug!(
                subscription_count = self.base.state.len(),
                "Disabling conservative notifier"
            );
            (self.disable)();
        }

        self.base.state.remove(subscription);
    }
}

/// An [`EventNotifier`] that only listens upstream while it has subscriptions.
///
/// The enable callback runs when the first subscription arrives on an idle
/// notifier, and the disable callback runs when a subscription is removed
/// while enabled. Use it to attach and detach an expensive listener (an OS
/// hook, a device callback) lazily. The disable callback should fully undo
/// whatever the enable callback set up.
///
/// The disable condition does not wait for the last subscription: removing
/// any subscription while enabled disables the notifier, and a later
/// `subscribe` only re-enables it once the list is empty again.
pub struct ConservativeEventNotifier<E> {
    state: Rc<ConservativeState<E>>,
}

impl<E: 'static> ConservativeEventNotifier<E> {
    /// Create a conservative notifier from an enable and a disable callback.
    #[must_use]
    pub fn new<En, Dis>(enable: En, disable: Dis) -> Self
    where
        En: Fn() + 'static,
        Dis: Fn() + 'static,
    {
        Self::with_dispatch_mode(enable, disable, DispatchMode::default())
    }

    /// Create a conservative notifier with the given dispatch mode.
    #[must_use]
    pub fn with_dispatch_mode<En, Dis>(enable: En, disable: Dis, mode: DispatchMode) -> Self
    where
        En: Fn() + 'static,
        Dis: Fn() + 'static,
    {
        Self {
            state: Rc::new(ConservativeState {
                base: EventNotifier::with_dispatch_mode(mode),
                enable: Box::new(enable),
                disable: Box::new(disable),
                enabled: Cell::new(false),
            }),
        }
    }

    /// See [`EventNotifier::notify`].
    pub fn notify(&self, avent: &E) {
        self.state.base.notify(avent);
    }

    /// See [`EventNotifier::filter`].
    pub fn filter(&self, filter: EventFilter<E>) {
        self.state.base.filter(filter);
    }

    /// Create a subscription, enabling the notifier first if it has no
    /// subscriptions and is not already enabled.
    pub fn subscribe<F>(&self, handler: F) -> EventSubscription<E>
    where
        F: Fn(&E) + 'static,
    {
        self.subscribe_boxed(Box::new(handler))
    }

    fn subscribe_boxed(&self, handler: Box<dyn Fn(&E)>) -> EventSubscription<E> {
        self.state.enable_if_idle();

        let host = Rc::downgrade(&self.state);
        let host: Weak<dyn SubscriptionHost<E>> = host;
        self.state.base.state.attach(host, handler)
    }

    /// Remove a subscription, disabling the notifier first if it is enabled
    /// and has at least one subscription.
    ///
    /// The disable check runs even when `subscription` is not registered
    /// here.
    pub fn unsubscribe(&self, subscription: &EventSubscription<E>) {
        self.state.detach(subscription);
    }

    /// Returns `true` if the enable callback ran more recently than the
    /// disable callback.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state.enabled.get()
    }

    /// See [`EventNotifier::subscription_count`].
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.state.base.subscription_count()
    }

    /// See [`EventNotifier::filter_count`].
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.state.base.filter_count()
    }

    /// See [`EventNotifier::dispatch_mode`].
    #[must_use]
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.state.base.dispatch_mode()
    }

    /// This notifier, exposed only through its ability to subscribe.
    ///
    /// Subscribing through the view enables the notifier just like
    /// [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn as_event_source(&self) -> Rc<dyn EventSource<E>> {
        Rc::new(self.clone())
    }
}

impl<E: 'static> EventSource<E> for ConservativeEventNotifier<E> {
    fn subscribe(&self, handler: Box<dyn Fn(&E)>) -> EventSubscription<E> {
        self.subscribe_boxed(handler)
    }
}

impl<E> Clone for ConservativeEventNotifier<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> fmt::Debug for ConservativeEventNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConservativeEventNotifier")
            .field("enabled", &self.state.enabled.get())
            .field("notifier", &self.state.base)
            .finish_non_exhaustive()
    }
}
