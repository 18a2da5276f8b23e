//! Subscribe-only view of a notifier.

use crate::subscription::EventSubscription;

/// Exposes only the ability to subscribe.
///
/// Notifiers hand this out (see [`EventNotifier::as_event_source`]) so that
/// consumers can listen without being able to notify, filter, or unsubscribe
/// others through the same handle.
///
/// [`EventNotifier::as_event_source`]: crate::EventNotifier::as_event_source
pub trait EventSource<E> {
    /// Create a subscription that is handed every avent dispatched on this
    /// source.
    fn subscribe(&self, handler: Box<dyn Fn(&E)>) -> EventSubscription<E>;
}
