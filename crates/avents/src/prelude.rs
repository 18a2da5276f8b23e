//! Prelude module - commonly used types for convenient import.
//!
//! Use `use avents::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use avents::prelude::*;
//!
//! let notifier: EventNotifier<&'static str> = EventNotifier::new();
//! let source = notifier.as_event_source();
//! let subscription = source.subscribe(Box::new(|name: &&str| println!("hello {name}")));
//!
//! notifier.notify(&"world");
//! assert!(subscription.unsubscribe());
//! ```

// Notifiers
pub use crate::{ConservativeEventNotifier, DispatchMode, EventNotifier};

// Subscriptions
pub use crate::{EventSource, EventSubscription, SubscriptionId};

// Filters
pub use crate::EventFilter;
