//! Avents - synchronous in-process event notification.
//!
//! This crate provides:
//! - [`EventNotifier`], a hub that distributes avents (events of one payload
//!   type) to its subscriptions
//! - [`EventSubscription`] handles carrying a handler and a private filter
//!   chain
//! - [`EventFilter`] predicates that can gate a whole notifier or a single
//!   subscription
//! - [`EventSource`], the subscribe-only view handed to consumers
//! - [`ConservativeEventNotifier`], which enables an upstream source only
//!   while someone is subscribed
//!
//! # Architecture
//!
//! Dispatch is synchronous and single-threaded. `notify` runs the notifier's
//! filters, then visits every subscription in the order they were created.
//! Each subscription runs its own filters before invoking its handler.
//! Nothing is queued and no handler failure is contained: a panic unwinds out
//! of `notify` and later subscriptions miss that avent.
//!
//! # Example
//!
//! ```rust
//! use avents::{EventFilter, EventNotifier};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let notifier: EventNotifier<i32> = EventNotifier::new();
//! notifier.filter(EventFilter::new(|x: &i32| *x > 0));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen_clone = Rc::clone(&seen);
//! let subscription = notifier.subscribe(move |x| seen_clone.borrow_mut().push(*x));
//!
//! notifier.notify(&5);
//! notifier.notify(&-1);
//! assert_eq!(*seen.borrow(), vec![5]);
//!
//! assert!(subscription.unsubscribe());
//! assert!(!subscription.unsubscribe());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod prelude;

mod conservative;
mod dispatch;
mod filter;
mod notifier;
mod source;
mod subscription;

pub use conservative::ConservativeEventNotifier;
pub use dispatch::DispatchMode;
pub use filter::EventFilter;
pub use notifier::EventNotifier;
pub use source::EventSource;
pub use subscription::{EventSubscription, SubscriptionId};
