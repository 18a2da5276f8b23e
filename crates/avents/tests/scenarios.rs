//! End-to-end notification scenarios.
//!
//! Exercises the public API the way an embedding application would: a
//! producer owns the notifier, consumers only see the `EventSource` view.

#![allow(clippy::arithmetic_side_effects, clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use avents::prelude::*;
use avents_test::{CallCounter, Recorder, init_test_logging};

/// A producer that keeps the full notifier and publishes only the view.
struct Thermometer {
    readings: EventNotifier<i32>,
}

impl Thermometer {
    fn new() -> Self {
        Self {
            readings: EventNotifier::new(),
        }
    }

    fn readings(&self) -> Rc<dyn EventSource<i32>> {
        self.readings.as_event_source()
    }

    fn sample(&self, value: i32) {
        self.readings.notify(&value);
    }
}

#[test]
fn test_positive_filter_scenario() {
    init_test_logging();
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    let _s1 = notifier.subscribe(recorder.handler("h1"));
    notifier.filter(EventFilter::new(|x: &i32| *x > 0));

    notifier.notify(&5);
    assert_eq!(recorder.events(), vec![5]);

    notifier.notify(&-1);
    assert_eq!(recorder.events(), vec![5]);
}

#[test]
fn test_ordering_and_unsubscribe_scenario() {
    init_test_logging();
    let recorder: Recorder<String> = Recorder::new();
    let notifier: EventNotifier<String> = EventNotifier::new();
    let s1 = notifier.subscribe(recorder.handler("h1"));
    let _s2 = notifier.subscribe(recorder.handler("h2"));

    notifier.notify(&"a".to_string());
    assert_eq!(
        recorder.tagged(),
        vec![("h1", "a".to_string()), ("h2", "a".to_string())]
    );

    recorder.clear();
    assert!(s1.unsubscribe());
    notifier.notify(&"b".to_string());
    assert_eq!(recorder.tagged(), vec![("h2", "b".to_string())]);
}

#[test]
fn test_conservative_scenario() {
    init_test_logging();
    let enable = CallCounter::new();
    let disable = CallCounter::new();
    let notifier: ConservativeEventNotifier<u8> =
        ConservativeEventNotifier::new(enable.callback(), disable.callback());

    let subscription = notifier.subscribe(|_| {});
    assert_eq!(enable.count(), 1);
    assert!(notifier.is_enabled());

    assert!(subscription.unsubscribe());
    assert_eq!(disable.count(), 1);
    assert!(!notifier.is_enabled());
}

#[test]
fn test_consumer_through_event_source() {
    init_test_logging();
    let thermometer = Thermometer::new();
    let recorder: Recorder<i32> = Recorder::new();

    let readings = thermometer.readings();
    let subscription = readings.subscribe(Box::new(recorder.handler("display")));
    subscription.filter(EventFilter::new(|celsius: &i32| *celsius >= 20));

    for value in [18, 21, 19, 25] {
        thermometer.sample(value);
    }
    assert_eq!(recorder.events(), vec![21, 25]);

    assert!(subscription.unsubscribe());
    thermometer.sample(30);
    assert_eq!(recorder.events(), vec![21, 25]);
    assert_eq!(thermometer.readings.subscription_count(), 0);
}

#[test]
fn test_shared_filter_on_notifier_and_subscription() {
    let calls = Rc::new(Cell::new(0_usize));
    let calls_clone = Rc::clone(&calls);
    let even = EventFilter::new(move |x: &i32| {
        calls_clone.set(calls_clone.get() + 1);
        x % 2 == 0
    });

    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    notifier.filter(even.clone());
    let subscription = notifier.subscribe(recorder.handler("sub"));
    subscription.filter(even);

    notifier.notify(&1);
    notifier.notify(&2);

    // 1 is rejected at the notifier; 2 passes both.
    assert_eq!(calls.get(), 3);
    assert_eq!(recorder.events(), vec![2]);
}

#[test]
fn test_subscription_filters_are_private() {
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    let picky = notifier.subscribe(recorder.handler("picky"));
    notifier.subscribe(recorder.handler("open"));
    picky.filter(EventFilter::new(|x: &i32| *x > 100));

    notifier.notify(&7);
    notifier.notify(&700);

    assert_eq!(recorder.events_for("picky"), vec![700]);
    assert_eq!(recorder.events_for("open"), vec![7, 700]);
}

#[test]
fn test_handler_panic_propagates_and_stops_dispatch() {
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    notifier.subscribe(recorder.handler("before"));
    notifier.subscribe(|x: &i32| {
        if *x < 0 {
            panic!("negative reading");
        }
    });
    notifier.subscribe(recorder.handler("after"));

    let result = catch_unwind(AssertUnwindSafe(|| notifier.notify(&-1)));
    assert!(result.is_err());
    assert_eq!(recorder.tagged(), vec![("before", -1)]);

    // No borrow is left dangling; the notifier keeps working.
    recorder.clear();
    notifier.notify(&1);
    assert_eq!(recorder.tagged(), vec![("before", 1), ("after", 1)]);
}

#[test]
fn test_filter_panic_propagates() {
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    notifier.subscribe(recorder.handler("sub"));
    notifier.filter(EventFilter::new(|_: &i32| panic!("broken filter")));

    let result = catch_unwind(AssertUnwindSafe(|| notifier.notify(&1)));
    assert!(result.is_err());
    assert!(recorder.is_empty());
}

#[test]
fn test_enable_panic_propagates_from_subscribe() {
    let notifier: ConservativeEventNotifier<i32> =
        ConservativeEventNotifier::new(|| panic!("device unavailable"), || {});

    let result = catch_unwind(AssertUnwindSafe(|| notifier.subscribe(|_| {})));
    assert!(result.is_err());

    // The flag flips before the callback runs; no subscription was created.
    assert!(notifier.is_enabled());
    assert_eq!(notifier.subscription_count(), 0);
}

#[test]
fn test_disable_panic_propagates_from_unsubscribe() {
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: ConservativeEventNotifier<i32> =
        ConservativeEventNotifier::new(|| {}, || panic!("device busy"));
    let subscription = notifier.subscribe(recorder.handler("sub"));

    let result = catch_unwind(AssertUnwindSafe(|| subscription.unsubscribe()));
    assert!(result.is_err());

    // The flag flips before the callback runs; the subscription stays listed
    // and linked, so its handle can still remove it.
    assert!(!notifier.is_enabled());
    assert!(subscription.is_subscribed());
    assert_eq!(notifier.subscription_count(), 1);
    notifier.notify(&1);
    assert_eq!(recorder.events(), vec![1]);

    assert!(subscription.unsubscribe());
    assert!(!subscription.is_subscribed());
    assert_eq!(notifier.subscription_count(), 0);
    notifier.notify(&2);
    assert_eq!(recorder.events(), vec![1]);
}

#[test]
fn test_conservative_lifecycle_with_upstream_listener() {
    init_test_logging();
    // Stand-in for an OS hook: forwards into the notifier while attached.
    let attached = Rc::new(Cell::new(false));
    let attach = Rc::clone(&attached);
    let detach = Rc::clone(&attached);
    let notifier: ConservativeEventNotifier<&'static str> = ConservativeEventNotifier::new(
        move || attach.set(true),
        move || detach.set(false),
    );
    let upstream = |notifier: &ConservativeEventNotifier<&'static str>, key: &'static str| {
        if attached.get() {
            notifier.notify(&key);
        }
    };

    let recorder: Recorder<&'static str> = Recorder::new();
    upstream(&notifier, "ignored");

    let subscription = notifier.as_event_source().subscribe(Box::new(recorder.handler("keys")));
    assert!(attached.get());
    upstream(&notifier, "a");
    upstream(&notifier, "b");

    assert!(subscription.unsubscribe());
    assert!(!attached.get());
    upstream(&notifier, "c");

    assert_eq!(recorder.events(), vec!["a", "b"]);
}

#[test]
fn test_nested_notify_from_handler() {
    let recorder: Recorder<u32> = Recorder::new();
    let notifier: EventNotifier<u32> = EventNotifier::new();
    let echo = notifier.clone();
    let subscription = notifier.subscribe(move |x: &u32| {
        if *x > 0 {
            echo.notify(&(x - 1));
        }
    });
    notifier.subscribe(recorder.handler("tail"));

    notifier.notify(&2);

    // Depth-first: the nested avents finish before the outer one moves on.
    assert_eq!(recorder.events(), vec![0, 1, 2]);
    assert!(subscription.unsubscribe());
}

#[test]
fn test_unsubscribe_other_during_live_dispatch() {
    let recorder: Recorder<i32> = Recorder::new();
    let notifier: EventNotifier<i32> = EventNotifier::new();
    let victim: Rc<RefCell<Option<EventSubscription<i32>>>> = Rc::new(RefCell::new(None));

    let victim_clone = Rc::clone(&victim);
    notifier.subscribe(move |_| {
        if let Some(victim) = victim_clone.borrow_mut().take() {
            victim.unsubscribe();
        }
    });
    *victim.borrow_mut() = Some(notifier.subscribe(recorder.handler("victim")));
    notifier.subscribe(recorder.handler("survivor"));

    notifier.notify(&1);

    // The victim is removed before its turn comes up.
    assert_eq!(recorder.tagged(), vec![("survivor", 1)]);
    assert_eq!(notifier.subscription_count(), 2);
}

#[test]
fn test_dispatch_mode_from_config() {
    let mode: DispatchMode = serde_json::from_str("\"snapshot\"").unwrap();
    let notifier: EventNotifier<i32> = EventNotifier::with_dispatch_mode(mode);
    assert_eq!(notifier.dispatch_mode(), DispatchMode::Snapshot);
}
