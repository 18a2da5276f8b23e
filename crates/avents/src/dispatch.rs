//! Dispatch configuration.

use serde::{Deserialize, Serialize};

/// How `notify` walks the subscription list when handlers subscribe or
/// unsubscribe while an avent is being dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Walk the live list by position (default).
    ///
    /// Subscriptions added during dispatch are reached in the same pass.
    /// Removing a subscription that was already visited shifts the list, so
    /// the one after it is skipped for that avent.
    #[default]
    Live,
    /// Copy the list when `notify` starts and visit exactly those
    /// subscriptions, including any that unsubscribe during the pass.
    Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_live() {
        assert_eq!(DispatchMode::default(), DispatchMode::Live);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DispatchMode::Snapshot).unwrap();
        assert_eq!(json, "\"snapshot\"");

        let mode: DispatchMode = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(mode, DispatchMode::Live);

        assert!(serde_json::from_str::<DispatchMode>("\"Queued\"").is_err());
    }
}
