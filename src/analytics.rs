//! Fire-and-forget analytics events.

use serde_json::Value;

pub const ANALYTICS_TARGET: &str = "analytics";

pub trait EventLogger {
    fn item_selection_change(&self, item_type: &str, item: &str, is_selected: bool);
    fn value_change(&self, name: &str, before: Value, after: Value);
    fn empty_search_results(&self, query: &str, source: &str);
}

/// Emits analytics as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TracingEventLogger;

impl EventLogger for TracingEventLogger {
    fn item_selection_change(&self, item_type: &str, item: &str, is_selected: bool) {
        let event = if is_selected {
            "item_selected"
        } else {
            "item_unselected"
        };
        tracing::info!(target: ANALYTICS_TARGET, event, item_type, item);
    }

    fn value_change(&self, name: &str, before: Value, after: Value) {
        tracing::info!(target: ANALYTICS_TARGET, event = "value_changed", name, %before, %after);
    }

    fn empty_search_results(&self, query: &str, source: &str) {
        tracing::info!(target: ANALYTICS_TARGET, event = "search_no_results", query, source);
    }
}

/// Reports an empty result once per distinct query.
#[derive(Debug, Clone, Default)]
pub struct EmptySearchTracker {
    last_reported: Option<String>,
}

impl EmptySearchTracker {
    /// Returns `true` when `query` with `is_empty` results should be reported now.
    pub fn observe(&mut self, query: &str, is_empty: bool) -> bool {
        let query = query.trim();
        if query.is_empty() || !is_empty {
            self.last_reported = None;
            return false;
        }
        if self.last_reported.as_deref() == Some(query) {
            return false;
        }
        self.last_reported = Some(query.to_string());
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedEvent {
        ItemSelection {
            item_type: String,
            item: String,
            is_selected: bool,
        },
        ValueChange {
            name: String,
            before: Value,
            after: Value,
        },
        EmptySearch {
            query: String,
            source: String,
        },
    }

    #[derive(Debug, Clone, Default)]
    pub struct RecordingLogger {
        pub events: Rc<RefCell<Vec<RecordedEvent>>>,
    }

    impl RecordingLogger {
        pub fn take(&self) -> Vec<RecordedEvent> {
            std::mem::take(&mut *self.events.borrow_mut())
        }
    }

    impl EventLogger for RecordingLogger {
        fn item_selection_change(&self, item_type: &str, item: &str, is_selected: bool) {
            self.events.borrow_mut().push(RecordedEvent::ItemSelection {
                item_type: item_type.to_string(),
                item: item.to_string(),
                is_selected,
            });
        }

        fn value_change(&self, name: &str, before: Value, after: Value) {
            self.events.borrow_mut().push(RecordedEvent::ValueChange {
                name: name.to_string(),
                before,
                after,
            });
        }

        fn empty_search_results(&self, query: &str, source: &str) {
            self.events.borrow_mut().push(RecordedEvent::EmptySearch {
                query: query.to_string(),
                source: source.to_string(),
            });
        }
    }
}
