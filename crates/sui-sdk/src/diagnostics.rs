//! Build diagnostics
//!
//! The transaction builder reports notable but non-fatal conditions through
//! a [`BuildSink`]. The default sink forwards them to `tracing`; tests can
//! inject a [`RecordingSink`] and assert on what was reported.

use std::fmt;

use parking_lot::Mutex;
use sui_primitives::ObjectID;

/// Non-fatal condition noticed while building a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// A setter replaced an earlier value
    FieldOverwritten {
        /// Field name
        field: &'static str,
    },
    /// An unresolved object input was given its version and digest
    ObjectResolved {
        /// Input index
        index: u16,
        /// Object id
        object_id: ObjectID,
    },
    /// The transaction was built with no commands
    EmptyTransaction,
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEvent::FieldOverwritten { field } => write!(f, "{} overwritten", field),
            BuildEvent::ObjectResolved { index, object_id } => {
                write!(f, "input {} resolved to object {}", index, object_id)
            }
            BuildEvent::EmptyTransaction => f.write_str("transaction has no commands"),
        }
    }
}

/// Receiver of build diagnostics
pub trait BuildSink: Send + Sync {
    /// Report one event
    fn emit(&self, event: BuildEvent);
}

/// Sink that logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl BuildSink for TracingSink {
    fn emit(&self, event: BuildEvent) {
        match &event {
            BuildEvent::EmptyTransaction => {
                tracing::warn!(target: "sui_sdk::builder", "{}", event)
            }
            BuildEvent::FieldOverwritten { field } => {
                tracing::debug!(target: "sui_sdk::builder", field = *field, "{}", event)
            }
            BuildEvent::ObjectResolved { index, .. } => {
                tracing::debug!(target: "sui_sdk::builder", index = *index, "{}", event)
            }
        }
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BuildEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events so far, oldest first
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().clone()
    }

    /// True if `event` was reported
    pub fn contains(&self, event: &BuildEvent) -> bool {
        self.events.lock().iter().any(|e| e == event)
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<BuildEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl BuildSink for RecordingSink {
    fn emit(&self, event: BuildEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.emit(BuildEvent::EmptyTransaction);
        sink.emit(BuildEvent::FieldOverwritten { field: "sender" });

        assert!(sink.contains(&BuildEvent::EmptyTransaction));
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.emit(BuildEvent::EmptyTransaction);
        TracingSink.emit(BuildEvent::FieldOverwritten { field: "gas_budget" });
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            BuildEvent::FieldOverwritten { field: "gas_price" }.to_string(),
            "gas_price overwritten"
        );
    }
}
