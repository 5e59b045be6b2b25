//! # Event Contracts
//!
//! Components declare the events they emit as [`EventDescriptor`]s: a
//! name unique within the component, a human-readable description, and a
//! schema for the event's payload. Before the gateway dispatches an
//! outgoing event it checks the payload against that schema here.

use serde_json::Value;

use vantage_schema::{Schema, SchemaViolation};

/// One event a component can emit, with its payload contract.
///
/// Each descriptor owns its own [`Schema`] handle. Validation is purely
/// functional over immutable data, so one `EventDescriptor` can be
/// validated against from any number of threads concurrently.
#[derive(Debug, Clone)]
pub struct EventDescriptor {
    name: String,
    description: String,
    schema: Schema,
}

impl EventDescriptor {
    /// Declare an event with its payload schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Event name, unique within the owning component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description for designer tooling.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Schema the event's payload must conform to.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Check an outgoing event payload against this event's schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolation`] naming this event and listing every
    /// violation found in the payload, not just the first.
    pub fn validate_payload(&self, payload: &Value) -> Result<(), SchemaViolation> {
        self.schema.validate(payload, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vantage_core::ResourceId;

    fn message_event() -> EventDescriptor {
        let schema = Schema::from_value(
            ResourceId::new("messenger#onMessageEvent"),
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string" },
                    "b": { "type": "number" }
                },
                "required": ["a", "b"]
            }),
        )
        .unwrap();
        EventDescriptor::new("onMessageEvent", "Fired when a message arrives.", schema)
    }

    #[test]
    fn test_conforming_payload_passes() {
        let event = message_event();
        event
            .validate_payload(&json!({ "a": "hello", "b": 3 }))
            .unwrap();
    }

    #[test]
    fn test_all_violations_reported_together() {
        let event = message_event();
        // Two violations at once: "a" has the wrong type and "b" is missing.
        let err = event.validate_payload(&json!({ "a": 5 })).unwrap_err();
        assert_eq!(err.subject, "onMessageEvent");
        assert_eq!(err.violations.len(), 2);

        let messages: Vec<&str> = err
            .violations
            .iter()
            .map(|v| v.message.as_str())
            .collect();
        assert!(messages.iter().any(|m| m.contains("string")));
        assert!(messages.iter().any(|m| m.contains("\"b\"")));
    }

    #[test]
    fn test_concurrent_validation_is_safe() {
        let event = std::sync::Arc::new(message_event());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let event = std::sync::Arc::clone(&event);
                std::thread::spawn(move || {
                    event.validate_payload(&json!({ "a": "x", "b": i })).is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
