//! Producer side: wrap events in envelopes and put them on a bus.

use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use eventrelay_events::{Delivery, Envelope, Event, EventBus};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("bus publish failed: {0}")]
    Bus(String),
}

/// Publishes envelopes onto a bus of raw deliveries.
#[derive(Debug, Clone)]
pub struct EventPublisher<B> {
    bus: B,
}

impl<B> EventPublisher<B>
where
    B: EventBus<Delivery>,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Publish a typed event under its own discriminator.
    ///
    /// Returns the delivery id of the published message.
    pub fn publish<E: Event>(&self, event: &E) -> Result<Uuid, PublishError> {
        self.publish_envelope(&Envelope::from_event(event)?)
    }

    /// Publish an untyped payload under an arbitrary discriminator.
    pub fn publish_raw(
        &self,
        event_type: impl Into<String>,
        data: JsonValue,
    ) -> Result<Uuid, PublishError> {
        self.publish_envelope(&Envelope::new(event_type, data))
    }

    pub fn publish_envelope(&self, envelope: &Envelope) -> Result<Uuid, PublishError> {
        self.publish_bytes(envelope.to_bytes()?)
    }

    /// Publish bytes as-is, without checking they form an envelope.
    pub fn publish_bytes(&self, body: impl Into<Vec<u8>>) -> Result<Uuid, PublishError> {
        let delivery = Delivery::new(body);
        let id = delivery.delivery_id();
        self.bus
            .publish(delivery)
            .map_err(|e| PublishError::Bus(e.to_string()))?;
        Ok(id)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use eventrelay_events::InMemoryEventBus;
    use eventrelay_users::{UserDeleted, UserEvent};
    use serde_json::json;

    fn publisher() -> EventPublisher<Arc<InMemoryEventBus<Delivery>>> {
        EventPublisher::new(Arc::new(InMemoryEventBus::new()))
    }

    #[test]
    fn typed_event_is_wrapped_in_an_envelope() {
        let publisher = publisher();
        let sub = publisher.bus().subscribe();

        let id = publisher
            .publish(&UserEvent::from(UserDeleted { id: 42 }))
            .unwrap();

        let delivery = sub.recv().unwrap();
        assert_eq!(delivery.delivery_id(), id);
        let wire: JsonValue = serde_json::from_slice(delivery.body()).unwrap();
        assert_eq!(wire, json!({ "type": "UserDeleted", "data": { "id": 42 } }));
    }

    #[test]
    fn raw_payload_keeps_given_discriminator() {
        let publisher = publisher();
        let sub = publisher.bus().subscribe();

        publisher.publish_raw("UserArchived", json!({})).unwrap();

        let env = Envelope::decode(sub.recv().unwrap().body()).unwrap();
        assert_eq!(env.event_type(), "UserArchived");
    }

    #[test]
    fn bytes_are_published_untouched() {
        let publisher = publisher();
        let sub = publisher.bus().subscribe();

        publisher.publish_bytes(b"not json".to_vec()).unwrap();
        assert_eq!(sub.recv().unwrap().body(), b"not json");
    }
}
