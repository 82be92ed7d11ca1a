use std::sync::Arc;

use eventrelay_core::{DispatchError, DispatchResult};

use crate::{Envelope, EventRegistry};

/// Turns a decoded envelope into a ready-to-invoke handler.
///
/// Pure: the factory only reads its registry, so one instance can be shared
/// across threads and invoked concurrently for distinct messages.
#[derive(Debug)]
pub struct EventHandlerFactory<E> {
    registry: Arc<EventRegistry<E>>,
}

impl<E> Clone for EventHandlerFactory<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> EventHandlerFactory<E> {
    pub fn new(registry: Arc<EventRegistry<E>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EventRegistry<E> {
        &self.registry
    }

    /// Resolve the envelope's discriminator and decode its payload.
    ///
    /// - unregistered discriminator → [`DispatchError::UnknownEventType`]
    /// - payload that does not fit the registered shape →
    ///   [`DispatchError::MalformedPayload`]; no partial handler is returned.
    pub fn create_handler(&self, envelope: Envelope) -> DispatchResult<E> {
        let (event_type, data) = envelope.into_parts();

        let decode = self
            .registry
            .resolve(&event_type)
            .ok_or_else(|| DispatchError::unknown_event_type(event_type.as_str()))?;

        decode(data).map_err(|e| DispatchError::malformed(event_type, e.to_string()))
    }
}
