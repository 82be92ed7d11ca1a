//! Per-message dispatch pipeline.
//!
//! ```text
//! raw bytes
//!   ↓ Envelope::decode            → EnvelopeDecode
//!   ↓ registry lookup             → UnknownEventType
//!   ↓ payload decode              → MalformedPayload
//!   ↓ EventHandler::handle_event  → Handling
//! Handled
//! ```
//!
//! Every step is synchronous and in-memory. A failed step ends the pipeline
//! for that message only; the dispatcher keeps no state between calls.

use std::sync::Arc;

use eventrelay_core::{DispatchError, DispatchResult};

use crate::{Envelope, EventHandler, EventHandlerFactory, EventRegistry};

/// Successful outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    event_type: String,
    message: String,
}

impl Handled {
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The handler's result string.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Stateless dispatcher: raw message in, typed outcome out.
#[derive(Debug)]
pub struct Dispatcher<E> {
    factory: EventHandlerFactory<E>,
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<E> Dispatcher<E>
where
    E: EventHandler,
{
    pub fn new(registry: Arc<EventRegistry<E>>) -> Self {
        Self {
            factory: EventHandlerFactory::new(registry),
        }
    }

    pub fn factory(&self) -> &EventHandlerFactory<E> {
        &self.factory
    }

    /// Run the full pipeline on raw message bytes.
    pub fn dispatch(&self, raw: &[u8]) -> DispatchResult<Handled> {
        let envelope = Envelope::decode(raw)?;
        self.dispatch_envelope(envelope)
    }

    /// Run the pipeline on an already-decoded envelope.
    pub fn dispatch_envelope(&self, envelope: Envelope) -> DispatchResult<Handled> {
        let event_type = envelope.event_type().to_string();
        let handler = self.factory.create_handler(envelope)?;

        let message = handler
            .handle_event()
            .map_err(|e| DispatchError::handling(event_type.as_str(), e))?;

        Ok(Handled {
            event_type,
            message,
        })
    }
}
