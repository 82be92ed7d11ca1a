use tracing::{info, warn};
use uuid::Uuid;

use eventrelay_core::DispatchResult;
use eventrelay_events::{Delivery, Dispatcher, EventHandler, Handled};

/// Result of dispatching one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    delivery_id: Uuid,
    result: DispatchResult<Handled>,
}

impl DeliveryOutcome {
    pub fn new(delivery_id: Uuid, result: DispatchResult<Handled>) -> Self {
        Self { delivery_id, result }
    }

    pub fn delivery_id(&self) -> Uuid {
        self.delivery_id
    }

    pub fn result(&self) -> &DispatchResult<Handled> {
        &self.result
    }

    pub fn is_handled(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> DispatchResult<Handled> {
        self.result
    }
}

/// Dispatch one delivery and log its outcome.
///
/// The dispatcher itself never logs; this is where each message's outcome
/// becomes visible, one line per message, tagged with its delivery id.
pub fn dispatch_delivery<E>(dispatcher: &Dispatcher<E>, delivery: &Delivery) -> DeliveryOutcome
where
    E: EventHandler,
{
    let result = dispatcher.dispatch(delivery.body());

    match &result {
        Ok(handled) => info!(
            delivery_id = %delivery.delivery_id(),
            event_type = handled.event_type(),
            outcome = handled.message(),
            "event handled"
        ),
        Err(err) => warn!(
            delivery_id = %delivery.delivery_id(),
            error_kind = err.kind(),
            event_type = err.discriminator().unwrap_or("-"),
            error = %err,
            "event dispatch failed"
        ),
    }

    DeliveryOutcome::new(delivery.delivery_id(), result)
}
