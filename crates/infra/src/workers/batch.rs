use std::thread;

use eventrelay_events::{Delivery, Dispatcher, EventHandler};

use super::outcome::{DeliveryOutcome, dispatch_delivery};

/// Dispatch deliveries concurrently, one scoped thread per delivery.
///
/// Returns exactly one outcome per delivery, in input order. Deliveries share
/// nothing but the read-only registry, so a failing message cannot affect
/// the others.
pub fn dispatch_batch<E>(dispatcher: &Dispatcher<E>, deliveries: &[Delivery]) -> Vec<DeliveryOutcome>
where
    E: EventHandler,
{
    thread::scope(|s| {
        let handles: Vec<_> = deliveries
            .iter()
            .map(|delivery| s.spawn(move || dispatch_delivery(dispatcher, delivery)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}
