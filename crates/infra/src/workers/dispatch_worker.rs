use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use eventrelay_events::{Delivery, Dispatcher, EventBus, EventHandler, Subscription};

use super::outcome::{DeliveryOutcome, dispatch_delivery};

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    ///
    /// Deliveries already sitting in the subscription are dispatched before
    /// the worker exits.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }
}

/// Dispatch loop over a bus subscription.
///
/// - Subscribes to a bus of raw deliveries
/// - Dispatches each delivery in arrival order, isolated from the others
/// - Reports every outcome to a callback
/// - Supports graceful shutdown
#[derive(Debug)]
pub struct DispatchWorker;

impl DispatchWorker {
    /// Spawn a named worker thread dispatching deliveries from `bus`.
    ///
    /// The subscription is taken before this returns, so anything published
    /// afterwards is seen by the worker.
    pub fn spawn<E, B, F>(
        name: &'static str,
        bus: &B,
        dispatcher: Dispatcher<E>,
        mut on_outcome: F,
    ) -> io::Result<WorkerHandle>
    where
        E: EventHandler + 'static,
        B: EventBus<Delivery> + ?Sized,
        F: FnMut(DeliveryOutcome) + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let sub: Subscription<Delivery> = bus.subscribe();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(name, sub, shutdown_rx, &dispatcher, &mut on_outcome))?;

        Ok(WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        })
    }
}

fn worker_loop<E, F>(
    name: &'static str,
    sub: Subscription<Delivery>,
    shutdown_rx: mpsc::Receiver<()>,
    dispatcher: &Dispatcher<E>,
    on_outcome: &mut F,
) where
    E: EventHandler,
    F: FnMut(DeliveryOutcome),
{
    let tick = Duration::from_millis(250);
    let mut dispatched: u64 = 0;

    info!(worker = name, "dispatch worker started");

    loop {
        // Shutdown check (non-blocking)
        if shutdown_rx.try_recv().is_ok() {
            while let Ok(delivery) = sub.try_recv() {
                on_outcome(dispatch_delivery(dispatcher, &delivery));
                dispatched += 1;
            }
            break;
        }

        match sub.recv_timeout(tick) {
            Ok(delivery) => {
                debug!(worker = name, delivery_id = %delivery.delivery_id(), "delivery received");
                on_outcome(dispatch_delivery(dispatcher, &delivery));
                dispatched += 1;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(worker = name, dispatched, "dispatch worker stopped");
}
