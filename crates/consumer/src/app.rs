use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::sync::oneshot;
use tracing::{info, warn};

use eventrelay_events::{Delivery, Dispatcher, EventBus, InMemoryEventBus};
use eventrelay_infra::{
    ConsumerConfig, DeliveryOutcome, DispatchWorker, EventPublisher, Transport, WorkerHandle,
};
use eventrelay_users::{UserEvent, user_dispatcher, user_event_registry};

const WORKER_NAME: &str = "user-queue-dispatch";

/// Run the consumer until Ctrl-C (or end of input for the stdin transport).
pub async fn run(config: ConsumerConfig) -> anyhow::Result<()> {
    let registry = user_event_registry();
    info!(
        transport = %config.transport,
        queue = %config.queue,
        event_types = ?registry.discriminators().collect::<Vec<_>>(),
        "starting consumer"
    );

    let dispatcher = user_dispatcher();

    match config.transport {
        Transport::Stdin => run_stdin(dispatcher).await,
        Transport::Redis => run_redis(&config, dispatcher).await,
    }
}

/// Line printed to stdout for one outcome.
pub fn render_outcome(outcome: &DeliveryOutcome) -> String {
    match outcome.result() {
        Ok(handled) => handled.message().to_string(),
        Err(err) => format!("[!] Error handling message ({}): {err}", err.kind()),
    }
}

fn print_outcome(outcome: DeliveryOutcome) {
    println!("{}", render_outcome(&outcome));
}

fn spawn_worker<B>(bus: &B, dispatcher: Dispatcher<UserEvent>) -> anyhow::Result<WorkerHandle>
where
    B: EventBus<Delivery> + ?Sized,
{
    DispatchWorker::spawn(WORKER_NAME, bus, dispatcher, print_outcome)
        .context("failed to spawn dispatch worker")
}

async fn stop_worker(worker: WorkerHandle) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || worker.shutdown())
        .await
        .context("dispatch worker shutdown panicked")?;
    info!("consumer stopped");
    Ok(())
}

/// Publish each non-empty line of `reader` as one delivery.
///
/// Returns the number of lines published.
pub fn pump_lines<R, B>(reader: R, publisher: &EventPublisher<B>) -> io::Result<usize>
where
    R: BufRead,
    B: EventBus<Delivery>,
{
    let mut published = 0;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match publisher.publish_bytes(line.as_bytes()) {
            Ok(_) => published += 1,
            Err(e) => warn!(error = %e, "failed to enqueue input line"),
        }
    }
    Ok(published)
}

async fn run_stdin(dispatcher: Dispatcher<UserEvent>) -> anyhow::Result<()> {
    let bus: Arc<InMemoryEventBus<Delivery>> = Arc::new(InMemoryEventBus::new());
    let worker = spawn_worker(&bus, dispatcher)?;

    let publisher = EventPublisher::new(Arc::clone(&bus));
    let (eof_tx, eof_rx) = oneshot::channel::<io::Result<usize>>();

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let result = pump_lines(io::stdin().lock(), &publisher);
            let _ = eof_tx.send(result);
        })
        .context("failed to spawn stdin reader")?;

    info!("reading envelopes from stdin, one per line. Press CTRL + C to exit.");

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("interrupt received, shutting down");
        }
        read = eof_rx => {
            match read {
                Ok(Ok(lines)) => info!(lines, "end of input"),
                Ok(Err(e)) => warn!(error = %e, "stdin read failed"),
                Err(_) => warn!("stdin reader exited unexpectedly"),
            }
        }
    }

    stop_worker(worker).await
}

#[cfg(feature = "redis")]
async fn run_redis(
    config: &ConsumerConfig,
    dispatcher: Dispatcher<UserEvent>,
) -> anyhow::Result<()> {
    use eventrelay_infra::event_bus::RedisPubSubEventBus;

    let bus = RedisPubSubEventBus::new(&config.redis_url, config.queue.as_str())
        .context("failed to create redis client")?;
    let worker = spawn_worker(&bus, dispatcher)?;

    info!(channel = bus.channel(), "waiting for messages. Press CTRL + C to exit.");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("interrupt received, shutting down");

    stop_worker(worker).await
}

#[cfg(not(feature = "redis"))]
async fn run_redis(
    _config: &ConsumerConfig,
    _dispatcher: Dispatcher<UserEvent>,
) -> anyhow::Result<()> {
    anyhow::bail!("this build does not include the redis transport (enable the `redis` feature)")
}
