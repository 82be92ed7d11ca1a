//! Infrastructure layer: transports, config, the dispatch loop and producers.

pub mod config;
pub mod event_bus;
pub mod publisher;
pub mod workers;


pub use config::{ConfigError, ConsumerConfig, Transport};
pub use publisher::{EventPublisher, PublishError};
pub use workers::{DeliveryOutcome, DispatchWorker, WorkerHandle, dispatch_batch, dispatch_delivery};
