//! Boundary collaborators that pull deliveries and run the dispatcher.

pub mod batch;
pub mod dispatch_worker;
pub mod outcome;

pub use batch::dispatch_batch;
pub use dispatch_worker::{DispatchWorker, WorkerHandle};
pub use outcome::{DeliveryOutcome, dispatch_delivery};
