//! Envelope model, event registry and dispatch mechanics.
//!
//! Nothing in this crate performs IO or logs; transports and the dispatch
//! loop live in `eventrelay-infra`.

pub mod bus;
pub mod delivery;
pub mod dispatch;
pub mod envelope;
pub mod event;
pub mod factory;
pub mod handler;
pub mod in_memory_bus;
pub mod payload;
pub mod registry;

pub use bus::{EventBus, Subscription};
pub use delivery::Delivery;
pub use dispatch::{Dispatcher, Handled};
pub use envelope::Envelope;
pub use event::Event;
pub use factory::EventHandlerFactory;
pub use handler::EventHandler;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use registry::{DecodeFn, EventRegistry};
