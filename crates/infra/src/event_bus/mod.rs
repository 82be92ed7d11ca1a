//! Infrastructure-backed bus implementations.
//!
//! The bus abstraction and the in-memory bus live in `eventrelay-events`.
//! This module provides broker-backed transports (e.g. Redis).

#[cfg(feature = "redis")]
pub mod redis_pubsub;

#[cfg(feature = "redis")]
pub use redis_pubsub::{RedisBusError, RedisPubSubEventBus};
