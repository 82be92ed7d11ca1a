//! Discriminator → decoder table.
//!
//! The registry is the single extension point for new event types: adding a
//! type means adding one `register` call where the table is built. It is
//! meant to be constructed once at startup and shared read-only afterwards
//! (see `eventrelay_users::user_event_registry`).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::payload;

/// Decode routine for one discriminator: payload in, union variant out.
pub type DecodeFn<E> = fn(JsonValue) -> Result<E, serde_json::Error>;

fn decode_into<T, E>(data: JsonValue) -> Result<E, serde_json::Error>
where
    T: DeserializeOwned + Into<E>,
{
    payload::decode::<T>(data).map(Into::into)
}

/// Closed mapping from discriminator to the decoder for its payload shape.
///
/// Lookup is exact-match and case-sensitive.
pub struct EventRegistry<E> {
    decoders: BTreeMap<String, DecodeFn<E>>,
}

impl<E> EventRegistry<E> {
    pub fn new() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Register `discriminator`, decoding its payload as `T`.
    ///
    /// Payload field names are matched case-insensitively, so `T` must declare
    /// lowercase field names.
    ///
    /// # Panics
    ///
    /// If `discriminator` is empty or already registered.
    pub fn register<T>(self, discriminator: &str) -> Self
    where
        T: DeserializeOwned + Into<E>,
    {
        self.register_with(discriminator, decode_into::<T, E>)
    }

    /// Register `discriminator` with a custom decode routine.
    ///
    /// # Panics
    ///
    /// If `discriminator` is empty or already registered.
    pub fn register_with(mut self, discriminator: &str, decode: DecodeFn<E>) -> Self {
        assert!(!discriminator.is_empty(), "event discriminator must not be empty");
        let previous = self.decoders.insert(discriminator.to_string(), decode);
        assert!(
            previous.is_none(),
            "event discriminator {discriminator:?} registered twice"
        );
        self
    }

    /// Look up the decoder for `discriminator`.
    pub fn resolve(&self, discriminator: &str) -> Option<DecodeFn<E>> {
        self.decoders.get(discriminator).copied()
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.decoders.contains_key(discriminator)
    }

    /// Registered discriminators in sorted order.
    pub fn discriminators(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("discriminators", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}
