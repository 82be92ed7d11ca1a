use serde_json::Value as JsonValue;

/// A typed event that can be carried inside an [`Envelope`](crate::Envelope).
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - identified on the wire by a stable discriminator
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Discriminator written to the envelope's `type` field (e.g. "UserCreated").
    fn event_type(&self) -> &'static str;

    /// The envelope `data` for this event.
    fn to_payload(&self) -> Result<JsonValue, serde_json::Error>;
}
