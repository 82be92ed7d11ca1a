use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use eventrelay_core::{DispatchError, DispatchResult};

use crate::Event;
use crate::payload;

/// Outer message wrapper: a type discriminator plus an opaque payload.
///
/// Wire form is `{ "type": <string>, "data": <any> }`.
///
/// Notes:
/// - Top-level keys are matched case-insensitively; unknown keys are ignored.
/// - `type` is required and non-empty.
/// - A missing `data` decodes as `null` and is left for the payload decoder
///   of the resolved discriminator to reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    event_type: String,

    #[serde(default)]
    data: JsonValue,
}

impl Envelope {
    pub fn new(event_type: impl Into<String>, data: JsonValue) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a typed event under its own discriminator.
    pub fn from_event<E: Event>(event: &E) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event.event_type(), event.to_payload()?))
    }

    /// Decode raw message bytes into an envelope.
    pub fn decode(raw: &[u8]) -> DispatchResult<Self> {
        let value: JsonValue =
            serde_json::from_slice(raw).map_err(|e| DispatchError::envelope_decode(e.to_string()))?;

        let JsonValue::Object(map) = value else {
            return Err(DispatchError::envelope_decode("envelope must be a JSON object"));
        };

        // Only the top level is folded; `data` keeps its keys until the
        // payload decoder runs.
        let folded: Map<String, JsonValue> = map
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        let envelope: Envelope = serde_json::from_value(JsonValue::Object(folded))
            .map_err(|e| DispatchError::envelope_decode(e.to_string()))?;

        if envelope.event_type.is_empty() {
            return Err(DispatchError::envelope_decode("event type must not be empty"));
        }

        Ok(envelope)
    }

    /// Encode to wire bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    pub fn into_parts(self) -> (String, JsonValue) {
        (self.event_type, self.data)
    }

    /// Decode the payload into `T`, ignoring field-name case.
    pub fn decode_data<T>(&self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        payload::decode(self.data.clone())
    }
}
