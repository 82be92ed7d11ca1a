//! Dispatch error model.

use thiserror::Error;

/// Result type used across the dispatch pipeline.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failure raised by a handler after its event decoded successfully.
///
/// None of the current user events produce this; it is the typed seam for
/// handlers whose processing can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlingError(String);

impl HandlingError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Per-message dispatch failure.
///
/// Every variant is terminal for the one message that produced it and never
/// affects handling of any other message. Retry, dead-lettering and logging
/// are decided by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Raw bytes did not decode into an envelope (invalid JSON, not an object,
    /// missing or empty `type`).
    #[error("envelope decode failed: {0}")]
    EnvelopeDecode(String),

    /// The discriminator has no registered handler.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The payload does not fit the shape registered for the discriminator.
    #[error("malformed payload for {discriminator}: {detail}")]
    MalformedPayload {
        discriminator: String,
        detail: String,
    },

    /// The handler failed after a successful decode.
    #[error("handling {discriminator} failed: {source}")]
    Handling {
        discriminator: String,
        #[source]
        source: HandlingError,
    },
}

impl DispatchError {
    pub fn envelope_decode(detail: impl Into<String>) -> Self {
        Self::EnvelopeDecode(detail.into())
    }

    pub fn unknown_event_type(discriminator: impl Into<String>) -> Self {
        Self::UnknownEventType(discriminator.into())
    }

    pub fn malformed(discriminator: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedPayload {
            discriminator: discriminator.into(),
            detail: detail.into(),
        }
    }

    pub fn handling(discriminator: impl Into<String>, source: HandlingError) -> Self {
        Self::Handling {
            discriminator: discriminator.into(),
            source,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::EnvelopeDecode(_) => "envelope_decode",
            DispatchError::UnknownEventType(_) => "unknown_event_type",
            DispatchError::MalformedPayload { .. } => "malformed_payload",
            DispatchError::Handling { .. } => "handling",
        }
    }

    /// The discriminator involved, when the envelope got far enough to carry one.
    pub fn discriminator(&self) -> Option<&str> {
        match self {
            DispatchError::EnvelopeDecode(_) => None,
            DispatchError::UnknownEventType(d) => Some(d),
            DispatchError::MalformedPayload { discriminator, .. } => Some(discriminator),
            DispatchError::Handling { discriminator, .. } => Some(discriminator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_type_carries_discriminator() {
        let err = DispatchError::unknown_event_type("UserArchived");
        assert_eq!(err, DispatchError::UnknownEventType("UserArchived".to_string()));
        assert_eq!(err.discriminator(), Some("UserArchived"));
        assert_eq!(err.kind(), "unknown_event_type");
        assert_eq!(err.to_string(), "unknown event type: UserArchived");
    }

    #[test]
    fn malformed_payload_reports_discriminator_and_detail() {
        let err = DispatchError::malformed("UserCreated", "missing field `name`");
        assert_eq!(err.kind(), "malformed_payload");
        assert_eq!(err.discriminator(), Some("UserCreated"));
        assert_eq!(
            err.to_string(),
            "malformed payload for UserCreated: missing field `name`"
        );
    }

    #[test]
    fn envelope_errors_have_no_discriminator() {
        let err = DispatchError::envelope_decode("expected value at line 1 column 1");
        assert_eq!(err.discriminator(), None);
        assert_eq!(err.kind(), "envelope_decode");
    }

    #[test]
    fn handling_error_is_exposed_as_source() {
        use std::error::Error as _;

        let err = DispatchError::handling("UserDeleted", HandlingError::new("user is locked"));
        assert_eq!(err.kind(), "handling");
        assert_eq!(err.to_string(), "handling UserDeleted failed: user is locked");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("user is locked"));
    }
}
