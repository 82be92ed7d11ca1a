use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A raw inbound message as handed over by a transport.
///
/// The body is opaque here; only the dispatcher decodes it. `delivery_id`
/// and `received_at` exist so the dispatch loop can correlate log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    delivery_id: Uuid,
    received_at: DateTime<Utc>,
    body: Vec<u8>,
}

impl Delivery {
    /// Wrap a body received now, with a fresh time-ordered id.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self::with_id(Uuid::now_v7(), Utc::now(), body)
    }

    pub fn with_id(delivery_id: Uuid, received_at: DateTime<Utc>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            delivery_id,
            received_at,
            body: body.into(),
        }
    }

    pub fn delivery_id(&self) -> Uuid {
        self.delivery_id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
