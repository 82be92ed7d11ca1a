//! Redis pub/sub-backed bus (optional).
//!
//! Note: Redis pub/sub is not durable; messages published while no
//! subscriber is connected are dropped. Bodies travel as raw bytes and are
//! never decoded here, the dispatcher owns envelope decoding.

use std::sync::mpsc;
use std::thread;

use redis::Commands;
use thiserror::Error;
use tracing::{debug, warn};

use eventrelay_events::{Delivery, EventBus, Subscription};

#[derive(Debug, Error)]
pub enum RedisBusError {
    #[error("redis error: {0}")]
    Redis(String),
}

/// Redis pub/sub bus carrying raw envelope bytes on one channel.
#[derive(Debug, Clone)]
pub struct RedisPubSubEventBus {
    client: redis::Client,
    channel: String,
}

impl RedisPubSubEventBus {
    pub fn new(redis_url: impl AsRef<str>, channel: impl Into<String>) -> Result<Self, RedisBusError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;
        Ok(Self {
            client,
            channel: channel.into(),
        })
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl EventBus<Delivery> for RedisPubSubEventBus {
    type Error = RedisBusError;

    fn publish(&self, message: Delivery) -> Result<(), Self::Error> {
        let mut conn = self
            .client
            .get_connection()
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;

        let receivers: i64 = conn
            .publish(&self.channel, message.body())
            .map_err(|e| RedisBusError::Redis(e.to_string()))?;

        debug!(channel = %self.channel, receivers, "published delivery");
        Ok(())
    }

    fn subscribe(&self) -> Subscription<Delivery> {
        let (tx, rx) = mpsc::channel();

        let client = self.client.clone();
        let channel = self.channel.clone();

        // Background thread that receives pub/sub messages and forwards them.
        thread::spawn(move || {
            let mut conn = match client.get_connection() {
                Ok(c) => c,
                Err(e) => {
                    warn!(channel = %channel, error = %e, "redis subscription could not connect");
                    return;
                }
            };

            let mut pubsub = conn.as_pubsub();
            if let Err(e) = pubsub.subscribe(&channel) {
                warn!(channel = %channel, error = %e, "redis subscribe failed");
                return;
            }

            loop {
                let msg = match pubsub.get_message() {
                    Ok(m) => m,
                    Err(e) => {
                        warn!(channel = %channel, error = %e, "redis subscription closed");
                        return;
                    }
                };

                if tx.send(Delivery::new(msg.get_payload_bytes())).is_err() {
                    return;
                }
            }
        });

        Subscription::new(rx)
    }
}
