//! Redis-backed notification queue.
//!
//! Producers RPUSH serialized [`QueueEnvelope`]s onto a list; the worker
//! consumes with a blocking BLPOP. At-least-once semantics: an envelope
//! popped but failed in dispatch is simply lost from the list, and the
//! upstream producer's redelivery policy covers it.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crescendo_common::error::AppError;
use crescendo_common::types::QueueEnvelope;

pub struct NotificationQueue {
    redis: ConnectionManager,
    key: String,
}

impl NotificationQueue {
    pub fn new(redis: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            redis,
            key: key.into(),
        }
    }

    /// Enqueue one envelope. Used by the dev trigger and by tests; production
    /// producers push the same JSON shape from their own processes.
    pub async fn push(&mut self, envelope: &QueueEnvelope) -> Result<(), AppError> {
        let raw = serde_json::to_string(envelope)
            .map_err(|e| AppError::Internal(format!("envelope encode: {}", e)))?;
        self.redis.rpush::<_, _, ()>(&self.key, raw).await?;
        Ok(())
    }

    /// Block up to `timeout` for the next envelope. `Ok(None)` on idle
    /// timeout; an undecodable entry surfaces as `InvalidPayload` so the
    /// caller can skip it without stopping the loop.
    pub async fn pop(&mut self, timeout: Duration) -> Result<Option<QueueEnvelope>, AppError> {
        let reply: Option<(String, String)> = self
            .redis
            .blpop(&self.key, timeout.as_secs_f64())
            .await?;

        match reply {
            Some((_, raw)) => decode_envelope(&raw).map(Some),
            None => Ok(None),
        }
    }
}

fn decode_envelope(raw: &str) -> Result<QueueEnvelope, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::InvalidPayload(e.to_string()))
}
