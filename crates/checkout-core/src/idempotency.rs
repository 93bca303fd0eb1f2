//! # Idempotency Keys
//!
//! Keys handed to the payment processor so that retried requests with the
//! same parameters collapse into one checkout session.
//!
//! The key is `{user_id}-{event_id}-{timestamp}`. When the caller does not
//! supply a timestamp the current wall-clock time (Unix millis) is used
//! instead, so retries without a stable timestamp are **not** deduplicated.
//! Callers that need retry-safe behavior must resend the same timestamp.

use crate::body::{is_truthy, render_text};
use chrono::Utc;
use serde_json::Value;

/// Request-level deduplication token for the payment processor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Derive a key, falling back to the current time when no usable
    /// timestamp is supplied.
    pub fn derive(user_id: &str, event_id: &str, timestamp: Option<&Value>) -> Self {
        Self::derive_at(user_id, event_id, timestamp, Utc::now().timestamp_millis())
    }

    /// Derive a key with an explicit fallback clock reading.
    ///
    /// Empty timestamps (`null`, `false`, `0`, `""`) count as absent.
    pub fn derive_at(
        user_id: &str,
        event_id: &str,
        timestamp: Option<&Value>,
        now_millis: i64,
    ) -> Self {
        let entropy = timestamp
            .filter(|v| is_truthy(v))
            .map(render_text)
            .unwrap_or_else(|| now_millis.to_string());
        Self(format!("{}-{}-{}", user_id, event_id, entropy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
