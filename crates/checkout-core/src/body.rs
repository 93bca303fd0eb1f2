//! # Request Body
//!
//! The checkout body is `{ eventId, timestamp? }`. Only `eventId` is
//! required; nothing else is type-checked. Values are judged by
//! truthiness (`null`, `false`, `0`, `""` are empty) and rendered as text.

use serde_json::Value;

/// Inbound checkout request body
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CheckoutBody {
    /// Event id, present only when non-empty
    pub event_id: Option<String>,
    /// Only used as idempotency key entropy; present only when non-empty
    pub timestamp: Option<Value>,
}

impl CheckoutBody {
    /// Parse a raw body; an empty body is treated as `{}`.
    ///
    /// Fails only on invalid JSON.
    pub fn parse(raw: &[u8]) -> Result<Self, serde_json::Error> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(raw)?;
        Ok(Self {
            event_id: value
                .get("eventId")
                .filter(|v| is_truthy(v))
                .map(render_text),
            timestamp: value.get("timestamp").filter(|v| is_truthy(v)).cloned(),
        })
    }
}

/// Whether a JSON value counts as present
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a JSON value as a text segment.
///
/// Strings render verbatim, integral numbers without a fractional part,
/// and everything else as compact JSON.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}
