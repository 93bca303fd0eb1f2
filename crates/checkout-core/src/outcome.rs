//! # Checkout Outcome
//!
//! Result of one checkout attempt and its mapping to an HTTP-shaped
//! response. The mapping is pure so it can be tested without any HTTP
//! scaffolding.

use serde::Serialize;
use serde_json::json;

/// Message used when a processor failure carries no text of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Payment initiation failed";

/// Permissive cross-origin headers attached to success and internal-error responses
pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
];

/// Outcome of a checkout attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Session created
    Success {
        checkout_url: String,
        session_id: String,
        event_id: String,
    },
    /// Caller lacks the attendee role
    AuthDenied { message: String },
    /// Request body failed validation
    ValidationFailed { message: String },
    /// Processor call failed
    ProcessorError { message: String },
}

impl CheckoutOutcome {
    pub fn auth_denied(message: impl Into<String>) -> Self {
        CheckoutOutcome::AuthDenied {
            message: message.into(),
        }
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        CheckoutOutcome::ValidationFailed {
            message: message.into(),
        }
    }

    /// Processor failure; blank messages fall back to a generic one
    pub fn processor_error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        CheckoutOutcome::ProcessorError { message }
    }

    /// HTTP status for this outcome
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutOutcome::Success { .. } => 200,
            CheckoutOutcome::AuthDenied { .. } => 403,
            CheckoutOutcome::ValidationFailed { .. } => 400,
            CheckoutOutcome::ProcessorError { .. } => 500,
        }
    }

    /// Shape the outcome into status, headers and JSON body
    pub fn into_response(self) -> HandlerResponse {
        let status = self.status_code();
        match self {
            CheckoutOutcome::Success {
                checkout_url,
                session_id,
                event_id,
            } => HandlerResponse {
                status,
                cors: true,
                body: json!({
                    "checkoutUrl": checkout_url,
                    "sessionId": session_id,
                    "eventId": event_id,
                }),
            },
            CheckoutOutcome::AuthDenied { message }
            | CheckoutOutcome::ValidationFailed { message } => HandlerResponse {
                status,
                cors: false,
                body: json!({ "error": message }),
            },
            CheckoutOutcome::ProcessorError { message } => HandlerResponse {
                status,
                cors: true,
                body: json!({ "error": message }),
            },
        }
    }
}

/// HTTP-shaped response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    /// Whether the permissive CORS headers are attached
    pub cors: bool,
    pub body: serde_json::Value,
}

impl HandlerResponse {
    /// Headers to attach besides `Content-Type`
    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        if self.cors {
            &CORS_HEADERS
        } else {
            &[]
        }
    }
}
