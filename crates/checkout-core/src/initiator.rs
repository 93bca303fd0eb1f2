//! # Checkout Session Initiator
//!
//! Runs one checkout attempt: role check, body validation, idempotency
//! key derivation, a single processor call, and outcome shaping.
//! No retries; a processor failure is reported straight back.

use crate::body::CheckoutBody;
use crate::checkout::{RedirectUrls, TicketCheckout, TicketPricing};
use crate::claims::IdentityClaims;
use crate::idempotency::IdempotencyKey;
use crate::outcome::CheckoutOutcome;
use crate::processor::CheckoutProcessor;
use tracing::{error, info, instrument, warn};

pub const NOT_ATTENDEE_MESSAGE: &str = "Only attendees can pay";
pub const MISSING_EVENT_ID_MESSAGE: &str = "eventId required";

/// Settings injected at construction
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Front-end base URL for redirect targets
    pub frontend_url: String,
    /// Ticket pricing
    pub pricing: TicketPricing,
}

impl CheckoutSettings {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
            pricing: TicketPricing::default(),
        }
    }
}

/// Creates checkout sessions for attendees
pub struct CheckoutInitiator<P> {
    processor: P,
    urls: RedirectUrls,
    pricing: TicketPricing,
}

impl<P: CheckoutProcessor> CheckoutInitiator<P> {
    pub fn new(settings: CheckoutSettings, processor: P) -> Self {
        Self {
            processor,
            urls: RedirectUrls::new(settings.frontend_url),
            pricing: settings.pricing,
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Run one checkout attempt.
    #[instrument(
        skip_all,
        fields(
            provider = self.processor.provider_name(),
            user = claims.username.as_deref().unwrap_or("-")
        )
    )]
    pub async fn initiate(&self, claims: &IdentityClaims, body: &[u8]) -> CheckoutOutcome {
        if !claims.is_attendee() {
            warn!(groups = ?claims.groups, "Rejected checkout: caller is not an attendee");
            return CheckoutOutcome::auth_denied(NOT_ATTENDEE_MESSAGE);
        }

        let user_id = claims.username.as_deref().unwrap_or_default();

        let body = match CheckoutBody::parse(body) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to parse checkout body: {}", e);
                return CheckoutOutcome::processor_error(e.to_string());
            }
        };

        let event_id = match body.event_id.as_deref() {
            Some(id) => id,
            None => {
                warn!("Rejected checkout: missing eventId");
                return CheckoutOutcome::validation_failed(MISSING_EVENT_ID_MESSAGE);
            }
        };

        let key = IdempotencyKey::derive(user_id, event_id, body.timestamp.as_ref());
        let checkout = TicketCheckout::for_event(
            event_id,
            user_id,
            claims.email_or_default(),
            &self.pricing,
            &self.urls,
        );

        info!(
            "Creating checkout: event={}, total={}",
            event_id,
            checkout.total().display()
        );

        match self.processor.create_checkout_session(&checkout, &key).await {
            Ok(session) => {
                info!("Created checkout session: {}", session.session_id);
                CheckoutOutcome::Success {
                    checkout_url: session.checkout_url,
                    session_id: session.session_id,
                    event_id: event_id.to_string(),
                }
            }
            Err(e) => {
                error!("Failed to create checkout: {}", e);
                CheckoutOutcome::processor_error(e.public_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutSession;
    use crate::error::{PaymentError, PaymentResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    type Respond = Box<dyn Fn() -> PaymentResult<CheckoutSession> + Send + Sync>;

    struct RecordingProcessor {
        calls: Mutex<Vec<(TicketCheckout, IdempotencyKey)>>,
        respond: Respond,
    }

    impl RecordingProcessor {
        fn succeeding(url: &'static str, id: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(move || Ok(CheckoutSession::new(id, url))),
            }
        }

        fn failing(make: fn() -> PaymentError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(move || Err(make())),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CheckoutProcessor for RecordingProcessor {
        async fn create_checkout_session(
            &self,
            checkout: &TicketCheckout,
            idempotency_key: &IdempotencyKey,
        ) -> PaymentResult<CheckoutSession> {
            self.calls
                .lock()
                .unwrap()
                .push((checkout.clone(), idempotency_key.clone()));
            (self.respond)()
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    fn initiator(processor: RecordingProcessor) -> CheckoutInitiator<RecordingProcessor> {
        CheckoutInitiator::new(CheckoutSettings::new("https://tickets.example"), processor)
    }

    fn attendee() -> IdentityClaims {
        IdentityClaims::new("user-1")
            .with_email("a@b.com")
            .with_group("attendee")
    }

    #[tokio::test]
    async fn test_non_attendee_denied_without_processor_call() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));
        let claims = IdentityClaims::new("user-1").with_group("organizer");

        let outcome = initiator.initiate(&claims, br#"{"eventId":"evt1"}"#).await;
        let response = outcome.into_response();

        assert_eq!(response.status, 403);
        assert_eq!(response.body["error"], NOT_ATTENDEE_MESSAGE);
        assert_eq!(initiator.processor().call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_event_id_rejected_without_processor_call() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));

        let bodies: [&[u8]; 4] = [b"", b"{}", br#"{"eventId":""}"#, br#"{"eventId":null}"#];
        for body in bodies {
            let outcome = initiator.initiate(&attendee(), body).await;
            assert_eq!(outcome.status_code(), 400);
            assert_eq!(
                outcome,
                CheckoutOutcome::validation_failed(MISSING_EVENT_ID_MESSAGE)
            );
        }
        assert_eq!(initiator.processor().call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_processor_error() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));

        let response = initiator
            .initiate(&attendee(), b"{not json")
            .await
            .into_response();

        assert_eq!(response.status, 500);
        assert!(response.cors);
        assert!(!response.body["error"].as_str().unwrap().is_empty());
        assert_eq!(initiator.processor().call_count(), 0);
    }

    #[tokio::test]
    async fn test_numeric_event_id_accepted() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));

        let response = initiator
            .initiate(&attendee(), br#"{"eventId":42,"timestamp":7}"#)
            .await
            .into_response();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["eventId"], "42");

        let calls = initiator.processor().calls.lock().unwrap();
        assert_eq!(calls[0].1.as_str(), "user-1-42-7");
        assert_eq!(calls[0].0.metadata["eventId"], "42");
    }

    #[tokio::test]
    async fn test_timestamp_of_any_type() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));

        let outcome = initiator
            .initiate(&attendee(), br#"{"eventId":"evt1","timestamp":{"a":1}}"#)
            .await;
        assert_eq!(outcome.status_code(), 200);

        let outcome = initiator
            .initiate(&attendee(), br#"{"eventId":"evt1","timestamp":false}"#)
            .await;
        assert_eq!(outcome.status_code(), 200);

        let calls = initiator.processor().calls.lock().unwrap();
        assert_eq!(calls[0].1.as_str(), r#"user-1-evt1-{"a":1}"#);
        let fallback = calls[1].1.as_str().strip_prefix("user-1-evt1-").unwrap();
        assert!(fallback.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_missing_username_uses_empty_user_id() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));
        let claims = IdentityClaims::default().with_group("attendee");

        let outcome = initiator
            .initiate(&claims, br#"{"eventId":"evt1","timestamp":55}"#)
            .await;
        assert_eq!(outcome.status_code(), 200);

        let calls = initiator.processor().calls.lock().unwrap();
        assert_eq!(calls[0].1.as_str(), "-evt1-55");
        assert_eq!(calls[0].0.metadata["userId"], "");
    }

    #[tokio::test]
    async fn test_success_response() {
        let initiator = initiator(RecordingProcessor::succeeding(
            "https://pay.example/cs_123",
            "cs_123",
        ));

        let response = initiator
            .initiate(&attendee(), br#"{"eventId":"evt1","timestamp":1700000000000}"#)
            .await
            .into_response();

        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({
                "checkoutUrl": "https://pay.example/cs_123",
                "sessionId": "cs_123",
                "eventId": "evt1"
            })
        );

        let calls = initiator.processor().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (checkout, key) = &calls[0];
        assert_eq!(key.as_str(), "user-1-evt1-1700000000000");
        assert_eq!(checkout.line_items.len(), 1);
        assert_eq!(checkout.line_items[0].quantity, 1);
        assert_eq!(checkout.line_items[0].unit_price.amount, 50_000);
        assert_eq!(checkout.line_items[0].unit_price.currency.as_str(), "inr");
        assert_eq!(checkout.customer_email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_same_timestamp_same_key() {
        let initiator = initiator(RecordingProcessor::succeeding("u", "id"));
        let body = br#"{"eventId":"evt1","timestamp":55}"#;

        initiator.initiate(&attendee(), body).await;
        initiator.initiate(&attendee(), body).await;

        let calls = initiator.processor().calls.lock().unwrap();
        assert_eq!(calls[0].1, calls[1].1);
    }

    #[tokio::test]
    async fn test_processor_error_passthrough() {
        let initiator = initiator(RecordingProcessor::failing(|| PaymentError::ProviderError {
            provider: "fake".into(),
            message: "Your card was declined".into(),
        }));

        let response = initiator
            .initiate(&attendee(), br#"{"eventId":"evt1"}"#)
            .await
            .into_response();

        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Your card was declined");
        assert!(response.cors);
    }

    #[tokio::test]
    async fn test_processor_error_fallback_message() {
        let initiator =
            initiator(RecordingProcessor::failing(|| PaymentError::NetworkError(String::new())));

        let response = initiator
            .initiate(&attendee(), br#"{"eventId":"evt1"}"#)
            .await
            .into_response();

        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Payment initiation failed");
    }
}
