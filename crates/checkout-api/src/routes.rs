//! # Routes
//!
//! Axum router for the checkout function.
//!
//! API Gateway may forward the integration either at its own route path
//! or at the root, so both are accepted.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

/// Create the application router
///
/// Routes:
///   - POST /     - Create checkout session
///   - POST /pay  - Create checkout session
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::create_checkout))
        .route("/pay", post(handlers::create_checkout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use checkout_core::{
        CheckoutProcessor, CheckoutSession, CheckoutSettings, IdempotencyKey, PaymentError,
        PaymentResult, TicketCheckout,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FakeProcessor {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CheckoutProcessor for FakeProcessor {
        async fn create_checkout_session(
            &self,
            _checkout: &TicketCheckout,
            _idempotency_key: &IdempotencyKey,
        ) -> PaymentResult<CheckoutSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PaymentError::NetworkError("connection reset".into()));
            }
            Ok(CheckoutSession::new("cs_123", "https://pay.example/cs_123"))
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    fn app(fail: bool) -> (Router, Arc<FakeProcessor>) {
        let processor = Arc::new(FakeProcessor {
            calls: AtomicUsize::new(0),
            fail,
        });
        let state = AppState::with_processor(
            CheckoutSettings::new("https://tickets.example"),
            processor.clone(),
        );
        (create_router(state), processor)
    }

    /// Build a request the way the Lambda runtime does from an HTTP API event.
    fn lambda_request(groups: &str, body: &str) -> Request<Body> {
        let event = json!({
            "version": "2.0",
            "routeKey": "POST /pay",
            "rawPath": "/pay",
            "rawQueryString": "",
            "headers": {
                "content-type": "application/json",
                "host": "abc123.execute-api.ap-south-1.amazonaws.com"
            },
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "abc123",
                "authorizer": {
                    "jwt": {
                        "claims": {
                            "cognito:username": "user-1",
                            "email": "a@b.com",
                            "cognito:groups": groups
                        },
                        "scopes": null
                    }
                },
                "domainName": "abc123.execute-api.ap-south-1.amazonaws.com",
                "domainPrefix": "abc123",
                "http": {
                    "method": "POST",
                    "path": "/pay",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "203.0.113.7",
                    "userAgent": "test"
                },
                "requestId": "req-1",
                "routeKey": "POST /pay",
                "stage": "$default",
                "time": "19/Oct/2026:10:00:00 +0000",
                "timeEpoch": 1792404000000u64
            },
            "body": body,
            "isBase64Encoded": false
        });

        let request = lambda_http::request::from_str(&event.to_string()).unwrap();
        let (parts, body) = request.into_parts();
        Request::from_parts(parts, Body::from(body.to_vec()))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_attendee_gets_checkout_url() {
        let (app, processor) = app(false);

        let response = app
            .oneshot(lambda_request("[attendee]", r#"{"eventId":"evt1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            json_body(response).await,
            json!({
                "checkoutUrl": "https://pay.example/cs_123",
                "sessionId": "cs_123",
                "eventId": "evt1"
            })
        );
        assert_eq!(processor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_attendee_forbidden() {
        let (app, processor) = app(false);

        let response = app
            .oneshot(lambda_request("[organizer]", r#"{"eventId":"evt1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["error"], "Only attendees can pay");
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_context_forbidden() {
        let (app, processor) = app(false);

        let request = Request::post("/pay")
            .body(Body::from(r#"{"eventId":"evt1"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_event_id_bad_request() {
        let (app, processor) = app(false);

        let response = app
            .oneshot(lambda_request("[attendee]", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "eventId required");
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_processor_failure_internal_error() {
        let (app, _processor) = app(true);

        let response = app
            .oneshot(lambda_request("[attendee]", r#"{"eventId":"evt1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
        assert_eq!(json_body(response).await["error"], "connection reset");
    }

    #[tokio::test]
    async fn test_malformed_json_internal_error() {
        let (app, processor) = app(false);

        let response = app
            .oneshot(lambda_request("[attendee]", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }
}
