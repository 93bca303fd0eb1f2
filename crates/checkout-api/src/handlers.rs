//! # Request Handlers
//!
//! Axum request handlers for the checkout function.

use crate::auth::AuthClaims;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::HandlerResponse;
use tracing::{error, instrument};

/// Convert a shaped checkout response into an HTTP response
fn to_http_response(shaped: HandlerResponse) -> Response {
    let status = StatusCode::from_u16(shaped.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let headers = shaped.headers();

    let mut response = (status, Json(shaped.body)).into_response();
    for (name, value) in headers {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => {
                response.headers_mut().insert(name, HeaderValue::from_static(value));
            }
            Err(e) => error!("Invalid header name {}: {}", name, e),
        }
    }
    response
}

/// Create a checkout session for an event ticket
#[instrument(skip_all)]
pub async fn create_checkout(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    body: Bytes,
) -> Response {
    let outcome = state.initiator.initiate(&claims, &body).await;
    to_http_response(outcome.into_response())
}
