//! # Caller Claims
//!
//! Extracts identity claims placed on the request by the Lambda runtime.
//! API Gateway has already verified the token; nothing here validates
//! signatures.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use checkout_core::IdentityClaims;
use lambda_http::request::RequestContext;
use serde_json::Value;
use std::convert::Infallible;
use tracing::debug;

/// Claims of the caller. Missing or unrecognised request contexts yield
/// empty claims, which the checkout flow rejects as unauthorized.
pub struct AuthClaims(pub IdentityClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<RequestContext>()
            .map(claims_from_context)
            .unwrap_or_else(|| {
                debug!("No Lambda request context on request");
                IdentityClaims::default()
            });

        Ok(AuthClaims(claims))
    }
}

fn claims_from_context(context: &RequestContext) -> IdentityClaims {
    match serde_json::to_value(context) {
        Ok(value) => claims_from_context_value(&value),
        Err(e) => {
            debug!("Could not read request context: {}", e);
            IdentityClaims::default()
        }
    }
}

/// Read claims from a serialized request context.
///
/// HTTP APIs put JWT claims under `authorizer.jwt.claims`; REST APIs with
/// a Cognito authorizer put them under `authorizer.claims`.
pub fn claims_from_context_value(context: &Value) -> IdentityClaims {
    ["/authorizer/jwt/claims", "/authorizer/claims"]
        .iter()
        .find_map(|pointer| context.pointer(pointer).and_then(Value::as_object))
        .map(IdentityClaims::from_json)
        .unwrap_or_default()
}
