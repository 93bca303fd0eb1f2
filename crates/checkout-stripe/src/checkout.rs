//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Stripe hosts the payment page; we only create the session.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutProcessor, CheckoutSession, IdempotencyKey, PaymentError, PaymentResult,
    TicketCheckout,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session processor
///
/// Uses Stripe's hosted checkout page for secure payments.
pub struct StripeCheckoutProcessor {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProcessor {
    /// Create a new Stripe checkout processor
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Build form data for the Stripe API
    fn form_params(checkout: &TicketCheckout) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), checkout.mode.as_str().to_string()),
            ("success_url".to_string(), checkout.success_url.clone()),
            ("cancel_url".to_string(), checkout.cancel_url.clone()),
        ];

        for (i, method) in checkout.payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        for (i, item) in checkout.line_items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.unit_price.currency.as_str().to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_price.amount.to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            if let Some(ref desc) = item.description {
                form_params.push((
                    format!("line_items[{}][price_data][product_data][description]", i),
                    desc.clone(),
                ));
            }
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        if let Some(ref email) = checkout.customer_email {
            form_params.push(("customer_email".to_string(), email.clone()));
        }

        for (key, value) in &checkout.metadata {
            form_params.push((format!("metadata[{}]", key), value.clone()));
        }

        form_params
    }

    fn provider_error(&self, message: &str) -> PaymentError {
        PaymentError::ProviderError {
            provider: PROVIDER.to_string(),
            message: self.config.redact(message),
        }
    }
}

#[async_trait]
impl CheckoutProcessor for StripeCheckoutProcessor {
    #[instrument(
        skip(self, checkout, idempotency_key),
        fields(idempotency_key = %idempotency_key)
    )]
    async fn create_checkout_session(
        &self,
        checkout: &TicketCheckout,
        idempotency_key: &IdempotencyKey,
    ) -> PaymentResult<CheckoutSession> {
        let form_params = Self::form_params(checkout);

        debug!(
            "Creating Stripe checkout session: {} items, mode={}",
            checkout.line_items.len(),
            checkout.mode.as_str()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", idempotency_key.as_str())
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(self.config.redact(&e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(self.config.redact(&e.to_string())))?;

        if !status.is_success() {
            error!("Stripe API error: status={}", status);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                debug!(
                    code = ?error_response.error.code,
                    param = ?error_response.error.param,
                    "Stripe error details"
                );
                return Err(self.provider_error(&error_response.error.message));
            }

            return Err(self.provider_error(&format!("HTTP {}", status)));
        }

        let session_response: StripeCheckoutSessionResponse =
            serde_json::from_str(&body).map_err(|e| {
                PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        let checkout_url = session_response.url.ok_or_else(|| {
            PaymentError::Serialization(format!(
                "Stripe session {} has no checkout url",
                session_response.id
            ))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, checkout_url
        );

        Ok(CheckoutSession::new(session_response.id, checkout_url))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}
