//! # Application State
//!
//! Configuration and shared state for the handler.
//! Built once per Lambda cold start and cloned into each request.

use checkout_core::{BoxedCheckoutProcessor, CheckoutInitiator, CheckoutSettings};
use checkout_stripe::{StripeCheckoutProcessor, StripeConfig};
use std::sync::Arc;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Front-end base URL for checkout redirects
    pub frontend_url: String,
    /// Stripe settings
    pub stripe: StripeConfig,
    /// Lambda function name, when running inside Lambda
    pub function_name: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let frontend_url = std::env::var("FRONTEND_URL").unwrap_or_else(|_| {
            warn!("FRONTEND_URL not set; redirect targets will be relative");
            String::new()
        });

        Self {
            frontend_url,
            stripe: StripeConfig::from_env(),
            function_name: std::env::var("AWS_LAMBDA_FUNCTION_NAME").ok(),
        }
    }

    /// Check if running inside Lambda
    pub fn is_lambda(&self) -> bool {
        self.function_name.is_some()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout flow
    pub initiator: Arc<CheckoutInitiator<BoxedCheckoutProcessor>>,
}

impl AppState {
    /// Create state backed by Stripe
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let processor = StripeCheckoutProcessor::new(config.stripe.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_processor(
            CheckoutSettings::new(config.frontend_url.clone()),
            Arc::new(processor),
        ))
    }

    /// Create state with any processor
    pub fn with_processor(settings: CheckoutSettings, processor: BoxedCheckoutProcessor) -> Self {
        Self {
            initiator: Arc::new(CheckoutInitiator::new(settings, processor)),
        }
    }
}
