//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! Secrets are loaded from environment variables.
//!
//! A missing or malformed secret key is not rejected here: it is logged
//! and the failure surfaces from the Stripe API on the first call.

use std::env;
use tracing::warn;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Read env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_API_BASE_URL` (optional)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").unwrap_or_else(|_| {
            warn!("STRIPE_SECRET_KEY not set; checkout calls will fail");
            String::new()
        });

        let config = Self::new(secret_key);
        if !config.secret_key.is_empty() && !config.is_test_mode() && !config.is_live_mode() {
            warn!("STRIPE_SECRET_KEY does not start with sk_test_ or sk_live_");
        }

        match env::var("STRIPE_API_BASE_URL") {
            Ok(url) if !url.is_empty() => config.with_api_base_url(url),
            _ => config,
        }
    }

    /// Create config with an explicit key
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Replace any occurrence of the secret key in `text`
    pub fn redact(&self, text: &str) -> String {
        if self.secret_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.secret_key, "[redacted]")
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}
