//! # Checkout Processor Trait
//!
//! The one operation we need from a payment provider: open a hosted
//! checkout session. Everything else (payment methods, fraud checks,
//! session lifecycle) stays inside the provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         CheckoutProcessor (trait)           │
//! │  ├── create_checkout_session()              │
//! │  └── provider_name()                        │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!          ┌────────────┴────────────┐
//!  ┌───────┴────────┐        ┌───────┴────────┐
//!  │ StripeCheckout │        │ test doubles   │
//!  │   Processor    │        │                │
//!  └────────────────┘        └────────────────┘
//! ```

use crate::checkout::{CheckoutSession, TicketCheckout};
use crate::error::PaymentResult;
use crate::idempotency::IdempotencyKey;
use async_trait::async_trait;
use std::sync::Arc;

/// Payment provider capable of creating checkout sessions.
#[async_trait]
pub trait CheckoutProcessor: Send + Sync {
    /// Create a checkout session and return its redirect URL and id.
    ///
    /// # Arguments
    /// * `checkout` - The session payload
    /// * `idempotency_key` - Request-level deduplication token; not part
    ///   of the payload
    async fn create_checkout_session(
        &self,
        checkout: &TicketCheckout,
        idempotency_key: &IdempotencyKey,
    ) -> PaymentResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared processor (dynamic dispatch)
pub type BoxedCheckoutProcessor = Arc<dyn CheckoutProcessor>;

#[async_trait]
impl<P: CheckoutProcessor + ?Sized> CheckoutProcessor for Arc<P> {
    async fn create_checkout_session(
        &self,
        checkout: &TicketCheckout,
        idempotency_key: &IdempotencyKey,
    ) -> PaymentResult<CheckoutSession> {
        (**self)
            .create_checkout_session(checkout, idempotency_key)
            .await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
