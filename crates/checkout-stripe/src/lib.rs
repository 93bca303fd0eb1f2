//! # checkout-stripe
//!
//! Stripe checkout processor for ticket-checkout-rs.
//!
//! `StripeCheckoutProcessor` implements `CheckoutProcessor` on top of the
//! Checkout Sessions API: dynamic line items, customer email prefill,
//! metadata, and an `Idempotency-Key` header per request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::{StripeCheckoutProcessor, StripeConfig};
//! use checkout_core::CheckoutProcessor;
//!
//! let processor = StripeCheckoutProcessor::new(StripeConfig::from_env())?;
//!
//! let session = processor.create_checkout_session(&checkout, &key).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutProcessor;
pub use config::StripeConfig;
