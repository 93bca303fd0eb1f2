//! # checkout-core
//!
//! Core types and checkout flow for ticket-checkout-rs.
//!
//! This crate provides:
//! - `IdentityClaims` for reading pre-verified caller claims
//! - `TicketCheckout`, `LineItem`, and `CheckoutSession` for the checkout payload
//! - `IdempotencyKey` for request-level deduplication
//! - `CheckoutProcessor` trait for payment providers
//! - `CheckoutInitiator` and `CheckoutOutcome` for the request flow
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutInitiator, CheckoutSettings, IdentityClaims};
//!
//! let initiator = CheckoutInitiator::new(CheckoutSettings::new("https://tickets.example"), processor);
//!
//! let claims = IdentityClaims::new("user-1").with_group("attendee");
//! let response = initiator
//!     .initiate(&claims, br#"{"eventId":"evt1"}"#)
//!     .await
//!     .into_response();
//!
//! // response.status == 200, response.body["checkoutUrl"] is the redirect
//! ```

pub mod body;
pub mod checkout;
pub mod claims;
pub mod error;
pub mod idempotency;
pub mod initiator;
pub mod outcome;
pub mod price;
pub mod processor;

// Re-exports for convenience
pub use body::CheckoutBody;
pub use checkout::{
    CheckoutMode, CheckoutSession, LineItem, RedirectUrls, TicketCheckout, TicketPricing,
};
pub use claims::{IdentityClaims, ATTENDEE_GROUP};
pub use error::{PaymentError, PaymentResult};
pub use idempotency::IdempotencyKey;
pub use initiator::{CheckoutInitiator, CheckoutSettings};
pub use outcome::{CheckoutOutcome, HandlerResponse, CORS_HEADERS, FALLBACK_ERROR_MESSAGE};
pub use price::{Currency, Price};
pub use processor::{BoxedCheckoutProcessor, CheckoutProcessor};
