//! # Checkout Types
//!
//! The provider-agnostic description of a ticket checkout, and the session
//! a provider hands back for it.

use crate::price::{Currency, Price};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product name shown on the hosted checkout page
pub const TICKET_PRODUCT_NAME: &str = "Event Ticket";
/// Ticket price in paise (₹500.00)
pub const TICKET_UNIT_AMOUNT: i64 = 50_000;
/// Ticket currency
pub const TICKET_CURRENCY: Currency = Currency::INR;

/// Placeholder the processor replaces with its own session id
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// A line item in a checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    pub unit_price: Price,

    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    /// Calculate the total price for this line item
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Fixed ticket pricing
#[derive(Debug, Clone, PartialEq)]
pub struct TicketPricing {
    pub product_name: String,
    pub unit_price: Price,
}

impl Default for TicketPricing {
    fn default() -> Self {
        Self {
            product_name: TICKET_PRODUCT_NAME.to_string(),
            unit_price: Price::from_smallest_unit(TICKET_UNIT_AMOUNT, TICKET_CURRENCY),
        }
    }
}

/// Redirect targets built from the front-end base URL
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    base_url: String,
}

impl RedirectUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.strip_suffix('/').unwrap_or(&base_url).to_string();
        Self { base_url }
    }

    /// Success target, carrying the session id placeholder
    pub fn success_url(&self, event_id: &str, user_id: &str) -> String {
        format!(
            "{}/?paid=true&eventId={}&sessionId={}&userId={}",
            self.base_url, event_id, CHECKOUT_SESSION_ID_PLACEHOLDER, user_id
        )
    }

    /// Cancellation target
    pub fn cancel_url(&self, event_id: &str) -> String {
        format!("{}/?paid=false&eventId={}", self.base_url, event_id)
    }
}

/// Everything the processor needs to open a checkout session for one ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketCheckout {
    pub mode: CheckoutMode,

    /// Accepted payment method types
    pub payment_method_types: Vec<String>,

    pub line_items: Vec<LineItem>,

    /// Customer email (optional, for prefill)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Metadata echoed back by the processor on the session
    pub metadata: BTreeMap<String, String>,

    pub success_url: String,
    pub cancel_url: String,
}

impl TicketCheckout {
    /// Build the single-ticket checkout for a user and event
    pub fn for_event(
        event_id: &str,
        user_id: &str,
        user_email: &str,
        pricing: &TicketPricing,
        urls: &RedirectUrls,
    ) -> Self {
        let line_item = LineItem {
            name: pricing.product_name.clone(),
            description: Some(format!("Event ID: {}", event_id)),
            unit_price: pricing.unit_price,
            quantity: 1,
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("eventId".to_string(), event_id.to_string());
        metadata.insert("userId".to_string(), user_id.to_string());
        metadata.insert("userEmail".to_string(), user_email.to_string());

        Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec!["card".to_string()],
            line_items: vec![line_item],
            customer_email: (!user_email.is_empty()).then(|| user_email.to_string()),
            metadata,
            success_url: urls.success_url(event_id, user_id),
            cancel_url: urls.cancel_url(event_id),
        }
    }

    /// Checkout total
    pub fn total(&self) -> Price {
        let currency = self
            .line_items
            .first()
            .map(|item| item.unit_price.currency)
            .unwrap_or_default();
        Price {
            amount: self.line_items.iter().map(|item| item.total().amount).sum(),
            currency,
        }
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,
    /// URL to redirect customer to for payment
    pub checkout_url: String,
}

impl CheckoutSession {
    pub fn new(session_id: impl Into<String>, checkout_url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            checkout_url: checkout_url.into(),
        }
    }
}
