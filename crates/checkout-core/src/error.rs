//! # Payment Error Types
//!
//! Typed error handling for the ticket checkout flow.
//! Processor operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Message safe to hand back to the caller.
    ///
    /// Provider errors surface the provider's own message without the
    /// `Provider error [..]` prefix; everything else uses the inner text.
    pub fn public_message(&self) -> &str {
        match self {
            PaymentError::Configuration(msg)
            | PaymentError::NetworkError(msg)
            | PaymentError::Serialization(msg) => msg,
            PaymentError::ProviderError { message, .. } => message,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
