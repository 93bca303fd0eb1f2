//! # checkout-api
//!
//! Serverless HTTP layer for ticket-checkout-rs.
//!
//! This crate provides:
//! - Axum router run under the Lambda HTTP runtime
//! - Claims extraction from the API Gateway authorizer context
//! - Conversion of checkout outcomes into HTTP responses
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/` | Create checkout session |
//! | POST | `/pay` | Create checkout session |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
