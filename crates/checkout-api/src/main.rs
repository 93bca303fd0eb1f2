//! # Ticket Checkout
//!
//! Lambda function that opens a Stripe checkout session for an event ticket.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FRONTEND_URL=https://tickets.example
//!
//! # Build and deploy
//! cargo lambda build --release --bin ticket-checkout
//! cargo lambda deploy ticket-checkout
//! ```

use checkout_api::{routes, state::AppConfig, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    // CloudWatch ingests one JSON object per line
    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(false)
                    .with_current_span(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    let config = AppConfig::from_env();
    let state = AppState::new(&config)?;

    if config.is_lambda() {
        info!(
            "Ticket checkout starting: function={}, stripe_test_mode={}",
            config.function_name.as_deref().unwrap_or_default(),
            config.stripe.is_test_mode()
        );
    } else {
        info!("Ticket checkout starting outside Lambda; waiting for the runtime API");
    }

    let app = routes::create_router(state);

    lambda_http::run(app)
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e))
}
