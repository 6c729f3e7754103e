//! # Flover Backend
//!
//! Checkout backend for Flovermaps: bridges the map frontend to Stripe
//! Checkout Sessions.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FRONTEND_ORIGIN=https://flovermaps.com
//! export PORT=3000
//!
//! # Run the server
//! flover-backend
//! ```

use flover_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state; a missing Stripe key aborts startup
    let state = AppState::new()?;

    let addr = state.config.socket_addr();

    info!("Frontend origin: {}", state.config.frontend_origin);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Flover backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
