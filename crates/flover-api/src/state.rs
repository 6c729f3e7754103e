//! # Application State
//!
//! Shared state for the axum application. Configuration is read from the
//! environment exactly once at startup and held immutably; the request
//! handlers only ever see the constructed `CheckoutService`.

use flover_core::{BoxedGateway, CheckoutService};
use flover_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Canonical frontend origin (scheme + host, no trailing path).
    /// Redirect URLs are built from this; it must match the domain the
    /// frontend is served from or Stripe will mismatch the redirects.
    pub frontend_origin: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "https://flovermaps.com".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout service over the configured gateway
    pub service: CheckoutService,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the Stripe gateway from the environment.
    ///
    /// Fails if `STRIPE_SECRET_KEY` is missing; the binary treats that as a
    /// fatal startup error.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_gateway(Arc::new(gateway), config))
    }

    /// Create state with an injected gateway (used by tests)
    pub fn with_gateway(gateway: BoxedGateway, config: AppConfig) -> Self {
        let service = CheckoutService::new(gateway, config.frontend_origin.clone());
        Self { service, config }
    }
}
