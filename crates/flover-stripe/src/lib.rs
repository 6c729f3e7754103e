//! # flover-stripe
//!
//! Stripe gateway for the Flovermaps checkout backend.
//!
//! Implements `flover_core::PaymentGateway` over Stripe's Checkout Sessions
//! API: create a hosted session, and retrieve it later by ID to read back
//! the stored metadata and payment status.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flover_stripe::StripeGateway;
//!
//! // Reads STRIPE_SECRET_KEY; fails fast if it is missing
//! let gateway = StripeGateway::from_env()?;
//!
//! let session = gateway.create_session(&params).await?;
//! // Redirect the customer to session.url
//! ```

pub mod config;
pub mod sessions;

// Re-exports
pub use config::StripeConfig;
pub use sessions::StripeGateway;
