//! # flover-core
//!
//! Core types and services for the Flovermaps checkout backend.
//!
//! This crate provides:
//! - `OrderRequest` validation and the pure order→session transformations
//! - `PaymentGateway` trait for the hosted payment provider
//! - `CheckoutService` for session creation and lookup
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use flover_core::{CheckoutService, OrderRequest};
//!
//! let service = CheckoutService::new(gateway, "https://flovermaps.com");
//!
//! // Create a session and redirect the customer to its URL
//! let session = service.create_checkout_session(&order).await?;
//!
//! // Later, read it back when the customer returns from payment
//! let view = service.lookup_session(&session.id).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod service;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{
    BoxedGateway, CreateSessionParams, CreatedSession, PaymentGateway, SessionDetails,
};
pub use order::{OrderRequest, CURRENCY, DESCRIPTION_MAX_CHARS, PRODUCT_NAME};
pub use service::{CheckoutService, SessionView};
