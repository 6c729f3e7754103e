//! # Payment Gateway Trait
//!
//! Seam between the checkout services and the hosted payment processor.
//! The gateway owns all session state; this side only creates sessions and
//! reads them back by identifier. Injecting the gateway as a trait object
//! keeps the services testable without any network dependency.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything the gateway needs to create one checkout session.
///
/// Exactly one line item, quantity 1. Redirect URLs are fully rendered by
/// the caller, including any gateway-side placeholders.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    /// ISO currency code, lowercase (e.g. "eur")
    pub currency: String,

    /// Charge amount in minor currency units
    pub unit_amount: i64,

    /// Product name shown on the hosted checkout page
    pub product_name: String,

    /// Product description shown on the hosted checkout page
    pub description: String,

    /// String metadata stored on the session for later retrieval
    pub metadata: HashMap<String, String>,

    /// Redirect target after successful payment
    pub success_url: String,

    /// Redirect target if the customer cancels
    pub cancel_url: String,
}

/// A session the gateway just created.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    /// Gateway-assigned session ID
    pub id: String,

    /// Hosted checkout URL to redirect the customer to
    pub url: String,

    /// When the session was created, if the gateway reported it
    pub created_at: Option<DateTime<Utc>>,

    /// When the session expires, if the gateway reported it
    pub expires_at: Option<DateTime<Utc>>,
}

/// A session read back from the gateway.
#[derive(Debug, Clone, Default)]
pub struct SessionDetails {
    /// Gateway-assigned session ID
    pub id: String,

    /// Metadata stored at creation time (empty map if the gateway has none)
    pub metadata: HashMap<String, String>,

    /// Total in minor currency units; the gateway may omit it
    pub amount_total: Option<i64>,

    /// Payment status string, gateway-defined ("unpaid", "paid", ...)
    pub payment_status: String,
}

/// The two gateway operations this backend consumes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session and return its redirect URL and ID.
    async fn create_session(&self, params: &CreateSessionParams) -> CheckoutResult<CreatedSession>;

    /// Retrieve a session by its gateway-assigned ID.
    async fn retrieve_session(&self, id: &str) -> CheckoutResult<SessionDetails>;

    /// Gateway name, for logging.
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an injected gateway (dynamic dispatch)
pub type BoxedGateway = Arc<dyn PaymentGateway>;
