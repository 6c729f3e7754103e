//! # Checkout Services
//!
//! The two request-scoped operations this backend performs: turning a
//! validated order into a gateway checkout session, and projecting a stored
//! session back into the reduced shape the frontend reads on return from
//! payment. Both are stateless; the gateway owns all session state.

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{BoxedGateway, CreateSessionParams, CreatedSession, SessionDetails};
use crate::order::{OrderRequest, CURRENCY, PRODUCT_NAME};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Gateway-side placeholder Stripe substitutes with the real session ID on
/// redirect. Must be passed through literally, not interpolated.
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Reduced view of a session returned to the frontend after payment.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Backlink ID from metadata, empty when never populated
    pub id: String,

    /// Metadata stored at creation time
    pub metadata: HashMap<String, String>,

    /// Total in major currency units (euros)
    pub amount_total: f64,

    /// Gateway payment status, verbatim
    pub payment_status: String,
}

/// Stateless checkout façade over an injected payment gateway.
#[derive(Clone)]
pub struct CheckoutService {
    gateway: BoxedGateway,
    frontend_origin: String,
}

impl CheckoutService {
    /// Create a service bound to a gateway and the canonical frontend origin.
    ///
    /// `frontend_origin` must be scheme + host only, no trailing path, and
    /// must match the domain the frontend is actually served from. The
    /// gateway rejects or mismatches redirects otherwise.
    pub fn new(gateway: BoxedGateway, frontend_origin: impl Into<String>) -> Self {
        Self {
            gateway,
            frontend_origin: frontend_origin.into(),
        }
    }

    /// Validate an order and create a checkout session for it.
    ///
    /// The gateway is never called when validation fails.
    #[instrument(skip(self, order))]
    pub async fn create_checkout_session(
        &self,
        order: &OrderRequest,
    ) -> CheckoutResult<CreatedSession> {
        order.validate()?;

        let params = CreateSessionParams {
            currency: CURRENCY.to_string(),
            unit_amount: order.amount_minor_units(),
            product_name: PRODUCT_NAME.to_string(),
            description: order.description(),
            metadata: order.metadata(),
            success_url: self.success_url(),
            cancel_url: self.cancel_url(),
        };

        debug!(
            amount_cents = params.unit_amount,
            "creating checkout session"
        );

        let session = self.gateway.create_session(&params).await?;

        info!(
            session_id = %session.id,
            provider = self.gateway.provider_name(),
            "created checkout session"
        );
        Ok(session)
    }

    /// Retrieve a session by ID and project it for the frontend.
    ///
    /// A missing gateway amount yields `0.0` rather than an error; the
    /// metadata map is returned as stored.
    #[instrument(skip(self))]
    pub async fn lookup_session(&self, id: &str) -> CheckoutResult<SessionView> {
        if id.is_empty() {
            return Err(CheckoutError::validation("missing id"));
        }

        let details = self.gateway.retrieve_session(id).await?;
        Ok(Self::project(details))
    }

    fn project(details: SessionDetails) -> SessionView {
        // The "id" metadata key is read back for the frontend but is never
        // set at creation time, so it stays empty. Kept as-is until the
        // post-payment fulfillment flow that would populate it exists.
        let backlink_id = details
            .metadata
            .get("id")
            .cloned()
            .unwrap_or_default();

        SessionView {
            id: backlink_id,
            amount_total: details.amount_total.unwrap_or(0) as f64 / 100.0,
            metadata: details.metadata,
            payment_status: details.payment_status,
        }
    }

    fn success_url(&self) -> String {
        format!(
            "{}/?success=1&session_id={}",
            self.frontend_origin, SESSION_ID_PLACEHOLDER
        )
    }

    fn cancel_url(&self) -> String {
        format!("{}/?canceled=1", self.frontend_origin)
    }
}
