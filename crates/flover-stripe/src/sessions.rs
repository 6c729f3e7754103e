//! # Stripe Checkout Sessions
//!
//! `PaymentGateway` implementation over Stripe's Checkout Sessions API.
//! Requests are form-encoded the way Stripe expects (bracketed keys for
//! nested structures); responses are the JSON session objects.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::DateTime;
use flover_core::{
    CheckoutError, CheckoutResult, CreateSessionParams, CreatedSession, PaymentGateway,
    SessionDetails,
};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Stripe Checkout Sessions gateway
///
/// Uses Stripe's hosted checkout page; one outbound call per operation,
/// no retries. The HTTP client carries an explicit 30-second timeout so a
/// wedged gateway call cannot hold a request open indefinitely.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the form body for session creation.
    ///
    /// Single line item, quantity 1, card only, payment mode. Metadata keys
    /// are emitted in sorted order so request bodies are deterministic.
    fn build_form(params: &CreateSessionParams) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            ("success_url".to_string(), params.success_url.clone()),
            ("cancel_url".to_string(), params.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".to_string(),
                params.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                params.unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                params.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                params.description.clone(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
        ];

        let mut keys: Vec<&String> = params.metadata.keys().collect();
        keys.sort();
        for key in keys {
            form.push((format!("metadata[{}]", key), params.metadata[key].clone()));
        }

        form
    }

    /// Map a non-2xx Stripe response to a gateway error.
    ///
    /// Stripe wraps failures in `{"error": {"message": ...}}`; anything that
    /// does not parse keeps the raw status and body.
    fn api_error(status: reqwest::StatusCode, body: &str) -> CheckoutError {
        error!("Stripe API error: status={}, body={}", status, body);

        if let Ok(envelope) = serde_json::from_str::<StripeErrorResponse>(body) {
            return CheckoutError::gateway(envelope.error.message);
        }

        CheckoutError::gateway(format!("HTTP {}: {}", status, body))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, params), fields(amount_cents = params.unit_amount))]
    async fn create_session(&self, params: &CreateSessionParams) -> CheckoutResult<CreatedSession> {
        let form = Self::build_form(params);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&form)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        let session_url = session.url.ok_or_else(|| {
            CheckoutError::Serialization("Stripe session has no redirect URL".to_string())
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(CreatedSession {
            id: session.id,
            url: session_url,
            created_at: session.created.and_then(|ts| DateTime::from_timestamp(ts, 0)),
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, id: &str) -> CheckoutResult<SessionDetails> {
        let url = format!("{}/v1/checkout/sessions/{}", self.config.api_base_url, id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(SessionDetails {
            id: session.id,
            metadata: session.metadata,
            amount_total: session.amount_total,
            payment_status: session.payment_status.unwrap_or_default(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

/// Checkout session object, reduced to the fields this backend reads.
/// Serves both the create and retrieve responses.
#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    amount_total: Option<i64>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    created: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> StripeGateway {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeGateway::new(config)
    }

    fn params() -> CreateSessionParams {
        let metadata: HashMap<String, String> = [
            ("lat", "1"),
            ("lng", "2"),
            ("place", ""),
            ("fromName", "Ana"),
            ("toName", "Luis"),
            ("message", "Feliz día"),
            ("ngo", ""),
            ("ngo_label", ""),
            ("amount_total_cents", "550"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        CreateSessionParams {
            currency: "eur".to_string(),
            unit_amount: 550,
            product_name: "Flovermaps • Flor solidaria".to_string(),
            description: "Ana → Luis • Feliz día".to_string(),
            metadata,
            success_url: "https://flovermaps.com/?success=1&session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "https://flovermaps.com/?canceled=1".to_string(),
        }
    }

    #[test]
    fn test_form_field_layout() {
        let form = StripeGateway::build_form(&params());
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("eur"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("550"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Flovermaps • Flor solidaria")
        );
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(get("metadata[amount_total_cents]"), Some("550"));
        assert_eq!(get("metadata[ngo]"), Some(""));

        // 9 fixed params + 9 metadata entries
        assert_eq!(form.len(), 18);
    }

    #[tokio::test]
    async fn test_create_session_posts_form_and_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains("unit_amount%5D=550"))
            .and(body_string_contains("currency%5D=eur"))
            .and(body_string_contains("quantity%5D=1"))
            .and(body_string_contains("metadata%5BfromName%5D=Ana"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_abc",
                "url": "https://checkout.stripe.com/c/pay/cs_test_abc",
                "created": 1700000000,
                "expires_at": 1700086400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = gateway_for(&server).create_session(&params()).await.unwrap();

        assert_eq!(session.id, "cs_test_abc");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_abc");
        assert!(session.created_at.is_some());
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_session_surfaces_stripe_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "Invalid currency: xyz", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_session(&params())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid currency: xyz");
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_retrieve_session_projects_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_abc"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_abc",
                "metadata": { "fromName": "Ana", "toName": "Luis" },
                "amount_total": 550,
                "payment_status": "paid"
            })))
            .mount(&server)
            .await;

        let details = gateway_for(&server)
            .retrieve_session("cs_test_abc")
            .await
            .unwrap();

        assert_eq!(details.id, "cs_test_abc");
        assert_eq!(details.amount_total, Some(550));
        assert_eq!(details.payment_status, "paid");
        assert_eq!(details.metadata["fromName"], "Ana");
    }

    #[tokio::test]
    async fn test_retrieve_session_tolerates_missing_fields() {
        let server = MockServer::start().await;

        // no metadata, no amount_total
        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_bare"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_bare",
                "payment_status": "unpaid"
            })))
            .mount(&server)
            .await;

        let details = gateway_for(&server)
            .retrieve_session("cs_test_bare")
            .await
            .unwrap();

        assert_eq!(details.amount_total, None);
        assert!(details.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_unknown_session_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "message": "No such checkout session: 'cs_missing'" }
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .retrieve_session("cs_missing")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No such checkout session: 'cs_missing'");
    }
}
