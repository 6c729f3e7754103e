//! # Checkout Error Types
//!
//! Typed error handling for the Flovermaps checkout backend.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid or incomplete request data (client-caused)
    #[error("{0}")]
    Validation(String),

    /// Payment gateway API error (Stripe rejected the request)
    #[error("{message}")]
    Gateway { message: String },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    Network(String),

    /// Gateway response could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        CheckoutError::Validation(message.into())
    }

    /// Shorthand for a gateway failure carrying the upstream message
    pub fn gateway(message: impl Into<String>) -> Self {
        CheckoutError::Gateway {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Validation failures are the caller's fault (400); everything else
    /// collapses to 500, including gateway rejections and network faults.
    /// No distinction is made between transient and permanent gateway
    /// errors, and nothing is retried.
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Validation(_) => 400,
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Gateway { .. } => 500,
            CheckoutError::Network(_) => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::validation("missing fields").status_code(),
            400
        );
        assert_eq!(
            CheckoutError::gateway("No such checkout session").status_code(),
            500
        );
        assert_eq!(
            CheckoutError::Network("timeout".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_gateway_message_passthrough() {
        let err = CheckoutError::gateway("Invalid API Key provided");
        assert_eq!(err.to_string(), "Invalid API Key provided");
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = CheckoutError::validation("missing id");
        assert_eq!(err.to_string(), "missing id");
    }
}
