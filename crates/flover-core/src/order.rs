//! # Order Types
//!
//! The inbound order shape for a solidarity flower, plus the pure
//! transformations applied to it before anything is sent to the payment
//! gateway: validation, minor-unit amount conversion, line-item description,
//! and the fixed-key session metadata map.

use crate::error::{CheckoutError, CheckoutResult};
use serde::Deserialize;
use std::collections::HashMap;

/// Currency for every charge. Single-currency product, fixed at EUR.
pub const CURRENCY: &str = "eur";

/// Product name shown on the Stripe checkout page.
pub const PRODUCT_NAME: &str = "Flovermaps • Flor solidaria";

/// Hard cap on the line-item description, cut by character count.
pub const DESCRIPTION_MAX_CHARS: usize = 120;

/// An order for one flower, as posted by the frontend.
///
/// Every field is optional at the wire level; `validate` decides what is
/// actually required. Field names match the frontend payload verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    /// Latitude of the flower placement
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude of the flower placement
    #[serde(default)]
    pub lng: Option<f64>,

    /// Human-readable place name
    #[serde(default)]
    pub place: Option<String>,

    /// Sender display name
    #[serde(default, rename = "fromName")]
    pub from_name: Option<String>,

    /// Recipient display name
    #[serde(default, rename = "toName")]
    pub to_name: Option<String>,

    /// Dedication message
    #[serde(default)]
    pub message: Option<String>,

    /// Charity identifier (optional)
    #[serde(default)]
    pub ngo: Option<String>,

    /// Charity display label (optional)
    #[serde(default)]
    pub ngo_label: Option<String>,

    /// Charge amount in major currency units (euros)
    #[serde(default)]
    pub amount_total: Option<f64>,
}

impl OrderRequest {
    /// Check that all required fields are present and truthy.
    ///
    /// Required: `lat`, `lng`, `fromName`, `toName`, `message`,
    /// `amount_total`. The check is deliberately coarse: a zero amount or a
    /// zero-valued coordinate is indistinguishable from "absent" and is
    /// rejected the same way. Callers get the literal error string the
    /// frontend matches on.
    pub fn validate(&self) -> CheckoutResult<()> {
        let missing = falsy_num(self.lat)
            || falsy_num(self.lng)
            || falsy_str(&self.from_name)
            || falsy_str(&self.to_name)
            || falsy_str(&self.message)
            || falsy_num(self.amount_total);

        if missing {
            return Err(CheckoutError::validation("missing fields"));
        }
        Ok(())
    }

    /// Charge amount in minor currency units (euro cents).
    ///
    /// `round(amount_total * 100)` with ties rounding away from zero, which
    /// for positive amounts is round-half-up. The multiply happens in f64,
    /// so representation at the half-cent boundary is part of the pinned
    /// behavior: `12.345 → 1235`, `2.675 → 268`.
    pub fn amount_minor_units(&self) -> i64 {
        (self.amount_total.unwrap_or(0.0) * 100.0).round() as i64
    }

    /// Line-item description: `"{fromName} → {toName} • {message}"`,
    /// hard-cut at [`DESCRIPTION_MAX_CHARS`] characters.
    pub fn description(&self) -> String {
        let full = format!(
            "{} → {} • {}",
            text_or_empty(&self.from_name),
            text_or_empty(&self.to_name),
            text_or_empty(&self.message),
        );
        full.chars().take(DESCRIPTION_MAX_CHARS).collect()
    }

    /// Build the session metadata map.
    ///
    /// All nine keys are always present so the lookup path never has to
    /// handle a missing key; absent optionals become empty strings. The
    /// gateway only stores string values, so numbers are rendered here.
    pub fn metadata(&self) -> HashMap<String, String> {
        let mut meta = HashMap::new();
        meta.insert("lat".to_string(), num_or_empty(self.lat));
        meta.insert("lng".to_string(), num_or_empty(self.lng));
        meta.insert("place".to_string(), text_or_empty(&self.place));
        meta.insert("fromName".to_string(), text_or_empty(&self.from_name));
        meta.insert("toName".to_string(), text_or_empty(&self.to_name));
        meta.insert("message".to_string(), text_or_empty(&self.message));
        meta.insert("ngo".to_string(), text_or_empty(&self.ngo));
        meta.insert("ngo_label".to_string(), text_or_empty(&self.ngo_label));
        meta.insert(
            "amount_total_cents".to_string(),
            self.amount_minor_units().to_string(),
        );
        meta
    }
}

fn falsy_num(value: Option<f64>) -> bool {
    value.map_or(true, |n| n == 0.0 || n.is_nan())
}

fn falsy_str(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn text_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn num_or_empty(value: Option<f64>) -> String {
    // f64 Display drops a trailing ".0", so 1.0 renders as "1"
    value.map(|n| n.to_string()).unwrap_or_default()
}
