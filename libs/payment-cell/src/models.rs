use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::PaymentProcessor;

#[derive(Clone)]
pub struct PaymentState {
    pub processor: Arc<dyn PaymentProcessor>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in major currency units.
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// The slice of a Stripe PaymentIntent object this service reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub client_secret: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment processor is not configured")]
    NotConfigured,

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Payment processor request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Payment processor error: {message}")]
    StripeApiError { message: String },
}

/// Converts a major-unit amount into the processor's minor units.
pub fn to_minor_units(cost: f64) -> Result<i64, PaymentError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(PaymentError::InvalidAmount(cost));
    }

    Ok((cost * 100.0).round() as i64)
}
