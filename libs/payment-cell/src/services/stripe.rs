use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{PaymentError, PaymentIntent};

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Creates a payment intent for `amount` minor units of `currency`.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Stripe REST client for payment intents.
/// Based on: https://docs.stripe.com/api/payment_intents/create
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(config: &AppConfig) -> Result<Self, PaymentError> {
        if !config.is_payments_configured() {
            return Err(PaymentError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            secret_key: config.stripe_secret_key.clone(),
            base_url: config.stripe_api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    /// POST /v1/payment_intents
    ///
    /// No idempotency key is sent, so a retried call creates a second intent.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        debug!("Creating payment intent for {} {} at {}", amount, currency, url);

        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("automatic_payment_methods[enabled]", "true"),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Payment intent creation failed: {} - {}", status, response_text);
            return Err(PaymentError::StripeApiError {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        let intent: PaymentIntent = serde_json::from_str(&response_text).map_err(|e| {
            PaymentError::StripeApiError {
                message: format!("Failed to parse payment intent: {}", e),
            }
        })?;

        info!("Created payment intent {}", intent.id);
        Ok(intent)
    }
}
