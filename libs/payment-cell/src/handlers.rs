use axum::{extract::State, Json};

use shared_models::error::AppError;

use crate::models::{
    to_minor_units, PaymentError, PaymentIntentRequest, PaymentIntentResponse, PaymentState,
};

impl From<PaymentError> for AppError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::InvalidAmount(_) => AppError::BadRequest(error.to_string()),
            PaymentError::NotConfigured => AppError::Internal(error.to_string()),
            PaymentError::Request(_) | PaymentError::StripeApiError { .. } => {
                AppError::ExternalService(error.to_string())
            }
        }
    }
}

#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<PaymentState>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let amount = to_minor_units(request.cost)?;

    let intent = state
        .processor
        .create_payment_intent(amount, &state.currency)
        .await?;

    let client_secret = intent
        .client_secret
        .filter(|secret| !secret.is_empty())
        .ok_or_else(|| {
            AppError::ExternalService(format!("Payment intent {} has no client secret", intent.id))
        })?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}
