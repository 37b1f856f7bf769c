use axum::{routing::post, Router};

use crate::handlers;
use crate::models::PaymentState;

pub fn payment_routes(state: PaymentState) -> Router {
    Router::new()
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .with_state(state)
}
