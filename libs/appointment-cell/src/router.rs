use axum::{routing::get, Router};

use crate::handlers;
use crate::models::AppointmentState;

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::search_appointments).post(handlers::book_appointment),
        )
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment).put(handlers::update_payment),
        )
        .with_state(state)
}
