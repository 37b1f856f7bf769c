use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::handlers;
use crate::models::DoctorState;

// Profile images travel inline in the multipart body.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn doctor_routes(state: DoctorState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
