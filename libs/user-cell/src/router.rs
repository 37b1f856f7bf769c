use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::extractor::identity_middleware;

use crate::handlers;
use crate::models::UserState;

pub fn user_routes(state: UserState) -> Router {
    let public_routes = Router::new()
        .route("/", post(handlers::create_user).put(handlers::upsert_user))
        .route("/{email}", get(handlers::get_admin_status));

    let protected_routes = Router::new()
        .route("/admin", put(handlers::set_admin_role))
        .layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            identity_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
