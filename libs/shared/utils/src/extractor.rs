use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};

use shared_models::auth::RequestIdentity;

use crate::identity::IdentityVerifier;

// Identity extraction only: a missing, malformed or rejected token still
// reaches the handler, with an empty identity attached.
pub async fn identity_middleware(
    State(verifier): State<Arc<dyn IdentityVerifier>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let identity = match request.headers().typed_get::<Authorization<Bearer>>() {
        Some(auth) => verifier.verify(auth.token()).await,
        None => None,
    };

    request.extensions_mut().insert(RequestIdentity(identity));

    next.run(request).await
}
