use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{Map, Value};

use shared_database::bson::Document;
use shared_database::convert::json_to_document;
use shared_database::UserProfile;
use shared_models::auth::RequestIdentity;
use shared_models::error::AppError;
use shared_models::store::{InsertResult, UpdateResult};

use crate::models::{AdminRoleRequest, AdminStatus, UserState};
use crate::services::user::{AdminGate, UserService};

fn to_document(body: &Map<String, Value>) -> Result<Document, AppError> {
    json_to_document(body).map_err(|e| AppError::BadRequest(format!("Unsupported document: {}", e)))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<UserState>,
    Json(user): Json<Map<String, Value>>,
) -> Result<Json<InsertResult>, AppError> {
    let service = UserService::new(state.users);

    let result = service
        .register(to_document(&user)?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<UserState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UpdateResult>, AppError> {
    let service = UserService::new(state.users);

    let result = service
        .save_profile(&profile)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

/// The body is only read once the requester has passed the gate, so an
/// anonymous caller gets 401 whatever it sends.
#[axum::debug_handler]
pub async fn set_admin_role(
    State(state): State<UserState>,
    Extension(identity): Extension<RequestIdentity>,
    body: Bytes,
) -> Result<Json<UpdateResult>, AppError> {
    let service = UserService::new(state.users);

    let gate = service
        .check_admin(&identity)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let requester_email = match gate {
        AdminGate::Unauthenticated => {
            return Err(AppError::Auth("You are not authorized.".to_string()))
        }
        AdminGate::NotAdmin => {
            return Err(AppError::Forbidden("You don't have permission.".to_string()))
        }
        AdminGate::Admin(email) => email,
    };

    let request: AdminRoleRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid admin role request: {}", e)))?;

    let result = service
        .grant_admin(&requester_email, &request.email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn get_admin_status(
    State(state): State<UserState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let service = UserService::new(state.users);

    let is_admin = service
        .is_admin(&email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(AdminStatus { is_admin }))
}
