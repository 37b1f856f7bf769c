use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{Map, Value};

use shared_database::bson::{oid::ObjectId, Document};
use shared_database::convert::json_to_document;
use shared_models::error::AppError;
use shared_models::store::{InsertResult, UpdateResult};

use crate::models::{AppointmentSearchQuery, AppointmentState};
use crate::services::AppointmentService;

fn parse_appointment_id(appointment_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(appointment_id)
        .map_err(|_| AppError::BadRequest(format!("Invalid appointment id: {}", appointment_id)))
}

fn to_document(body: &Map<String, Value>) -> Result<Document, AppError> {
    json_to_document(body).map_err(|e| AppError::BadRequest(format!("Unsupported document: {}", e)))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Json(appointment): Json<Map<String, Value>>,
) -> Result<Json<InsertResult>, AppError> {
    let service = AppointmentService::new(state.appointments);

    let result = service
        .book(to_document(&appointment)?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(state): State<AppointmentState>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let service = AppointmentService::new(state.appointments);

    let appointments = service
        .search(&query)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_appointment_id(&appointment_id)?;
    let service = AppointmentService::new(state.appointments);

    let appointment = service
        .get(id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_payment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<String>,
    Json(payment): Json<Map<String, Value>>,
) -> Result<Json<UpdateResult>, AppError> {
    let id = parse_appointment_id(&appointment_id)?;
    let service = AppointmentService::new(state.appointments);

    let result = service
        .attach_payment(id, to_document(&payment)?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}
