use axum::{
    extract::{Multipart, State},
    Json,
};

use shared_models::error::AppError;
use shared_models::store::InsertResult;

use crate::models::{DoctorError, DoctorProfile, DoctorState, DoctorUpload};
use crate::services::DoctorService;

impl From<DoctorError> for AppError {
    fn from(error: DoctorError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<DoctorUpload, DoctorError> {
    let mut upload = DoctorUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DoctorError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DoctorError::InvalidUpload(e.to_string()))?;
                upload.image = Some(bytes.to_vec());
            }
            "name" | "email" | "phone" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| DoctorError::InvalidUpload(e.to_string()))?;
                match name.as_str() {
                    "name" => upload.name = Some(value),
                    "email" => upload.email = Some(value),
                    _ => upload.phone = Some(value),
                }
            }
            _ => {}
        }
    }

    Ok(upload)
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<DoctorState>,
    multipart: Multipart,
) -> Result<Json<InsertResult>, AppError> {
    let record = read_upload(multipart).await?.into_record()?;
    let service = DoctorService::new(state.doctors);

    let result = service
        .create_doctor(record)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<DoctorState>,
) -> Result<Json<Vec<DoctorProfile>>, AppError> {
    let service = DoctorService::new(state.doctors);

    let doctors = service
        .list_doctors()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(doctors))
}
