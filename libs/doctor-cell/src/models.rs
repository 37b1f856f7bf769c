use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use shared_database::{DoctorRecord, DoctorStore};

#[derive(Clone)]
pub struct DoctorState {
    pub doctors: Arc<dyn DoctorStore>,
}

/// Fields collected from the multipart upload form.
#[derive(Debug, Clone, Default)]
pub struct DoctorUpload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// A doctor profile as returned to clients, with the image base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image: String,
}

impl From<DoctorRecord> for DoctorProfile {
    fn from(record: DoctorRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()),
            name: record.name,
            email: record.email,
            phone: record.phone,
            image: BASE64.encode(&record.image.bytes),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl DoctorUpload {
    pub fn into_record(self) -> Result<DoctorRecord, DoctorError> {
        Ok(DoctorRecord::new(
            self.name.ok_or(DoctorError::MissingField("name"))?,
            self.email.ok_or(DoctorError::MissingField("email"))?,
            self.phone.ok_or(DoctorError::MissingField("phone"))?,
            self.image.ok_or(DoctorError::MissingField("image"))?,
        ))
    }
}
