use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, spec::BinarySubtype, Binary, Document};
use serde::{Deserialize, Serialize};

use shared_models::store::{InsertResult, UpdateResult};

pub const USERS_COLLECTION: &str = "users";
pub const APPOINTMENTS_COLLECTION: &str = "appointments";
pub const DOCTORS_COLLECTION: &str = "doctors";

pub const ADMIN_ROLE: &str = "admin";

/// Profile fields written by the registration upsert. `role` is deliberately
/// absent so an upsert can never grant or revoke privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image: Binary,
}

impl DoctorRecord {
    pub fn new(name: String, email: String, phone: String, image: Vec<u8>) -> Self {
        Self {
            id: None,
            name,
            email,
            phone,
            image: Binary {
                subtype: BinarySubtype::Generic,
                bytes: image,
            },
        }
    }
}

/// Returns true when a stored user document carries exactly the admin role.
pub fn has_admin_role(user: &Document) -> bool {
    matches!(user.get_str("role"), Ok(role) if role == ADMIN_ROLE)
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: Document) -> Result<InsertResult>;

    /// Update-or-insert keyed by email.
    async fn upsert_user(&self, profile: &UserProfile) -> Result<UpdateResult>;

    async fn find_user(&self, email: &str) -> Result<Option<Document>>;

    /// Sets the admin role on an existing user. Never inserts.
    async fn set_admin_role(&self, email: &str) -> Result<UpdateResult>;

    async fn is_admin(&self, email: &str) -> Result<bool> {
        Ok(self
            .find_user(email)
            .await?
            .map(|user| has_admin_role(&user))
            .unwrap_or(false))
    }
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create_appointment(&self, appointment: Document) -> Result<InsertResult>;

    /// Exact match on both fields. `None` matches documents where the field
    /// is null or missing.
    async fn find_appointments(
        &self,
        patient_email: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Document>>;

    async fn get_appointment(&self, id: ObjectId) -> Result<Option<Document>>;

    async fn set_appointment_payment(&self, id: ObjectId, payment: Document) -> Result<UpdateResult>;
}

#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn create_doctor(&self, doctor: DoctorRecord) -> Result<InsertResult>;

    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>>;
}
