use anyhow::{bail, Result};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::store::{InsertResult, UpdateResult};

use crate::convert::id_to_string;
use crate::store::{
    AppointmentStore, DoctorRecord, DoctorStore, UserProfile, UserStore, ADMIN_ROLE,
};

/// In-process store with the same observable semantics as the MongoDB
/// collections. Selected with `DATABASE_MODE=memory`; contents live only as
/// long as the process.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<Document>>,
    appointments: RwLock<Vec<Document>>,
    doctors: RwLock<Vec<DoctorRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Keeps a caller-supplied `_id` of any type, otherwise prepends a fresh
/// ObjectId the way the driver does.
fn with_generated_id(doc: Document) -> (Bson, Document) {
    if let Some(id) = doc.get("_id") {
        return (id.clone(), doc);
    }

    let id = Bson::ObjectId(ObjectId::new());
    let mut stored = doc! { "_id": id.clone() };
    for (key, value) in doc {
        stored.insert(key, value);
    }
    (id, stored)
}

fn insert_document(collection: &mut Vec<Document>, doc: Document) -> Result<InsertResult> {
    let (id, stored) = with_generated_id(doc);

    if collection.iter().any(|existing| existing.get("_id") == Some(&id)) {
        bail!("duplicate key: _id {}", id_to_string(&id));
    }

    collection.push(stored);
    Ok(InsertResult::new(id_to_string(&id)))
}

fn field_matches(doc: &Document, key: &str, expected: Option<&str>) -> bool {
    match (doc.get(key), expected) {
        (None | Some(Bson::Null), None) => true,
        (Some(Bson::String(value)), Some(expected)) => value == expected,
        _ => false,
    }
}

/// Applies `$set` semantics and reports whether anything changed.
fn apply_set(doc: &mut Document, fields: Document) -> bool {
    let mut modified = false;
    for (key, value) in fields {
        if doc.get(&key) != Some(&value) {
            doc.insert(key, value);
            modified = true;
        }
    }
    modified
}

fn profile_fields(profile: &UserProfile) -> Document {
    doc! {
        "displayName": profile.display_name.as_deref(),
        "email": profile.email.as_str(),
        "phoneNumber": profile.phone_number.as_deref(),
        "photoURL": profile.photo_url.as_deref(),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: Document) -> Result<InsertResult> {
        insert_document(&mut *self.users.write().await, user)
    }

    async fn upsert_user(&self, profile: &UserProfile) -> Result<UpdateResult> {
        let mut users = self.users.write().await;

        if let Some(user) = users
            .iter_mut()
            .find(|user| field_matches(user, "email", Some(profile.email.as_str())))
        {
            let modified = apply_set(user, profile_fields(profile));
            return Ok(UpdateResult::matched(modified));
        }

        let (id, stored) = with_generated_id(profile_fields(profile));
        debug!("Upsert inserted user: {}", profile.email);
        users.push(stored);
        Ok(UpdateResult::upserted(id_to_string(&id)))
    }

    async fn find_user(&self, email: &str) -> Result<Option<Document>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| field_matches(user, "email", Some(email)))
            .cloned())
    }

    async fn set_admin_role(&self, email: &str) -> Result<UpdateResult> {
        let mut users = self.users.write().await;

        match users
            .iter_mut()
            .find(|user| field_matches(user, "email", Some(email)))
        {
            Some(user) => {
                let modified = apply_set(user, doc! { "role": ADMIN_ROLE });
                Ok(UpdateResult::matched(modified))
            }
            None => Ok(UpdateResult::unmatched()),
        }
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn create_appointment(&self, appointment: Document) -> Result<InsertResult> {
        insert_document(&mut *self.appointments.write().await, appointment)
    }

    async fn find_appointments(
        &self,
        patient_email: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Document>> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .filter(|appointment| {
                field_matches(appointment, "patientEmail", patient_email)
                    && field_matches(appointment, "date", date)
            })
            .cloned()
            .collect())
    }

    async fn get_appointment(&self, id: ObjectId) -> Result<Option<Document>> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|appointment| appointment.get_object_id("_id").ok() == Some(id))
            .cloned())
    }

    async fn set_appointment_payment(&self, id: ObjectId, payment: Document) -> Result<UpdateResult> {
        let mut appointments = self.appointments.write().await;

        match appointments
            .iter_mut()
            .find(|appointment| appointment.get_object_id("_id").ok() == Some(id))
        {
            Some(appointment) => {
                let modified = apply_set(appointment, doc! { "payment": payment });
                Ok(UpdateResult::matched(modified))
            }
            None => Ok(UpdateResult::unmatched()),
        }
    }
}

#[async_trait]
impl DoctorStore for MemoryStore {
    async fn create_doctor(&self, mut doctor: DoctorRecord) -> Result<InsertResult> {
        let id = *doctor.id.get_or_insert_with(ObjectId::new);
        self.doctors.write().await.push(doctor);
        Ok(InsertResult::new(id.to_hex()))
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>> {
        Ok(self.doctors.read().await.clone())
    }
}
