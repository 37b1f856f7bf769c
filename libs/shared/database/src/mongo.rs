use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Client, Collection, Database,
};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::store::{InsertResult, UpdateResult};

use crate::convert::id_to_string;
use crate::store::{
    AppointmentStore, DoctorRecord, DoctorStore, UserProfile, UserStore, ADMIN_ROLE,
    APPOINTMENTS_COLLECTION, DOCTORS_COLLECTION, USERS_COLLECTION,
};

/// Process-wide MongoDB handle. Built once at startup and released through
/// [`MongoStore::shutdown`] when the server stops.
pub struct MongoStore {
    client: Client,
    users: Collection<Document>,
    appointments: Collection<Document>,
    doctors: Collection<DoctorRecord>,
}

impl MongoStore {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        if config.mongodb_uri.is_empty() {
            return Err(anyhow!("MongoDB connection string is not configured"));
        }

        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.database_name);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database {}", config.database_name);

        Ok(Self::from_database(client, database))
    }

    fn from_database(client: Client, database: Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
            appointments: database.collection(APPOINTMENTS_COLLECTION),
            doctors: database.collection(DOCTORS_COLLECTION),
            client,
        }
    }

    pub async fn shutdown(&self) {
        info!("Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}

fn update_result(result: mongodb::results::UpdateResult) -> UpdateResult {
    to_update_result(result.matched_count, result.modified_count, result.upserted_id.as_ref())
}

fn to_update_result(matched: u64, modified: u64, upserted_id: Option<&Bson>) -> UpdateResult {
    let upserted_id = upserted_id.map(id_to_string);

    UpdateResult {
        acknowledged: true,
        matched_count: matched,
        modified_count: modified,
        upserted_count: u64::from(upserted_id.is_some()),
        upserted_id,
    }
}

/// Exact match on both fields. An absent value becomes `null`, which the
/// server also matches against a missing field.
fn appointment_filter(patient_email: Option<&str>, date: Option<&str>) -> Document {
    doc! { "patientEmail": patient_email, "date": date }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn create_user(&self, user: Document) -> Result<InsertResult> {
        debug!("Inserting user document");
        let result = self.users.insert_one(user).await?;
        Ok(InsertResult::new(id_to_string(&result.inserted_id)))
    }

    async fn upsert_user(&self, profile: &UserProfile) -> Result<UpdateResult> {
        debug!("Upserting user: {}", profile.email);

        let filter = doc! { "email": profile.email.as_str() };
        let update = doc! {
            "$set": {
                "displayName": profile.display_name.as_deref(),
                "email": profile.email.as_str(),
                "phoneNumber": profile.phone_number.as_deref(),
                "photoURL": profile.photo_url.as_deref(),
            }
        };

        let result = self.users.update_one(filter, update).upsert(true).await?;
        Ok(update_result(result))
    }

    async fn find_user(&self, email: &str) -> Result<Option<Document>> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    async fn set_admin_role(&self, email: &str) -> Result<UpdateResult> {
        debug!("Granting admin role to: {}", email);

        let result = self
            .users
            .update_one(doc! { "email": email }, doc! { "$set": { "role": ADMIN_ROLE } })
            .upsert(false)
            .await?;
        Ok(update_result(result))
    }
}

#[async_trait]
impl AppointmentStore for MongoStore {
    async fn create_appointment(&self, appointment: Document) -> Result<InsertResult> {
        let result = self.appointments.insert_one(appointment).await?;
        let id = id_to_string(&result.inserted_id);
        debug!("Appointment created with ID: {}", id);
        Ok(InsertResult::new(id))
    }

    async fn find_appointments(
        &self,
        patient_email: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<Document>> {
        let cursor = self
            .appointments
            .find(appointment_filter(patient_email, date))
            .await?;
        let appointments: Vec<Document> = cursor.try_collect().await?;
        debug!("Found {} appointments", appointments.len());
        Ok(appointments)
    }

    async fn get_appointment(&self, id: ObjectId) -> Result<Option<Document>> {
        Ok(self.appointments.find_one(doc! { "_id": id }).await?)
    }

    async fn set_appointment_payment(&self, id: ObjectId, payment: Document) -> Result<UpdateResult> {
        debug!("Attaching payment to appointment: {}", id);

        let result = self
            .appointments
            .update_one(doc! { "_id": id }, doc! { "$set": { "payment": payment } })
            .await?;
        Ok(update_result(result))
    }
}

#[async_trait]
impl DoctorStore for MongoStore {
    async fn create_doctor(&self, doctor: DoctorRecord) -> Result<InsertResult> {
        debug!("Inserting doctor profile: {}", doctor.email);
        let result = self.doctors.insert_one(doctor).await?;
        Ok(InsertResult::new(id_to_string(&result.inserted_id)))
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>> {
        let cursor = self.doctors.find(doc! {}).await?;
        let doctors: Vec<DoctorRecord> = cursor.try_collect().await?;
        Ok(doctors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_values_filter_on_null() {
        let filter = appointment_filter(None, Some("10/19/2026"));

        assert_eq!(filter.get("patientEmail"), Some(&Bson::Null));
        assert_eq!(filter.get_str("date").unwrap(), "10/19/2026");
    }

    #[test]
    fn update_result_reports_upserted_id() {
        let id = ObjectId::new();

        let result = to_update_result(0, 0, Some(&Bson::ObjectId(id)));

        assert_eq!(result, UpdateResult::upserted(id.to_hex()));
    }

    #[test]
    fn update_result_without_upsert() {
        assert_eq!(to_update_result(1, 0, None), UpdateResult::matched(false));
        assert_eq!(to_update_result(0, 0, None), UpdateResult::unmatched());
    }
}
