use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_database::bson::{oid::ObjectId, Document};
use shared_database::convert::document_to_json;
use shared_database::AppointmentStore;
use shared_models::store::{InsertResult, UpdateResult};

use crate::models::AppointmentSearchQuery;

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentStore>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn AppointmentStore>) -> Self {
        Self { appointments }
    }

    pub async fn book(&self, appointment: Document) -> Result<InsertResult> {
        self.appointments.create_appointment(appointment).await
    }

    pub async fn search(&self, query: &AppointmentSearchQuery) -> Result<Vec<Value>> {
        debug!(
            "Searching appointments for {:?} on {:?}",
            query.patient_email, query.date
        );

        let appointments = self
            .appointments
            .find_appointments(query.patient_email.as_deref(), query.date.as_deref())
            .await?;

        Ok(appointments.into_iter().map(document_to_json).collect())
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<Value>> {
        Ok(self
            .appointments
            .get_appointment(id)
            .await?
            .map(document_to_json))
    }

    pub async fn attach_payment(&self, id: ObjectId, payment: Document) -> Result<UpdateResult> {
        self.appointments.set_appointment_payment(id, payment).await
    }
}
