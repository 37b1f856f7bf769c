use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use shared_database::{DoctorRecord, DoctorStore};
use shared_models::store::InsertResult;

use crate::models::DoctorProfile;

pub struct DoctorService {
    doctors: Arc<dyn DoctorStore>,
}

impl DoctorService {
    pub fn new(doctors: Arc<dyn DoctorStore>) -> Self {
        Self { doctors }
    }

    /// Stores a new doctor profile with its image inline as binary data.
    pub async fn create_doctor(&self, record: DoctorRecord) -> Result<InsertResult> {
        debug!(
            "Creating doctor profile for {} ({} image bytes)",
            record.email,
            record.image.bytes.len()
        );
        self.doctors.create_doctor(record).await
    }

    pub async fn list_doctors(&self) -> Result<Vec<DoctorProfile>> {
        let records = self.doctors.list_doctors().await?;
        debug!("Loaded {} doctor profiles", records.len());
        Ok(records.into_iter().map(DoctorProfile::from).collect())
    }
}
