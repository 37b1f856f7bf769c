use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shared_database::AppointmentStore;

#[derive(Clone)]
pub struct AppointmentState {
    pub appointments: Arc<dyn AppointmentStore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    #[serde(rename = "patientEmail")]
    pub patient_email: Option<String>,
    pub date: Option<String>,
}
