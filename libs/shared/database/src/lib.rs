pub mod convert;
pub mod memory;
pub mod mongo;
pub mod store;

pub use mongodb::bson;
pub use store::{AppointmentStore, DoctorRecord, DoctorStore, UserProfile, UserStore};
