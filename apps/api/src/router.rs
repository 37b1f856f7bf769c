use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::{appointment_routes, AppointmentState};
use doctor_cell::{doctor_routes, DoctorState};
use payment_cell::{payment_routes, PaymentProcessor, PaymentState};
use shared_config::AppConfig;
use shared_database::{AppointmentStore, DoctorStore, UserStore};
use shared_utils::identity::IdentityVerifier;
use user_cell::{user_routes, UserState};

/// Long-lived handles shared by every request.
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub doctors: Arc<dyn DoctorStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub payments: Option<Arc<dyn PaymentProcessor>>,
}

pub fn create_router(config: Arc<AppConfig>, services: AppServices) -> Router {
    let mut router = Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .nest(
            "/users",
            user_routes(UserState {
                users: services.users,
                verifier: services.verifier,
            }),
        )
        .nest(
            "/appointments",
            appointment_routes(AppointmentState {
                appointments: services.appointments,
            }),
        );

    if config.doctors_enabled {
        router = router.nest(
            "/doctors",
            doctor_routes(DoctorState {
                doctors: services.doctors,
            }),
        );
    }

    if let Some(processor) = services.payments {
        router = router.merge(payment_routes(PaymentState {
            processor,
            currency: config.payment_currency.clone(),
        }));
    }

    router
}
