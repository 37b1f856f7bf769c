// Runs against a real MongoDB deployment.
// Set LIVE_INTEGRATION_TESTS=true and MONGODB_TEST_URI to enable.

use mongodb::bson::{doc, oid::ObjectId};

use shared_config::{AppConfig, DatabaseMode};
use shared_database::mongo::MongoStore;
use shared_database::{AppointmentStore, UserProfile, UserStore};

fn live_config() -> Option<AppConfig> {
    if std::env::var("LIVE_INTEGRATION_TESTS").unwrap_or_default() != "true" {
        println!("Skipping live MongoDB tests (set LIVE_INTEGRATION_TESTS=true to enable)");
        return None;
    }

    let uri = std::env::var("MONGODB_TEST_URI")
        .expect("MONGODB_TEST_URI must be set for live integration tests");

    Some(AppConfig {
        database_mode: DatabaseMode::MongoDb,
        mongodb_uri: uri,
        database_name: "doctors_portal_live_test".to_string(),
        ..AppConfig::from_env()
    })
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, ObjectId::new().to_hex())
}

#[tokio::test]
async fn test_live_profile_upsert_then_update() {
    let Some(config) = live_config() else { return };
    let store = MongoStore::connect(&config).await.unwrap();
    let email = unique_email("profile");

    let profile = UserProfile {
        email: email.clone(),
        display_name: Some("Pat".to_string()),
        phone_number: None,
        photo_url: None,
    };

    let inserted = store.upsert_user(&profile).await.unwrap();
    assert_eq!(inserted.upserted_count, 1);
    assert!(inserted.upserted_id.is_some());

    let unchanged = store.upsert_user(&profile).await.unwrap();
    assert_eq!(unchanged.matched_count, 1);
    assert_eq!(unchanged.modified_count, 0);

    assert!(!store.is_admin(&email).await.unwrap());
    assert_eq!(store.set_admin_role(&email).await.unwrap().modified_count, 1);
    assert!(store.is_admin(&email).await.unwrap());

    store.shutdown().await;
}

#[tokio::test]
async fn test_live_admin_grant_never_inserts() {
    let Some(config) = live_config() else { return };
    let store = MongoStore::connect(&config).await.unwrap();
    let email = unique_email("ghost");

    let result = store.set_admin_role(&email).await.unwrap();

    assert_eq!(result.matched_count, 0);
    assert!(result.upserted_id.is_none());
    assert!(store.find_user(&email).await.unwrap().is_none());

    store.shutdown().await;
}

#[tokio::test]
async fn test_live_appointment_round_trip() {
    let Some(config) = live_config() else { return };
    let store = MongoStore::connect(&config).await.unwrap();
    let email = unique_email("patient");

    let inserted = store
        .create_appointment(doc! { "patientEmail": email.as_str(), "serviceName": "Cavity Protection" })
        .await
        .unwrap();
    let id = ObjectId::parse_str(&inserted.inserted_id).unwrap();

    let found = store.get_appointment(id).await.unwrap().unwrap();
    assert_eq!(found.get_str("serviceName").unwrap(), "Cavity Protection");

    let undated = store.find_appointments(Some(&email), None).await.unwrap();
    assert_eq!(undated.len(), 1);

    let paid = store
        .set_appointment_payment(id, doc! { "transactionId": "pi_live" })
        .await
        .unwrap();
    assert_eq!(paid.modified_count, 1);

    store.shutdown().await;
}
