use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::{doctor_routes, DoctorProfile, DoctorState};
use shared_database::memory::MemoryStore;

const BOUNDARY: &str = "----doctors-portal-boundary";

fn create_test_app() -> Router {
    doctor_routes(DoctorState {
        doctors: Arc::new(MemoryStore::new()),
    })
}

fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"doctor.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_uploaded_image_round_trips_through_listing() {
    let app = create_test_app();
    let image: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x10];

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body(
            &[
                ("name", "Dr. Jane Doe"),
                ("email", "jane@clinic.example.com"),
                ("phone", "+15550199"),
            ],
            Some(&image),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let inserted = read_json(response).await;
    assert_eq!(inserted["acknowledged"], true);
    let inserted_id = inserted["insertedId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doctors: Vec<DoctorProfile> = serde_json::from_value(read_json(response).await).unwrap();
    assert_eq!(doctors.len(), 1);

    let doctor = &doctors[0];
    assert_eq!(doctor.id.as_deref(), Some(inserted_id.as_str()));
    assert_eq!(doctor.name, "Dr. Jane Doe");
    assert_eq!(doctor.email, "jane@clinic.example.com");
    assert_eq!(doctor.phone, "+15550199");

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    assert_eq!(BASE64.decode(&doctor.image).unwrap(), image);
}

#[tokio::test]
async fn test_upload_without_image_is_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(upload_request(multipart_body(
            &[
                ("name", "Dr. Jane Doe"),
                ("email", "jane@clinic.example.com"),
                ("phone", "+15550199"),
            ],
            None,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Missing form field: image");
}

#[tokio::test]
async fn test_empty_listing() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, serde_json::json!([]));
}
