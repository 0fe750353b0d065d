//! Question submission API tests.
//!
//! Run with: `cargo test -p vupi-api --test questions_test`
//! Uses local storage in a temp dir and an in-memory question store.

mod helpers;

use axum::http::StatusCode;
use helpers::fixtures::{create_minimal_png, png_base64, submission_json};
use helpers::{setup_test_app, TEST_BASE_URL, TEST_BUCKET};
use serde_json::{json, Value};

#[tokio::test]
async fn test_text_and_image_submission() {
    let app = setup_test_app().await;

    let body = submission_json(json!([
        {"id": 1, "value": "aGVsbG8=", "type": "text"},
        {"id": 2, "value": png_base64(), "type": "image"}
    ]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["message"], "Submission created successfully");

    let records = app.store.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(json["submission_id"], record.id);

    let object_name = format!("{}_1.png", record.question_id);
    let stored = std::fs::read(app.bucket_dir().join(&object_name)).unwrap();
    assert_eq!(stored, create_minimal_png());

    let data = serde_json::to_value(&record.data).unwrap();
    assert_eq!(
        data,
        json!([
            {"id": 1, "type": "text", "value": "aGVsbG8="},
            {"id": 2, "type": "image", "value": format!("{}/{}/{}", TEST_BASE_URL, TEST_BUCKET, object_name)}
        ])
    );
    assert_eq!(record.materia, vec!["math".to_string()]);
    assert!(record.sub_assunto.is_empty());
}

#[tokio::test]
async fn test_text_only_submission_uploads_nothing() {
    let app = setup_test_app().await;

    let body = submission_json(json!([
        {"id": 5, "value": "first", "type": "text"},
        {"id": 4, "value": "second", "type": "latex"}
    ]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status_ok();
    let record = &app.store.records()[0];
    assert_eq!(record.data[0].id, 5);
    assert_eq!(record.data[1].item_type, "latex");
    assert_eq!(record.data[1].value, "second");
    assert_eq!(std::fs::read_dir(app.bucket_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_image_type_is_case_insensitive() {
    let app = setup_test_app().await;

    let body = submission_json(json!([
        {"id": 1, "value": png_base64(), "type": "Image"},
        {"id": 2, "value": png_base64(), "type": "IMAGE"}
    ]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status_ok();
    let record = &app.store.records()[0];
    for n in 1..=2 {
        let name = format!("{}_{}.png", record.question_id, n);
        assert!(app.bucket_dir().join(&name).exists());
        assert!(record.data[n - 1].value.ends_with(&name));
    }
    assert_eq!(record.data[0].item_type, "Image");
}

#[tokio::test]
async fn test_invalid_base64_is_rejected_without_insert() {
    let app = setup_test_app().await;

    let body = submission_json(json!([
        {"id": 1, "value": png_base64(), "type": "image"},
        {"id": 2, "value": "***", "type": "image"},
        {"id": 3, "value": png_base64(), "type": "image"}
    ]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "DECODE_ERROR");
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error decoding image data:"));

    assert!(app.store.records().is_empty());
    // The first image was already stored; the third was never attempted.
    assert_eq!(std::fs::read_dir(app.bucket_dir()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_missing_filter_is_validation_error() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/questions")
        .json(&json!({"data": []}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn test_wrong_field_type_is_validation_error() {
    let app = setup_test_app().await;

    let body = submission_json(json!([{"id": "one", "value": "x", "type": "text"}]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_persistence_failure_returns_500() {
    let app = setup_test_app().await;
    app.store.set_failing();

    let body = submission_json(json!([{"id": 1, "value": "hi", "type": "text"}]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error inserting record:"));
}

#[tokio::test]
async fn test_each_submission_gets_new_question_id() {
    let app = setup_test_app().await;
    let body = submission_json(json!([]));

    let first: Value = app.client().post("/questions").json(&body).await.json();
    let second: Value = app.client().post("/questions").json(&body).await.json();

    assert_ne!(first["submission_id"], second["submission_id"]);
    let records = app.store.records();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].question_id, records[1].question_id);
}

#[tokio::test]
async fn test_image_with_trailing_bits_is_uploaded() {
    let app = setup_test_app().await;

    let body = submission_json(json!([{"id": 1, "value": "aGVsbG9=", "type": "image"}]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status_ok();
    let record = &app.store.records()[0];
    let stored = std::fs::read(app.bucket_dir().join(format!("{}_1.png", record.question_id)))
        .unwrap();
    assert_eq!(stored, b"hello");
}

#[tokio::test]
async fn test_storage_failure_returns_500_without_insert() {
    let app = setup_test_app().await;
    // A plain file where the bucket directory should be makes every write fail.
    std::fs::remove_dir_all(app.bucket_dir()).unwrap();
    std::fs::write(app.bucket_dir(), b"").unwrap();

    let body = submission_json(json!([{"id": 1, "value": png_base64(), "type": "image"}]));
    let response = app.client().post("/questions").json(&body).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "UPLOAD_ERROR");
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error uploading image:"));
    assert!(app.store.records().is_empty());
}
