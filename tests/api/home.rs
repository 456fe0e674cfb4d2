use hyper::StatusCode;
use serde_json::json;

use crate::helpers::{body_json, body_text, spawn_app};

#[tokio::test]
async fn page_data_is_an_empty_record() {
    let test_app = spawn_app();

    let response = test_app.get_page_data().await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn page_renders_without_an_action_result() {
    let test_app = spawn_app();

    let response = test_app.get_page().await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("?/formAction"));
    assert!(!html.contains("Submitted id"));
}

#[tokio::test]
async fn form_action_echoes_the_submitted_id() {
    let test_app = spawn_app();

    let response = test_app.post_form("/?/formAction", "id=42").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"type": "success", "status": 200, "data": {"id": "42"}})
    );
}

#[tokio::test]
async fn form_action_without_id_echoes_null() {
    let test_app = spawn_app();

    let response = test_app.post_form("/?/formAction", "name=nobody").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"type": "success", "status": 200, "data": {"id": null}})
    );
}

#[tokio::test]
async fn repeated_submissions_yield_identical_results() {
    let test_app = spawn_app();

    let first = body_json(test_app.post_form("/?/formAction", "id=7").await).await;
    let second = body_json(test_app.post_form("/?/formAction", "id=7").await).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn browser_submission_rerenders_the_page_with_the_result() {
    let test_app = spawn_app();

    let response = test_app
        .post(
            "/?/formAction",
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
            "id=42",
            false,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Submitted id: 42"));
}

#[tokio::test]
async fn multipart_submission_is_accepted() {
    let test_app = spawn_app();
    let body = "--XYZ\r\n\
        Content-Disposition: form-data; name=\"id\"\r\n\r\n\
        abc\r\n\
        --XYZ--\r\n";

    let response = test_app
        .post("/?/formAction", "multipart/form-data; boundary=XYZ", body, true)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!({"id": "abc"}));
}

#[tokio::test]
async fn unknown_action_returns_404() {
    let test_app = spawn_app();

    let response = test_app.post_form("/?/missing", "id=42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn default_action_returns_400_when_only_named_actions_exist() {
    let test_app = spawn_app();

    let response = test_app.post_form("/", "id=42").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn json_body_returns_415() {
    let test_app = spawn_app();

    let response = test_app
        .post(
            "/?/formAction",
            mime::APPLICATION_JSON.as_ref(),
            r#"{"id": "42"}"#,
            true,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
