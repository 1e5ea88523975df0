mod common;

use account_service::domain::user::models::UserId;
use common::body;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("a@x.com", "a", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(!body["data"]["access_token"].as_str().unwrap().is_empty());
    assert!(!body["data"]["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert_eq!(body["data"]["user"]["username"], "a");
    assert!(body["data"]["user"]["id"].is_string());
    assert!(body["data"]["user"]["created_at"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("nicola@example.com", "nicola", "pass_word!")
        .await;

    let response = app
        .register("nicola@example.com", "nicola2", "pass_word!2")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body(response).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Email already registered"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola@example.com", "nicola", "pass_word!")
        .await;

    let response = app
        .register("other@example.com", "nicola", "pass_word!")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body(response).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Username already taken"));
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "nicola", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body(response).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_empty_username_and_password() {
    let app = TestApp::spawn().await;

    let response = app.register("nicola@example.com", "", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.register("nicola@example.com", "nicola", "").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;

    let response = app.login("a@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["data"]["user"]["id"], registered["data"]["user"]["id"]);
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert_eq!(body["data"]["user"]["username"], "a");
    assert_ne!(
        body["data"]["access_token"],
        registered["data"]["access_token"]
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("a@x.com", "a", "pw123").await;

    let wrong_password = app.login("a@x.com", "wrong").await;
    let unknown_email = app.login("nobody@x.com", "pw123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(wrong_password).await, body(unknown_email).await);
}

#[tokio::test]
async fn test_refresh_success() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let refresh_token = registered["data"]["refresh_token"].as_str().unwrap();

    let response = app.refresh(refresh_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"].get("refresh_token").is_none());
    assert_ne!(
        body["data"]["access_token"],
        registered["data"]["access_token"]
    );
}

#[tokio::test]
async fn test_refresh_with_access_token() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let access_token = registered["data"]["access_token"].as_str().unwrap();

    let response = app.refresh(access_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body(response).await;
    assert_eq!(body["data"]["message"], "Token is not a refresh token");
}

#[tokio::test]
async fn test_refresh_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app.refresh("not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body(response).await;
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let refresh_token = registered["data"]["refresh_token"].as_str().unwrap();
    let user_id =
        UserId::from_string(registered["data"]["user"]["id"].as_str().unwrap()).unwrap();

    assert!(app.repository.delete(&user_id).await);

    let response = app.refresh(refresh_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body(response).await;
    assert_eq!(body["data"]["message"], "User not found");
}

#[tokio::test]
async fn test_refresh_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/refresh")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body(response).await;
    assert_eq!(body["status_code"], 422);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("refresh_token"));
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/login")
        .header("Content-Type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body(response).await;
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_missing_content_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .body(r#"{"email": "a@x.com", "username": "a", "password": "pw123"}"#)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body(response).await;
    assert!(body["data"]["message"].is_string());
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let access_token = registered["data"]["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/user/me", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["data"], registered["data"]["user"]);
}

#[tokio::test]
async fn test_current_user_with_refreshed_access_token() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let refresh_token = registered["data"]["refresh_token"].as_str().unwrap();
    let refreshed = body(app.refresh(refresh_token).await).await;
    let access_token = refreshed["data"]["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/user/me", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["data"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_current_user_requires_access_token() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let refresh_token = registered["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/user/me", refresh_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_without_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/user/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body(response).await;
    assert_eq!(body["data"]["message"], "Missing Authorization header");
}

#[tokio::test]
async fn test_current_user_with_malformed_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/user/me")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let app = TestApp::spawn().await;

    let registered = body(app.register("a@x.com", "a", "pw123").await).await;
    let user_id = registered["data"]["user"]["id"].as_str().unwrap();

    let foreign = auth::Authenticator::new(b"a-completely-different-secret-32-bytes!");
    let forged = foreign.issue_access_token(user_id).unwrap();

    let response = app
        .get_authenticated("/api/v1/user/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let genuine = app.authenticator.issue_access_token(user_id).unwrap();
    let response = app
        .get_authenticated("/api/v1/user/me", &genuine)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_root() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, json!({ "status": "healthy" }));

    let response = app.get("/").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body(response).await;
    assert_eq!(body["message"], "Welcome to DeviceHub API");
    assert!(body["version"].is_string());
}
