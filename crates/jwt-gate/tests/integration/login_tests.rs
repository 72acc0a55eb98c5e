//! Integration tests for `POST /api/v1/auth/login`.

use jwt_gate_test_utils::{test_user, TestServer, TEST_PASSWORD};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_issues_usable_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&json!({"email": "user42@example.com", "password": TEST_PASSWORD}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 21600);

    let token = body["access_token"].as_str().unwrap();
    let me = client
        .get(format!("{}/api/v1/me", server.url()))
        .bearer_auth(token)
        .send()
        .await?;

    assert_eq!(me.status(), StatusCode::OK);
    let me_body: Value = me.json().await?;
    assert_eq!(me_body["id"], 42);

    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&json!({"email": "user42@example.com", "password": "wrong"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({"error": "Authentication Failed", "message": "Invalid credentials"})
    );

    Ok(())
}

#[tokio::test]
async fn test_login_unknown_email() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&json!({"email": "nobody@example.com", "password": TEST_PASSWORD}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await?;
    assert_eq!(body["message"], "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn test_login_malformed_body() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&json!({"email": "user42@example.com"}))
        .send()
        .await?;

    // Rejected by the Json extractor before any credential check
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}
