//! Integration tests for the authentication middleware on `/api/v1/me`.
//!
//! Every rejection must be a 401 with a `{error, message}` body and a
//! `WWW-Authenticate` challenge, and must never reach the handler.

use jsonwebtoken::Algorithm;
use jwt_gate::errors::WWW_AUTHENTICATE_VALUE;
use jwt_gate_test_utils::{test_user, TestServer, TestTokenBuilder};
use reqwest::{header, Response, StatusCode};
use serde_json::{json, Value};

async fn get_me(server: &TestServer, authorization: Option<&str>) -> Response {
    let mut request = reqwest::Client::new().get(format!("{}/api/v1/me", server.url()));
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }
    request.send().await.unwrap()
}

async fn assert_rejected(response: Response, error: &str, message: &str) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        WWW_AUTHENTICATE_VALUE
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": error, "message": message}));
}

#[tokio::test]
async fn test_valid_token_returns_identity() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = server.issue_token(42)?;

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["id"], 42);
    assert_eq!(body["email"], "user42@example.com");
    assert_eq!(body["iss"], "TestApp");
    assert_eq!(
        body["exp"].as_i64().unwrap() - body["iat"].as_i64().unwrap(),
        21600
    );
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn test_missing_header_is_no_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = get_me(&server, None).await;

    assert_rejected(response, "No Token", "Authorization token is required").await;
    assert_eq!(server.store().call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_non_bearer_scheme_is_no_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = get_me(&server, Some("Basic dXNlcjpwYXNz")).await;

    assert_rejected(response, "No Token", "Authorization token is required").await;
    assert_eq!(server.store().call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_garbage_token_is_invalid() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    let response = get_me(&server, Some("Bearer not-a-jwt")).await;

    assert_rejected(response, "Authentication Failed", "Invalid token").await;

    Ok(())
}

#[tokio::test]
async fn test_foreign_secret_is_invalid() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new()
        .for_user(42)
        .with_secret("someone-elses-secret")
        .sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_rejected(response, "Authentication Failed", "Invalid token").await;
    assert_eq!(server.store().call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_other_algorithm_is_invalid() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;

    for algorithm in [Algorithm::HS384, Algorithm::HS512] {
        let token = TestTokenBuilder::new()
            .for_user(42)
            .with_algorithm(algorithm)
            .sign();

        let response = get_me(&server, Some(&format!("Bearer {token}"))).await;
        assert_rejected(response, "Authentication Failed", "Invalid token").await;
    }

    Ok(())
}

#[tokio::test]
async fn test_expired_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new().for_user(42).expired().sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_rejected(response, "Authentication Failed", "Token has expired").await;
    assert_eq!(server.store().call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_token_without_expiry_is_invalid() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new().for_user(42).without_expiry().sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_rejected(response, "Authentication Failed", "Invalid token").await;

    Ok(())
}

#[tokio::test]
async fn test_unknown_user() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new().for_user(43).sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_rejected(response, "Authentication Failed", "Invalid user").await;
    assert_eq!(server.store().call_count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_token_without_subject() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new().without_subject().sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_rejected(response, "Authentication Failed", "Invalid user id").await;

    Ok(())
}

#[tokio::test]
async fn test_issuer_is_not_checked() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = TestTokenBuilder::new()
        .for_user(42)
        .with_issuer("SomeOtherApp")
        .sign();

    let response = get_me(&server, Some(&format!("Bearer {token}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["iss"], "SomeOtherApp");

    Ok(())
}
