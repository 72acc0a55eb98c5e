//! Integration tests for the public operational endpoints.

use jwt_gate_test_utils::{test_user, TestServer, TestTokenBuilder};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoint_returns_ok() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([]).await?;

    let response = reqwest::Client::new()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn test_health_ignores_bad_credentials() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([]).await?;

    let response = reqwest::Client::new()
        .get(format!("{}/health", server.url()))
        .bearer_auth("garbage")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_is_public() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let client = reqwest::Client::new();

    // Generate at least one validation so the exporter has something to render
    let token = TestTokenBuilder::new().for_user(42).sign();
    client
        .get(format!("{}/api/v1/me", server.url()))
        .bearer_auth(&token)
        .send()
        .await?;

    let response = client
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
