//! End-to-end token lifecycle through a running server.

use common::types::UserId;
use jwt_gate::crypto::TokenCodec;
use jwt_gate_test_utils::{test_signing_config, test_user, TestServer};
use reqwest::StatusCode;

async fn me_status(server: &TestServer, token: &str) -> StatusCode {
    reqwest::Client::new()
        .get(format!("{}/api/v1/me", server.url()))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_identity_removed_after_issuance() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([test_user(42)]).await?;
    let token = server.issue_token(42)?;

    assert_eq!(me_status(&server, &token).await, StatusCode::OK);

    // Token stays cryptographically valid but no longer resolves
    server.store().remove(UserId(42));
    assert_eq!(me_status(&server, &token).await, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_identity_added_after_issuance() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn([]).await?;
    let token = server.issue_token(7)?;

    assert_eq!(me_status(&server, &token).await, StatusCode::UNAUTHORIZED);

    server.store().insert(test_user(7));
    assert_eq!(me_status(&server, &token).await, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_secret_rotation_invalidates_tokens() -> Result<(), anyhow::Error> {
    let old = TestServer::spawn([test_user(42)]).await?;
    let token = old.issue_token(42)?;

    let mut rotated = test_signing_config();
    rotated.secret = "rotated-secret".to_string().into();
    let new = TestServer::spawn_with_config([test_user(42)], rotated.clone()).await?;

    assert_eq!(me_status(&new, &token).await, StatusCode::UNAUTHORIZED);

    let fresh = TokenCodec::new(&rotated).issue(&UserId(42))?;
    assert_eq!(me_status(&new, &fresh).await, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn((1..=8).map(test_user)).await?;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for id in 1..=16 {
        let token = server.issue_token(id)?;
        let url = format!("{}/api/v1/me", server.url());
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let status = client
                .get(url)
                .bearer_auth(token)
                .send()
                .await
                .unwrap()
                .status();
            (id, status)
        }));
    }

    for handle in handles {
        let (id, status) = handle.await?;
        let expected = if id <= 8 {
            StatusCode::OK
        } else {
            StatusCode::UNAUTHORIZED
        };
        assert_eq!(status, expected, "user {id}");
    }

    Ok(())
}
