//!  Amadeus Travel Tools
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! OAuth2 client-credentials grant and token reuse against a mock upstream.


use anyhow::Result;
use axum::http::Method;
use mcp_amadeus::{AmadeusConfig, AmadeusError, AmadeusClient};
use mock_upstream::{MockUpstream, TOKEN_PATH};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn token_expiry_is_in_the_future() -> Result<()> {
    let mock = MockUpstream::start().await;
    let client = mock.client();

    let token = client.get_token().await?;
    assert_eq!(token.secret(), "token-1");
    assert!(!token.is_expired());
    assert!(token.expires_at() > tokio::time::Instant::now());
    Ok(())
}

#[tokio::test]
async fn grant_is_form_encoded_client_credentials() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.client().get_token().await?;

    let grants = mock.requests();
    assert_eq!(grants.len(), 1);
    let grant = &grants[0];
    assert_eq!(grant.method, "POST");
    assert_eq!(grant.path, TOKEN_PATH);
    assert_eq!(
        grant.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert!(grant.body.contains("grant_type=client_credentials"));
    assert!(grant.body.contains("client_id=test-client-id"));
    assert!(grant.body.contains("client_secret=test-client-secret"));
    Ok(())
}

#[tokio::test]
async fn cached_token_is_reused_across_sequential_calls() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.on(
        Method::GET,
        "/v1/reference-data/locations",
        200,
        json!({"data": []}),
    );
    let client = mock.client();

    for _ in 0..5 {
        client
            .get("/v1/reference-data/locations", &[("keyword", "PAR")])
            .await?;
    }

    assert_eq!(mock.grant_count(), 1);
    assert_eq!(client.token_refreshes(), 1);
    for request in mock.api_requests() {
        assert_eq!(request.header("authorization"), Some("Bearer token-1"));
    }
    Ok(())
}

#[tokio::test]
async fn clones_share_one_token() -> Result<()> {
    let mock = MockUpstream::start().await;
    let client = mock.client();
    let clone = client.clone();

    let (a, b) = tokio::join!(client.get_token(), clone.get_token());
    assert_eq!(a?.secret(), b?.secret());
    assert_eq!(mock.grant_count(), 1);
    Ok(())
}

#[tokio::test]
async fn short_lived_token_is_refreshed_after_expiry() -> Result<()> {
    let mock = MockUpstream::start().await;
    // Below the refresh margin the cache keeps the token for half its lifetime
    mock.set_expires_in(1);
    let client = mock.client();

    let first = client.get_token().await?;
    let again = client.get_token().await?;
    assert_eq!(first.secret(), again.secret());

    tokio::time::sleep(Duration::from_millis(700)).await;
    let second = client.get_token().await?;
    assert_eq!(second.secret(), "token-2");
    assert_eq!(mock.grant_count(), 2);
    Ok(())
}

#[tokio::test]
async fn refused_grant_is_an_authentication_error() -> Result<()> {
    let mock = MockUpstream::start().await;
    let body = json!({
        "error": "invalid_client",
        "error_description": "Client credentials are invalid",
        "code": 38187,
        "title": "Invalid parameters"
    });
    mock.on(Method::POST, TOKEN_PATH, 401, body.clone());
    mock.on(
        Method::GET,
        "/v1/reference-data/locations",
        200,
        json!({"data": []}),
    );
    let client = mock.client();

    match client.get_token().await {
        Err(AmadeusError::Authentication { status, body: got }) => {
            assert_eq!(status, Some(401));
            assert_eq!(got, body);
        }
        other => panic!("expected authentication error, got {:?}", other.map(|_| ())),
    }

    // The API is never reached without a token
    let err = client
        .get("/v1/reference-data/locations", &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "authentication_error");
    assert!(mock.api_requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_token_endpoint() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = AmadeusConfig::new("id", "secret")
        .with_base_url(format!("http://{addr}"))
        .with_timeout(Duration::from_secs(2));
    let client = AmadeusClient::new(config)?;

    let err = client.get_token().await.unwrap_err();
    assert!(
        matches!(err, AmadeusError::Authentication { status: None, .. }),
        "{err:?}"
    );
    Ok(())
}
