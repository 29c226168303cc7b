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

//! # Amadeus API Client
//!
//! Effectful (time, network) side of the crate: OAuth2 client-credentials
//! token handling and authenticated JSON requests.

use crate::config::AmadeusConfig;
use crate::error::{AmadeusError, Result};
use amadeus_token_cache::{AccessToken, IssuedToken, TokenCache};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use wreq::redirect::Policy;

/// Lifetime assumed when the grant response omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: u64 = 1700;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// One outbound call: method, path, query pairs and optional JSON body
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Comma-joined list parameter, the way the API expects `hotelIds` and friends
    pub fn query_list<V: AsRef<str>>(self, key: &str, values: &[V]) -> Self {
        let joined = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.query(key, joined)
    }

    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let qs = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&qs);
        }
        url
    }
}

/// Percent-encode a caller-supplied path segment such as an order ID
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[derive(Deserialize)]
struct GrantResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct RawResponse {
    status: u16,
    body: String,
}

/// Authenticated client for the Amadeus self-service APIs
///
/// Cheap to clone; clones share the HTTP connection pool and the token cache.
#[derive(Clone)]
pub struct AmadeusClient {
    client: Arc<wreq::Client>,
    config: Arc<AmadeusConfig>,
    tokens: TokenCache,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self> {
        let client = wreq::Client::builder()
            .redirect(Policy::default())
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| AmadeusError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tokens: TokenCache::new(),
        })
    }

    /// Build from `AMADEUS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(AmadeusConfig::from_env()?)
    }

    pub fn config(&self) -> &AmadeusConfig {
        &self.config
    }

    /// Number of client-credentials grants performed so far
    pub fn token_refreshes(&self) -> u64 {
        self.tokens.refresh_count()
    }
}

impl AmadeusClient {
    /// A bearer token valid at return time, fetching a new one when needed
    pub async fn get_token(&self) -> Result<AccessToken> {
        self.tokens.get_or_refresh(|| self.request_grant()).await
    }

    async fn request_grant(&self) -> Result<IssuedToken> {
        let url = self.config.token_url();
        let form = format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            urlencoding::encode(self.config.client_id()),
            urlencoding::encode(self.config.client_secret()),
        );

        tracing::debug!("[oauth2] Requesting client-credentials grant from {}", url);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(form)
            .send()
            .await
            .map_err(|e| AmadeusError::Authentication {
                status: None,
                body: Value::String(e.to_string()),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AmadeusError::Authentication {
                status: Some(status.as_u16()),
                body: Value::String(e.to_string()),
            })?;

        if !status.is_success() {
            tracing::error!("[oauth2] Grant refused with HTTP {}", status.as_u16());
            return Err(AmadeusError::Authentication {
                status: Some(status.as_u16()),
                body: parse_body(&body),
            });
        }

        let grant: GrantResponse =
            serde_json::from_str(&body).map_err(|e| AmadeusError::Authentication {
                status: Some(status.as_u16()),
                body: Value::String(format!("malformed token response: {e}")),
            })?;

        let expires_in = grant.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        tracing::info!("[oauth2] Access token refreshed, expires in {}s", expires_in);

        Ok(IssuedToken {
            access_token: grant.access_token,
            expires_in: Duration::from_secs(expires_in),
        })
    }

    async fn send(&self, request: &ApiRequest, url: &str, token: &AccessToken) -> Result<RawResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        let mut builder = builder
            .header("Authorization", format!("Bearer {}", token.secret()))
            .header("Accept", "application/json");
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .json(body);
        }

        let start = std::time::Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(
            "[amadeus] {} {} -> {} in {:?} ({} bytes)",
            request.method,
            request.path,
            status,
            start.elapsed(),
            body.len()
        );

        Ok(RawResponse { status, body })
    }

    /// Send `request` with a valid token
    ///
    /// A 401 drops the token, fetches a new one and retries exactly once.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let url = request.url(self.config.base_url());
        let token = self.get_token().await?;
        let mut response = self.send(request, &url, &token).await?;

        if response.status == 401 {
            tracing::warn!(
                "[amadeus] {} {} rejected the token, refreshing and retrying once",
                request.method,
                request.path
            );
            self.tokens.invalidate(&token).await;
            let fresh = self.get_token().await?;
            response = self.send(request, &url, &fresh).await?;
        }

        into_json(request.method, response)
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |req, (k, v)| req.query(k, v));
        self.execute(&request).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.execute(&ApiRequest::post(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(&ApiRequest::delete(path)).await
    }
}

fn into_json(method: Method, response: RawResponse) -> Result<Value> {
    let RawResponse { status, body } = response;

    if !(200..300).contains(&status) {
        return Err(AmadeusError::Api {
            status,
            body: parse_body(&body),
        });
    }

    if status == 204 || body.trim().is_empty() {
        return Ok(match method {
            Method::Delete => json!({"status": "success"}),
            _ => json!({}),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview = body.chars().take(300).collect::<String>();
        AmadeusError::Transport(format!("response is not JSON ({e}): {preview}"))
    })
}

/// Error bodies are passed through; JSON as-is, anything else as a string
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_query_pairs_in_order() {
        let req = ApiRequest::get("/v1/reference-data/locations")
            .query("keyword", "New York")
            .query("subType", "AIRPORT")
            .query("page[limit]", 10);

        assert_eq!(
            req.url("https://test.api.amadeus.com/"),
            "https://test.api.amadeus.com/v1/reference-data/locations?keyword=New%20York&subType=AIRPORT&page%5Blimit%5D=10"
        );
    }

    #[test]
    fn optional_and_list_parameters() {
        let req = ApiRequest::get("/v3/shopping/hotel-offers")
            .query_list("hotelIds", &["MCLONGHM", "ADNYCCTB"])
            .query_opt("returnDate", None::<&str>)
            .query_opt("max", Some(5));

        assert_eq!(
            req.query,
            vec![
                ("hotelIds".to_string(), "MCLONGHM,ADNYCCTB".to_string()),
                ("max".to_string(), "5".to_string()),
            ]
        );
        assert!(req.url("http://x").ends_with("hotelIds=MCLONGHM%2CADNYCCTB&max=5"));
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(path_segment("eJzTd9f3NjIJ/zYL"), "eJzTd9f3NjIJ%2FzYL");
    }

    #[test]
    fn no_content_maps_by_method() {
        let empty = |status| RawResponse {
            status,
            body: String::new(),
        };
        assert_eq!(
            into_json(Method::Delete, empty(204)).unwrap(),
            json!({"status": "success"})
        );
        assert_eq!(into_json(Method::Get, empty(204)).unwrap(), json!({}));
    }

    #[test]
    fn error_status_keeps_body() {
        let resp = RawResponse {
            status: 404,
            body: r#"{"errors":[{"status":404,"code":1797,"title":"NOT FOUND"}]}"#.into(),
        };
        match into_json(Method::Get, resp) {
            Err(AmadeusError::Api { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body["errors"][0]["code"], 1797);
            }
            other => panic!("expected Api error, got {:?}", other),
        }

        let resp = RawResponse {
            status: 502,
            body: "Bad Gateway".into(),
        };
        match into_json(Method::Get, resp) {
            Err(AmadeusError::Api { body, .. }) => assert_eq!(body, json!("Bad Gateway")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn non_json_success_is_a_transport_error() {
        let resp = RawResponse {
            status: 200,
            body: "<html>maintenance</html>".into(),
        };
        assert!(matches!(
            into_json(Method::Get, resp),
            Err(AmadeusError::Transport(_))
        ));
    }
}
