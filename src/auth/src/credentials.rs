// Copyright 2025 Red Hat, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OAuth2 client-credentials identities.
//!
//! An [OAuth2ClientCredentials] holds one client id/secret pair and the token
//! endpoint it exchanges them at. It caches the current token and refreshes
//! it on demand; see [OAuth2ClientCredentials::token] for the caching
//! behavior. Instances are cheap to clone and clones share the cache, so one
//! identity refreshes at most once no matter how many handles exist.
//!
//! # Example: construct from a known token endpoint
//! ```no_run
//! # use kessel_auth::credentials::Builder;
//! # async fn sample() -> kessel_errors::Result<()> {
//! let credentials = Builder::new("my-client-id", "my-client-secret")
//!     .with_token_endpoint("https://sso.example.com/token")
//!     .build()
//!     .await?;
//! let token = credentials.token().await?;
//! # Ok(()) }
//! ```
//!
//! # Example: resolve the token endpoint from the issuer
//! ```no_run
//! # use kessel_auth::credentials::Builder;
//! # async fn sample() -> kessel_errors::Result<()> {
//! let credentials = Builder::new("my-client-id", "my-client-secret")
//!     .with_issuer("https://sso.example.com/realms/example")
//!     .build()
//!     .await?;
//! # Ok(()) }
//! ```

use crate::discovery::{DiscoveryConvention, FetchDiscoveryOptions, fetch_oidc_discovery};
use crate::token::{Token, TokenProvider};
use crate::token_cache::TokenCache;
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::Instant;

const GRANT_TYPE: &str = "client_credentials";
// Lifetime assumed when the endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// A builder for [OAuth2ClientCredentials].
///
/// Exactly one of [with_token_endpoint][Builder::with_token_endpoint] or
/// [with_issuer][Builder::with_issuer] must be supplied. With an issuer, the
/// token endpoint is resolved via OIDC discovery inside
/// [build][Builder::build].
pub struct Builder {
    client_id: String,
    client_secret: String,
    endpoint: Option<EndpointSource>,
    convention: DiscoveryConvention,
    scopes: Option<Vec<String>>,
    http_client: Option<reqwest::Client>,
}

enum EndpointSource {
    TokenEndpoint(String),
    Issuer(String),
}

impl Builder {
    pub fn new<I, S>(client_id: I, client_secret: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            endpoint: None,
            convention: DiscoveryConvention::default(),
            scopes: None,
            http_client: None,
        }
    }

    /// Exchange the credentials at this token endpoint.
    pub fn with_token_endpoint<T: Into<String>>(mut self, token_endpoint: T) -> Self {
        self.endpoint = Some(EndpointSource::TokenEndpoint(token_endpoint.into()));
        self
    }

    /// Resolve the token endpoint from this issuer via OIDC discovery.
    pub fn with_issuer<T: Into<String>>(mut self, issuer_url: T) -> Self {
        self.endpoint = Some(EndpointSource::Issuer(issuer_url.into()));
        self
    }

    /// Select the well-known path convention used for discovery.
    ///
    /// Only relevant together with [with_issuer][Builder::with_issuer].
    pub fn with_discovery_convention(mut self, convention: DiscoveryConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Request these scopes when exchanging the credentials.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Use the given HTTP client for discovery and token refreshes.
    ///
    /// A default client is created when none is supplied.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Returns the configured [OAuth2ClientCredentials].
    ///
    /// Performs OIDC discovery when the builder was given an issuer, so this
    /// may issue a network call. No token is fetched yet; the first
    /// [token][OAuth2ClientCredentials::token] call does that.
    pub async fn build(self) -> Result<OAuth2ClientCredentials> {
        let client = self.http_client.unwrap_or_default();
        let token_endpoint = match self.endpoint {
            Some(EndpointSource::TokenEndpoint(endpoint)) => endpoint,
            Some(EndpointSource::Issuer(issuer)) => {
                let options = FetchDiscoveryOptions::new()
                    .with_http_client(client.clone())
                    .with_convention(self.convention);
                fetch_oidc_discovery(&issuer, options).await?.token_endpoint
            }
            None => {
                return Err(Error::client_creation(
                    "a token endpoint or issuer URL is required",
                ));
            }
        };

        let provider = Oauth2TokenProvider {
            client_id: self.client_id,
            client_secret: self.client_secret,
            token_endpoint,
            scopes: self.scopes.map(|scopes| scopes.join(" ")),
            client,
        };
        Ok(OAuth2ClientCredentials {
            cache: TokenCache::new(provider),
        })
    }
}

/// One OAuth2 client-credentials identity with a shared token cache.
#[derive(Clone, Debug)]
pub struct OAuth2ClientCredentials {
    cache: TokenCache<Oauth2TokenProvider>,
}

impl OAuth2ClientCredentials {
    /// Returns a currently valid token for this identity.
    ///
    /// A cached token is returned as long as it has more than 300 seconds of
    /// lifetime left; otherwise the endpoint is called. Concurrent callers
    /// share a single refresh: one of them performs the exchange while the
    /// rest wait for its result. A failed refresh is returned to the caller
    /// and leaves the cache unchanged, so a later call retries.
    pub async fn token(&self) -> Result<Token> {
        self.cache.token(false).await
    }

    /// Discards the cached token and fetches a new one.
    pub async fn force_refresh(&self) -> Result<Token> {
        self.cache.token(true).await
    }
}

struct Oauth2TokenProvider {
    client_id: String,
    client_secret: String,
    token_endpoint: String,
    scopes: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for Oauth2TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oauth2TokenProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[censored]")
            .field("token_endpoint", &self.token_endpoint)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[derive(serde::Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

#[async_trait::async_trait]
impl TokenProvider for Oauth2TokenProvider {
    async fn token(&self) -> Result<Token> {
        let request = TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: GRANT_TYPE,
            scope: self.scopes.as_deref(),
        };
        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&request)
            .send()
            .await
            .map_err(Error::token_retrieval)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::token_retrieval(Error::unexpected_status(
                status,
                format!("token endpoint returned: {body}"),
            )));
        }

        let response = response
            .json::<TokenResponse>()
            .await
            .map_err(Error::token_retrieval)?;
        let expires_in = match response.expires_in {
            None | Some(0) => DEFAULT_EXPIRES_IN,
            Some(seconds) => seconds,
        };
        Ok(Token {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".into()),
            expires_at: Some(Instant::now() + Duration::from_secs(expires_in)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_cache::EXPIRATION_WINDOW;
    use axum::Json;
    use axum::extract::Form;
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::task::JoinHandle;

    type TestResult = anyhow::Result<()>;

    #[derive(Clone, Default)]
    struct TokenEndpoint {
        // The form fields of every request, in arrival order.
        requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    }

    impl TokenEndpoint {
        fn requests(&self) -> Vec<HashMap<String, String>> {
            self.requests.lock().unwrap().clone()
        }
    }

    // Starts a server answering `POST /token` with the given status and body.
    async fn start(
        status: StatusCode,
        body: Value,
    ) -> (String, TokenEndpoint, JoinHandle<()>) {
        let endpoint = TokenEndpoint::default();
        let requests = endpoint.requests.clone();
        let handler = move |Form(fields): Form<HashMap<String, String>>| async move {
            requests.lock().unwrap().push(fields);
            (status, Json(body.clone()))
        };
        let app = axum::Router::new().route("/token", axum::routing::post(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/token"), endpoint, server)
    }

    fn token_response(access_token: &str, expires_in: u64) -> Value {
        json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "expires_in": expires_in,
        })
    }

    #[tokio::test]
    async fn exchange_sends_client_credentials_grant() -> TestResult {
        let (token_endpoint, endpoint, _server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let token = credentials.token().await?;
        assert_eq!(token.access_token, "test-token");
        assert_eq!(token.token_type, "Bearer");
        let expires_at = token.expires_at.expect("expiration should be set");
        assert!(Instant::now() + EXPIRATION_WINDOW < expires_at);

        let requests = endpoint.requests();
        assert_eq!(requests.len(), 1);
        let fields = &requests[0];
        assert_eq!(fields.get("client_id").map(String::as_str), Some("test-client-id"));
        assert_eq!(
            fields.get("client_secret").map(String::as_str),
            Some("test-client-secret")
        );
        assert_eq!(
            fields.get("grant_type").map(String::as_str),
            Some("client_credentials")
        );
        assert_eq!(fields.get("scope"), None);
        Ok(())
    }

    #[tokio::test]
    async fn scopes_are_space_separated() -> TestResult {
        let (token_endpoint, endpoint, _server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .with_scopes(["openid", "service"])
            .build()
            .await?;
        credentials.token().await?;

        let requests = endpoint.requests();
        assert_eq!(
            requests[0].get("scope").map(String::as_str),
            Some("openid service")
        );
        Ok(())
    }

    #[tokio::test]
    async fn cached_token_avoids_second_exchange() -> TestResult {
        let (token_endpoint, endpoint, _server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let first = credentials.token().await?;
        let second = credentials.token().await?;
        assert_eq!(first, second);
        assert_eq!(endpoint.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn force_refresh_exchanges_again() -> TestResult {
        let (token_endpoint, endpoint, _server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        credentials.token().await?;
        let refreshed = credentials.force_refresh().await?;
        assert_eq!(refreshed.access_token, "test-token");
        assert_eq!(endpoint.requests().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_the_cache() -> TestResult {
        let (token_endpoint, endpoint, _server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let clone = credentials.clone();
        credentials.token().await?;
        clone.token().await?;
        assert_eq!(endpoint.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_expires_in_defaults_to_an_hour() -> TestResult {
        let (token_endpoint, _endpoint, _server) = start(
            StatusCode::OK,
            json!({"access_token": "test-token", "token_type": "Bearer"}),
        )
        .await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let token = credentials.token().await?;
        let expires_at = token.expires_at.expect("expiration should be set");
        let remaining = expires_at - Instant::now();
        assert!(remaining > Duration::from_secs(3590), "{remaining:?}");
        assert!(remaining <= Duration::from_secs(3600), "{remaining:?}");
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_wrapped_as_token_retrieval() -> TestResult {
        let (token_endpoint, _endpoint, _server) = start(
            StatusCode::UNAUTHORIZED,
            json!({"error": "invalid_client"}),
        )
        .await;

        let credentials = Builder::new("test-client-id", "bad-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let err = credentials.token().await.unwrap_err();
        assert!(err.is_token_retrieval(), "{err:?}");
        assert!(err.to_string().contains("invalid_client"), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_wrapped_as_token_retrieval() -> TestResult {
        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint("http://127.0.0.1:1/token")
            .build()
            .await?;
        let err = credentials.token().await.unwrap_err();
        assert!(err.is_token_retrieval(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_response_is_wrapped_as_token_retrieval() -> TestResult {
        let (token_endpoint, _endpoint, _server) =
            start(StatusCode::OK, json!({"token_type": "Bearer"})).await;

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_token_endpoint(token_endpoint)
            .build()
            .await?;
        let err = credentials.token().await.unwrap_err();
        assert!(err.is_token_retrieval(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn issuer_discovery_resolves_the_token_endpoint() -> TestResult {
        let (token_endpoint, endpoint, _token_server) =
            start(StatusCode::OK, token_response("test-token", 3600)).await;

        let document = json!({"token_endpoint": token_endpoint, "issuer": "test-issuer"});
        let app = axum::Router::new().route(
            "/.well-known/openid-configuration",
            axum::routing::get(move || async move { Json(document.clone()) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let issuer = format!("http://{}", listener.local_addr().unwrap());
        let _discovery_server = tokio::spawn(async {
            axum::serve(listener, app).await.unwrap();
        });

        let credentials = Builder::new("test-client-id", "test-client-secret")
            .with_issuer(issuer)
            .build()
            .await?;
        let token = credentials.token().await?;
        assert_eq!(token.access_token, "test-token");
        assert_eq!(endpoint.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_endpoint_configuration_fails_fast() {
        let err = Builder::new("test-client-id", "test-client-secret")
            .build()
            .await
            .unwrap_err();
        assert!(err.is_client_creation(), "{err:?}");
    }

    #[test]
    fn debug_censors_client_secret() {
        let provider = Oauth2TokenProvider {
            client_id: "test-client-id".into(),
            client_secret: "test-client-secret".into(),
            token_endpoint: "https://sso.example.com/token".into(),
            scopes: None,
            client: reqwest::Client::new(),
        };
        let got = format!("{provider:?}");
        assert!(got.contains("test-client-id"), "{got}");
        assert!(!got.contains("test-client-secret"), "{got}");
    }
}
