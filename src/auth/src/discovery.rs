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

//! OpenID Connect discovery.
//!
//! Identity providers publish a well-known JSON document describing their
//! endpoints. This module resolves the OAuth2 token endpoint from an issuer
//! URL, so applications can configure a single issuer instead of hard-coding
//! the token endpoint of each environment.

use crate::{Error, Result};

// Some providers (Keycloak among them) reject requests without a user agent.
const USER_AGENT: &str = concat!("kessel-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// The well-known path convention used by the identity provider.
///
/// The standard path uses a hyphen (`openid-configuration`); a few providers
/// publish the document under `openid_configuration` instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscoveryConvention {
    /// `{issuer}/.well-known/openid-configuration`
    #[default]
    Hyphenated,
    /// `{issuer}/.well-known/openid_configuration`
    Underscored,
}

impl DiscoveryConvention {
    fn well_known_path(&self) -> &'static str {
        match self {
            DiscoveryConvention::Hyphenated => ".well-known/openid-configuration",
            DiscoveryConvention::Underscored => ".well-known/openid_configuration",
        }
    }
}

/// Options for [fetch_oidc_discovery].
#[derive(Clone, Debug, Default)]
pub struct FetchDiscoveryOptions {
    http_client: Option<reqwest::Client>,
    convention: DiscoveryConvention,
}

impl FetchDiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given HTTP client instead of a default one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Select the well-known path convention the provider uses.
    pub fn with_convention(mut self, convention: DiscoveryConvention) -> Self {
        self.convention = convention;
        self
    }
}

/// The relevant subset of the discovery document.
///
/// The document is fetched on demand and not cached; callers typically store
/// the resolved token endpoint in their credentials instead.
#[derive(Clone, Debug, PartialEq)]
pub struct OidcDiscoveryMetadata {
    /// The OAuth2 token endpoint.
    pub token_endpoint: String,
    /// The issuer identifier as reported by the provider.
    pub issuer: String,
}

#[derive(serde::Deserialize)]
struct DiscoveryDocument {
    token_endpoint: Option<String>,
    issuer: Option<String>,
}

/// Resolves the token endpoint for `issuer_url` via OIDC discovery.
///
/// # Example
/// ```no_run
/// # use kessel_auth::discovery::{FetchDiscoveryOptions, fetch_oidc_discovery};
/// # async fn sample() -> kessel_errors::Result<()> {
/// let metadata = fetch_oidc_discovery(
///     "https://sso.example.com/realms/example",
///     FetchDiscoveryOptions::new(),
/// )
/// .await?;
/// println!("token endpoint: {}", metadata.token_endpoint);
/// # Ok(()) }
/// ```
pub async fn fetch_oidc_discovery(
    issuer_url: &str,
    options: FetchDiscoveryOptions,
) -> Result<OidcDiscoveryMetadata> {
    let client = options.http_client.unwrap_or_default();
    let discovery_url = format!(
        "{}/{}",
        issuer_url.trim_end_matches('/'),
        options.convention.well_known_path()
    );

    let response = client
        .get(&discovery_url)
        .header(http::header::USER_AGENT, USER_AGENT)
        .header(http::header::ACCEPT, "*/*")
        .send()
        .await
        .map_err(Error::connection)?;

    if response.status() != http::StatusCode::OK {
        return Err(Error::unexpected_status(
            response.status().as_u16(),
            format!("discovery request for {discovery_url} failed"),
        ));
    }

    let document = response
        .json::<DiscoveryDocument>()
        .await
        .map_err(Error::deserialization)?;

    let token_endpoint = document
        .token_endpoint
        .filter(|endpoint| !endpoint.is_empty())
        .ok_or_else(|| Error::deserialization("token_endpoint not found in discovery document"))?;
    url::Url::parse(&token_endpoint)
        .map_err(|e| Error::deserialization(format!("invalid token_endpoint URL: {e}")))?;

    Ok(OidcDiscoveryMetadata {
        token_endpoint,
        issuer: document.issuer.unwrap_or_default(),
    })
}
