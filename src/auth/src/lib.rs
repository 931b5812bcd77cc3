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

//! OAuth2 authentication for the Kessel client libraries.
//!
//! Kessel services authenticate callers with the OAuth2 [client-credentials
//! grant]: a service presents its client id and secret to a token endpoint
//! and receives a short-lived bearer token. This crate implements that flow:
//!
//! - [credentials::OAuth2ClientCredentials] owns one client-credentials
//!   identity. It caches the current token and refreshes it before expiration,
//!   coordinating concurrent callers so that at most one refresh is in flight
//!   per identity.
//! - [discovery::fetch_oidc_discovery] resolves a token endpoint from an
//!   issuer URL using the [OIDC discovery] convention.
//! - [request::AuthRequest] decorates plain HTTP requests with a bearer
//!   token, for REST endpoints that sit next to the gRPC API.
//!
//! The HTTP client used for token refreshes and discovery is injectable;
//! a default [reqwest::Client] is created only when the caller does not
//! provide one.
//!
//! # Example
//! ```no_run
//! # use kessel_auth::credentials;
//! # async fn sample() -> kessel_errors::Result<()> {
//! let credentials = credentials::Builder::new("my-client-id", "my-client-secret")
//!     .with_issuer("https://sso.example.com/realms/example")
//!     .build()
//!     .await?;
//! let token = credentials.token().await?;
//! println!("token expires at {:?}", token.expires_at);
//! # Ok(()) }
//! ```
//!
//! [client-credentials grant]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.4
//! [OIDC discovery]: https://openid.net/specs/openid-connect-discovery-1_0.html

pub mod credentials;
pub mod discovery;
pub mod request;
mod token;
mod token_cache;

pub use kessel_errors::{Error, Result};
pub use token::Token;
