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

//! Authentication for plain HTTP requests.
//!
//! Some Kessel-adjacent APIs are REST endpoints rather than gRPC services.
//! [AuthRequest] decorates an outgoing [reqwest::RequestBuilder] with
//! whatever authentication material the implementation owns;
//! [OAuth2AuthRequest] attaches a bearer token from an
//! [OAuth2ClientCredentials] identity.

use crate::credentials::OAuth2ClientCredentials;
use crate::{Error, Result};

/// Decorates an outgoing HTTP request with authentication material.
#[async_trait::async_trait]
pub trait AuthRequest: std::fmt::Debug + Send + Sync {
    /// Returns `request` with authentication attached.
    ///
    /// May suspend, e.g. to refresh an expired token.
    async fn configure_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder>;
}

/// Bearer-token authentication backed by an OAuth2 identity.
#[derive(Clone, Debug)]
pub struct OAuth2AuthRequest {
    credentials: OAuth2ClientCredentials,
}

impl OAuth2AuthRequest {
    pub fn new(credentials: OAuth2ClientCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait::async_trait]
impl AuthRequest for OAuth2AuthRequest {
    async fn configure_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        let token = self.credentials.token().await?;
        let mut value =
            http::HeaderValue::from_str(&format!("Bearer {}", token.access_token))
                .map_err(Error::token_retrieval)?;
        value.set_sensitive(true);
        Ok(request.header(http::header::AUTHORIZATION, value))
    }
}
