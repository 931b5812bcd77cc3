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

//! The transport channel used by generated client stubs.
//!
//! [AuthChannel] wraps a lazily connected [tonic] channel and injects per-call
//! credentials into every request. Credentials are fetched asynchronously at
//! call time, so an expired token is refreshed transparently before the RPC
//! goes out. The channel is cheap to clone and safe for concurrent use;
//! independent RPCs do not serialize on it.

use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue};
use kessel_auth::credentials::OAuth2ClientCredentials;
use kessel_errors::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::body::Body;
use tonic::transport::Channel;
use tower::Service;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Credentials attached to each individual RPC, as opposed to the transport
/// as a whole.
#[async_trait::async_trait]
pub trait CallCredentials: std::fmt::Debug + Send + Sync {
    /// The headers carrying the credentials for one call.
    async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>>;

    /// Whether these credentials may only travel over a secure transport.
    ///
    /// Credentials carrying live secrets must return `true` (the default);
    /// the client builder refuses to combine them with an insecure channel.
    fn require_transport_security(&self) -> bool {
        true
    }
}

/// Bearer-token call credentials backed by an OAuth2 identity.
#[derive(Clone, Debug)]
pub(crate) struct OAuth2CallCredentials {
    credentials: OAuth2ClientCredentials,
}

impl OAuth2CallCredentials {
    pub(crate) fn new(credentials: OAuth2ClientCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait::async_trait]
impl CallCredentials for OAuth2CallCredentials {
    async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let token = self.credentials.token().await?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
            .map_err(Error::token_retrieval)?;
        value.set_sensitive(true);
        Ok(vec![(AUTHORIZATION, value)])
    }
}

/// A connection to the service with optional per-call credentials.
///
/// Generated stubs accept any [GrpcService][tonic::client::GrpcService];
/// this is the one the [client builder][crate::client_builder::ClientBuilder]
/// produces.
#[derive(Clone, Debug)]
pub struct AuthChannel {
    inner: Channel,
    credentials: Option<Arc<dyn CallCredentials>>,
}

impl AuthChannel {
    pub(crate) fn new(inner: Channel, credentials: Option<Arc<dyn CallCredentials>>) -> Self {
        Self { inner, credentials }
    }
}

impl Service<http::Request<Body>> for AuthChannel {
    type Response = http::Response<Body>;
    type Error = BoxError;
    type Future =
        Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut request: http::Request<Body>) -> Self::Future {
        let credentials = self.credentials.clone();
        // The readiness obtained in `poll_ready` belongs to this instance;
        // keep it by swapping in a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            if let Some(credentials) = credentials {
                for (name, value) in credentials.headers().await? {
                    request.headers_mut().insert(name, value);
                }
            }
            inner.call(request).await.map_err(Into::into)
        })
    }
}
