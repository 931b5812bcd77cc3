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

//! Provide types for client construction.
//!
//! One builder serves every service exposed by the remote API: it is generic
//! over the stub type, with a stub factory injected at construction time.
//! Service modules define ready-made entry points, e.g.
//! [v1beta2::client_builder][crate::v1beta2::client_builder], so applications
//! rarely name the factory themselves.
//!
//! ## Example: create an authenticated client
//! ```no_run
//! # use kessel_auth::credentials;
//! # use kessel_inventory::v1beta2;
//! # async fn sample() -> kessel_errors::Result<()> {
//! let oauth = credentials::Builder::new("my-client-id", "my-client-secret")
//!     .with_issuer("https://sso.example.com/realms/example")
//!     .build()
//!     .await?;
//! let (client, connection) = v1beta2::client_builder("https://inventory.example.com:9000")
//!     .oauth2_client_authenticated(&oauth)
//!     .build()?;
//! // ... use `client` ...
//! connection.close()?;
//! # Ok(()) }
//! ```
//!
//! ## Example: a local development server without TLS
//! ```no_run
//! # use kessel_inventory::v1beta2;
//! # fn sample() -> kessel_errors::Result<()> {
//! let (client, _connection) = v1beta2::client_builder("http://localhost:9000")
//!     .insecure()
//!     .build()?;
//! # Ok(()) }
//! ```

use crate::channel::{AuthChannel, CallCredentials, OAuth2CallCredentials};
use kessel_auth::credentials::OAuth2ClientCredentials;
use kessel_errors::{Error, Result};
use std::sync::Arc;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Message size limits applied to a stub's codec.
///
/// Passed to the stub factory so each service wrapper can configure its
/// generated client; the limits default to 4 MiB in each direction.
#[derive(Clone, Copy, Debug)]
pub struct MessageLimits {
    pub max_receive_message_size: usize,
    pub max_send_message_size: usize,
}

impl std::default::Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_receive_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_send_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

enum TransportSecurity {
    Tls(ClientTlsConfig),
    Insecure,
}

type StubFactory<C> = Box<dyn FnOnce(AuthChannel, &MessageLimits) -> C + Send>;
type EndpointConfig = Box<dyn FnOnce(Endpoint) -> Endpoint + Send>;

/// A generic builder for authenticated service clients.
///
/// The builder is single-use, single-threaded configuration state: configure
/// it on one thread and consume it with exactly one [build][ClientBuilder::build]
/// call. The *product* of the builder is safe for concurrent use.
pub struct ClientBuilder<C> {
    target: String,
    transport: TransportSecurity,
    call_credentials: Option<Arc<dyn CallCredentials>>,
    limits: MessageLimits,
    endpoint_config: Vec<EndpointConfig>,
    new_stub: StubFactory<C>,
}

impl<C> ClientBuilder<C> {
    /// Creates a builder for `target`, wrapping the built channel with
    /// `new_stub`.
    ///
    /// `target` must be a URI including the scheme, e.g.
    /// `https://inventory.example.com:9000`. The default transport security
    /// is TLS with the system trust roots.
    pub fn new<F>(target: impl Into<String>, new_stub: F) -> Self
    where
        F: FnOnce(AuthChannel, &MessageLimits) -> C + Send + 'static,
    {
        Self {
            target: target.into(),
            transport: TransportSecurity::Tls(ClientTlsConfig::new().with_enabled_roots()),
            call_credentials: None,
            limits: MessageLimits::default(),
            endpoint_config: Vec::new(),
            new_stub: Box::new(new_stub),
        }
    }

    /// Use a custom TLS configuration instead of the default trust roots.
    ///
    /// Mutually exclusive with [insecure][ClientBuilder::insecure]; the last
    /// call wins.
    pub fn tls_config(mut self, config: ClientTlsConfig) -> Self {
        self.transport = TransportSecurity::Tls(config);
        self
    }

    /// Disable transport security.
    ///
    /// Mutually exclusive with [tls_config][ClientBuilder::tls_config]; the
    /// last call wins. Combining an insecure transport with call credentials
    /// that require transport security makes
    /// [build][ClientBuilder::build] fail.
    pub fn insecure(mut self) -> Self {
        self.transport = TransportSecurity::Insecure;
        self
    }

    /// Authenticate every call with a token from `credentials`.
    pub fn oauth2_client_authenticated(self, credentials: &OAuth2ClientCredentials) -> Self {
        self.authenticated(Arc::new(OAuth2CallCredentials::new(credentials.clone())))
    }

    /// Authenticate every call with an explicit credential source.
    pub fn authenticated(mut self, call_credentials: Arc<dyn CallCredentials>) -> Self {
        self.call_credentials = Some(call_credentials);
        self
    }

    /// Send calls without per-call credentials.
    pub fn unauthenticated(mut self) -> Self {
        self.call_credentials = None;
        self
    }

    /// Limits the size of a received message. Defaults to 4 MiB.
    pub fn max_receive_message_size(mut self, size: usize) -> Self {
        self.limits.max_receive_message_size = size;
        self
    }

    /// Limits the size of a sent message. Defaults to 4 MiB.
    pub fn max_send_message_size(mut self, size: usize) -> Self {
        self.limits.max_send_message_size = size;
        self
    }

    /// Applies an arbitrary transport option to the underlying endpoint.
    ///
    /// The builder passes the configuration through without interpreting it:
    /// ```no_run
    /// # use kessel_inventory::v1beta2;
    /// # use std::time::Duration;
    /// # fn sample() -> kessel_errors::Result<()> {
    /// let (client, _connection) = v1beta2::client_builder("https://inventory.example.com:9000")
    ///     .with_endpoint_config(|endpoint| {
    ///         endpoint.http2_keep_alive_interval(Duration::from_secs(30))
    ///     })
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_endpoint_config<F>(mut self, config: F) -> Self
    where
        F: FnOnce(Endpoint) -> Endpoint + Send + 'static,
    {
        self.endpoint_config.push(Box::new(config));
        self
    }

    /// Returns the typed stub and a handle owning the connection.
    ///
    /// Fails fast on an empty or invalid target, and when an insecure
    /// transport is combined with call credentials that require transport
    /// security. The connection itself is lazy: no handshake happens here,
    /// so a successful build does not prove the target is reachable.
    pub fn build(self) -> Result<(C, ConnectionHandle)> {
        if self.target.is_empty() {
            return Err(Error::client_creation("target URI is required"));
        }
        if let (TransportSecurity::Insecure, Some(credentials)) =
            (&self.transport, &self.call_credentials)
        {
            if credentials.require_transport_security() {
                return Err(Error::client_creation(
                    "invalid credential configuration: cannot authenticate over an insecure channel",
                ));
            }
        }

        let mut endpoint =
            Endpoint::from_shared(self.target).map_err(Error::client_creation)?;
        if let TransportSecurity::Tls(config) = self.transport {
            endpoint = endpoint.tls_config(config).map_err(Error::client_creation)?;
        }
        for config in self.endpoint_config {
            endpoint = config(endpoint);
        }

        let channel = endpoint.connect_lazy();
        let stub = (self.new_stub)(
            AuthChannel::new(channel.clone(), self.call_credentials),
            &self.limits,
        );
        Ok((stub, ConnectionHandle { channel }))
    }
}

/// Owns the connection behind a built client.
///
/// The channel is shared with the stub; the transport shuts down when the
/// last clone is dropped.
#[derive(Debug)]
pub struct ConnectionHandle {
    channel: Channel,
}

impl ConnectionHandle {
    /// Releases this handle's reference to the connection.
    ///
    /// Consuming the handle makes a double close unrepresentable. Close
    /// failures would be reported as [resource close][Error::is_resource_close]
    /// errors; they never invalidate calls that already completed.
    pub fn close(self) -> Result<()> {
        tracing::debug!("releasing client connection");
        drop(self.channel);
        Ok(())
    }
}
