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

//! The error type shared by the Kessel client libraries.
//!
//! The client libraries report errors from multiple sources: the OAuth2 token
//! endpoint may reject a refresh, the transport may be unable to reach the
//! service, a response may fail to decode, or a client may be misconfigured
//! before any request is sent. Messages may gain additional context at each
//! layer, so applications should classify errors with the predicates on
//! [Error], never by matching message text. The original cause is preserved
//! and reachable via [source][std::error::Error::source].
//!
//! # Example
//! ```
//! use kessel_errors::Error;
//! fn classify(e: &Error) -> &'static str {
//!     if e.is_token_retrieval() {
//!         "check the client id and secret"
//!     } else if e.is_connection() {
//!         "check the network"
//!     } else {
//!         "unexpected"
//!     }
//! }
//! ```

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The result type used by the Kessel client libraries.
pub type Result<T> = std::result::Result<T, Error>;

/// The error returned by the Kessel client libraries.
///
/// Each error carries a stable kind, testable with a predicate, and an
/// optional source describing the underlying cause.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

#[derive(Debug, PartialEq)]
enum ErrorKind {
    Connection,
    TokenRetrieval,
    TokenCache,
    UnexpectedStatus(u16),
    ClientCreation,
    ResourceClose,
    Deserialization,
}

impl Error {
    fn new(kind: ErrorKind, source: Option<BoxError>) -> Self {
        Self { kind, source }
    }

    /// The service could not be reached, or an in-flight call failed.
    pub fn connection<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Connection, Some(source.into()))
    }

    /// The OAuth2 token endpoint did not produce a usable token.
    pub fn token_retrieval<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::TokenRetrieval, Some(source.into()))
    }

    /// A previously stored token could not be found.
    ///
    /// Reserved for auxiliary caching helpers. The primary token manager
    /// refreshes through the endpoint instead of reporting a missing entry.
    pub fn token_cache<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::TokenCache, Some(source.into()))
    }

    /// A service returned an HTTP status the library did not expect.
    pub fn unexpected_status<T: Into<BoxError>>(status: u16, source: T) -> Self {
        Self::new(ErrorKind::UnexpectedStatus(status), Some(source.into()))
    }

    /// A client could not be constructed from the supplied configuration.
    pub fn client_creation<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::ClientCreation, Some(source.into()))
    }

    /// Releasing a connection or another resource failed.
    ///
    /// These errors are reported for visibility, they do not invalidate the
    /// results of the operation that was in progress.
    pub fn resource_close<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::ResourceClose, Some(source.into()))
    }

    /// A response was received but could not be decoded.
    pub fn deserialization<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Deserialization, Some(source.into()))
    }

    /// If true, the service could not be reached or a call failed in flight.
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection)
    }

    /// If true, the token endpoint did not produce a usable token.
    pub fn is_token_retrieval(&self) -> bool {
        matches!(self.kind, ErrorKind::TokenRetrieval)
    }

    /// If true, a previously stored token could not be found.
    pub fn is_token_cache(&self) -> bool {
        matches!(self.kind, ErrorKind::TokenCache)
    }

    /// If true, a service returned an unexpected HTTP status.
    ///
    /// Use [http_status][Error::http_status] for the status code itself.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedStatus(_))
    }

    /// If true, a client could not be constructed.
    pub fn is_client_creation(&self) -> bool {
        matches!(self.kind, ErrorKind::ClientCreation)
    }

    /// If true, releasing a resource failed.
    pub fn is_resource_close(&self) -> bool {
        matches!(self.kind, ErrorKind::ResourceClose)
    }

    /// If true, a response could not be decoded.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// The HTTP status code associated with this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::UnexpectedStatus(status) => Some(status),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Connection => write!(f, "connection failed")?,
            ErrorKind::TokenRetrieval => write!(f, "token retrieval failed")?,
            ErrorKind::TokenCache => write!(f, "cached token not found")?,
            ErrorKind::UnexpectedStatus(status) => {
                write!(f, "unexpected status code {status}")?
            }
            ErrorKind::ClientCreation => write!(f, "client creation failed")?,
            ErrorKind::ResourceClose => write!(f, "resource close failed")?,
            ErrorKind::Deserialization => write!(f, "could not decode response")?,
        };
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
