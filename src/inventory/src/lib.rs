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

//! Client library for the Kessel inventory service.
//!
//! This crate connects applications to the inventory/authorization API over
//! gRPC:
//!
//! - [client_builder::ClientBuilder] assembles transport security, per-call
//!   credentials, and message limits into a connected, typed stub. It is
//!   generic over the stub type; [v1beta2::client_builder] is the entry point
//!   for the current protocol version.
//! - [paginator::streamed_list_objects] drives the server-streaming listing
//!   RPC across page boundaries, following continuation tokens transparently.
//! - [v1beta2] holds the generated protocol types and stubs.
//!
//! Authentication comes from the `kessel-auth` crate; see
//! [client_builder::ClientBuilder::oauth2_client_authenticated].

pub mod channel;
pub mod client_builder;
pub mod paginator;
pub mod v1beta2;

pub use kessel_errors::{Error, Result};
