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

//! RBAC helpers for the Kessel client libraries.
//!
//! The RBAC service models organizations as workspaces and exposes them two
//! ways: a REST endpoint for looking up the root or default workspace of an
//! organization, and relationship data in the inventory service. This crate
//! wraps both:
//!
//! - [workspace::fetch_root_workspace] and
//!   [workspace::fetch_default_workspace] call the REST endpoint.
//! - [list_workspaces] streams every workspace a subject has a relation to,
//!   following continuation tokens transparently.
//! - [types] builds the well-known RBAC resource and subject references.

pub mod types;
pub mod workspace;

use kessel_inventory::paginator::{Paginator, streamed_list_objects};
use kessel_inventory::v1beta2::{InventoryClient, SubjectReference};

pub use kessel_errors::{Error, Result};

/// Streams every workspace `subject` holds `relation` to.
///
/// Pass the continuation token of a previous listing to resume it, or an
/// empty string to start from the beginning.
///
/// # Example
/// ```no_run
/// # use kessel_rbac::{list_workspaces, types};
/// # async fn sample(client: kessel_inventory::v1beta2::InventoryClient) -> kessel_errors::Result<()> {
/// let subject = types::principal_subject("alice", "redhat");
/// let mut workspaces = list_workspaces(client, subject, "view_document", "");
/// while let Some(response) = workspaces.next().await {
///     println!("{:?}", response?.object);
/// }
/// # Ok(()) }
/// ```
pub fn list_workspaces(
    client: InventoryClient,
    subject: SubjectReference,
    relation: impl Into<String>,
    continuation_token: impl Into<String>,
) -> Paginator {
    streamed_list_objects(
        client,
        types::workspace_type(),
        relation,
        subject,
        continuation_token,
    )
}
