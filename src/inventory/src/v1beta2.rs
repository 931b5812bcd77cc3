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

//! Generated types and stubs for `kessel.inventory.v1beta2`, plus the entry
//! point to build a connected client.

use crate::channel::AuthChannel;
use crate::client_builder::ClientBuilder;

include!("generated/kessel.inventory.v1beta2.rs");

/// The client type produced by [client_builder].
pub type InventoryClient =
    kessel_inventory_service_client::KesselInventoryServiceClient<AuthChannel>;

/// Creates a [ClientBuilder] for the inventory service at `target`.
///
/// # Example
/// ```no_run
/// # use kessel_inventory::v1beta2;
/// # fn sample() -> kessel_errors::Result<()> {
/// let (client, connection) = v1beta2::client_builder("https://inventory.example.com:9000")
///     .build()?;
/// # Ok(()) }
/// ```
pub fn client_builder(target: impl Into<String>) -> ClientBuilder<InventoryClient> {
    ClientBuilder::new(target, |channel, limits| {
        kessel_inventory_service_client::KesselInventoryServiceClient::new(channel)
            .max_decoding_message_size(limits.max_receive_message_size)
            .max_encoding_message_size(limits.max_send_message_size)
    })
}
