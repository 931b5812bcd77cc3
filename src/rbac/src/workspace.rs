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

//! Workspace lookup over the RBAC REST API.
//!
//! Every organization has exactly one root and one default workspace; the
//! API reports them as a filtered listing. Any result count other than one
//! is therefore an error, not a shorter list.

use crate::{Error, Result};
use kessel_auth::request::AuthRequest;
use std::sync::Arc;

const WORKSPACE_ENDPOINT: &str = "/api/rbac/v2/workspaces/";
const ORG_ID_HEADER: &str = "x-rh-rbac-org-id";

/// One RBAC workspace.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub workspace_type: String,
    #[serde(default)]
    pub description: String,
}

/// Options for the workspace lookups.
#[derive(Clone, Debug, Default)]
pub struct FetchWorkspaceOptions {
    http_client: Option<reqwest::Client>,
    auth: Option<Arc<dyn AuthRequest>>,
}

impl FetchWorkspaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given HTTP client instead of a default one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Authenticate the lookup, e.g. with
    /// [OAuth2AuthRequest][kessel_auth::request::OAuth2AuthRequest].
    pub fn with_auth(mut self, auth: Arc<dyn AuthRequest>) -> Self {
        self.auth = Some(auth);
        self
    }
}

#[derive(serde::Deserialize)]
struct WorkspaceApiResponse {
    data: Vec<Workspace>,
}

/// Returns the root workspace of the organization `org_id`.
pub async fn fetch_root_workspace(
    rbac_base_endpoint: &str,
    org_id: &str,
    options: FetchWorkspaceOptions,
) -> Result<Workspace> {
    fetch_workspace(rbac_base_endpoint, org_id, "root", options).await
}

/// Returns the default workspace of the organization `org_id`.
pub async fn fetch_default_workspace(
    rbac_base_endpoint: &str,
    org_id: &str,
    options: FetchWorkspaceOptions,
) -> Result<Workspace> {
    fetch_workspace(rbac_base_endpoint, org_id, "default", options).await
}

async fn fetch_workspace(
    rbac_base_endpoint: &str,
    org_id: &str,
    workspace_type: &str,
    options: FetchWorkspaceOptions,
) -> Result<Workspace> {
    let client = options.http_client.unwrap_or_default();
    let url = format!(
        "{}{WORKSPACE_ENDPOINT}",
        rbac_base_endpoint.trim_end_matches('/')
    );

    let mut request = client
        .get(&url)
        .query(&[("type", workspace_type)])
        .header(ORG_ID_HEADER, org_id);
    if let Some(auth) = options.auth.as_ref() {
        request = auth.configure_request(request).await?;
    }

    let response = request.send().await.map_err(Error::connection)?;
    if response.status() != http::StatusCode::OK {
        return Err(Error::unexpected_status(
            response.status().as_u16(),
            format!("error fetching {workspace_type} workspace"),
        ));
    }

    let body = response
        .json::<WorkspaceApiResponse>()
        .await
        .map_err(Error::deserialization)?;
    match <[Workspace; 1]>::try_from(body.data) {
        Ok([workspace]) => Ok(workspace),
        Err(data) => Err(Error::deserialization(format!(
            "unexpected number of {workspace_type} workspaces: {}",
            data.len()
        ))),
    }
}
