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

//! An in-process `KesselInventoryService` serving scripted pages.

#![allow(dead_code)]

use kessel_inventory::v1beta2::kessel_inventory_service_server::{
    KesselInventoryService, KesselInventoryServiceServer,
};
use kessel_inventory::v1beta2::{
    ReporterReference, ResourceReference, ResponsePagination, StreamedListObjectsRequest,
    StreamedListObjectsResponse,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

/// The items one `StreamedListObjects` call streams before ending.
pub type Page = Vec<Result<StreamedListObjectsResponse, tonic::Status>>;

/// Serves one scripted page (or start error) per call, recording every
/// request and its `authorization` metadata.
#[derive(Clone, Default)]
pub struct ScriptedInventory {
    script: Arc<Mutex<VecDeque<Result<Page, tonic::Status>>>>,
    requests: Arc<Mutex<Vec<StreamedListObjectsRequest>>>,
    authorization: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedInventory {
    pub fn push_page(&self, page: Page) {
        self.script.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_start_error(&self, status: tonic::Status) {
        self.script.lock().unwrap().push_back(Err(status));
    }

    /// The requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<StreamedListObjectsRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The `authorization` metadata of every request, in arrival order.
    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl KesselInventoryService for ScriptedInventory {
    type StreamedListObjectsStream =
        ReceiverStream<Result<StreamedListObjectsResponse, tonic::Status>>;

    async fn streamed_list_objects(
        &self,
        request: tonic::Request<StreamedListObjectsRequest>,
    ) -> Result<tonic::Response<Self::StreamedListObjectsStream>, tonic::Status> {
        let authorization = request
            .metadata()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorization.lock().unwrap().push(authorization);
        self.requests.lock().unwrap().push(request.into_inner());

        let page = match self.script.lock().unwrap().pop_front() {
            Some(Ok(page)) => page,
            Some(Err(status)) => return Err(status),
            None => Vec::new(),
        };
        let (tx, rx) = tokio::sync::mpsc::channel(16);
        tokio::spawn(async move {
            for item in page {
                if tx.send(item).await.is_err() {
                    break;
                }
            }
        });
        Ok(tonic::Response::new(ReceiverStream::new(rx)))
    }
}

/// Starts the scripted service on a random port. Returns its endpoint URI
/// and the server handle.
pub async fn start(service: ScriptedInventory) -> anyhow::Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let stream = tokio_stream::wrappers::TcpListenerStream::new(listener);
        let _ = tonic::transport::Server::builder()
            .add_service(KesselInventoryServiceServer::new(service))
            .serve_with_incoming(stream)
            .await;
    });
    Ok((format!("http://{addr}"), server))
}

/// A response carrying one object and no pagination data.
pub fn object(resource_id: &str) -> Result<StreamedListObjectsResponse, tonic::Status> {
    Ok(StreamedListObjectsResponse {
        object: Some(ResourceReference {
            resource_type: "workspace".into(),
            resource_id: resource_id.into(),
            reporter: Some(ReporterReference {
                r#type: "rbac".into(),
                instance_id: None,
            }),
        }),
        pagination: None,
    })
}

/// A response carrying one object and a continuation token.
pub fn object_with_token(
    resource_id: &str,
    token: &str,
) -> Result<StreamedListObjectsResponse, tonic::Status> {
    let mut response = object(resource_id)?;
    response.pagination = Some(ResponsePagination {
        continuation_token: token.into(),
    });
    Ok(response)
}
