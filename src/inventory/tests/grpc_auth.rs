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

//! End-to-end checks for per-call credential injection.

mod common;

use common::{ScriptedInventory, object_with_token, start};
use http::{HeaderName, HeaderValue};
use kessel_auth::credentials::{Builder as CredentialsBuilder, OAuth2ClientCredentials};
use kessel_errors::{Error, Result};
use kessel_inventory::channel::CallCredentials;
use kessel_inventory::paginator::streamed_list_objects;
use kessel_inventory::v1beta2::{self, RepresentationType, SubjectReference};
use std::sync::{Arc, Mutex};

// The builder refuses OAuth2 credentials over the plaintext test transport,
// so the tests wrap them in call credentials that opt out of that policy.
#[derive(Debug)]
struct PlaintextOAuth2 {
    credentials: OAuth2ClientCredentials,
}

#[async_trait::async_trait]
impl CallCredentials for PlaintextOAuth2 {
    async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let token = self.credentials.token().await?;
        let value = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
            .map_err(Error::token_retrieval)?;
        Ok(vec![(http::header::AUTHORIZATION, value)])
    }

    fn require_transport_security(&self) -> bool {
        false
    }
}

// Serves one fixed token, counting the exchanges.
async fn start_token_endpoint() -> (String, Arc<Mutex<i32>>, tokio::task::JoinHandle<()>) {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let handler = move || {
        let counter = counter.clone();
        async move {
            *counter.lock().unwrap() += 1;
            axum::Json(serde_json::json!({
                "access_token": "test-token",
                "token_type": "Bearer",
                "expires_in": 3600,
            }))
        }
    };
    let app = axum::Router::new().route("/token", axum::routing::post(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/token"), calls, server)
}

fn workspace_type() -> RepresentationType {
    RepresentationType {
        resource_type: "workspace".into(),
        reporter_type: Some("rbac".into()),
    }
}

#[tokio::test]
async fn calls_carry_a_bearer_token_from_one_exchange() -> anyhow::Result<()> {
    let (token_endpoint, exchanges, _token_server) = start_token_endpoint().await;
    let credentials = CredentialsBuilder::new("test-client-id", "test-client-secret")
        .with_token_endpoint(token_endpoint)
        .build()
        .await?;

    let service = ScriptedInventory::default();
    service.push_page(vec![object_with_token("w1", "")]);
    service.push_page(vec![object_with_token("w2", "")]);
    let (endpoint, _server) = start(service.clone()).await?;

    let (client, _connection) = v1beta2::client_builder(&endpoint)
        .insecure()
        .authenticated(Arc::new(PlaintextOAuth2 { credentials }))
        .build()?;

    // Two separate listings, each one RPC.
    for _ in 0..2 {
        let mut pager = streamed_list_objects(
            client.clone(),
            workspace_type(),
            "view",
            SubjectReference::default(),
            "",
        );
        while let Some(response) = pager.next().await {
            response?;
        }
    }

    let headers = service.authorization_headers();
    assert_eq!(
        headers,
        vec![
            Some("Bearer test-token".to_string()),
            Some("Bearer test-token".to_string()),
        ]
    );
    // Both calls were served by the same cached token.
    assert_eq!(*exchanges.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_exchange_fails_the_call() -> anyhow::Result<()> {
    // No token endpoint listens here.
    let credentials = CredentialsBuilder::new("test-client-id", "test-client-secret")
        .with_token_endpoint("http://127.0.0.1:1/token")
        .build()
        .await?;

    let service = ScriptedInventory::default();
    service.push_page(vec![object_with_token("w1", "")]);
    let (endpoint, _server) = start(service.clone()).await?;

    let (client, _connection) = v1beta2::client_builder(&endpoint)
        .insecure()
        .authenticated(Arc::new(PlaintextOAuth2 { credentials }))
        .build()?;

    let mut pager = streamed_list_objects(
        client,
        workspace_type(),
        "view",
        SubjectReference::default(),
        "",
    );
    let err = pager.next().await.expect("an error item").unwrap_err();
    assert!(err.is_connection(), "{err:?}");
    // The request never reached the service.
    assert!(service.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn unauthenticated_calls_carry_no_authorization() -> anyhow::Result<()> {
    let service = ScriptedInventory::default();
    service.push_page(vec![object_with_token("w1", "")]);
    let (endpoint, _server) = start(service.clone()).await?;

    let (client, _connection) = v1beta2::client_builder(&endpoint).insecure().build()?;
    let mut pager = streamed_list_objects(
        client,
        workspace_type(),
        "view",
        SubjectReference::default(),
        "",
    );
    while let Some(response) = pager.next().await {
        response?;
    }

    assert_eq!(service.authorization_headers(), vec![None]);
    Ok(())
}
