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

//! An adapter that turns the paged `StreamedListObjects` RPC into one
//! continuous [futures::Stream].
//!
//! The service streams results in bounded pages: each stream ends after at
//! most one page, and a response near the end of the page carries a
//! continuation token when more data exists. The [Paginator] hides the page
//! boundaries, starting the next RPC with the last token it saw, until a page
//! ends with an empty token.
//!
//! The paginator is pull-based: nothing runs between polls, so dropping it
//! (or breaking out of the consuming loop) cancels promptly, including any
//! open stream. It is not restartable; to resume a listing after an error or
//! a handoff, call [streamed_list_objects] again with the last continuation
//! token observed.

use crate::channel::AuthChannel;
use crate::v1beta2::kessel_inventory_service_client::KesselInventoryServiceClient;
use crate::v1beta2::{
    RepresentationType, RequestPagination, StreamedListObjectsRequest,
    StreamedListObjectsResponse, SubjectReference,
};
use futures::stream::unfold;
use futures::{Stream, StreamExt};
use kessel_errors::Error;
use pin_project::pin_project;
use std::pin::Pin;

/// Objects requested per page when resuming from a continuation token.
const PAGE_LIMIT: u32 = 1000;

type Client = KesselInventoryServiceClient<AuthChannel>;
type PageStream = tonic::codec::Streaming<StreamedListObjectsResponse>;

/// A continuous stream of results over the paged listing RPC.
///
/// Yields each response in the order received. An error item is terminal:
/// nothing follows it, and the underlying call is not retried.
#[pin_project]
pub struct Paginator {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<StreamedListObjectsResponse, Error>> + Send>>,
}

impl Paginator {
    /// Returns the next response of the wrapped stream.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }
}

impl Stream for Paginator {
    type Item = Result<StreamedListObjectsResponse, Error>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

enum State {
    // About to start an RPC, resuming from `token` (empty on the first call).
    Start { token: String },
    // Receiving one page. `last_token` is the continuation token of the most
    // recent response that carried one.
    Streaming {
        stream: PageStream,
        last_token: String,
    },
    Done,
}

/// Lists every object of `object_type` that `subject` holds `relation` to.
///
/// Pass the continuation token of a previous listing as `continuation_token`
/// to resume where it stopped, or an empty string to start from the
/// beginning.
///
/// # Example
/// ```no_run
/// # use kessel_inventory::{paginator, v1beta2};
/// # async fn sample(
/// #     client: v1beta2::kessel_inventory_service_client::KesselInventoryServiceClient<
/// #         kessel_inventory::channel::AuthChannel,
/// #     >,
/// #     object_type: v1beta2::RepresentationType,
/// #     subject: v1beta2::SubjectReference,
/// # ) -> kessel_errors::Result<()> {
/// let mut objects =
///     paginator::streamed_list_objects(client, object_type, "view", subject, "");
/// while let Some(response) = objects.next().await {
///     let response = response?;
///     println!("{:?}", response.object);
/// }
/// # Ok(()) }
/// ```
pub fn streamed_list_objects(
    client: Client,
    object_type: RepresentationType,
    relation: impl Into<String>,
    subject: SubjectReference,
    continuation_token: impl Into<String>,
) -> Paginator {
    let relation = relation.into();
    let seed = State::Start {
        token: continuation_token.into(),
    };
    let stream = unfold((client, seed), move |(mut client, mut state)| {
        let object_type = object_type.clone();
        let relation = relation.clone();
        let subject = subject.clone();
        async move {
            loop {
                match state {
                    State::Done => return None,
                    State::Start { token } => {
                        let request = StreamedListObjectsRequest {
                            object_type: Some(object_type.clone()),
                            relation: relation.clone(),
                            subject: Some(subject.clone()),
                            pagination: (!token.is_empty()).then(|| RequestPagination {
                                limit: PAGE_LIMIT,
                                continuation_token: Some(token),
                            }),
                            consistency: None,
                        };
                        match client.streamed_list_objects(request).await {
                            Ok(response) => {
                                state = State::Streaming {
                                    stream: response.into_inner(),
                                    last_token: String::new(),
                                };
                            }
                            Err(status) => {
                                let error = Error::connection(status);
                                return Some((Err(error), (client, State::Done)));
                            }
                        }
                    }
                    State::Streaming {
                        mut stream,
                        last_token,
                    } => match stream.message().await {
                        Ok(Some(response)) => {
                            let last_token = response
                                .pagination
                                .as_ref()
                                .map(|p| p.continuation_token.clone())
                                .unwrap_or(last_token);
                            let next = State::Streaming { stream, last_token };
                            return Some((Ok(response), (client, next)));
                        }
                        Ok(None) => {
                            // End of this page: continue with the last token
                            // seen, or finish when there was none.
                            state = if last_token.is_empty() {
                                State::Done
                            } else {
                                State::Start { token: last_token }
                            };
                        }
                        Err(status) => {
                            let error = Error::connection(status);
                            return Some((Err(error), (client, State::Done)));
                        }
                    },
                }
            }
        }
    });
    Paginator {
        stream: Box::pin(stream),
    }
}
