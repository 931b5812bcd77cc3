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

use crate::Result;
use crate::token::{Token, TokenProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

/// Safety margin subtracted from a token's lifetime. A token within this
/// window of its expiration is treated as already expired, so it is never
/// presented for a call that may outlive it.
pub(crate) const EXPIRATION_WINDOW: Duration = Duration::from_secs(300);

/// A shared cache holding the current token for one identity.
///
/// Clones share the same cache. Readers of a still-valid token only take a
/// short read of the token slot. Readers that find the cache invalid race for
/// the refresh slot: the winner refreshes and wakes the rest, which re-read
/// the cache instead of issuing their own network calls. The winner
/// re-validates after acquiring the slot, closing the window where several
/// callers observe the same expired token before any of them refreshes it.
/// Duplicate refresh calls therefore only happen after a failed refresh, and
/// every caller performing one surfaces its own error.
#[derive(Debug)]
pub(crate) struct TokenCache<T>
where
    T: TokenProvider,
{
    // The current token. `None` means no token yet.
    token: Arc<Mutex<Option<Token>>>,

    // Held for the duration of a refresh. If locked, a refresh is in flight.
    refresh_slot: Arc<Mutex<()>>,
    // Wakes callers waiting on the result of an in-flight refresh.
    refresh_notify: Arc<Notify>,

    // The token provider. This thing does the refreshing.
    inner: Arc<T>,
}

fn valid(token: &Token) -> bool {
    !token.access_token.is_empty()
        && token
            .expires_at
            .is_none_or(|expires_at| Instant::now() + EXPIRATION_WINDOW < expires_at)
}

// Implemented by hand because `#[derive(Clone)]` would require `T: Clone`,
// even though only `Arc<T>` is held.
impl<T: TokenProvider> Clone for TokenCache<T> {
    fn clone(&self) -> TokenCache<T> {
        TokenCache {
            token: self.token.clone(),
            refresh_slot: self.refresh_slot.clone(),
            refresh_notify: self.refresh_notify.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T: TokenProvider> TokenCache<T> {
    pub(crate) fn new(inner: T) -> TokenCache<T> {
        TokenCache {
            token: Arc::new(Mutex::new(None)),
            refresh_slot: Arc::new(Mutex::new(())),
            refresh_notify: Arc::new(Notify::new()),
            inner: Arc::new(inner),
        }
    }

    /// Returns the current token, refreshing it if needed.
    ///
    /// With `force_refresh` the cache is cleared and the endpoint is always
    /// called, even if the cached token is still valid.
    pub(crate) async fn token(&self, force_refresh: bool) -> Result<Token> {
        if force_refresh {
            let guard = self.refresh_slot.lock().await;
            self.token.lock().await.take();
            let result = self.refresh().await;
            drop(guard);
            self.refresh_notify.notify_waiters();
            return result;
        }

        loop {
            if let Some(token) = self.current_valid().await {
                return Ok(token);
            }

            // Register for the wake-up before racing for the refresh slot, so
            // a refresh finishing in between cannot be missed.
            let notified = self.refresh_notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.refresh_slot.try_lock() {
                Ok(guard) => {
                    // Another caller may have refreshed between our validity
                    // check and winning the slot.
                    if let Some(token) = self.current_valid().await {
                        return Ok(token);
                    }
                    let result = self.refresh().await;
                    drop(guard);
                    self.refresh_notify.notify_waiters();
                    return result;
                }
                Err(_) => {
                    // A refresh is in flight. Await its result, then re-check.
                    notified.await;
                }
            }
        }
    }

    // Clones the current token if it is still valid. Releases the lock on return.
    async fn current_valid(&self) -> Option<Token> {
        self.token.lock().await.clone().filter(valid)
    }

    // On failure the cache keeps its previous contents, so a later call can
    // retry the refresh.
    async fn refresh(&self) -> Result<Token> {
        let token = self.inner.token().await?;
        *self.token.lock().await = Some(token.clone());
        Ok(token)
    }
}
