//! # Subscription Tracker
//!
//! Drives a [`SubscriptionState`] from session changes and explicit refreshes.
//!
//! - Each fetch runs in its own tokio task under a [`CancellationToken`] that
//!   is a child of the current session's token. A session change or
//!   [`SubscriptionTracker::shutdown`] cancels it, and a cancelled fetch's
//!   result is dropped without touching state.
//! - Each fetch holds a [`super::FetchTicket`]; only the latest one is applied.
//!
//! State lives behind a `parking_lot::RwLock`. Locks are never held across an
//! `.await`.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::{FetchTicket, SubscriptionState};
use crate::service::SubscriptionSource;

struct Session {
    token: Option<String>,
    cancel: CancellationToken,
}

pub struct SubscriptionTracker<S> {
    source: Arc<S>,
    state: Arc<RwLock<SubscriptionState>>,
    session: Mutex<Session>,
    shutdown: CancellationToken,
}

impl<S: SubscriptionSource + 'static> SubscriptionTracker<S> {
    pub fn new(source: S) -> Self {
        let shutdown = CancellationToken::new();
        Self {
            source: Arc::new(source),
            state: Arc::new(RwLock::new(SubscriptionState::new())),
            session: Mutex::new(Session {
                token: None,
                cancel: shutdown.child_token(),
            }),
            shutdown,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubscriptionState {
        self.state.read().clone()
    }

    /// Switch to a new session (or to none).
    ///
    /// Setting the session that is already active does nothing. Otherwise any
    /// in-flight fetch is cancelled, the list is cleared, and when a session
    /// is present a fetch starts. The returned handle resolves once that fetch
    /// has been applied or dropped.
    pub fn set_session(&self, token: Option<String>) -> Option<JoinHandle<()>> {
        if self.shutdown.is_cancelled() {
            return None;
        }

        let mut session = self.session.lock();
        if session.token == token {
            return None;
        }

        session.cancel.cancel();
        session.cancel = self.shutdown.child_token();
        session.token = token;

        let ticket = self.state.write().on_session(session.token.is_some());
        info!(authenticated = session.token.is_some(), "[SUBSCRIPTIONS] Session changed");

        let access_token = session.token.clone()?;
        let ticket = ticket?;
        Some(self.spawn_fetch(ticket, access_token, session.cancel.clone()))
    }

    /// Re-fetch for the current session, from any phase.
    ///
    /// Overlapping refreshes are not coalesced; the newest one wins.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        if self.shutdown.is_cancelled() {
            return None;
        }

        let session = self.session.lock();
        let access_token = session.token.clone()?;
        let ticket = self.state.write().begin_fetch()?;
        Some(self.spawn_fetch(ticket, access_token, session.cancel.clone()))
    }

    /// Cancel every in-flight fetch; later results are ignored.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn spawn_fetch(&self, ticket: FetchTicket, access_token: String, cancel: CancellationToken) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        debug!(seq = ticket.seq(), "[SUBSCRIPTIONS] Fetch started");

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(seq = ticket.seq(), "[SUBSCRIPTIONS] Fetch cancelled");
                    return;
                }
                result = source.fetch_subscriptions(&access_token) => result,
            };

            if cancel.is_cancelled() {
                debug!(seq = ticket.seq(), "[SUBSCRIPTIONS] Result arrived after cancellation, dropped");
                return;
            }

            if let Err(e) = &result {
                warn!(seq = ticket.seq(), error = %e, "[SUBSCRIPTIONS] Fetch failed");
            }

            let applied = state
                .write()
                .complete(ticket, result.map_err(|e| e.to_string()), lib_utils::now_utc());
            if !applied {
                debug!(seq = ticket.seq(), "[SUBSCRIPTIONS] Stale result dropped");
            }
        })
    }
}

impl<S> Drop for SubscriptionTracker<S> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
