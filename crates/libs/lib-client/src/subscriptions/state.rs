//! # Subscription State Machine
//!
//! ```text
//!                    session on
//!   Uninitialized ───────────────► Loading ──ok──► Ready
//!         ▲                          ▲  └──err──► Error
//!         │ session off              │
//!         └──────── (any) ◄──────────┴── refresh (any phase, while authenticated)
//! ```
//!
//! Transitions are plain methods with no I/O. Every fetch is issued a
//! [`FetchTicket`]; a result is applied only if its ticket is the latest one
//! issued in the current session. Older or pre-session-change results are
//! dropped, so overlapping refreshes cannot roll the list back.

use chrono::{DateTime, Utc};
use shared::{Subscription, SubscriptionType};

use super::access;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Error,
}

/// Proof that a fetch was started; hand it back to [`SubscriptionState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    session: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionState {
    phase: Phase,
    subscriptions: Vec<Subscription>,
    last_updated: Option<DateTime<Utc>>,
    error: Option<String>,
    authenticated: bool,
    /// Bumped on every session change
    session: u64,
    /// Last ticket issued (monotonic, never reset)
    latest_seq: u64,
}

impl SubscriptionState {
    pub fn new() -> Self {
        Self::default()
    }

    // region: --- Accessors

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    // endregion: --- Accessors

    // region: --- Transitions

    /// The session changed.
    ///
    /// The list is cleared and outstanding tickets become stale. Becoming
    /// authenticated starts a fetch; losing the session goes back to
    /// `Uninitialized`.
    pub fn on_session(&mut self, authenticated: bool) -> Option<FetchTicket> {
        self.session += 1;
        self.authenticated = authenticated;
        self.subscriptions.clear();
        self.last_updated = None;
        self.error = None;
        self.phase = Phase::Uninitialized;

        if authenticated {
            self.begin_fetch()
        } else {
            None
        }
    }

    /// Enter `Loading` from any phase. Returns `None` without a session.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.authenticated {
            return None;
        }

        self.latest_seq += 1;
        self.phase = Phase::Loading;
        Some(FetchTicket {
            seq: self.latest_seq,
            session: self.session,
        })
    }

    /// True if `ticket` is the newest fetch of the current session.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.session == self.session && ticket.seq == self.latest_seq
    }

    /// Apply a fetch result. Returns `false` (state untouched) for a stale ticket.
    ///
    /// On failure the previous list is kept alongside the error message.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Subscription>, String>,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match result {
            Ok(subscriptions) => {
                self.subscriptions = subscriptions;
                self.last_updated = Some(now);
                self.error = None;
                self.phase = Phase::Ready;
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = Phase::Error;
            }
        }
        true
    }

    // endregion: --- Transitions

    // region: --- Predicates

    pub fn has_active_subscription(&self, service: SubscriptionType) -> bool {
        access::has_active_subscription(&self.subscriptions, service)
    }

    pub fn has_access_to_service(&self, service: SubscriptionType) -> bool {
        access::has_access_to_service(&self.subscriptions, service)
    }

    pub fn active_subscriptions(&self) -> Vec<&Subscription> {
        access::active_subscriptions(&self.subscriptions)
    }

    // endregion: --- Predicates
}
