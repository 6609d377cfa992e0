//! Reply handle for one routing operation
//!
//! A [`RouteReply`] starts `Pending` and moves exactly once to `Finished`,
//! `Error` or `Canceled`. The current status lives in a `tokio::sync::watch`
//! channel: transitions are check-and-set under the channel lock, and every
//! accepted transition notifies subscribers.

use std::fmt;
use std::sync::Arc;

use domain::{Route, RouteRequest};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::RouteError;

/// Identity of one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReplyId(Uuid);

impl ReplyId {
    /// Generate a fresh id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyState {
    /// Request in flight
    Pending,
    /// Routes decoded
    Finished,
    /// Operation failed
    Error,
    /// Canceled by the caller
    Canceled,
}

impl ReplyState {
    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReplyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Snapshot of a reply, including its result once terminal
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyStatus {
    /// Request in flight
    Pending,
    /// Decoded routes (possibly empty: no route found)
    Finished(Arc<[Route]>),
    /// Failure with kind and message
    Error(RouteError),
    /// Canceled by the caller
    Canceled,
}

impl ReplyStatus {
    /// State without data
    #[must_use]
    pub const fn state(&self) -> ReplyState {
        match self {
            Self::Pending => ReplyState::Pending,
            Self::Finished(_) => ReplyState::Finished,
            Self::Error(_) => ReplyState::Error,
            Self::Canceled => ReplyState::Canceled,
        }
    }

    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }
}

/// Caller-visible handle of one in-flight or completed routing operation
///
/// Cloning is cheap; all clones observe the same status. The handle can be
/// read from any thread, only the engine's completion and cancel paths write.
#[derive(Clone)]
pub struct RouteReply {
    id: ReplyId,
    request: Arc<RouteRequest>,
    status: Arc<watch::Sender<ReplyStatus>>,
}

impl RouteReply {
    /// Create a pending reply for `request`
    pub(crate) fn new(request: RouteRequest) -> Self {
        let (status, _) = watch::channel(ReplyStatus::Pending);
        Self {
            id: ReplyId::new(),
            request: Arc::new(request),
            status: Arc::new(status),
        }
    }

    /// Reply identity
    #[must_use]
    pub const fn id(&self) -> ReplyId {
        self.id
    }

    /// The request this reply answers
    #[must_use]
    pub fn request(&self) -> &RouteRequest {
        &self.request
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> ReplyState {
        self.status.borrow().state()
    }

    /// Whether the request is still in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state() == ReplyState::Pending
    }

    /// Current status snapshot
    #[must_use]
    pub fn status(&self) -> ReplyStatus {
        self.status.borrow().clone()
    }

    /// Decoded routes, once `Finished`
    #[must_use]
    pub fn routes(&self) -> Option<Arc<[Route]>> {
        match &*self.status.borrow() {
            ReplyStatus::Finished(routes) => Some(Arc::clone(routes)),
            _ => None,
        }
    }

    /// Error, once in `Error`
    #[must_use]
    pub fn error(&self) -> Option<RouteError> {
        match &*self.status.borrow() {
            ReplyStatus::Error(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Subscribe to status changes
    ///
    /// The receiver is notified on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ReplyStatus> {
        self.status.subscribe()
    }

    /// Wait until the reply reaches a terminal state and return it
    pub async fn wait(&self) -> ReplyStatus {
        let mut rx = self.status.subscribe();
        match rx.wait_for(ReplyStatus::is_terminal).await {
            Ok(status) => status.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.status(),
        }
    }

    /// Transition to `Finished`
    pub(crate) fn finish(&self, routes: Vec<Route>) -> bool {
        self.transition(ReplyStatus::Finished(routes.into()))
    }

    /// Transition to `Error`
    pub(crate) fn fail(&self, error: RouteError) -> bool {
        self.transition(ReplyStatus::Error(error))
    }

    /// Transition to `Canceled`
    pub(crate) fn cancel(&self) -> bool {
        self.transition(ReplyStatus::Canceled)
    }

    /// Move to a terminal status unless one was already reached
    ///
    /// Returns whether the transition was applied.
    fn transition(&self, next: ReplyStatus) -> bool {
        debug_assert!(next.is_terminal(), "replies only move to terminal states");
        let next_state = next.state();
        let mut rejected_from = None;
        let applied = self.status.send_if_modified(|current| {
            if current.is_terminal() {
                rejected_from = Some(current.state());
                return false;
            }
            *current = next;
            true
        });

        if applied {
            debug!(reply = %self.id, state = %next_state, "Reply state changed");
        } else if let Some(from) = rejected_from {
            debug!(reply = %self.id, %from, to = %next_state, "Ignoring transition of terminal reply");
        }
        applied
    }
}

impl fmt::Debug for RouteReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteReply")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("waypoints", &self.request.waypoints().len())
            .finish()
    }
}
