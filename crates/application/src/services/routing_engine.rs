//! Routing engine
//!
//! Owns the lifecycle of every routing operation: validate → build query →
//! dispatch → parse → resolve the [`RouteReply`]. Each call to
//! [`RoutingEngine::calculate_route`] runs as its own Tokio task; the engine
//! keeps the task's abort handle until the reply is terminal and forgets the
//! reply afterwards.

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use domain::RouteRequest;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::{RouteError, RouteErrorKind};
use crate::ports::{RouteParser, RouteQueryBuilder, TransportClient, TransportRequest};
use crate::reply::{ReplyId, RouteReply};

/// An operation the engine still owns
struct Outstanding {
    reply: RouteReply,
    abort: AbortHandle,
}

type OutstandingMap = Arc<Mutex<HashMap<ReplyId, Outstanding>>>;

/// Asynchronous routing request/reply orchestrator
///
/// Collaborators are fixed at construction and shared read-only by all
/// operations.
pub struct RoutingEngine {
    builder: Arc<dyn RouteQueryBuilder>,
    transport: Arc<dyn TransportClient>,
    parser: Arc<dyn RouteParser>,
    outstanding: OutstandingMap,
}

impl RoutingEngine {
    /// Create an engine from its collaborators
    pub fn new(
        builder: Arc<dyn RouteQueryBuilder>,
        transport: Arc<dyn TransportClient>,
        parser: Arc<dyn RouteParser>,
    ) -> Self {
        Self {
            builder,
            transport,
            parser,
            outstanding: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The parser responses are decoded with
    #[must_use]
    pub fn route_parser(&self) -> &dyn RouteParser {
        self.parser.as_ref()
    }

    /// Start computing routes for `request`
    ///
    /// Returns immediately. The reply is `Pending` while the provider is
    /// queried, or already in `Error(InvalidRequest)` when the request has
    /// fewer than two waypoints or cannot be expressed for the provider.
    /// Must be called from within a Tokio runtime; outside of one the reply
    /// fails with `NetworkError`.
    #[instrument(skip(self, request), fields(waypoints = request.waypoints().len(), mode = %request.travel_mode()))]
    pub fn calculate_route(&self, request: &RouteRequest) -> RouteReply {
        let reply = RouteReply::new(request.clone());

        if let Err(err) = request.validate() {
            warn!(reply = %reply.id(), error = %err, "Rejecting route request");
            reply.fail(err.into());
            return reply;
        }

        let query = match self.builder.build(request) {
            Ok(query) => query,
            Err(err) => {
                warn!(reply = %reply.id(), error = %err, "Cannot build provider query");
                reply.fail(err);
                return reply;
            },
        };

        let Ok(runtime) = Handle::try_current() else {
            reply.fail(RouteError::new(
                RouteErrorKind::NetworkError,
                "no async runtime available to dispatch the request",
            ));
            return reply;
        };

        debug!(reply = %reply.id(), url = %query.redacted_url(), "Dispatching route request");

        let task = runtime.spawn(complete(
            Arc::clone(&self.transport),
            Arc::clone(&self.parser),
            Arc::clone(&self.outstanding),
            reply.clone(),
            query,
        ));

        {
            let mut outstanding = self.outstanding.lock();
            outstanding.insert(
                reply.id(),
                Outstanding {
                    reply: reply.clone(),
                    abort: task.abort_handle(),
                },
            );
            // The task may have resolved before the entry existed.
            if !reply.is_pending() {
                outstanding.remove(&reply.id());
            }
        }

        reply
    }

    /// Cancel a pending reply
    ///
    /// Moves the reply to `Canceled` and aborts the in-flight request. A
    /// reply that is already terminal is left untouched. Returns whether the
    /// reply was canceled by this call.
    pub fn cancel(&self, reply: &RouteReply) -> bool {
        // Flip the state first so a completion racing with the abort is discarded.
        if !reply.cancel() {
            debug!(reply = %reply.id(), state = %reply.state(), "Cancel ignored for terminal reply");
            return false;
        }

        if let Some(entry) = self.outstanding.lock().remove(&reply.id()) {
            entry.abort.abort();
        }
        info!(reply = %reply.id(), "Route request canceled");
        true
    }

    /// Cancel every pending reply
    ///
    /// Returns how many replies were canceled.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<Outstanding> = self.outstanding.lock().drain().map(|(_, e)| e).collect();
        drained
            .into_iter()
            .filter(|entry| {
                let canceled = entry.reply.cancel();
                entry.abort.abort();
                canceled
            })
            .count()
    }

    /// Number of replies still in flight
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.lock().len()
    }
}

impl Drop for RoutingEngine {
    fn drop(&mut self) {
        let canceled = self.cancel_all();
        if canceled > 0 {
            debug!(canceled, "Routing engine dropped with pending replies");
        }
    }
}

impl fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingEngine")
            .field("outstanding", &self.outstanding())
            .finish_non_exhaustive()
    }
}

/// Completion path of one operation: await the transport, then resolve
///
/// A panic in the transport or the parser still resolves the reply.
async fn complete(
    transport: Arc<dyn TransportClient>,
    parser: Arc<dyn RouteParser>,
    outstanding: OutstandingMap,
    reply: RouteReply,
    query: TransportRequest,
) {
    let dispatched = AssertUnwindSafe(async { transport.dispatch(query).await })
        .catch_unwind()
        .await;

    let result = match dispatched {
        Ok(Ok(response)) if response.is_success() => {
            decode(parser.as_ref(), &response.body, reply.request())
        },
        Ok(Ok(response)) => {
            let detail = parser.error_message(&response.body);
            Err(RouteError::from_status(response.status, detail))
        },
        Ok(Err(err)) => Err(err.into()),
        Err(_) => Err(RouteError::new(
            RouteErrorKind::NetworkError,
            "transport panicked while dispatching the request",
        )),
    };

    let applied = match result {
        Ok(routes) => {
            let count = routes.len();
            let applied = reply.finish(routes);
            if applied {
                info!(reply = %reply.id(), routes = count, "Route request finished");
            }
            applied
        },
        Err(err) => {
            let message = err.to_string();
            let applied = reply.fail(err);
            if applied {
                warn!(reply = %reply.id(), error = %message, "Route request failed");
            }
            applied
        },
    };

    if !applied {
        debug!(reply = %reply.id(), state = %reply.state(), "Discarding late completion");
    }

    outstanding.lock().remove(&reply.id());
}

/// Run the parser, turning a parser panic into a parse error
fn decode(
    parser: &dyn RouteParser,
    body: &[u8],
    request: &RouteRequest,
) -> Result<Vec<domain::Route>, RouteError> {
    match catch_unwind(AssertUnwindSafe(|| parser.parse(body, request))) {
        Ok(parsed) => parsed.map_err(RouteError::from),
        Err(_) => Err(RouteError::new(
            RouteErrorKind::ParseError,
            "route parser panicked while decoding the response",
        )),
    }
}
