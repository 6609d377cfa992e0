//! Application layer - Routing orchestration
//!
//! Contains the routing engine, the reply handle it hands out, and the port
//! definitions (transport, request builder, route parser) that provider
//! integrations implement.

pub mod error;
pub mod ports;
pub mod reply;
pub mod services;

pub use error::{RouteError, RouteErrorKind};
pub use ports::*;
pub use reply::{ReplyId, ReplyState, ReplyStatus, RouteReply};
pub use services::*;
