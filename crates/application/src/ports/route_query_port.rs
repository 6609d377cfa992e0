//! Request builder port
//!
//! Converts a [`RouteRequest`] into a provider-specific [`TransportRequest`].

use domain::RouteRequest;
#[cfg(test)]
use mockall::automock;

use super::TransportRequest;
use crate::error::RouteError;

/// Port for building provider queries
///
/// Implementations are pure: the same request always yields the same query.
#[cfg_attr(test, automock)]
pub trait RouteQueryBuilder: Send + Sync {
    /// Build the query for `request`
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] of kind `InvalidRequest` when the provider
    /// cannot serve the requested mode/avoid-option combination.
    fn build(&self, request: &RouteRequest) -> Result<TransportRequest, RouteError>;
}
