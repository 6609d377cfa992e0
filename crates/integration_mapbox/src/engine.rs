//! Routing engine assembly for the Mapbox provider

use std::collections::HashMap;
use std::sync::Arc;

use application::{RouteParser, RoutingEngine};
use tracing::info;

use crate::config::MapboxConfig;
use crate::error::MapboxError;
use crate::parser::{MapboxRouteParser, OsrmRouteParser};
use crate::request::MapboxQueryBuilder;
use crate::transport::ReqwestTransport;

/// Parser matching the configured instruction text source
#[must_use]
pub fn route_parser_for(config: &MapboxConfig) -> Arc<dyn RouteParser> {
    if config.use_mapbox_text_instructions {
        Arc::new(MapboxRouteParser::new(config.geometry))
    } else {
        Arc::new(OsrmRouteParser::new(config.geometry))
    }
}

/// Build a routing engine talking to the Mapbox Directions API
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client cannot
/// be initialized.
pub fn build_routing_engine(config: &MapboxConfig) -> Result<RoutingEngine, MapboxError> {
    config.validate()?;

    let builder = Arc::new(MapboxQueryBuilder::new(config));
    let transport = Arc::new(ReqwestTransport::new(config)?);
    let parser = route_parser_for(config);

    info!(
        api_url = %config.api_url,
        geometry = config.geometry.as_param(),
        mapbox_text = config.use_mapbox_text_instructions,
        "Mapbox routing engine ready"
    );

    Ok(RoutingEngine::new(builder, transport, parser))
}

/// Build a routing engine from named engine parameters
///
/// # Errors
///
/// Returns `MissingParameter` without an access token, `InvalidParameter` for
/// values that cannot be interpreted.
pub fn routing_engine_from_parameters(
    parameters: &HashMap<String, String>,
) -> Result<RoutingEngine, MapboxError> {
    build_routing_engine(&MapboxConfig::from_parameters(parameters)?)
}
