//! Mapbox Directions query builder
//!
//! Encodes a [`RouteRequest`] as a Directions v5 query:
//! `{api_url}{profile}/{lon,lat;lon,lat;...}?steps=true&...&access_token=...`.
//! Coordinate lists too long for a GET URL are sent as a form-encoded POST.

use application::{RouteError, RouteQueryBuilder, TransportRequest};
use domain::{AvoidFeature, RouteRequest, TravelMode};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;
use url::form_urlencoded;

use crate::config::{GeometryFormat, MapboxConfig};

/// Longest URL sent with GET; longer queries switch to POST
pub const MAX_GET_URL_LEN: usize = 8192;

/// Builds Mapbox Directions v5 queries
#[derive(Clone)]
pub struct MapboxQueryBuilder {
    api_base: String,
    access_token: SecretString,
    user_agent: String,
    geometry: GeometryFormat,
    use_mapbox_text: bool,
}

impl MapboxQueryBuilder {
    /// Create a builder from the engine configuration
    #[must_use]
    pub fn new(config: &MapboxConfig) -> Self {
        Self {
            api_base: config.api_base(),
            access_token: config.access_token.clone(),
            user_agent: config.user_agent.clone(),
            geometry: config.geometry,
            use_mapbox_text: config.use_mapbox_text_instructions,
        }
    }

    /// Directions profile for a travel mode
    fn profile(mode: TravelMode) -> Result<&'static str, RouteError> {
        match mode {
            TravelMode::Driving => Ok("driving"),
            TravelMode::Walking => Ok("walking"),
            TravelMode::Cycling => Ok("cycling"),
            TravelMode::Transit => Err(RouteError::invalid_request(
                "travel mode 'transit' is not supported by the Mapbox directions API",
            )),
        }
    }

    /// `exclude` values for the avoid features of a request
    fn exclusions(request: &RouteRequest) -> Result<Vec<&'static str>, RouteError> {
        let mode = request.travel_mode();
        request
            .avoid()
            .map(|feature| match (mode, feature) {
                (TravelMode::Driving, AvoidFeature::Tolls) => Ok("toll"),
                (TravelMode::Driving, AvoidFeature::Highways) => Ok("motorway"),
                (TravelMode::Driving | TravelMode::Cycling, AvoidFeature::Ferries) => Ok("ferry"),
                (mode, feature) => Err(RouteError::invalid_request(format!(
                    "avoiding {feature} is not supported for {mode}"
                ))),
            })
            .collect()
    }

    /// Waypoints as `lon,lat;lon,lat` in request order
    fn coordinates(request: &RouteRequest) -> String {
        request
            .waypoints()
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.longitude(), c.latitude()))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Query parameters other than coordinates and token
    fn options(&self, request: &RouteRequest, exclude: &[&str]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("steps", "true".to_string()),
            ("overview", "full".to_string()),
            ("geometries", self.geometry.as_param().to_string()),
            ("alternatives", (request.alternatives() > 1).to_string()),
            ("language", request.locale().to_string()),
        ];

        if self.use_mapbox_text {
            params.push(("banner_instructions", "true".to_string()));
            params.push(("voice_instructions", "true".to_string()));
            params.push(("voice_units", "metric".to_string()));
        }

        if !exclude.is_empty() {
            params.push(("exclude", exclude.join(",")));
        }

        params
    }

    fn parse_url(raw: &str) -> Result<Url, RouteError> {
        Url::parse(raw).map_err(|e| RouteError::invalid_request(format!("cannot build request URL: {e}")))
    }
}

impl RouteQueryBuilder for MapboxQueryBuilder {
    fn build(&self, request: &RouteRequest) -> Result<TransportRequest, RouteError> {
        request.validate()?;
        let profile = Self::profile(request.travel_mode())?;
        let exclude = Self::exclusions(request)?;
        if !request.excluded_areas().is_empty() {
            return Err(RouteError::invalid_request(
                "excluded areas are not supported by the Mapbox directions API",
            ));
        }

        let coordinates = Self::coordinates(request);
        let options = self.options(request, &exclude);
        let token = self.access_token.expose_secret();

        let mut url = Self::parse_url(&format!("{}{profile}/{coordinates}", self.api_base))?;
        url.query_pairs_mut()
            .extend_pairs(options.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("access_token", token);

        if url.as_str().len() <= MAX_GET_URL_LEN {
            return Ok(TransportRequest::get(url.as_str()).with_header("User-Agent", &self.user_agent));
        }

        debug!(
            waypoints = request.waypoints().len(),
            "Query exceeds GET URL limit, using POST"
        );

        let mut url = Self::parse_url(&format!("{}{profile}", self.api_base))?;
        url.query_pairs_mut().append_pair("access_token", token);
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("coordinates", &coordinates)
            .extend_pairs(options.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();

        Ok(TransportRequest::post_form(url.as_str(), body)
            .with_header("User-Agent", &self.user_agent)
            .with_header("Content-Type", "application/x-www-form-urlencoded"))
    }
}

impl std::fmt::Debug for MapboxQueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxQueryBuilder")
            .field("api_base", &self.api_base)
            .field("access_token", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("geometry", &self.geometry)
            .field("use_mapbox_text", &self.use_mapbox_text)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use application::{HttpMethod, RouteErrorKind};
    use domain::{BoundingBox, GeoCoordinate};

    use super::*;

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new_unchecked(lat, lon)
    }

    fn request() -> RouteRequest {
        RouteRequest::between(coord(52.0, 4.0), coord(52.1, 4.2))
    }

    fn builder() -> MapboxQueryBuilder {
        MapboxQueryBuilder::new(&MapboxConfig::for_testing())
    }

    fn query_of(request: &TransportRequest) -> HashMap<String, String> {
        Url::parse(&request.url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn builds_get_with_waypoints_in_order() {
        let request = RouteRequest::new(vec![coord(52.0, 4.0), coord(52.05, 4.1), coord(52.1, 4.2)]);
        let query = builder().build(&request).unwrap();

        assert_eq!(query.method, HttpMethod::Get);
        let url = Url::parse(&query.url).unwrap();
        assert_eq!(
            url.path(),
            "/directions/v5/mapbox/driving/4.000000,52.000000;4.100000,52.050000;4.200000,52.100000"
        );
        assert!(query.header("user-agent").unwrap().starts_with("routing-engine/"));
    }

    #[test]
    fn attaches_token_and_default_options() {
        let query = builder().build(&request()).unwrap();
        let params = query_of(&query);

        assert_eq!(params["access_token"], "test-token");
        assert_eq!(params["steps"], "true");
        assert_eq!(params["overview"], "full");
        assert_eq!(params["geometries"], "polyline6");
        assert_eq!(params["alternatives"], "false");
        assert_eq!(params["language"], "en");
        assert_eq!(params["banner_instructions"], "true");
        assert_eq!(params["voice_units"], "metric");
        assert!(!params.contains_key("exclude"));
    }

    #[test]
    fn osrm_text_mode_skips_banner_parameters() {
        let config = MapboxConfig {
            use_mapbox_text_instructions: false,
            geometry: GeometryFormat::Polyline,
            ..MapboxConfig::for_testing()
        };
        let query = MapboxQueryBuilder::new(&config).build(&request()).unwrap();
        let params = query_of(&query);
        assert!(!params.contains_key("banner_instructions"));
        assert!(!params.contains_key("voice_instructions"));
        assert_eq!(params["geometries"], "polyline");
    }

    #[test]
    fn maps_travel_modes_to_profiles() {
        for (mode, profile) in [
            (TravelMode::Driving, "driving"),
            (TravelMode::Walking, "walking"),
            (TravelMode::Cycling, "cycling"),
        ] {
            let query = builder().build(&request().with_travel_mode(mode)).unwrap();
            assert!(
                Url::parse(&query.url).unwrap().path().starts_with(&format!("/directions/v5/mapbox/{profile}/")),
                "{mode}"
            );
        }
    }

    #[test]
    fn transit_is_invalid_request() {
        let err = builder()
            .build(&request().with_travel_mode(TravelMode::Transit))
            .unwrap_err();
        assert_eq!(err.kind, RouteErrorKind::InvalidRequest);
    }

    #[test]
    fn driving_exclusions_are_encoded() {
        let request = request()
            .with_avoid(AvoidFeature::Ferries)
            .with_avoid(AvoidFeature::Tolls)
            .with_avoid(AvoidFeature::Highways);
        let params = query_of(&builder().build(&request).unwrap());
        assert_eq!(params["exclude"], "toll,motorway,ferry");
    }

    #[test]
    fn unsupported_exclusions_are_rejected() {
        let cases = [
            (TravelMode::Walking, AvoidFeature::Ferries),
            (TravelMode::Cycling, AvoidFeature::Tolls),
            (TravelMode::Driving, AvoidFeature::Tunnels),
            (TravelMode::Driving, AvoidFeature::DirtRoads),
        ];
        for (mode, feature) in cases {
            let request = request().with_travel_mode(mode).with_avoid(feature);
            let err = builder().build(&request).unwrap_err();
            assert_eq!(err.kind, RouteErrorKind::InvalidRequest, "{mode} / {feature}");
            assert!(err.message.contains(feature.as_str()));
        }

        let request = request().with_travel_mode(TravelMode::Cycling).with_avoid(AvoidFeature::Ferries);
        assert_eq!(query_of(&builder().build(&request).unwrap())["exclude"], "ferry");
    }

    #[test]
    fn excluded_areas_are_rejected() {
        let request = request().with_excluded_area(BoundingBox::new(coord(52.0, 4.0), coord(52.01, 4.01)));
        let err = builder().build(&request).unwrap_err();
        assert_eq!(err.kind, RouteErrorKind::InvalidRequest);
    }

    #[test]
    fn alternatives_and_locale() {
        let request = request().with_alternatives(3).with_locale("nl");
        let params = query_of(&builder().build(&request).unwrap());
        assert_eq!(params["alternatives"], "true");
        assert_eq!(params["language"], "nl");
    }

    #[test]
    fn single_waypoint_is_invalid_request() {
        let err = builder()
            .build(&RouteRequest::new(vec![coord(52.0, 4.0)]))
            .unwrap_err();
        assert_eq!(err.kind, RouteErrorKind::InvalidRequest);
    }

    #[test]
    fn build_is_deterministic() {
        let request = request().with_avoid(AvoidFeature::Tolls);
        assert_eq!(builder().build(&request).unwrap(), builder().build(&request).unwrap());
    }

    #[test]
    fn long_coordinate_lists_use_post() {
        let waypoints = (0..600)
            .map(|i| coord(52.0 + f64::from(i) * 0.0001, 4.0))
            .collect();
        let query = builder().build(&RouteRequest::new(waypoints)).unwrap();

        assert_eq!(query.method, HttpMethod::Post);
        let url = Url::parse(&query.url).unwrap();
        assert_eq!(url.path(), "/directions/v5/mapbox/driving");
        assert_eq!(query_of(&query)["access_token"], "test-token");
        assert_eq!(query.header("content-type"), Some("application/x-www-form-urlencoded"));

        let body: HashMap<String, String> = form_urlencoded::parse(query.body.as_deref().unwrap().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(body["coordinates"].split(';').count(), 600);
        assert!(body["coordinates"].starts_with("4.000000,52.000000;"));
        assert_eq!(body["steps"], "true");
        assert!(!body.contains_key("access_token"));
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", builder());
        assert!(!debug.contains("test-token"));
    }
}
