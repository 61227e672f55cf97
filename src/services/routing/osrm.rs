//! OSRM routing engine client
//!
//! OSRM API documentation:
//! https://project-osrm.org/docs/v5.24.0/api/

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::services::error::PlanError;
use crate::types::Coordinates;

use super::{PlannedRoute, RoutingService};

const METERS_PER_MILE: f64 = 1609.34;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// OSRM client configuration
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of OSRM server (e.g., "https://router.project-osrm.org")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// OSRM routing client
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the /route request URL. OSRM takes coordinates in
    /// `lon,lat` order, semicolon-separated.
    fn build_route_url(&self, waypoints: &[Coordinates]) -> String {
        let coords: Vec<String> = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect();

        format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson&steps=true",
            self.config.base_url,
            coords.join(";")
        )
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<PlannedRoute, PlanError> {
        if waypoints.len() < 2 {
            return Err(PlanError::invalid_input(
                "at least two waypoints are required for routing",
            ));
        }

        let url = self.build_route_url(waypoints);
        debug!("Requesting route from OSRM for {} waypoints", waypoints.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlanError::unavailable(anyhow::Error::new(e).context("Failed to send route request to OSRM")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlanError::ProviderError(format!(
                "OSRM returned error {}: {}",
                status, body
            )));
        }

        let route_response: RouteResponse = response
            .json()
            .await
            .map_err(|e| PlanError::unavailable(anyhow::Error::new(e).context("Failed to parse OSRM response")))?;

        parse_route_response(route_response)
    }

    fn name(&self) -> &str {
        "OSRM"
    }
}

/// Convert an OSRM response body to a `PlannedRoute`.
///
/// Units: OSRM reports meters and seconds; the planner works in miles
/// and hours.
fn parse_route_response(response: RouteResponse) -> Result<PlannedRoute, PlanError> {
    if response.code != "Ok" {
        return Err(PlanError::ProviderError(format!(
            "route calculation error: {}",
            response.code
        )));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| PlanError::ProviderError("no routes in OSRM response".to_string()))?;

    let distance_miles = route.distance / METERS_PER_MILE;
    let duration_hours = route.duration / SECONDS_PER_HOUR;

    debug!(
        "Route calculated: {:.1} miles, {:.1} hours",
        distance_miles, duration_hours
    );

    let coordinates = latlng_coordinates(&route.geometry);
    let instructions = route
        .legs
        .into_iter()
        .next()
        .map(|leg| leg.steps)
        .unwrap_or_default();

    Ok(PlannedRoute {
        distance_miles,
        duration_hours,
        geometry: route.geometry,
        coordinates,
        instructions,
    })
}

/// Extract the polyline from a GeoJSON LineString, flipping the
/// coordinate order from [lng, lat] to [lat, lng].
fn latlng_coordinates(geometry: &serde_json::Value) -> Vec<[f64; 2]> {
    geometry["coordinates"]
        .as_array()
        .map(|points| {
            points
                .iter()
                .filter_map(|p| {
                    let lng = p.get(0)?.as_f64()?;
                    let lat = p.get(1)?.as_f64()?;
                    Some([lat, lng])
                })
                .collect()
        })
        .unwrap_or_default()
}

// OSRM API types

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Distance in meters
    distance: f64,
    /// Duration in seconds
    duration: f64,
    /// GeoJSON LineString
    geometry: serde_json::Value,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canned_response() -> RouteResponse {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 482802.0,
                "duration": 18000.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-87.6298, 41.8781], [-90.1994, 38.6270]]
                },
                "legs": [{"steps": [{"name": "I-55 S"}]}]
            }]
        }"#;
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn parses_and_converts_units() {
        let route = parse_route_response(canned_response()).unwrap();

        // 482802 m = 300 miles, 18000 s = 5 hours
        assert!((route.distance_miles - 300.0).abs() < 0.1);
        assert!((route.duration_hours - 5.0).abs() < 1e-9);
    }

    #[test]
    fn flips_geometry_to_lat_lng_pairs() {
        let route = parse_route_response(canned_response()).unwrap();

        assert_eq!(route.coordinates.len(), 2);
        assert_eq!(route.coordinates[0], [41.8781, -87.6298]);
        assert_eq!(route.coordinates[1], [38.6270, -90.1994]);

        // The raw geometry stays in provider order for the response payload.
        assert_eq!(route.geometry["coordinates"][0][0], -87.6298);
    }

    #[test]
    fn keeps_first_leg_steps_as_instructions() {
        let route = parse_route_response(canned_response()).unwrap();
        assert_eq!(route.instructions.len(), 1);
        assert_eq!(route.instructions[0]["name"], "I-55 S");
    }

    #[test]
    fn non_ok_code_is_a_provider_error() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();

        let err = parse_route_response(response).unwrap_err();
        assert!(matches!(err, PlanError::ProviderError(_)));
        assert!(err.to_string().contains("NoRoute"));
    }

    #[test]
    fn empty_routes_is_a_provider_error() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"code": "Ok", "routes": []}"#).unwrap();

        let err = parse_route_response(response).unwrap_err();
        assert!(matches!(err, PlanError::ProviderError(_)));
    }

    #[tokio::test]
    async fn rejects_fewer_than_two_waypoints_before_any_network_call() {
        let client = OsrmClient::new(OsrmConfig::default());
        let err = client
            .route(&[Coordinates { lat: 41.9, lng: -87.6 }])
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn osrm_config_carries_custom_timeout() {
        assert_eq!(OsrmConfig::new("http://localhost:5000").timeout_seconds, 10);

        let config = OsrmConfig {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 25,
        };
        assert_eq!(config.timeout_seconds, 25);

        // A client builds fine with a non-default timeout.
        let client = OsrmClient::new(config);
        assert_eq!(client.name(), "OSRM");
    }

    #[test]
    fn route_url_uses_lon_lat_order() {
        let client = OsrmClient::new(OsrmConfig::new("http://localhost:5000"));
        let url = client.build_route_url(&[
            Coordinates { lat: 41.8781, lng: -87.6298 },
            Coordinates { lat: 38.6270, lng: -90.1994 },
        ]);

        assert!(url.starts_with("http://localhost:5000/route/v1/driving/-87.6298,41.8781;-90.1994,38.627?"));
        assert!(url.contains("geometries=geojson"));
        assert!(url.contains("steps=true"));
    }
}
