//! Routing service for trip distance/duration and route geometry
//!
//! Uses OSRM for production, mock for tests.

mod osrm;

pub use osrm::{OsrmClient, OsrmConfig};

use async_trait::async_trait;

use crate::services::error::PlanError;
use crate::services::geo;
use crate::types::Coordinates;

/// Interval between required fuel stops (miles)
pub const FUEL_INTERVAL_MILES: f64 = 1000.0;

/// A resolved route between ordered waypoints
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    /// Total route distance in miles
    pub distance_miles: f64,
    /// Total driving duration in hours
    pub duration_hours: f64,
    /// Route geometry as returned by the provider (GeoJSON LineString)
    pub geometry: serde_json::Value,
    /// Route polyline as [lat, lng] pairs
    pub coordinates: Vec<[f64; 2]>,
    /// Turn-by-turn instructions, provider-specific shape
    pub instructions: Vec<serde_json::Value>,
}

/// Routing service trait for abstraction (OSRM, mock, etc.)
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Resolve an ordered waypoint list (length >= 2) to a route
    async fn route(&self, waypoints: &[Coordinates]) -> Result<PlannedRoute, PlanError>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Compute the absolute distances along a route at which refueling is
/// required: one stop per 1000-mile interval, strictly inside the route.
pub fn fuel_stops(route_distance_miles: f64) -> Vec<f64> {
    let mut stops = Vec::new();
    let mut current_distance = FUEL_INTERVAL_MILES;

    while current_distance < route_distance_miles {
        stops.push(current_distance);
        current_distance += FUEL_INTERVAL_MILES;
    }

    stops
}

/// Mock routing service for tests and offline development.
/// Estimates road distance from Haversine × coefficient at highway speed.
pub struct MockRouter;

impl MockRouter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoutingService for MockRouter {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<PlannedRoute, PlanError> {
        if waypoints.len() < 2 {
            return Err(PlanError::invalid_input(
                "at least two waypoints are required for routing",
            ));
        }

        let mut distance_miles = 0.0;
        let mut duration_hours = 0.0;
        for pair in waypoints.windows(2) {
            distance_miles += geo::road_distance(&pair[0], &pair[1]);
            duration_hours += geo::travel_time_hours(&pair[0], &pair[1]);
        }

        // Straight lines between waypoints, GeoJSON [lng, lat] order.
        let line: Vec<[f64; 2]> = waypoints.iter().map(|c| [c.lng, c.lat]).collect();
        let geometry = serde_json::json!({
            "type": "LineString",
            "coordinates": line,
        });

        Ok(PlannedRoute {
            distance_miles,
            duration_hours,
            geometry,
            coordinates: waypoints.iter().map(|c| [c.lat, c.lng]).collect(),
            instructions: vec![],
        })
    }

    fn name(&self) -> &str {
        "MockRouter"
    }
}

/// Create routing service based on configuration.
///
/// An OSRM URL selects the real client; otherwise the mock is used.
pub fn create_routing_service(osrm_url: Option<&str>, timeout_seconds: u64) -> Box<dyn RoutingService> {
    match osrm_url {
        Some(url) => {
            tracing::info!("Using OSRM routing service at {}", url);
            Box::new(OsrmClient::new(OsrmConfig {
                base_url: url.to_string(),
                timeout_seconds,
            }))
        }
        None => {
            tracing::info!("Using mock routing service (OSRM not configured)");
            Box::new(MockRouter::new())
        }
    }
}
