//! Trip planning orchestration.
//!
//! Wires the route provider services together: geocode the three trip
//! addresses, resolve the route, compute fuel stops, run the HOS
//! scheduler, and assemble the response payload. All failures surface as
//! `PlanError` — there is no local retry, since nothing downstream can
//! proceed without route data.

use std::sync::Arc;

use tracing::{debug, info};

use crate::services::error::PlanError;
use crate::services::geocoding::Geocoder;
use crate::services::hos::{
    self, HosScheduler, CYCLE_LIMIT,
};
use crate::services::routing::{fuel_stops, PlannedRoute, RoutingService};
use crate::types::{Coordinates, Stop, StopKind, TripPlan, TripRequest};

/// Plans trips against a geocoder and a routing service.
pub struct TripPlanner {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RoutingService>,
}

impl TripPlanner {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn RoutingService>) -> Self {
        Self { geocoder, router }
    }

    /// Plan a trip from the driver's current location through pickup to
    /// dropoff, producing the route summary, named stops, and the HOS
    /// duty schedule.
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        validate_request(request)?;

        let current = self.resolve(&request.current_location).await?;
        let pickup = self.resolve(&request.pickup_location).await?;
        let dropoff = self.resolve(&request.dropoff_location).await?;

        let route = self.router.route(&[current, pickup, dropoff]).await?;
        info!(
            distance_miles = route.distance_miles,
            duration_hours = route.duration_hours,
            router = self.router.name(),
            "route resolved"
        );

        let stops_at = fuel_stops(route.distance_miles);
        debug!(fuel_stops = stops_at.len(), "fuel stops computed");

        let scheduler = HosScheduler::new(request.current_cycle_used);
        let segments =
            scheduler.calculate_trip_schedule(route.distance_miles, route.duration_hours, &stops_at);

        let stops = assemble_stops(request, &route, current, pickup, dropoff, &stops_at);

        Ok(TripPlan {
            total_distance: route.distance_miles,
            total_duration: route.duration_hours,
            route_data: route.geometry,
            stops,
            segments,
        })
    }

    /// Geocode one address, mapping an empty result to `NotFound` and a
    /// transport failure to `Unavailable`.
    async fn resolve(&self, address: &str) -> Result<Coordinates, PlanError> {
        match self.geocoder.geocode(address).await {
            Ok(Some(hit)) => {
                debug!(address, lat = hit.coordinates.lat, lng = hit.coordinates.lng, "geocoded");
                Ok(hit.coordinates)
            }
            Ok(None) => Err(PlanError::NotFound {
                address: address.to_string(),
            }),
            Err(e) => Err(PlanError::unavailable(e)),
        }
    }
}

fn validate_request(request: &TripRequest) -> Result<(), PlanError> {
    for (field, value) in [
        ("current_location", &request.current_location),
        ("pickup_location", &request.pickup_location),
        ("dropoff_location", &request.dropoff_location),
    ] {
        if value.trim().is_empty() {
            return Err(PlanError::invalid_input(format!("{} must not be blank", field)));
        }
    }

    let cycle = request.current_cycle_used;
    if !cycle.is_finite() || cycle < 0.0 || cycle > CYCLE_LIMIT {
        return Err(PlanError::invalid_input(format!(
            "current_cycle_used must be between 0 and {}, got {}",
            CYCLE_LIMIT, cycle
        )));
    }

    Ok(())
}

/// Build the named stop list: current location, pickup, one stop per
/// required fuel distance, dropoff.
fn assemble_stops(
    request: &TripRequest,
    route: &PlannedRoute,
    current: Coordinates,
    pickup: Coordinates,
    dropoff: Coordinates,
    fuel_distances: &[f64],
) -> Vec<Stop> {
    let mut stops = Vec::with_capacity(fuel_distances.len() + 3);

    stops.push(Stop {
        name: request.current_location.clone(),
        latitude: current.lat,
        longitude: current.lng,
        stop_type: StopKind::Current,
        duration: None,
    });
    stops.push(Stop {
        name: request.pickup_location.clone(),
        latitude: pickup.lat,
        longitude: pickup.lng,
        stop_type: StopKind::Pickup,
        duration: Some(hos::PICKUP_DURATION),
    });

    for (i, &distance) in fuel_distances.iter().enumerate() {
        let position = point_along(route, distance, dropoff);
        stops.push(Stop {
            name: format!("Fuel stop {} (mile {})", i + 1, distance as i64),
            latitude: position.lat,
            longitude: position.lng,
            stop_type: StopKind::Fuel,
            duration: Some(hos::FUEL_STOP_DURATION),
        });
    }

    stops.push(Stop {
        name: request.dropoff_location.clone(),
        latitude: dropoff.lat,
        longitude: dropoff.lng,
        stop_type: StopKind::Dropoff,
        duration: Some(hos::DROPOFF_DURATION),
    });

    stops
}

/// Approximate the map position at `distance` miles along the route by
/// indexing into the polyline proportionally. Good enough for pin
/// placement; the schedule itself only needs the distance marker.
fn point_along(route: &PlannedRoute, distance: f64, fallback: Coordinates) -> Coordinates {
    if route.coordinates.is_empty() || route.distance_miles <= 0.0 {
        return fallback;
    }

    let fraction = (distance / route.distance_miles).clamp(0.0, 1.0);
    let idx = (fraction * (route.coordinates.len() - 1) as f64).round() as usize;
    let [lat, lng] = route.coordinates[idx.min(route.coordinates.len() - 1)];
    Coordinates { lat, lng }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    use crate::services::geocoding::{GeocodingResult, MockGeocoder};
    use crate::services::routing::MockRouter;
    use crate::types::SegmentType;

    fn request() -> TripRequest {
        TripRequest {
            current_location: "Chicago, IL".to_string(),
            pickup_location: "St. Louis, MO".to_string(),
            dropoff_location: "Dallas, TX".to_string(),
            current_cycle_used: 10.0,
        }
    }

    fn planner() -> TripPlanner {
        TripPlanner::new(Arc::new(MockGeocoder::new()), Arc::new(MockRouter::new()))
    }

    // -----------------------------------------------------------------------
    // Stubs for failure paths
    // -----------------------------------------------------------------------

    struct NoHitGeocoder;

    #[async_trait]
    impl Geocoder for NoHitGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<GeocodingResult>> {
            Ok(None)
        }
        fn name(&self) -> &'static str {
            "no-hit"
        }
    }

    struct BrokenGeocoder;

    #[async_trait]
    impl Geocoder for BrokenGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<GeocodingResult>> {
            Err(anyhow::anyhow!("connection refused"))
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    /// Router with a fixed long route so fuel-stop assembly is exercised
    /// with known numbers.
    struct FixedRouter {
        distance_miles: f64,
        duration_hours: f64,
    }

    #[async_trait]
    impl RoutingService for FixedRouter {
        async fn route(&self, waypoints: &[Coordinates]) -> Result<PlannedRoute, PlanError> {
            if waypoints.len() < 2 {
                return Err(PlanError::invalid_input("need two waypoints"));
            }
            // Evenly spaced 11-point polyline from (40, -100) heading east.
            let coordinates: Vec<[f64; 2]> =
                (0..=10).map(|i| [40.0, -100.0 + i as f64]).collect();
            Ok(PlannedRoute {
                distance_miles: self.distance_miles,
                duration_hours: self.duration_hours,
                geometry: serde_json::json!({"type": "LineString", "coordinates": []}),
                coordinates,
                instructions: vec![],
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    // -----------------------------------------------------------------------
    // Happy path
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn plan_produces_stops_and_schedule() {
        let plan = planner().plan(&request()).await.unwrap();

        assert!(plan.total_distance > 0.0);
        assert!(plan.total_duration > 0.0);

        // Stops: current, pickup, any fuel stops, dropoff — in order.
        assert_eq!(plan.stops.first().unwrap().stop_type, StopKind::Current);
        assert_eq!(plan.stops[1].stop_type, StopKind::Pickup);
        assert_eq!(plan.stops[1].duration, Some(1.0));
        assert_eq!(plan.stops.last().unwrap().stop_type, StopKind::Dropoff);

        // Schedule brackets the trip.
        assert_eq!(plan.segments.first().unwrap().segment_type, SegmentType::Pickup);
        assert_eq!(plan.segments.last().unwrap().segment_type, SegmentType::Dropoff);
        assert_eq!(plan.segments.last().unwrap().distance, plan.total_distance);
    }

    #[tokio::test]
    async fn plan_is_deterministic() {
        let p = planner();
        let a = p.plan(&request()).await.unwrap();
        let b = p.plan(&request()).await.unwrap();

        assert_eq!(a.total_distance, b.total_distance);
        assert_eq!(a.segments, b.segments);
    }

    #[tokio::test]
    async fn long_route_gets_one_fuel_stop_per_thousand_miles() {
        let planner = TripPlanner::new(
            Arc::new(MockGeocoder::new()),
            Arc::new(FixedRouter { distance_miles: 2500.0, duration_hours: 45.0 }),
        );

        let plan = planner.plan(&request()).await.unwrap();

        let fuel: Vec<&Stop> = plan
            .stops
            .iter()
            .filter(|s| s.stop_type == StopKind::Fuel)
            .collect();
        assert_eq!(fuel.len(), 2);
        assert!(fuel[0].name.contains("mile 1000"));
        assert!(fuel[1].name.contains("mile 2000"));

        // Mile 1000 of 2500 is 40% along the 11-point polyline: index 4.
        assert_eq!(fuel[0].latitude, 40.0);
        assert_eq!(fuel[0].longitude, -96.0);
        assert_eq!(fuel[1].longitude, -92.0);

        // The schedule serviced both stops.
        let fuel_segments = plan
            .segments
            .iter()
            .filter(|s| s.segment_type == SegmentType::Fuel)
            .count();
        assert_eq!(fuel_segments, 2);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn blank_address_is_invalid_input() {
        let mut req = request();
        req.pickup_location = "   ".to_string();

        let err = planner().plan(&req).await.unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
        assert!(err.to_string().contains("pickup_location"));
    }

    #[tokio::test]
    async fn out_of_range_cycle_is_invalid_input() {
        for bad in [-1.0, 70.5, f64::NAN, f64::INFINITY] {
            let mut req = request();
            req.current_cycle_used = bad;

            let err = planner().plan(&req).await.unwrap_err();
            assert!(matches!(err, PlanError::InvalidInput(_)), "accepted {}", bad);
        }
    }

    #[tokio::test]
    async fn boundary_cycle_values_are_accepted() {
        for ok in [0.0, 70.0] {
            let mut req = request();
            req.current_cycle_used = ok;
            assert!(planner().plan(&req).await.is_ok(), "rejected {}", ok);
        }
    }

    // -----------------------------------------------------------------------
    // Provider failures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unmatched_address_is_not_found() {
        let planner = TripPlanner::new(Arc::new(NoHitGeocoder), Arc::new(MockRouter::new()));

        let err = planner.plan(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::NotFound { .. }));
        assert!(err.to_string().contains("Chicago, IL"));
    }

    #[tokio::test]
    async fn geocoder_transport_failure_is_unavailable() {
        let planner = TripPlanner::new(Arc::new(BrokenGeocoder), Arc::new(MockRouter::new()));

        let err = planner.plan(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::Unavailable { .. }));
    }
}
