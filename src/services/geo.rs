//! Geographic calculations

use crate::types::Coordinates;

/// Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Road distance coefficient (straight line to road)
const ROAD_COEFFICIENT: f64 = 1.3;

/// Average highway speed in mph for travel time estimation
const AVERAGE_SPEED_MPH: f64 = 55.0;

/// Calculate Haversine distance between two points in miles
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Estimate road distance from straight-line distance
pub fn road_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    haversine_distance(from, to) * ROAD_COEFFICIENT
}

/// Estimate travel time in hours
pub fn travel_time_hours(from: &Coordinates, to: &Coordinates) -> f64 {
    road_distance(from, to) / AVERAGE_SPEED_MPH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_chicago_st_louis() {
        let chicago = Coordinates { lat: 41.8781, lng: -87.6298 };
        let st_louis = Coordinates { lat: 38.6270, lng: -90.1994 };

        let distance = haversine_distance(&chicago, &st_louis);

        // Chicago to St. Louis is approximately 262 miles straight line
        assert!((distance - 262.0).abs() < 10.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinates { lat: 40.0, lng: -95.0 };
        let distance = haversine_distance(&point, &point);
        assert!((distance - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_road_distance() {
        let chicago = Coordinates { lat: 41.8781, lng: -87.6298 };
        let st_louis = Coordinates { lat: 38.6270, lng: -90.1994 };

        let distance = road_distance(&chicago, &st_louis);
        let straight = haversine_distance(&chicago, &st_louis);

        // Road distance should be ~30% more than straight line
        assert!((distance / straight - ROAD_COEFFICIENT).abs() < 0.01);
    }

    #[test]
    fn test_travel_time() {
        let chicago = Coordinates { lat: 41.8781, lng: -87.6298 };
        let st_louis = Coordinates { lat: 38.6270, lng: -90.1994 };

        let time = travel_time_hours(&chicago, &st_louis);

        // Roughly 340 road miles at 55 mph — a bit over 6 hours
        assert!(time > 4.0);
        assert!(time < 9.0);
    }
}
