//! Trip planning request/response types

use serde::{Deserialize, Serialize};

use super::DutySegment;

/// Request to plan a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Driver's current location (free-text address)
    pub current_location: String,
    /// Pickup location (free-text address)
    pub pickup_location: String,
    /// Dropoff location (free-text address)
    pub dropoff_location: String,
    /// Hours already consumed in the driver's 70-hour duty cycle
    pub current_cycle_used: f64,
}

/// Kind of a named stop on the planned trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Current,
    Pickup,
    Fuel,
    Dropoff,
}

impl StopKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopKind::Current => "current",
            StopKind::Pickup => "pickup",
            StopKind::Fuel => "fuel",
            StopKind::Dropoff => "dropoff",
        }
    }
}

/// A named stop on the planned trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub stop_type: StopKind,
    /// Time spent at the stop in hours, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Response from trip planning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    /// Total route distance in miles
    pub total_distance: f64,
    /// Total driving duration in hours
    pub total_duration: f64,
    /// Route geometry as returned by the routing provider (GeoJSON)
    pub route_data: serde_json::Value,
    /// Named stops in trip order
    pub stops: Vec<Stop>,
    /// HOS duty schedule from pickup through dropoff
    pub segments: Vec<DutySegment>,
}
