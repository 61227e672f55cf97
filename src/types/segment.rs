//! Duty segment types
//!
//! A duty segment is one contiguous interval of the driver's schedule,
//! classified both by activity (`SegmentType`) and by the HOS duty state
//! it counts against (`DutyStatus`). The two are distinct: a fuel stop has
//! type `fuel` but status `on_duty`.

use serde::{Deserialize, Serialize};

/// Activity kind of a schedule segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    Pickup,
    Driving,
    Break,
    Fuel,
    Rest,
    Dropoff,
}

impl SegmentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            SegmentType::Pickup => "pickup",
            SegmentType::Driving => "driving",
            SegmentType::Break => "break",
            SegmentType::Fuel => "fuel",
            SegmentType::Rest => "rest",
            SegmentType::Dropoff => "dropoff",
        }
    }
}

/// HOS duty classification of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OnDuty,
    Driving,
    OffDuty,
    Sleeper,
}

impl DutyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OnDuty => "on_duty",
            DutyStatus::Driving => "driving",
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::Sleeper => "sleeper",
        }
    }
}

/// One entry in the computed duty schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutySegment {
    /// Activity kind
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    /// Elapsed hours since trip start
    pub start_time: f64,
    /// Length of the segment in hours
    pub duration: f64,
    /// HOS duty state during the segment
    pub status: DutyStatus,
    /// Cumulative miles driven when the segment starts
    pub distance: f64,
    /// Cumulative miles driven when the segment ends (driving segments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_end: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_type_serializes_as_type_field() {
        let seg = DutySegment {
            segment_type: SegmentType::Fuel,
            start_time: 5.0,
            duration: 0.5,
            status: DutyStatus::OnDuty,
            distance: 1000.0,
            distance_end: None,
        };

        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "fuel");
        assert_eq!(json["status"], "on_duty");
        assert!(json.get("distance_end").is_none());
    }

    #[test]
    fn driving_segment_includes_distance_end() {
        let seg = DutySegment {
            segment_type: SegmentType::Driving,
            start_time: 1.0,
            duration: 2.0,
            status: DutyStatus::Driving,
            distance: 0.0,
            distance_end: Some(110.0),
        };

        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["distance_end"], 110.0);
    }

    #[test]
    fn status_as_str_matches_wire_names() {
        assert_eq!(DutyStatus::OffDuty.as_str(), "off_duty");
        assert_eq!(DutyStatus::Sleeper.as_str(), "sleeper");
        assert_eq!(SegmentType::Dropoff.as_str(), "dropoff");
    }
}
