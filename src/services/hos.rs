//! Hours-of-Service duty schedule computation.
//!
//! Given a route's total distance, total duration, and the absolute
//! distances at which refueling is required, this module walks the trip
//! forward in time and interleaves driving segments with the stoppages
//! HOS regulations mandate (30-minute breaks, 10-hour rests) plus fuel
//! stops. It is a greedy single-pass simulation — it decides how far to
//! drive before the next mandatory event and never backtracks or
//! re-optimises stop placement.

use tracing::debug;

use crate::types::{DutySegment, DutyStatus, SegmentType};

/// Maximum continuous driving before a rest is required (hours)
pub const MAX_DRIVING_TIME: f64 = 11.0;

/// Maximum on-duty window before a rest is required (hours)
pub const MAX_ON_DUTY_TIME: f64 = 14.0;

/// Driving time after which a short break is mandatory (hours)
pub const REQUIRED_BREAK_AFTER: f64 = 8.0;

/// Length of the mandatory short break (hours)
pub const BREAK_DURATION: f64 = 0.5;

/// Length of the mandatory long rest (hours)
pub const REST_PERIOD: f64 = 10.0;

/// Multi-day duty cycle cap (hours)
pub const CYCLE_LIMIT: f64 = 70.0;

/// Speed assumed when the route carries no usable duration (mph)
const FALLBACK_AVG_SPEED_MPH: f64 = 55.0;

/// How far ahead the simulation looks for an upcoming fuel stop (miles)
const FUEL_LOOKAHEAD_MILES: f64 = 100.0;

/// Time spent at a fuel stop (hours)
pub const FUEL_STOP_DURATION: f64 = 0.5;

/// Time spent loading at pickup / unloading at dropoff (hours)
pub const PICKUP_DURATION: f64 = 1.0;
pub const DROPOFF_DURATION: f64 = 1.0;

/// Running counters for one scheduling call.
///
/// `current_driving_time` is reset by a break or a rest;
/// `current_on_duty_time` only by a rest. Driving time is a subset of
/// on-duty time, so `current_driving_time <= current_on_duty_time` holds
/// throughout the walk.
#[derive(Debug, Default)]
struct TripState {
    /// Elapsed hours since trip start
    current_time: f64,
    /// Hours driven continuously since the last break or rest
    current_driving_time: f64,
    /// Hours on duty since the last rest
    current_on_duty_time: f64,
    /// Cumulative miles driven
    distance_covered: f64,
}

/// HOS duty schedule calculator.
///
/// Created per trip from the driver's current cycle usage; holds no
/// cross-call state.
#[derive(Debug, Clone)]
pub struct HosScheduler {
    current_cycle_used: f64,
    available_hours: f64,
}

impl HosScheduler {
    pub fn new(current_cycle_used: f64) -> Self {
        Self {
            current_cycle_used,
            available_hours: CYCLE_LIMIT - current_cycle_used,
        }
    }

    /// Hours left in the driver's 70-hour cycle.
    ///
    /// Informational only — the simulation does not stop scheduling when
    /// the cycle runs out (matching the upstream product behavior; see
    /// DESIGN.md).
    pub fn available_hours(&self) -> f64 {
        self.available_hours
    }

    pub fn current_cycle_used(&self) -> f64 {
        self.current_cycle_used
    }

    /// Compute the duty schedule for a trip.
    ///
    /// `total_distance` is in miles, `total_duration` in hours, and
    /// `fuel_stops` is an ascending list of absolute distances along the
    /// route at which refueling is required.
    ///
    /// The result always starts with a 1-hour pickup and ends with a
    /// 1-hour dropoff pinned to `total_distance`. Segments are contiguous:
    /// each starts exactly where the previous one ended.
    pub fn calculate_trip_schedule(
        &self,
        total_distance: f64,
        total_duration: f64,
        fuel_stops: &[f64],
    ) -> Vec<DutySegment> {
        let mut schedule = Vec::new();
        let mut state = TripState::default();

        let avg_speed = if total_duration > 0.0 {
            total_distance / total_duration
        } else {
            FALLBACK_AVG_SPEED_MPH
        };

        schedule.push(DutySegment {
            segment_type: SegmentType::Pickup,
            start_time: state.current_time,
            duration: PICKUP_DURATION,
            status: DutyStatus::OnDuty,
            distance: 0.0,
            distance_end: None,
        });
        state.current_time += PICKUP_DURATION;
        state.current_on_duty_time += PICKUP_DURATION;

        while state.distance_covered < total_distance {
            // Mandatory stoppages first, in fixed priority order:
            // break, then rest, then fuel. A break clears driving time but
            // NOT the on-duty window; only a rest clears both.
            if state.current_driving_time >= REQUIRED_BREAK_AFTER {
                schedule.push(DutySegment {
                    segment_type: SegmentType::Break,
                    start_time: state.current_time,
                    duration: BREAK_DURATION,
                    status: DutyStatus::OffDuty,
                    distance: state.distance_covered,
                    distance_end: None,
                });
                state.current_time += BREAK_DURATION;
                state.current_driving_time = 0.0;
            }

            if state.current_on_duty_time >= MAX_ON_DUTY_TIME {
                schedule.push(DutySegment {
                    segment_type: SegmentType::Rest,
                    start_time: state.current_time,
                    duration: REST_PERIOD,
                    status: DutyStatus::Sleeper,
                    distance: state.distance_covered,
                    distance_end: None,
                });
                state.current_time += REST_PERIOD;
                state.current_driving_time = 0.0;
                state.current_on_duty_time = 0.0;
            }

            let next_fuel_stop = fuel_stops.iter().copied().find(|&stop| {
                state.distance_covered < stop
                    && stop <= state.distance_covered + FUEL_LOOKAHEAD_MILES
            });

            if let Some(stop) = next_fuel_stop {
                // Drive exactly to the stop, then spend half an hour at the
                // pump. Fueling counts against the on-duty window but not
                // against continuous driving time.
                let drive_time = (stop - state.distance_covered) / avg_speed;

                schedule.push(DutySegment {
                    segment_type: SegmentType::Driving,
                    start_time: state.current_time,
                    duration: drive_time,
                    status: DutyStatus::Driving,
                    distance: state.distance_covered,
                    distance_end: Some(stop),
                });
                state.current_time += drive_time;
                state.current_driving_time += drive_time;
                state.current_on_duty_time += drive_time;
                state.distance_covered = stop;

                schedule.push(DutySegment {
                    segment_type: SegmentType::Fuel,
                    start_time: state.current_time,
                    duration: FUEL_STOP_DURATION,
                    status: DutyStatus::OnDuty,
                    distance: state.distance_covered,
                    distance_end: None,
                });
                state.current_time += FUEL_STOP_DURATION;
                state.current_on_duty_time += FUEL_STOP_DURATION;
            } else {
                let remaining_distance = total_distance - state.distance_covered;
                let time_until_break = REQUIRED_BREAK_AFTER - state.current_driving_time;
                let time_until_rest = MAX_ON_DUTY_TIME - state.current_on_duty_time;

                let mut max_drive_time = time_until_break
                    .min(time_until_rest)
                    .min(MAX_DRIVING_TIME - state.current_driving_time)
                    .min(remaining_distance / avg_speed);

                // Never outrun the fuel lookahead: a free drive must stop
                // once the next upcoming fuel stop enters the 100-mile
                // window, otherwise a long leg would skip the stop entirely.
                if let Some(upcoming) = fuel_stops
                    .iter()
                    .copied()
                    .find(|&stop| stop > state.distance_covered + FUEL_LOOKAHEAD_MILES)
                {
                    let to_window =
                        (upcoming - FUEL_LOOKAHEAD_MILES - state.distance_covered) / avg_speed;
                    max_drive_time = max_drive_time.min(to_window);
                }

                if max_drive_time <= 0.0 {
                    // A constraint is already exhausted at loop entry;
                    // terminate rather than loop forever.
                    debug!(
                        distance_covered = state.distance_covered,
                        total_distance, "drive budget exhausted, ending schedule early"
                    );
                    break;
                }

                let drive_distance = max_drive_time * avg_speed;

                schedule.push(DutySegment {
                    segment_type: SegmentType::Driving,
                    start_time: state.current_time,
                    duration: max_drive_time,
                    status: DutyStatus::Driving,
                    distance: state.distance_covered,
                    distance_end: Some(state.distance_covered + drive_distance),
                });
                state.current_time += max_drive_time;
                state.current_driving_time += max_drive_time;
                state.current_on_duty_time += max_drive_time;
                state.distance_covered += drive_distance;
            }
        }

        // Dropoff is pinned to the route's total distance, not to
        // `distance_covered` — the two differ only after an early exit.
        schedule.push(DutySegment {
            segment_type: SegmentType::Dropoff,
            start_time: state.current_time,
            duration: DROPOFF_DURATION,
            status: DutyStatus::OnDuty,
            distance: total_distance,
            distance_end: None,
        });

        schedule
    }
}

// ===========================================================================
// Tests
// ===========================================================================
