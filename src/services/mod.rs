//! Business logic services

pub mod error;
pub mod geo;
pub mod geocoding;
pub mod hos;
pub mod nominatim;
pub mod planner;
pub mod routing;
