//! Type definitions

pub mod geo;
pub mod segment;
pub mod trip;

pub use geo::*;
pub use segment::*;
pub use trip::*;
