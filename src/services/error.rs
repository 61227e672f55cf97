//! Request-level failure kinds for trip planning.

use thiserror::Error;

/// Errors surfaced to the caller when a trip cannot be planned.
///
/// The HOS core itself never fails; every kind here originates at the
/// request boundary or in a route provider. None of these are retried
/// locally — planning cannot proceed without route data.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Geocoding produced no match for an address
    #[error("could not geocode address: '{address}'")]
    NotFound { address: String },

    /// The request itself is malformed (bad field, too few waypoints)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The upstream provider answered with a non-success result
    #[error("routing provider error: {0}")]
    ProviderError(String),

    /// The provider could not be reached at all
    #[error("provider unavailable: {source}")]
    Unavailable {
        #[source]
        source: anyhow::Error,
    },
}

impl PlanError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PlanError::InvalidInput(msg.into())
    }

    pub fn unavailable(source: anyhow::Error) -> Self {
        PlanError::Unavailable { source }
    }

    /// Stable machine-readable code for response payloads and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            PlanError::NotFound { .. } => "NOT_FOUND",
            PlanError::InvalidInput(_) => "INVALID_INPUT",
            PlanError::ProviderError(_) => "PROVIDER_ERROR",
            PlanError::Unavailable { .. } => "UNAVAILABLE",
        }
    }
}
