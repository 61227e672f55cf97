//! Configuration management

use anyhow::Result;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Nominatim API URL (for geocoding)
    pub nominatim_url: String,

    /// OSRM routing engine URL (optional, falls back to mock if unset)
    pub osrm_url: Option<String>,

    /// Geocoder backend: "nominatim" or "mock"
    pub geocoder_backend: String,

    /// Timeout for provider HTTP requests, in seconds
    pub http_timeout_seconds: u64,
}

/// Default provider request timeout (seconds)
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let nominatim_url = std::env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let osrm_url = std::env::var("OSRM_URL").ok();

        let geocoder_backend = std::env::var("GEOCODER_BACKEND")
            .unwrap_or_else(|_| "nominatim".to_string());

        let http_timeout_seconds = std::env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);

        Ok(Self {
            nominatim_url,
            osrm_url,
            geocoder_backend,
            http_timeout_seconds,
        })
    }
}
