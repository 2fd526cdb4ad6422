//! Configuration types for the HTTP providers.

use std::time::Duration;

/// Default base URL of the travel data backend.
pub const DEFAULT_TRAVEL_API_URL: &str = "http://127.0.0.1:8090";

/// Default wttr.in base URL.
pub const DEFAULT_WEATHER_API_URL: &str = "https://wttr.in";

/// Configuration for the REST travel data backend.
#[derive(Debug, Clone)]
pub struct TravelApiConfig {
    /// Base URL (e.g., "http://localhost:8090").
    pub base_url: String,
    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TravelApiConfig {
    /// Create a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(20),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for TravelApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TRAVEL_API_URL)
    }
}

/// Configuration for the wttr.in weather provider.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// JSON forecast URL for a location.
    pub fn forecast_url(&self, location: &str) -> String {
        format!(
            "{}/{}?format=j1",
            self.base_url,
            urlencoding::encode(location)
        )
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = TravelApiConfig::new("http://localhost:8090/");
        assert_eq!(config.endpoint("/places"), "http://localhost:8090/places");
        assert_eq!(config.endpoint("visa"), "http://localhost:8090/visa");
    }

    #[test]
    fn test_forecast_url_encodes_location() {
        let config = WeatherConfig::default();
        assert_eq!(
            config.forecast_url("New York"),
            "https://wttr.in/New%20York?format=j1"
        );
    }
}
