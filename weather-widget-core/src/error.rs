use std::fmt;

use reqwest::StatusCode;

/// Upstream service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    Forecast,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Geocoding => "Geocoding",
            Service::Forecast => "Forecast",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single city lookup.
///
/// The `Display` text is what the search flow shows to the user, so keep it short.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The service answered with a non-success status.
    #[error("{service} failed: {status}")]
    Network { service: Service, status: StatusCode },

    /// The geocoder returned zero matches.
    #[error("No results for \"{city}\"")]
    NotFound { city: String },

    /// The forecast response had no `current` object.
    #[error("No current weather field in response")]
    MissingData,

    /// Transport failures, unreadable bodies, malformed JSON.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl WeatherError {
    pub fn not_found(city: impl Into<String>) -> Self {
        WeatherError::NotFound { city: city.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_mentions_service_and_status() {
        let err = WeatherError::Network {
            service: Service::Geocoding,
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.to_string(), "Geocoding failed: 503 Service Unavailable");
    }

    #[test]
    fn not_found_quotes_the_city() {
        let err = WeatherError::not_found("Atlantis");
        assert_eq!(err.to_string(), "No results for \"Atlantis\"");
    }

    #[test]
    fn unexpected_is_transparent() {
        let err = WeatherError::from(anyhow::anyhow!("Failed to parse forecast JSON"));
        assert_eq!(err.to_string(), "Failed to parse forecast JSON");
    }
}
