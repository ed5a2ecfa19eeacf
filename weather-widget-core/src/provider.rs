use crate::{GeoResult, WeatherError, WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Resolves a free-text city name to its best match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, city: &str) -> Result<GeoResult, WeatherError>;
}

/// Current conditions for a coordinate pair.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn current(&self, latitude: f64, longitude: f64)
    -> Result<WeatherSnapshot, WeatherError>;
}
