use tracing::debug;

use crate::{CityWeatherDisplay, ForecastFetcher, Geocoder, WeatherError};

/// Geocode `city`, then fetch current conditions at the match.
///
/// The forecast request depends on the geocoder's coordinates, so the two calls
/// run strictly in sequence. The first failure is returned as-is.
pub async fn city_weather(
    geocoder: &dyn Geocoder,
    forecaster: &dyn ForecastFetcher,
    city: &str,
) -> Result<CityWeatherDisplay, WeatherError> {
    let geo = geocoder.geocode(city).await?;
    let snapshot = forecaster.current(geo.latitude, geo.longitude).await?;

    debug!(
        "Current weather for {}: {}°C, code {}, observed {:?}",
        geo.display_name(),
        snapshot.temperature_c,
        snapshot.weather_code,
        snapshot.observed_at()
    );

    Ok(CityWeatherDisplay::new(&geo, snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeoResult, WeatherSnapshot};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Stub {
        forecast_calls: AtomicUsize,
        fail_geocode: bool,
        drop_current: bool,
    }

    #[async_trait]
    impl Geocoder for Stub {
        async fn geocode(&self, city: &str) -> Result<GeoResult, WeatherError> {
            if self.fail_geocode {
                return Err(WeatherError::not_found(city));
            }
            Ok(GeoResult {
                latitude: 48.85,
                longitude: 2.35,
                name: "Paris".into(),
                country: "France".into(),
                admin1: String::new(),
            })
        }
    }

    #[async_trait]
    impl ForecastFetcher for Stub {
        async fn current(&self, latitude: f64, _: f64) -> Result<WeatherSnapshot, WeatherError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.drop_current {
                return Err(WeatherError::MissingData);
            }
            assert_eq!(latitude, 48.85, "forecast must use geocoded coordinates");
            Ok(WeatherSnapshot {
                temperature_c: 18.6,
                weather_code: 61,
                observation_time: "2024-05-01T14:15".into(),
            })
        }
    }

    #[tokio::test]
    async fn composes_display_from_both_stages() {
        let stub = Stub::default();
        let display = city_weather(&stub, &stub, "paris").await.expect("pipeline");

        assert_eq!(display.display_name, "Paris, France");
        assert_eq!(display.temperature_c, 18.6);
        assert_eq!(display.weather_code, 61);
        assert_eq!(display.observation_time, "2024-05-01T14:15");
    }

    #[tokio::test]
    async fn geocode_failure_skips_forecast() {
        let stub = Stub {
            fail_geocode: true,
            ..Stub::default()
        };
        let err = city_weather(&stub, &stub, "Atlantis").await.unwrap_err();

        assert!(matches!(err, WeatherError::NotFound { ref city } if city == "Atlantis"));
        assert_eq!(stub.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_failure_propagates() {
        let stub = Stub {
            drop_current: true,
            ..Stub::default()
        };
        let err = city_weather(&stub, &stub, "Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingData));
    }
}
