use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config, GeoResult, WeatherError, WeatherSnapshot,
    config::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
    error::Service,
};

use super::{ForecastFetcher, Geocoder};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code";

/// Open-Meteo geocoding and forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(Client::new(), DEFAULT_GEOCODING_URL, DEFAULT_FORECAST_URL)
    }
}

impl OpenMeteoClient {
    pub fn new(http: Client, geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            http,
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
            language: "en".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::new(
            http,
            &config.endpoints.geocoding_url,
            &config.endpoints.forecast_url,
        )
        .with_language(&config.language))
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<OmCurrent>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    weather_code: i32,
}

impl From<OmCurrent> for WeatherSnapshot {
    fn from(current: OmCurrent) -> Self {
        WeatherSnapshot {
            temperature_c: current.temperature_2m,
            weather_code: current.weather_code,
            observation_time: current.time,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn geocode(&self, city: &str) -> Result<GeoResult, WeatherError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let body = read_success_body(res, Service::Geocoding).await?;

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        let first = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::not_found(city))?;

        debug!(
            "Geocoded {city:?} to {} ({:.4}, {:.4})",
            first.display_name(),
            first.latitude,
            first.longitude
        );
        Ok(first)
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("temperature_unit", "celsius"),
                ("wind_speed_unit", "kmh"),
                ("precipitation_unit", "mm"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo forecast")?;

        let body = read_success_body(res, Service::Forecast).await?;

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        parsed
            .current
            .map(WeatherSnapshot::from)
            .ok_or(WeatherError::MissingData)
    }
}

async fn read_success_body(res: Response, service: Service) -> Result<String, WeatherError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        debug!(
            "{service} request failed with status {status}: {}",
            truncate_body(&body)
        );
        return Err(WeatherError::Network { service, status });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(250);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn forecast_without_current_parses_to_none() {
        let parsed: ForecastResponse =
            serde_json::from_str(r#"{"latitude":1.0,"longitude":2.0}"#).expect("parse");
        assert!(parsed.current.is_none());
    }

    #[test]
    fn geocoding_without_results_parses_to_none() {
        let parsed: GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.5}"#).expect("parse");
        assert!(parsed.results.is_none());
    }

    #[test]
    fn current_maps_into_snapshot() {
        let body = serde_json::json!({
            "current": {
                "time": "2024-05-01T14:15",
                "interval": 900,
                "temperature_2m": 22.4,
                "weather_code": 1
            }
        });
        let parsed: ForecastResponse = serde_json::from_value(body).expect("parse");
        let snap = WeatherSnapshot::from(parsed.current.expect("current present"));
        assert_eq!(snap.temperature_c, 22.4);
        assert_eq!(snap.weather_code, 1);
        assert_eq!(snap.observation_time, "2024-05-01T14:15");
    }
}
