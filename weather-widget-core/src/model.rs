use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Best geocoding match for a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    /// First-level region (state, prefecture); empty when absent or null.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub admin1: String,
}

impl GeoResult {
    /// `name, admin1, country` with empty parts left out.
    pub fn display_name(&self) -> String {
        [self.name.as_str(), self.admin1.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Current conditions at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub weather_code: i32,
    /// ISO-8601 local time as reported by the forecast service, e.g. `2024-05-01T14:15`.
    pub observation_time: String,
}

impl WeatherSnapshot {
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        parse_observation_time(&self.observation_time)
    }
}

/// Everything the renderer needs for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeatherDisplay {
    pub display_name: String,
    pub temperature_c: f64,
    pub weather_code: i32,
    pub observation_time: String,
}

impl CityWeatherDisplay {
    pub fn new(geo: &GeoResult, snapshot: WeatherSnapshot) -> Self {
        Self {
            display_name: geo.display_name(),
            temperature_c: snapshot.temperature_c,
            weather_code: snapshot.weather_code,
            observation_time: snapshot.observation_time,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
