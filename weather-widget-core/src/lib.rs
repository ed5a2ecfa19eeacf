//! Core library for the `weather-widget` tool.
//!
//! This crate defines:
//! - Configuration handling
//! - The Open-Meteo geocoding and forecast client behind two small traits
//! - Weather-code classification and HTML card rendering
//! - The page abstraction and the orchestrator that drives it
//!
//! It is used by `weather-widget-cli`, but the orchestrator only needs a [`Page`]
//! implementation, so other front ends can reuse it.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod page;
pub mod pipeline;
pub mod provider;
pub mod render;

pub use classify::{DisplayMapping, Theme, classify};
pub use config::{Config, Endpoints};
pub use error::{Service, WeatherError};
pub use model::{CityWeatherDisplay, GeoResult, WeatherSnapshot};
pub use orchestrator::{Orchestrator, PresetReport, SearchOutcome};
pub use page::{HtmlPage, Page, PageEvent};
pub use pipeline::city_weather;
pub use provider::{ForecastFetcher, Geocoder, OpenMeteoClient};
