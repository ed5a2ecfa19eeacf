//! Binds page events to the per-city pipeline.
//!
//! Two flows exist: a single-city search triggered by form submission and the
//! preset listing rendered on page load. Collaborators are injected so the whole
//! thing runs against fakes in tests.

use std::sync::Arc;

use anyhow::Context;
use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::{
    CityWeatherDisplay, ForecastFetcher, Geocoder, OpenMeteoClient, Page, PageEvent,
    WeatherError,
    pipeline::city_weather,
    render::{
        display_card, preset_placeholder_card, render_single, search_error_card,
        unexpected_error_card,
    },
};

/// Result of one search submission.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Input was blank; the page was not touched.
    Skipped,
    Shown(CityWeatherDisplay),
    Failed(WeatherError),
}

/// What happened while rendering the preset listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PresetReport {
    /// Display names of the cities that were rendered, in preset order.
    pub loaded: Vec<String>,
    /// Preset names that failed and were left out.
    pub failed: Vec<String>,
    /// Set when the batch itself broke and the generic error card was shown.
    pub unexpected: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastFetcher>,
    presets: Arc<[String]>,
}

impl Orchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecaster: Arc<dyn ForecastFetcher>,
        presets: Vec<String>,
    ) -> Self {
        Self {
            geocoder,
            forecaster,
            presets: presets.into(),
        }
    }

    /// One client serves both the geocoding and the forecast side.
    pub fn with_client(client: OpenMeteoClient, presets: Vec<String>) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, presets)
    }

    pub async fn handle<P: Page + ?Sized>(&self, event: PageEvent, page: &mut P) {
        match event {
            PageEvent::Load => {
                self.render_preset_list(page).await;
            }
            PageEvent::Input(value) => page.set_input(&value),
            PageEvent::Submit => {
                self.submit_search(page).await;
            }
        }
    }

    /// Handle events until the sender side closes, calling `on_change` after each one.
    pub async fn run<P, F>(
        &self,
        mut events: mpsc::Receiver<PageEvent>,
        page: &mut P,
        mut on_change: F,
    ) -> anyhow::Result<()>
    where
        P: Page + ?Sized,
        F: FnMut(&P) -> anyhow::Result<()>,
    {
        while let Some(event) = events.recv().await {
            self.handle(event, page).await;
            on_change(&*page)?;
        }
        Ok(())
    }

    pub async fn submit_search<P: Page + ?Sized>(&self, page: &mut P) -> SearchOutcome {
        let city = page.input_value().trim().to_string();
        if city.is_empty() {
            return SearchOutcome::Skipped;
        }

        let outcome = match city_weather(self.geocoder.as_ref(), self.forecaster.as_ref(), &city)
            .await
        {
            Ok(display) => {
                page.set_heading(&format!("Weather for {}", display.display_name));
                render_single(
                    page,
                    &display.display_name,
                    display.temperature_c,
                    display.weather_code,
                );
                page.set_list_content(String::new());
                SearchOutcome::Shown(display)
            }
            Err(err) => {
                error!("Search for {city:?} failed: {err:#}");
                page.set_search_content(search_error_card(&city, &err.to_string()));
                SearchOutcome::Failed(err)
            }
        };

        page.clear_input();
        outcome
    }

    pub async fn render_preset_list<P: Page + ?Sized>(&self, page: &mut P) -> PresetReport {
        if self.presets.is_empty() {
            return PresetReport::default();
        }

        match self.collect_presets().await {
            Ok((html, report)) => {
                info!(
                    "Rendered {} of {} preset cities",
                    report.loaded.len(),
                    self.presets.len()
                );
                if html.is_empty() {
                    page.set_list_content(preset_placeholder_card());
                } else {
                    page.set_list_content(html);
                }
                report
            }
            Err(err) => {
                error!("Failed to render city list: {err:#}");
                page.set_list_content(unexpected_error_card(&format!("{err:#}")));
                PresetReport {
                    unexpected: Some(format!("{err:#}")),
                    ..PresetReport::default()
                }
            }
        }
    }

    /// Runs every preset lookup concurrently and waits for all of them to settle.
    async fn collect_presets(&self) -> anyhow::Result<(String, PresetReport)> {
        let tasks = self.presets.iter().map(|preset| {
            let city = preset.trim().to_string();
            let geocoder = Arc::clone(&self.geocoder);
            let forecaster = Arc::clone(&self.forecaster);
            tokio::spawn(async move {
                let result = city_weather(geocoder.as_ref(), forecaster.as_ref(), &city).await;
                (city, result)
            })
        });

        let settled = join_all(tasks).await;

        let mut html = String::new();
        let mut report = PresetReport::default();
        for joined in settled {
            let (city, result) = joined.context("City lookup task did not complete")?;
            match result {
                Ok(display) => {
                    html.push_str(&display_card(&display));
                    report.loaded.push(display.display_name);
                }
                Err(err) => {
                    warn!("City {city:?} failed to load: {err:#}");
                    report.failed.push(city);
                }
            }
        }

        Ok((html, report))
    }
}
