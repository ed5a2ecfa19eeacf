//! HTML fragments for weather cards.
//!
//! Styling lives outside this crate and keys off the `weather-card`,
//! `weather-inner` and `theme-*` classes. Interpolated text is escaped by maud.

use maud::{Markup, html};

use crate::{CityWeatherDisplay, Page, Theme, classify::classify};

/// Round half to even: 20.5 → 20, 21.5 → 22.
pub fn round_temperature(temperature_c: f64) -> i64 {
    // Integer conversion also folds -0.0 into 0.
    temperature_c.round_ties_even() as i64
}

/// Card fragment for one city, suitable for concatenating into a listing.
pub fn weather_card(display_name: &str, temperature_c: f64, weather_code: i32) -> String {
    let mapping = classify(weather_code);

    html! {
        div class="weather-card" {
            h2 { "Weather for " (display_name) }
            div class={ "weather-inner " (mapping.theme.css_class()) } {
                p class="icon" { (mapping.icon) }
                p { "Temperature: " (round_temperature(temperature_c)) "°C" }
                p { "Weather: " (mapping.text) }
            }
        }
    }
    .into_string()
}

pub fn display_card(display: &CityWeatherDisplay) -> String {
    weather_card(
        &display.display_name,
        display.temperature_c,
        display.weather_code,
    )
}

/// Replace the search region of `page` with the card for one city.
pub fn render_single<P: Page + ?Sized>(
    page: &mut P,
    display_name: &str,
    temperature_c: f64,
    weather_code: i32,
) {
    page.set_search_content(weather_card(display_name, temperature_c, weather_code));
}

pub fn search_error_card(city: &str, message: &str) -> String {
    notice_card(html! {
        p { (format!("Couldn't fetch weather for \"{city}\". {message}")) }
    })
}

/// Shown instead of an empty listing when no preset city loaded.
pub fn preset_placeholder_card() -> String {
    notice_card(html! {
        p { "Couldn’t load preset cities. Check console for details." }
    })
}

pub fn unexpected_error_card(detail: &str) -> String {
    notice_card(html! {
        p { "Unexpected error while rendering the city list." }
        p { small { (detail) } }
    })
}

fn notice_card(body: Markup) -> String {
    html! {
        div class="weather-card" {
            div class={ "weather-inner " (Theme::Default.css_class()) } {
                (body)
            }
        }
    }
    .into_string()
}
