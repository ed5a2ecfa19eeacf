//! Open-Meteo (WMO) weather code → icon, label and theme key.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use std::fmt;

/// Styling key consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Default,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Stormy => "stormy",
            Theme::Default => "default",
        }
    }

    pub fn css_class(&self) -> String {
        format!("theme-{}", self.as_str())
    }

    pub const fn all() -> &'static [Theme] {
        &[
            Theme::Sunny,
            Theme::Cloudy,
            Theme::Rainy,
            Theme::Snowy,
            Theme::Stormy,
            Theme::Default,
        ]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMapping {
    pub icon: &'static str,
    pub text: &'static str,
    pub theme: Theme,
}

impl DisplayMapping {
    const fn new(icon: &'static str, text: &'static str, theme: Theme) -> Self {
        Self { icon, text, theme }
    }
}

pub const UNKNOWN: DisplayMapping = DisplayMapping::new("🌤️", "Weather", Theme::Default);

/// Total: codes outside the documented set fall back to [`UNKNOWN`].
pub fn classify(code: i32) -> DisplayMapping {
    match code {
        0 => DisplayMapping::new("☀️", "Clear sky", Theme::Sunny),
        1..=3 => DisplayMapping::new(
            "⛅",
            "Mainly clear / Partly cloudy / Overcast",
            Theme::Cloudy,
        ),
        45 | 48 => DisplayMapping::new("🌫️", "Fog / Depositing rime fog", Theme::Cloudy),
        51 | 53 | 55 => DisplayMapping::new("🌦️", "Drizzle", Theme::Rainy),
        56 | 57 => DisplayMapping::new("🌦️", "Freezing drizzle", Theme::Rainy),
        61 | 63 | 65 => DisplayMapping::new("🌧️", "Rain", Theme::Rainy),
        66 | 67 => DisplayMapping::new("🌧️", "Freezing rain", Theme::Rainy),
        71 | 73 | 75 => DisplayMapping::new("❄️", "Snowfall", Theme::Snowy),
        77 => DisplayMapping::new("🌨️", "Snow grains", Theme::Snowy),
        80..=82 => DisplayMapping::new("🌧️", "Rain showers", Theme::Rainy),
        85 | 86 => DisplayMapping::new("❄️", "Snow showers", Theme::Snowy),
        95 => DisplayMapping::new("⛈️", "Thunderstorm", Theme::Stormy),
        96 | 99 => DisplayMapping::new("⛈️", "Thunderstorm with hail", Theme::Stormy),
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTED: &[i32] = &[
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn documented_codes_never_fall_back() {
        for &code in DOCUMENTED {
            assert_ne!(classify(code), UNKNOWN, "code {code} should be classified");
        }
    }

    #[test]
    fn undocumented_codes_fall_back() {
        for code in [-1, 4, 44, 50, 100, i32::MIN, i32::MAX] {
            assert_eq!(classify(code), UNKNOWN, "code {code}");
        }
    }

    #[test]
    fn clear_sky_is_sunny() {
        let m = classify(0);
        assert_eq!(m.icon, "☀️");
        assert_eq!(m.text, "Clear sky");
        assert_eq!(m.theme, Theme::Sunny);
    }

    #[test]
    fn cloud_cover_codes_share_one_mapping() {
        let m = classify(1);
        assert_eq!(m, classify(2));
        assert_eq!(m, classify(3));
        assert_eq!(m.icon, "⛅");
        assert_eq!(m.text, "Mainly clear / Partly cloudy / Overcast");
    }

    #[test]
    fn fog_uses_cloudy_theme() {
        assert_eq!(classify(45).theme, Theme::Cloudy);
        assert_eq!(classify(48).text, "Fog / Depositing rime fog");
    }

    #[test]
    fn themes_by_family() {
        assert_eq!(classify(55).theme, Theme::Rainy);
        assert_eq!(classify(67).theme, Theme::Rainy);
        assert_eq!(classify(81).theme, Theme::Rainy);
        assert_eq!(classify(77).theme, Theme::Snowy);
        assert_eq!(classify(86).theme, Theme::Snowy);
        assert_eq!(classify(95).theme, Theme::Stormy);
        assert_eq!(classify(99).text, "Thunderstorm with hail");
    }

    #[test]
    fn theme_css_classes() {
        let classes: Vec<String> = Theme::all().iter().map(Theme::css_class).collect();
        assert_eq!(
            classes,
            [
                "theme-sunny",
                "theme-cloudy",
                "theme-rainy",
                "theme-snowy",
                "theme-stormy",
                "theme-default"
            ]
        );
    }
}
