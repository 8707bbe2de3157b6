//! Per-locale display strings.
//!
//! Tables are plain data: adding a locale means adding one `LabelSet` and one
//! entry in `LOCALES`.

use chrono::Locale;

/// Compass point order used by [`LabelSet::directions`].
pub const COMPASS_POINTS: usize = 8;

/// Fixed label strings for one locale
#[derive(Debug, PartialEq)]
pub struct LabelSet {
    pub tag: &'static str,
    pub feels_like: &'static str,
    pub wind: &'static str,
    pub humidity: &'static str,
    pub uv_index: &'static str,
    pub chance_of_rain: &'static str,
    pub todays_rain: &'static str,
    pub todays_snow: &'static str,
    pub rain_last_hour: &'static str,
    pub snow_last_hour: &'static str,
    /// N, NE, E, SE, S, SW, W, NW
    pub directions: [&'static str; COMPASS_POINTS],
    /// Low, Moderate, High, Very High, Extreme
    pub uv_severities: [&'static str; 5],
    pub sunrise: &'static str,
    pub sunset: &'static str,
    pub error: &'static str,
    /// strftime pattern for the header date
    pub date_format: &'static str,
    /// strftime pattern for clock times
    pub time_format: &'static str,
    /// strftime pattern for forecast box days
    pub day_format: &'static str,
    pub chrono_locale: Locale,
}

pub const EN: LabelSet = LabelSet {
    tag: "en",
    feels_like: "Feels Like:",
    wind: "Wind:",
    humidity: "Humidity:",
    uv_index: "UV Index:",
    chance_of_rain: "Chance of Rain:",
    todays_rain: "Today's Rain:",
    todays_snow: "Today's Snow:",
    rain_last_hour: "Rain (Last Hour):",
    snow_last_hour: "Snow (Last Hour):",
    directions: ["N", "NE", "E", "SE", "S", "SW", "W", "NW"],
    uv_severities: ["Low", "Moderate", "High", "Very High", "Extreme"],
    sunrise: "Sunrise",
    sunset: "Sunset",
    error: "Error",
    date_format: "%a %-d %B",
    time_format: "%-I:%M %p",
    day_format: "%a %-d",
    chrono_locale: Locale::en_AU,
};

pub const DE: LabelSet = LabelSet {
    tag: "de",
    feels_like: "Gefühlt:",
    wind: "Wind:",
    humidity: "Luftfeuchte:",
    uv_index: "UV Index:",
    chance_of_rain: "Regenrisiko:",
    todays_rain: "Heutiger Regen:",
    todays_snow: "Heutiger Schnee:",
    rain_last_hour: "Regen (letzten Stunde):",
    snow_last_hour: "Schnee (letzten Stunde):",
    directions: ["N", "NO", "O", "SO", "S", "SW", "W", "NW"],
    uv_severities: ["Niedrig", "Moderat", "Hoch", "Sehr Hoch", "Extrem"],
    sunrise: "Sonnenaufgang",
    sunset: "Sonnenuntergang",
    error: "Fehler",
    date_format: "%a %-d. %B",
    time_format: "%H:%M",
    day_format: "%a %-d.",
    chrono_locale: Locale::de_DE,
};

static LOCALES: &[&LabelSet] = &[&EN, &DE];

impl LabelSet {
    /// Labels for a locale tag such as `de` or `de-AT`, falling back to English.
    pub fn for_locale(tag: &str) -> &'static LabelSet {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();

        LOCALES
            .iter()
            .copied()
            .find(|labels| labels.tag.eq_ignore_ascii_case(primary))
            .unwrap_or(&EN)
    }
}

/// Region-qualified language codes the provider accepts as they are
const PROVIDER_REGIONAL_CODES: [&str; 3] = ["pt_br", "zh_cn", "zh_tw"];

/// Provider `lang` value for a locale tag. `pt-BR` becomes `pt_br`; other
/// tags reduce to the primary subtag so descriptions match the labels.
pub fn provider_language(tag: &str) -> String {
    let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
    if PROVIDER_REGIONAL_CODES.contains(&normalized.as_str()) {
        return normalized;
    }

    match normalized.split('_').next() {
        Some(primary) if !primary.is_empty() => primary.to_string(),
        _ => EN.tag.to_string(),
    }
}
