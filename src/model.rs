use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Place to look up: city with optional state and country codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state_code: Option<String>,
    pub country_code: Option<String>,
}

impl Location {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state_code: None,
            country_code: None,
        }
    }

    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn with_state(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = Some(state_code.into());
        self
    }

    /// A state code is only meaningful together with a country code.
    pub fn validate(&self) -> Result<()> {
        if self.city.trim().is_empty() {
            return Err(CardError::configuration("a city name is required"));
        }
        if self.state_code.is_some() && self.country_code.is_none() {
            return Err(CardError::configuration(
                "a state code requires a country code",
            ));
        }
        Ok(())
    }

    /// Free-text geocoding query, `city[,state][,country]`
    pub fn query(&self) -> String {
        let mut query = self.city.clone();
        for part in [&self.state_code, &self.country_code].into_iter().flatten() {
            query.push(',');
            query.push_str(part);
        }
        query
    }
}

/// One match from the direct geocoding endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeocodeResult {
    pub name: String,
    #[serde(default)]
    pub local_names: HashMap<String, String>,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeocodeResult {
    /// Name in the requested locale when the geocoder knows one. Tries the
    /// full tag, then its primary subtag (`de-AT` falls back to `de`).
    pub fn display_name(&self, locale: &str) -> &str {
        let tag = locale.to_ascii_lowercase();
        let primary = tag.split(['-', '_']).next().unwrap_or_default();

        self.local_names
            .get(locale)
            .or_else(|| self.local_names.get(&tag))
            .or_else(|| self.local_names.get(primary))
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    pub fn title(&self, locale: &str) -> String {
        format!("{}, {}", self.display_name(locale), self.country)
    }
}

/// One-call response with `current` and `daily` blocks
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForecastData {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

impl ForecastData {
    /// `daily[0]`; presence is checked when the payload is fetched
    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }

    /// Up to four days following today
    pub fn upcoming(&self) -> impl Iterator<Item = &DailyForecast> {
        self.daily.iter().skip(1).take(4)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrentConditions {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    #[serde(default)]
    pub uvi: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: f64,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub rain: Option<HourlyVolume>,
    #[serde(default)]
    pub snow: Option<HourlyVolume>,
}

impl CurrentConditions {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn rain_last_hour(&self) -> Option<f64> {
        self.rain.as_ref().and_then(|volume| volume.last_hour)
    }

    pub fn snow_last_hour(&self) -> Option<f64> {
        self.snow.as_ref().and_then(|volume| volume.last_hour)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HourlyVolume {
    #[serde(rename = "1h", default)]
    pub last_hour: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DailyForecast {
    pub dt: i64,
    pub temp: TempRange,
    #[serde(default)]
    pub pop: f64,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub snow: Option<f64>,
}

impl DailyForecast {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Condition {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_country_is_rejected() {
        let location = Location::new("Springfield").with_state("IL");
        assert!(matches!(
            location.validate(),
            Err(CardError::Configuration(_))
        ));

        let location = location.with_country("US");
        assert!(location.validate().is_ok());
        assert_eq!(location.query(), "Springfield,IL,US");
    }

    #[test]
    fn query_skips_missing_parts() {
        assert_eq!(Location::new("Sydney").query(), "Sydney");
        assert_eq!(Location::new("Sydney").with_country("AU").query(), "Sydney,AU");
    }

    #[test]
    fn title_prefers_localized_name() {
        let geocode: GeocodeResult = serde_json::from_str(
            r#"{"name":"Munich","local_names":{"de":"München"},"lat":48.1,"lon":11.6,"country":"DE"}"#,
        )
        .unwrap();

        assert_eq!(geocode.title("de"), "München, DE");
        assert_eq!(geocode.title("en"), "Munich, DE");
        assert!(geocode.state.is_none());
    }

    #[test]
    fn localized_name_falls_back_to_primary_subtag() {
        let geocode: GeocodeResult = serde_json::from_str(
            r#"{"name":"Munich","local_names":{"fr":"Munich-FR","de":"München"},"lat":48.1,"lon":11.6,"country":"DE"}"#,
        )
        .unwrap();

        assert_eq!(geocode.display_name("fr"), "Munich-FR");
        assert_eq!(geocode.display_name("de-AT"), "München");
        assert_eq!(geocode.display_name("FR_ca"), "Munich-FR");
        assert_eq!(geocode.display_name("it"), "Munich");
    }

    #[test]
    fn optional_precipitation_fields() {
        let current: CurrentConditions = serde_json::from_str(
            r#"{"dt":1,"sunrise":0,"sunset":2,"temp":20.0,"feels_like":19.0,"humidity":40,
                "uvi":3.1,"wind_speed":2.0,"wind_deg":90,
                "weather":[{"id":500,"main":"Rain","description":"light rain","icon":"10d"}],
                "rain":{"1h":2.0},"snow":{}}"#,
        )
        .unwrap();

        assert_eq!(current.rain_last_hour(), Some(2.0));
        assert_eq!(current.snow_last_hour(), None);
        assert_eq!(current.condition().map(|c| c.icon.as_str()), Some("10d"));
    }
}
