use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weather_card::{
    CardRequest, Endpoints, FontSettings, Location, OutputFormat, ReqwestGet, ThemeOverrides, Units,
    WeatherDataClient, DEFAULT_LOCALE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render OpenWeather conditions as a PNG weather card")]
pub struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub key: String,
    /// City to render (e.g. Sydney)
    #[arg(long, required_unless_present = "serve")]
    pub city: Option<String>,
    /// State code, only meaningful together with --country
    #[arg(long)]
    pub state: Option<String>,
    /// ISO 3166 country code
    #[arg(long)]
    pub country: Option<String>,
    /// metric or imperial; picked from the country when omitted
    #[arg(long)]
    pub units: Option<Units>,
    /// Label language and provider description language
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,
    /// Append the four-day forecast strip
    #[arg(long, default_value = "false")]
    pub forecast: bool,
    /// buffer (raw PNG) or base64 (data URL)
    #[arg(long, default_value = "buffer")]
    pub format: OutputFormat,
    /// JSON file of color overrides
    #[arg(long)]
    pub theme: Option<PathBuf>,
    /// Weather Icons TTF file
    #[arg(long)]
    pub icon_font: Option<PathBuf>,
    /// Only use fonts passed explicitly
    #[arg(long, default_value = "false")]
    pub no_system_fonts: bool,
    /// Where to write the card; base64 output goes to stdout otherwise
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Enable HTTP server mode
    #[arg(long, default_value = "false")]
    pub serve: bool,
    /// HTTP server port
    #[arg(long, default_value = "8080")]
    pub port: u16,
    /// Geocoding endpoint
    #[arg(long)]
    pub geocoding_url: Option<String>,
    /// One-call forecast endpoint
    #[arg(long)]
    pub onecall_url: Option<String>,
}

impl Args {
    pub fn client(&self) -> WeatherDataClient {
        let mut endpoints = Endpoints::default();
        if let Some(url) = &self.geocoding_url {
            endpoints.geocoding = url.clone();
        }
        if let Some(url) = &self.onecall_url {
            endpoints.onecall = url.clone();
        }
        WeatherDataClient::with_http(ReqwestGet::default(), endpoints)
    }

    pub fn fonts(&self) -> FontSettings {
        FontSettings {
            icon_font: self.icon_font.clone(),
            load_system_fonts: !self.no_system_fonts,
            ..Default::default()
        }
    }

    pub fn theme_overrides(&self) -> Result<ThemeOverrides> {
        let Some(path) = &self.theme else {
            return Ok(ThemeOverrides::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid theme {}", path.display()))
    }

    pub fn card_request(&self) -> Result<CardRequest> {
        let city = self.city.clone().context("--city is required")?;

        Ok(CardRequest {
            api_key: self.key.clone(),
            location: Location {
                city,
                state_code: self.state.clone(),
                country_code: self.country.clone(),
            },
            units: self.units,
            locale: self.locale.clone(),
            with_forecast: self.forecast,
            theme: self.theme_overrides()?,
            output: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_flags() {
        let args = Args::try_parse_from([
            "weather-card",
            "--key",
            "KEY",
            "--city",
            "Portland",
            "--state",
            "OR",
            "--country",
            "US",
            "--units",
            "imperial",
            "--format",
            "base64",
            "--forecast",
        ])
        .unwrap();

        let request = args.card_request().unwrap();
        assert_eq!(request.location.query(), "Portland,OR,US");
        assert_eq!(request.units, Some(Units::Imperial));
        assert_eq!(request.output, OutputFormat::Base64);
        assert_eq!(request.locale, "en");
        assert!(request.with_forecast);
    }

    #[test]
    fn endpoints_can_be_overridden() {
        let args = Args::try_parse_from([
            "weather-card",
            "--key",
            "KEY",
            "--serve",
            "--onecall-url",
            "http://localhost:9000/onecall",
        ])
        .unwrap();

        let client = args.client();
        assert_eq!(client.endpoints().onecall, "http://localhost:9000/onecall");
        assert!(client.endpoints().geocoding.ends_with("/geo/1.0/direct"));
    }

    #[test]
    fn unknown_units_are_rejected() {
        let parsed = Args::try_parse_from([
            "weather-card",
            "--key",
            "KEY",
            "--city",
            "Oslo",
            "--units",
            "kelvin",
        ]);
        assert!(parsed.is_err());
    }
}
