//! OpenWeather geocoding and one-call retrieval.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{CardError, Result};
use crate::locale::provider_language;
use crate::model::{ForecastData, GeocodeResult, Location};
use crate::units::{resolve_units, Units};

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Granularities the card never shows
const EXCLUDED_BLOCKS: &str = "minutely,hourly,alerts";

/// Transport seam: a GET returning the response body.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String>;
}

/// `HttpGet` backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestGet {
    http: Client,
}

#[async_trait]
impl HttpGet for ReqwestGet {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CardError::data_unavailable(format!("request to {url} failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            CardError::data_unavailable(format!("could not read response from {url}: {e}"))
        })?;

        if !status.is_success() {
            return Err(CardError::data_unavailable(format!(
                "{url} answered with status {status}: {}",
                truncate_body(&body)
            )));
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Endpoint base URLs, overridable for proxies and staging
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocoding: String,
    pub onecall: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: DEFAULT_GEOCODING_URL.to_string(),
            onecall: DEFAULT_ONECALL_URL.to_string(),
        }
    }
}

/// Geocode result and forecast for one request, plus the unit system the
/// forecast was fetched in.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub geocode: GeocodeResult,
    pub forecast: ForecastData,
    pub units: Units,
}

#[derive(Debug, Clone)]
pub struct WeatherDataClient<H = ReqwestGet> {
    http: H,
    endpoints: Endpoints,
}

impl WeatherDataClient<ReqwestGet> {
    pub fn new() -> Self {
        Self::with_http(ReqwestGet::default(), Endpoints::default())
    }
}

impl Default for WeatherDataClient<ReqwestGet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HttpGet> WeatherDataClient<H> {
    pub fn with_http(http: H, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Best geocoder match for `location`.
    pub async fn resolve_location(&self, api_key: &str, location: &Location) -> Result<GeocodeResult> {
        let query = location.query();
        debug!("Geocoding location: {}", query);

        let body = self
            .http
            .get(
                &self.endpoints.geocoding,
                &[
                    ("q", query.clone()),
                    ("appid", api_key.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await
            .map_err(|e| {
                warn!("Geocoding request failed: {}", e);
                e
            })?;

        let matches: Vec<GeocodeResult> = parse_json(&body, "geocoding")?;
        let geocode = matches
            .into_iter()
            .next()
            .ok_or(CardError::LocationNotFound(query))?;

        debug!(
            "Found location: {}, {} ({:.4}, {:.4})",
            geocode.name, geocode.country, geocode.lat, geocode.lon
        );
        Ok(geocode)
    }

    /// Current conditions and daily forecast for a coordinate.
    pub async fn fetch_forecast(
        &self,
        api_key: &str,
        lat: f64,
        lon: f64,
        units: Units,
        locale: &str,
    ) -> Result<ForecastData> {
        debug!("Fetching forecast for ({:.4}, {:.4}) in {}", lat, lon, units);

        let body = self
            .http
            .get(
                &self.endpoints.onecall,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("appid", api_key.to_string()),
                    ("units", units.as_str().to_string()),
                    ("lang", provider_language(locale)),
                    ("exclude", EXCLUDED_BLOCKS.to_string()),
                ],
            )
            .await
            .map_err(|e| {
                warn!("Forecast request failed: {}", e);
                e
            })?;

        let forecast: ForecastData = parse_json(&body, "forecast")?;
        if forecast.daily.is_empty() {
            warn!("Forecast for ({:.4}, {:.4}) has no daily entries", lat, lon);
            return Err(CardError::data_unavailable(
                "forecast response contained no daily entries",
            ));
        }

        Ok(forecast)
    }

    /// Geocode, then fetch the forecast at the resolved coordinates.
    pub async fn grab_data(
        &self,
        api_key: &str,
        location: &Location,
        units: Option<Units>,
        locale: &str,
    ) -> Result<WeatherBundle> {
        location.validate()?;
        if api_key.trim().is_empty() {
            return Err(CardError::configuration("an API key is required"));
        }

        let geocode = self.resolve_location(api_key, location).await?;
        let units = resolve_units(units, &geocode.country);
        let forecast = self
            .fetch_forecast(api_key, geocode.lat, geocode.lon, units, locale)
            .await?;

        Ok(WeatherBundle {
            geocode,
            forecast,
            units,
        })
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!("Could not parse {} response: {}", what, e);
        CardError::data_unavailable(format!("unparsable {what} response: {e}"))
    })
}
