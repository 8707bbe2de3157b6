//! Weather cards: OpenWeather current conditions and a four-day forecast
//! rendered as a themed PNG.
//!
//! A render geocodes the location, fetches the one-call forecast, derives the
//! presentation state and draws it onto an SVG surface that is rasterized to
//! PNG. Nothing is shared between renders.

pub mod client;
pub mod error;
pub mod icons;
pub mod layout;
pub mod locale;
pub mod model;
pub mod output;
pub mod presentation;
pub mod svg;
pub mod theme;
pub mod timefmt;
pub mod units;

use tracing::debug;

pub use client::{Endpoints, HttpGet, ReqwestGet, WeatherBundle, WeatherDataClient};
pub use error::{CardError, Result};
pub use layout::{canvas_size, CanvasSize};
pub use model::{ForecastData, GeocodeResult, Location};
pub use output::{CardImage, OutputFormat};
pub use presentation::{derive_presentation, PresentationState};
pub use svg::{FontSettings, SvgSurface};
pub use theme::ThemeOverrides;
pub use units::Units;

pub const DEFAULT_LOCALE: &str = "en";

/// Everything a caller supplies for one card
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub api_key: String,
    pub location: Location,
    /// `None` picks the unit system from the geocoded country
    pub units: Option<Units>,
    pub locale: String,
    pub with_forecast: bool,
    pub theme: ThemeOverrides,
    pub output: OutputFormat,
}

impl CardRequest {
    pub fn new(api_key: impl Into<String>, location: Location) -> Self {
        Self {
            api_key: api_key.into(),
            location,
            units: None,
            locale: DEFAULT_LOCALE.to_string(),
            with_forecast: false,
            theme: ThemeOverrides::default(),
            output: OutputFormat::default(),
        }
    }
}

/// A finished card along with what was derived to draw it
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub image: CardImage,
    pub size: CanvasSize,
    pub presentation: PresentationState,
}

/// Draw fetched data onto a fresh SVG surface and encode it.
pub fn draw_card(
    bundle: &WeatherBundle,
    request: &CardRequest,
    fonts: &FontSettings,
) -> Result<RenderedCard> {
    let presentation = derive_presentation(
        &bundle.forecast,
        bundle.units,
        &request.locale,
        &request.theme,
    );
    debug!(
        "Drawing card for {} (daytime: {}, optional lines: {})",
        bundle.geocode.name,
        presentation.is_daytime,
        presentation.optional_lines.len()
    );

    let size = canvas_size(request.with_forecast);
    let mut surface = SvgSurface::new(size, fonts)?;
    layout::render(
        &mut surface,
        &bundle.geocode,
        &presentation,
        &bundle.forecast,
        request.with_forecast,
    );

    let png = surface.to_png()?;
    Ok(RenderedCard {
        image: CardImage::encode(png, request.output),
        size,
        presentation,
    })
}

/// Fetches data and renders cards; holds no per-request state.
#[derive(Debug, Clone)]
pub struct CardGenerator<H = ReqwestGet> {
    client: WeatherDataClient<H>,
    fonts: FontSettings,
}

impl CardGenerator<ReqwestGet> {
    pub fn new(fonts: FontSettings) -> Self {
        Self::with_client(WeatherDataClient::new(), fonts)
    }
}

impl Default for CardGenerator<ReqwestGet> {
    fn default() -> Self {
        Self::new(FontSettings::default())
    }
}

impl<H: HttpGet> CardGenerator<H> {
    pub fn with_client(client: WeatherDataClient<H>, fonts: FontSettings) -> Self {
        Self { client, fonts }
    }

    pub async fn render(&self, request: &CardRequest) -> Result<RenderedCard> {
        let bundle = self
            .client
            .grab_data(
                &request.api_key,
                &request.location,
                request.units,
                &request.locale,
            )
            .await?;

        draw_card(&bundle, request, &self.fonts)
    }

    pub async fn create_image(&self, request: &CardRequest) -> Result<CardImage> {
        Ok(self.render(request).await?.image)
    }
}

/// One-shot convenience using reqwest and system fonts.
pub async fn create_weather_image(request: &CardRequest) -> Result<CardImage> {
    CardGenerator::new(FontSettings::default())
        .create_image(request)
        .await
}
