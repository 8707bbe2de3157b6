//! End-to-end card rendering against canned provider responses

use async_trait::async_trait;
use weather_card::presentation::{Column, OptionalKind};
use weather_card::{
    CardError, CardGenerator, CardImage, CardRequest, Endpoints, FontSettings, HttpGet, Location,
    OutputFormat, Units, WeatherDataClient,
};

/// Answers geocoding and one-call requests with fixed bodies
struct CannedProvider {
    geocoding: &'static str,
    onecall: String,
}

#[async_trait]
impl HttpGet for CannedProvider {
    async fn get(&self, url: &str, _query: &[(&str, String)]) -> weather_card::Result<String> {
        if url.ends_with("/direct") {
            Ok(self.geocoding.to_string())
        } else {
            Ok(self.onecall.clone())
        }
    }
}

const SYDNEY: &str = r#"[{"name":"Sydney","local_names":{"de":"Sydney"},"lat":-33.8688,"lon":151.2093,"country":"AU","state":"New South Wales"}]"#;

fn daily(dt: i64, icon: &str, rain: Option<f64>) -> String {
    let rain = rain.map(|r| format!(r#","rain":{r}"#)).unwrap_or_default();
    format!(
        r#"{{"dt":{dt},"temp":{{"min":15.2,"max":24.8}},"pop":0.35,
            "weather":[{{"id":500,"main":"Rain","description":"light rain","icon":"{icon}"}}]{rain}}}"#
    )
}

fn forecast(dt: i64, current_rain: Option<f64>, today_rain: Option<f64>) -> String {
    let rain = current_rain
        .map(|r| format!(r#","rain":{{"1h":{r}}}"#))
        .unwrap_or_default();
    let days: Vec<String> = (0..8)
        .map(|i| daily(1_700_010_000 + i * 86_400, "10d", if i == 0 { today_rain } else { None }))
        .collect();

    format!(
        r#"{{"lat":-33.87,"lon":151.21,"timezone":"Australia/Sydney","timezone_offset":39600,
            "current":{{"dt":{dt},"sunrise":1699987000,"sunset":1700036000,"temp":21.3,
                "feels_like":20.8,"humidity":71,"uvi":6.4,"wind_speed":4.2,"wind_deg":30,
                "weather":[{{"id":500,"main":"Rain","description":"light rain","icon":"10d"}}]{rain}}},
            "daily":[{}]}}"#,
        days.join(",")
    )
}

fn generator(onecall: String) -> CardGenerator<CannedProvider> {
    let provider = CannedProvider {
        geocoding: SYDNEY,
        onecall,
    };
    CardGenerator::with_client(
        WeatherDataClient::with_http(provider, Endpoints::default()),
        FontSettings {
            load_system_fonts: false,
            ..Default::default()
        },
    )
}

fn sydney_request() -> CardRequest {
    CardRequest {
        units: Some(Units::Metric),
        with_forecast: true,
        ..CardRequest::new("KEY", Location::new("Sydney").with_country("AU"))
    }
}

#[tokio::test]
async fn daytime_card_with_last_hour_rain() {
    let generator = generator(forecast(1_700_000_000, Some(2.0), None));

    let card = generator.render(&sydney_request()).await.unwrap();

    assert_eq!((card.size.width, card.size.height), (520, 460));
    let png = card.image.png_bytes().unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (520, 460));

    let state = &card.presentation;
    assert!(state.is_daytime);
    assert_eq!(state.colors.panel.left, "#FFD982");

    assert_eq!(state.optional_lines.len(), 1);
    let line = &state.optional_lines[0];
    assert_eq!(line.kind, OptionalKind::RainLastHour);
    assert_eq!(line.column, Column::Right);
    assert_eq!(line.value, "2mm");
    assert_eq!(line.y, 278.0);
    assert!(!state
        .optional_lines
        .iter()
        .any(|l| l.kind == OptionalKind::RainToday));
}

#[tokio::test]
async fn night_card_without_forecast_is_base64() {
    let generator = generator(forecast(1_700_040_000, None, Some(3.5)));
    let request = CardRequest {
        with_forecast: false,
        output: OutputFormat::Base64,
        locale: "de".to_string(),
        ..sydney_request()
    };

    let card = generator.render(&request).await.unwrap();

    assert!(!card.presentation.is_daytime);
    assert_eq!(card.presentation.colors.panel.left, "#25395C");
    assert_eq!(card.presentation.labels.tag, "de");
    assert!(matches!(&card.image, CardImage::Base64(url) if url.starts_with("data:image/png;base64,")));

    let decoded = image::load_from_memory(&card.image.png_bytes().unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (520, 320));

    let lines = &card.presentation.optional_lines;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].kind, OptionalKind::RainToday);
    assert_eq!(lines[0].text(), "Heutiger Regen: 3.5mm");
}

#[tokio::test]
async fn unknown_location_fails_before_drawing() {
    let provider = CannedProvider {
        geocoding: "[]",
        onecall: forecast(1_700_000_000, None, None),
    };
    let generator = CardGenerator::with_client(
        WeatherDataClient::with_http(provider, Endpoints::default()),
        FontSettings::default(),
    );

    let err = generator.create_image(&sydney_request()).await.unwrap_err();
    assert!(matches!(err, CardError::LocationNotFound(_)));
}

#[tokio::test]
async fn state_without_country_is_a_configuration_error() {
    let generator = generator(forecast(1_700_000_000, None, None));
    let request = CardRequest::new("KEY", Location::new("Portland").with_state("OR"));

    let err = generator.create_image(&request).await.unwrap_err();
    assert!(matches!(err, CardError::Configuration(_)));
}
