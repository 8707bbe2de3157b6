mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use clap::Parser;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weather_card::{
    CardError, CardGenerator, CardImage, CardRequest, Location, OutputFormat, ThemeOverrides, Units,
};

use config::Args;

struct AppState {
    generator: CardGenerator,
    api_key: String,
    theme: ThemeOverrides,
    units: Option<Units>,
    locale: String,
}

/// Query string of `GET /weather.png`
#[derive(Debug, Deserialize)]
struct CardQuery {
    city: String,
    state: Option<String>,
    country: Option<String>,
    units: Option<String>,
    locale: Option<String>,
    #[serde(default)]
    forecast: bool,
    format: Option<String>,
}

impl CardQuery {
    fn into_request(self, state: &AppState) -> Result<CardRequest, CardError> {
        let units = match self.units {
            Some(units) => Some(units.parse::<Units>()?),
            None => state.units,
        };
        let output = match self.format {
            Some(format) => format.parse::<OutputFormat>()?,
            None => OutputFormat::Buffer,
        };

        Ok(CardRequest {
            api_key: state.api_key.clone(),
            location: Location {
                city: self.city,
                state_code: self.state,
                country_code: self.country,
            },
            units,
            locale: self.locale.unwrap_or_else(|| state.locale.clone()),
            with_forecast: self.forecast,
            theme: state.theme.clone(),
            output,
        })
    }
}

fn error_response(err: CardError) -> Response {
    let status = match err {
        CardError::Configuration(_) | CardError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        CardError::LocationNotFound(_) => StatusCode::NOT_FOUND,
        CardError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
        CardError::Font(_) | CardError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string()).into_response()
}

async fn get_card(State(state): State<Arc<AppState>>, Query(query): Query<CardQuery>) -> Response {
    let request = match query.into_request(&state) {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    match state.generator.create_image(&request).await {
        Ok(CardImage::Buffer(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(CardImage::Base64(url)) => ([(header::CONTENT_TYPE, "text/plain")], url).into_response(),
        Err(e) => {
            error!("Error rendering weather card: {}", e);
            error_response(e)
        }
    }
}

async fn serve(args: Args) -> Result<()> {
    let state = Arc::new(AppState {
        generator: CardGenerator::with_client(args.client(), args.fonts()),
        api_key: args.key.clone(),
        theme: args.theme_overrides()?,
        units: args.units,
        locale: args.locale.clone(),
    });

    let app = Router::new()
        .route("/weather.png", get(get_card))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Serving weather cards on http://{}/weather.png", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn render_once(args: Args) -> Result<()> {
    let request = args.card_request()?;
    let generator = CardGenerator::with_client(args.client(), args.fonts());

    let image = generator
        .create_image(&request)
        .await
        .with_context(|| format!("Could not create a weather card for {}", request.location.query()))?;

    match (&image, &args.out) {
        (CardImage::Base64(url), None) => println!("{url}"),
        (image, Some(path)) => {
            let bytes = match image {
                CardImage::Buffer(png) => png.clone(),
                CardImage::Base64(url) => url.clone().into_bytes(),
            };
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Weather card written to {}", path.display());
        }
        (CardImage::Buffer(_), None) => {
            anyhow::bail!("--out is required for binary output; use --format base64 to print")
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.serve {
        serve(args).await
    } else {
        render_once(args).await
    }
}
