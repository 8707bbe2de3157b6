use thiserror::Error;

/// Everything that can stop a weather card from being produced.
#[derive(Error, Debug)]
pub enum CardError {
    /// Bad caller input, detected before any network call
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The geocoder returned no match for the query
    #[error("could not find the location `{0}`")]
    LocationNotFound(String),

    /// Transport, status or payload failure from the weather provider
    #[error("weather data unavailable: {0}")]
    DataUnavailable(String),

    /// A helper received a value outside its documented domain
    #[error("invalid {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("font error: {0}")]
    Font(String),

    #[error("render error: {0}")]
    Render(String),
}

impl CardError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable(message.into())
    }

    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render(message.into())
    }
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
