use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// How the finished PNG is handed back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Buffer,
    Base64,
}

impl FromStr for OutputFormat {
    type Err = CardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "buffer" | "png" => Ok(OutputFormat::Buffer),
            "base64" => Ok(OutputFormat::Base64),
            _ => Err(CardError::configuration(format!(
                "unknown output format `{value}`, expected buffer or base64"
            ))),
        }
    }
}

/// A rendered card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    /// `data:image/png;base64,...`
    Base64(String),
    /// Raw PNG bytes
    Buffer(Vec<u8>),
}

impl CardImage {
    pub fn encode(png: Vec<u8>, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Buffer => CardImage::Buffer(png),
            OutputFormat::Base64 => CardImage::Base64(format!(
                "{PNG_DATA_URL_PREFIX}{}",
                general_purpose::STANDARD.encode(&png)
            )),
        }
    }

    /// Raw PNG bytes, decoding the data URL if needed
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        match self {
            CardImage::Buffer(bytes) => Ok(bytes.clone()),
            CardImage::Base64(url) => {
                let encoded = url
                    .strip_prefix(PNG_DATA_URL_PREFIX)
                    .ok_or_else(|| CardError::render("not a PNG data URL"))?;
                general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| CardError::render(format!("invalid base64 image: {e}")))
            }
        }
    }
}
