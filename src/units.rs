//! Unit systems, conversions and the bucketed helpers used for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};
use crate::locale::LabelSet;

/// Countries whose default unit system is imperial
const IMPERIAL_COUNTRIES: [&str; 3] = ["US", "LR", "MM"];

const MM_PER_INCH: f64 = 25.4;
const KPH_PER_MPS: f64 = 3.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Value for the provider's `units` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn is_imperial(&self) -> bool {
        matches!(self, Units::Imperial)
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = CardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(CardError::configuration(format!(
                "unknown unit system `{value}`, expected metric or imperial"
            ))),
        }
    }
}

/// Default unit system for an ISO country code
pub fn units_for_country(country: &str) -> Units {
    if IMPERIAL_COUNTRIES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(country))
    {
        Units::Imperial
    } else {
        Units::Metric
    }
}

/// Caller's choice wins; otherwise the country decides.
pub fn resolve_units(requested: Option<Units>, country: &str) -> Units {
    requested.unwrap_or_else(|| units_for_country(country))
}

pub fn round_to_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn convert_to_kph(metres_per_second: f64) -> f64 {
    metres_per_second * KPH_PER_MPS
}

fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Precipitation volume (provider always reports millimetres)
pub fn fall_amount(volume_mm: f64, units: Units) -> String {
    if units.is_imperial() {
        format!("{}in", round_to_2(mm_to_inches(volume_mm)))
    } else {
        format!("{volume_mm}mm")
    }
}

/// Wind speed as reported for `units`: mph for imperial, m/s for metric.
pub fn wind_speed(speed: f64, units: Units) -> String {
    let value = if units.is_imperial() {
        round_to_2(speed)
    } else {
        round_to_2(convert_to_kph(speed))
    };
    format!("{value} {}", units.speed_suffix())
}

pub fn temperature(value: f64, units: Units) -> String {
    // `+ 0.0` turns a rounded -0 into 0
    format!("{}{}", value.round() + 0.0, units.temperature_suffix())
}

/// Compass point for a wind azimuth. N covers [337.5, 360] and [0, 22.5).
pub fn compass_direction(degrees: f64, labels: &LabelSet) -> Result<&'static str> {
    if !(0.0..=360.0).contains(&degrees) {
        return Err(CardError::InvalidInput {
            field: "wind direction",
            value: degrees,
        });
    }

    let bucket = ((degrees + 22.5) / 45.0).floor() as usize % labels.directions.len();
    Ok(labels.directions[bucket])
}

/// Severity bucket for a UV index; zero or negative is rejected.
pub fn uv_severity(index: f64, labels: &LabelSet) -> Result<&'static str> {
    let bucket = if index.is_nan() || index <= 0.0 {
        return Err(CardError::InvalidInput {
            field: "UV index",
            value: index,
        });
    } else if index <= 2.5 {
        0
    } else if index <= 5.5 {
        1
    } else if index <= 7.5 {
        2
    } else if index <= 10.5 {
        3
    } else {
        4
    };

    Ok(labels.uv_severities[bucket])
}
