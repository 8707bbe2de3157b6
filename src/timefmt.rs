//! Epoch timestamps rendered in the forecast's own timezone.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::locale::LabelSet;

/// Timezone of a forecast: IANA name when known, otherwise the numeric offset
#[derive(Debug, Clone, Copy)]
pub enum ForecastZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl ForecastZone {
    pub fn new(timezone: &str, offset_seconds: i32) -> Self {
        match timezone.parse::<Tz>() {
            Ok(tz) => ForecastZone::Named(tz),
            Err(_) => ForecastZone::Fixed(
                FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| Utc.fix()),
            ),
        }
    }

    pub fn format(&self, timestamp: i64, pattern: &str, labels: &LabelSet) -> String {
        let utc = DateTime::from_timestamp(timestamp, 0).unwrap_or_default();
        match self {
            ForecastZone::Named(tz) => localized(utc.with_timezone(tz), pattern, labels),
            ForecastZone::Fixed(offset) => localized(utc.with_timezone(offset), pattern, labels),
        }
    }

    /// Header date, e.g. `Wed 22 August`
    pub fn date(&self, timestamp: i64, labels: &LabelSet) -> String {
        self.format(timestamp, labels.date_format, labels)
    }

    pub fn time(&self, timestamp: i64, labels: &LabelSet) -> String {
        self.format(timestamp, labels.time_format, labels)
    }

    /// Short day used in forecast boxes
    pub fn day(&self, timestamp: i64, labels: &LabelSet) -> String {
        self.format(timestamp, labels.day_format, labels)
    }
}

fn localized<T>(when: DateTime<T>, pattern: &str, labels: &LabelSet) -> String
where
    T: TimeZone,
    T::Offset: Display,
{
    when.format_localized(pattern, labels.chrono_locale).to_string()
}
