//! Everything derived from the fetched data before drawing: day/night state,
//! colors, labels and the placement of optional precipitation lines.

use crate::layout::{CANVAS_WIDTH, LINE_HEIGHT, PRIMARY_X};
use crate::locale::LabelSet;
use crate::model::{CurrentConditions, DailyForecast, ForecastData};
use crate::theme::{select_theme, ResolvedColors, ThemeOverrides};
use crate::timefmt::ForecastZone;
use crate::units::{fall_amount, Units};

/// First row of the optional block
pub const OPTIONAL_BASE_Y: f32 = 278.0;

/// Fixed row of the last-hour snow line
pub const SNOW_LAST_HOUR_Y: f32 = 263.0;

/// Right-column lines sit this far left of the secondary anchor
const RIGHT_COLUMN_INSET: f32 = 15.0;

/// `sunrise <= current < sunset`
pub fn compute_daytime(current: i64, sunrise: i64, sunset: i64) -> bool {
    sunrise <= current && current < sunset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalKind {
    RainToday,
    RainLastHour,
    SnowToday,
    SnowLastHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    pub fn x(&self) -> f32 {
        match self {
            Column::Left => PRIMARY_X,
            Column::Right => secondary_x() - RIGHT_COLUMN_INSET,
        }
    }
}

/// Secondary anchor column of the current-conditions panel
pub fn secondary_x() -> f32 {
    CANVAS_WIDTH / 3.0 + 26.0
}

/// A conditionally drawn precipitation row
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalLine {
    pub kind: OptionalKind,
    pub label: &'static str,
    pub value: String,
    pub column: Column,
    pub x: f32,
    pub y: f32,
}

impl OptionalLine {
    fn new(kind: OptionalKind, label: &'static str, value: String, column: Column, y: f32) -> Self {
        Self {
            kind,
            label,
            value,
            column,
            x: column.x(),
            y,
        }
    }

    pub fn text(&self) -> String {
        format!("{} {}", self.label, self.value)
    }
}

/// Place the rain/snow rows present in the data.
///
/// The cursor only moves past today's rain when there is no last-hour rain
/// to share its row, and last-hour snow always lands on a fixed row.
pub fn plan_optional_lines(
    current: &CurrentConditions,
    today: Option<&DailyForecast>,
    units: Units,
    labels: &LabelSet,
) -> Vec<OptionalLine> {
    let mut lines = Vec::new();
    let mut cursor = OPTIONAL_BASE_Y;

    let rain_last_hour = current.rain_last_hour();

    if let Some(rain) = today.and_then(|day| day.rain) {
        lines.push(OptionalLine::new(
            OptionalKind::RainToday,
            labels.todays_rain,
            fall_amount(rain, units),
            Column::Left,
            cursor,
        ));
        if rain_last_hour.is_none() {
            cursor += LINE_HEIGHT;
        }
    }

    if let Some(rain) = rain_last_hour {
        lines.push(OptionalLine::new(
            OptionalKind::RainLastHour,
            labels.rain_last_hour,
            fall_amount(rain, units),
            Column::Right,
            cursor,
        ));
        cursor += LINE_HEIGHT;
    }

    if let Some(snow) = today.and_then(|day| day.snow) {
        lines.push(OptionalLine::new(
            OptionalKind::SnowToday,
            labels.todays_snow,
            fall_amount(snow, units),
            Column::Left,
            cursor,
        ));
    }

    // Known limitation: this fixed row can overlap the chance-of-rain value
    // and, with rain present, sits above the advanced cursor. Kept until the
    // card layout is redesigned.
    if let Some(snow) = current.snow_last_hour() {
        lines.push(OptionalLine::new(
            OptionalKind::SnowLastHour,
            labels.snow_last_hour,
            fall_amount(snow, units),
            Column::Right,
            SNOW_LAST_HOUR_Y,
        ));
    }

    lines
}

/// Request-scoped view model handed to the layout renderer
#[derive(Debug, Clone)]
pub struct PresentationState {
    pub is_daytime: bool,
    pub colors: ResolvedColors,
    pub units: Units,
    pub labels: &'static LabelSet,
    /// Locale tag as requested, before falling back to a label table
    pub locale: String,
    pub zone: ForecastZone,
    pub optional_lines: Vec<OptionalLine>,
}

pub fn derive_presentation(
    forecast: &ForecastData,
    units: Units,
    locale: &str,
    overrides: &ThemeOverrides,
) -> PresentationState {
    let current = &forecast.current;
    let labels = LabelSet::for_locale(locale);
    let is_daytime = compute_daytime(current.dt, current.sunrise, current.sunset);

    PresentationState {
        is_daytime,
        colors: select_theme(is_daytime, overrides),
        units,
        labels,
        locale: locale.to_string(),
        zone: ForecastZone::new(&forecast.timezone, forecast.timezone_offset),
        optional_lines: plan_optional_lines(current, forecast.today(), units, labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::EN;
    use crate::model::{Condition, HourlyVolume, TempRange};

    fn current(rain: Option<f64>, snow: Option<f64>) -> CurrentConditions {
        CurrentConditions {
            dt: 100,
            sunrise: 50,
            sunset: 200,
            temp: 3.0,
            feels_like: 1.0,
            humidity: 80.0,
            uvi: 1.0,
            wind_speed: 3.0,
            wind_deg: 200.0,
            weather: vec![Condition {
                id: 500,
                main: "Rain".to_string(),
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
            rain: rain.map(|v| HourlyVolume { last_hour: Some(v) }),
            snow: snow.map(|v| HourlyVolume { last_hour: Some(v) }),
        }
    }

    fn today(rain: Option<f64>, snow: Option<f64>) -> DailyForecast {
        DailyForecast {
            dt: 100,
            temp: TempRange { min: 0.0, max: 5.0 },
            pop: 0.5,
            weather: Vec::new(),
            rain,
            snow,
        }
    }

    fn plan(current: &CurrentConditions, day: &DailyForecast) -> Vec<(OptionalKind, Column, f32)> {
        plan_optional_lines(current, Some(day), Units::Metric, &EN)
            .into_iter()
            .map(|line| (line.kind, line.column, line.y))
            .collect()
    }

    #[test]
    fn daytime_bounds_are_half_open() {
        assert!(compute_daytime(50, 50, 200));
        assert!(compute_daytime(199, 50, 200));
        assert!(!compute_daytime(200, 50, 200));
        assert!(!compute_daytime(49, 50, 200));
    }

    #[test]
    fn no_precipitation_means_no_lines() {
        assert!(plan(&current(None, None), &today(None, None)).is_empty());
        assert!(plan_optional_lines(&current(None, None), None, Units::Metric, &EN).is_empty());
    }

    #[test]
    fn rain_today_only_advances_cursor() {
        let lines = plan(&current(None, None), &today(Some(4.0), Some(1.0)));
        assert_eq!(
            lines,
            vec![
                (OptionalKind::RainToday, Column::Left, 278.0),
                (OptionalKind::SnowToday, Column::Left, 293.0),
            ]
        );
    }

    #[test]
    fn rain_today_and_last_hour_share_a_row() {
        let lines = plan(&current(Some(1.0), None), &today(Some(4.0), Some(1.0)));
        assert_eq!(
            lines,
            vec![
                (OptionalKind::RainToday, Column::Left, 278.0),
                (OptionalKind::RainLastHour, Column::Right, 278.0),
                (OptionalKind::SnowToday, Column::Left, 293.0),
            ]
        );
    }

    #[test]
    fn last_hour_rain_alone_sits_on_base_row() {
        let lines = plan_optional_lines(
            &current(Some(2.0), None),
            Some(&today(None, None)),
            Units::Metric,
            &EN,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, OptionalKind::RainLastHour);
        assert_eq!(lines[0].y, OPTIONAL_BASE_Y);
        assert_eq!(lines[0].x, secondary_x() - 15.0);
        assert_eq!(lines[0].text(), "Rain (Last Hour): 2mm");
    }

    #[test]
    fn snow_today_does_not_advance() {
        let lines = plan(&current(None, None), &today(None, Some(2.0)));
        assert_eq!(lines, vec![(OptionalKind::SnowToday, Column::Left, 278.0)]);
    }

    #[test]
    fn snow_last_hour_uses_fixed_row() {
        let lines = plan(&current(Some(1.0), Some(0.5)), &today(None, None));
        assert_eq!(
            lines,
            vec![
                (OptionalKind::RainLastHour, Column::Right, 278.0),
                (OptionalKind::SnowLastHour, Column::Right, 263.0),
            ]
        );
    }

    #[test]
    fn imperial_volumes_are_inches() {
        let lines = plan_optional_lines(
            &current(None, None),
            Some(&today(Some(25.4), None)),
            Units::Imperial,
            &EN,
        );
        assert_eq!(lines[0].value, "1in");
    }
}
