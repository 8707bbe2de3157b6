//! Turns a presentation model into draw operations at fixed coordinates.

use crate::icons::{
    current_icon_code, icon_glyph, SUNRISE_GLYPH, SUNSET_GLYPH, UNKNOWN_GLYPH,
};
use crate::model::{DailyForecast, ForecastData, GeocodeResult};
use crate::presentation::{secondary_x, PresentationState};
use crate::units::{compass_direction, temperature, uv_severity, wind_speed};

pub const CANVAS_WIDTH: f32 = 520.0;
pub const PANEL_HEIGHT: f32 = 320.0;
pub const FORECAST_HEIGHT: f32 = 140.0;
pub const FORECAST_DAYS: usize = 4;

pub const PRIMARY_X: f32 = 22.0;
pub const LINE_HEIGHT: f32 = 15.0;

pub const TITLE_FONT_SIZE: f32 = 32.0;
const FONT_STEP: f32 = 2.0;

const TITLE_Y: f32 = 62.0;
const DATE_Y: f32 = 88.0;
const TOP_DIVIDER_Y: f32 = 100.0;
const TEMPERATURE_Y: f32 = 145.0;
const MIN_MAX_Y: f32 = 167.5;
const DESCRIPTION_Y: f32 = 191.0;
const BOTTOM_DIVIDER_Y: f32 = 200.0;
const DETAIL_ROWS_Y: [f32; 4] = [218.0, 233.0, 248.0, 263.0];
const SUNRISE_Y: f32 = 221.0;
const SUNSET_Y: f32 = 251.0;

const BOX_TOP_PADDING: f32 = 15.0;
const BOX_SIDE_PADDING: f32 = 12.0;

/// Pixel size of the output image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

pub fn canvas_size(with_forecast: bool) -> CanvasSize {
    let height = if with_forecast {
        PANEL_HEIGHT + FORECAST_HEIGHT
    } else {
        PANEL_HEIGHT
    };

    CanvasSize {
        width: CANVAS_WIDTH as u32,
        height: height as u32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Text,
    Icons,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn text(size: f32) -> Self {
        Self {
            family: FontFamily::Text,
            size,
            bold: false,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            bold: true,
            ..Self::text(size)
        }
    }

    pub fn icons(size: f32) -> Self {
        Self {
            family: FontFamily::Icons,
            size,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
}

/// One primitive for the drawing surface; `y` of text is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: String,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        color: String,
        align: Align,
    },
}

/// A 2D canvas able to measure and draw text at given coordinates.
pub trait Surface {
    /// Width of the inked bounds of `text` in `font`. Side bearings are not
    /// included, so this can be slightly narrower than the advance width.
    fn measure_text(&self, text: &str, font: &Font) -> f32;

    fn draw(&mut self, op: DrawOp);
}

/// Largest size from `base` down, in 2px steps, whose measured width fits
/// `max_width`. Never goes below one step.
pub fn fit_font_size(measure: impl Fn(f32) -> f32, max_width: f32, base: f32) -> f32 {
    let mut size = base;
    while size > FONT_STEP && measure(size) > max_width {
        size -= FONT_STEP;
    }
    size
}

fn aligned_text(
    x: f32,
    y: f32,
    text: impl Into<String>,
    font: Font,
    color: &str,
    align: Align,
) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        text: text.into(),
        font,
        color: color.to_string(),
        align,
    }
}

fn text_op(x: f32, y: f32, text: impl Into<String>, font: Font, color: &str) -> DrawOp {
    aligned_text(x, y, text, font, color, Align::Start)
}

fn centered(x: f32, y: f32, text: impl Into<String>, font: Font, color: &str) -> DrawOp {
    aligned_text(x, y, text, font, color, Align::Center)
}

fn capitalise_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Draw the whole card onto `surface`.
pub fn render<S: Surface>(
    surface: &mut S,
    geocode: &GeocodeResult,
    state: &PresentationState,
    forecast: &ForecastData,
    with_forecast: bool,
) {
    draw_current_panel(surface, geocode, state, forecast);
    if with_forecast {
        draw_forecast_strip(surface, state, forecast);
    }
}

fn draw_current_panel<S: Surface>(
    surface: &mut S,
    geocode: &GeocodeResult,
    state: &PresentationState,
    forecast: &ForecastData,
) {
    let colors = &state.colors.panel;
    let labels = state.labels;
    let units = state.units;
    let current = &forecast.current;
    let left_width = CANVAS_WIDTH * 2.0 / 3.0;
    let value_x = secondary_x();

    surface.draw(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width: left_width + 1.0,
        height: PANEL_HEIGHT,
        color: colors.left.clone(),
    });
    surface.draw(DrawOp::FillRect {
        x: left_width,
        y: 0.0,
        width: CANVAS_WIDTH - left_width,
        height: PANEL_HEIGHT,
        color: colors.right.clone(),
    });

    let title = geocode.title(&state.locale);
    let title_size = fit_font_size(
        |size| surface.measure_text(&title, &Font::bold(size)),
        left_width - PRIMARY_X,
        TITLE_FONT_SIZE,
    );
    surface.draw(text_op(PRIMARY_X, TITLE_Y, title, Font::bold(title_size), &colors.text));

    let stamp = format!(
        "{} | {}",
        state.zone.date(current.dt, labels),
        state.zone.time(current.dt, labels)
    );
    surface.draw(text_op(PRIMARY_X, DATE_Y, stamp, Font::text(16.0), &colors.text));

    draw_divider(surface, TOP_DIVIDER_Y, left_width, &colors.text);

    let temp = temperature(current.temp, units);
    let temp_font = Font::bold(45.0);
    let temp_width = surface.measure_text(&temp, &temp_font);
    surface.draw(text_op(PRIMARY_X, TEMPERATURE_Y, temp, temp_font, &colors.text));
    surface.draw(text_op(
        PRIMARY_X + temp_width + 10.0,
        TEMPERATURE_Y,
        format!("{} {}", labels.feels_like, temperature(current.feels_like, units)),
        Font::text(14.0),
        &colors.text,
    ));

    if let Some(today) = forecast.today() {
        surface.draw(text_op(
            PRIMARY_X,
            MIN_MAX_Y,
            format!(
                "{} / {}",
                temperature(today.temp.min, units),
                temperature(today.temp.max, units)
            ),
            Font::text(14.0),
            &colors.text,
        ));
    }

    let glyph = current
        .condition()
        .map(|c| icon_glyph(&current_icon_code(&c.icon, state.is_daytime)))
        .unwrap_or(UNKNOWN_GLYPH);
    surface.draw(text_op(
        PRIMARY_X,
        DESCRIPTION_Y,
        glyph,
        Font::icons(18.0),
        &colors.symbol,
    ));
    if let Some(condition) = current.condition() {
        surface.draw(text_op(
            PRIMARY_X + 28.0,
            DESCRIPTION_Y,
            capitalise_first(&condition.description),
            Font::text(16.0),
            &colors.text,
        ));
    }

    draw_divider(surface, BOTTOM_DIVIDER_Y, left_width, &colors.text);

    let wind = format!(
        "{} {}",
        wind_speed(current.wind_speed, units),
        compass_direction(current.wind_deg, labels).unwrap_or(labels.error)
    );
    let uv = format!(
        "{} ({})",
        uv_severity(current.uvi, labels).unwrap_or(labels.error),
        current.uvi
    );
    let pop = forecast
        .today()
        .map(|today| format!("{}%", (today.pop * 100.0).round()))
        .unwrap_or_else(|| labels.error.to_string());
    let rows = [
        (labels.wind, wind),
        (labels.humidity, format!("{}%", current.humidity)),
        (labels.uv_index, uv),
        (labels.chance_of_rain, pop),
    ];
    for ((label, value), y) in rows.into_iter().zip(DETAIL_ROWS_Y) {
        surface.draw(text_op(PRIMARY_X, y, label, Font::text(13.0), &colors.text));
        surface.draw(text_op(value_x, y, value, Font::text(13.0), &colors.text));
    }

    for line in &state.optional_lines {
        surface.draw(text_op(line.x, line.y, line.text(), Font::text(13.0), &colors.text));
    }

    // Right block: large condition glyph, then sunrise and sunset
    let right_center = left_width + (CANVAS_WIDTH - left_width) / 2.0;
    surface.draw(centered(right_center, 150.0, glyph, Font::icons(80.0), &colors.symbol));

    let right_x = left_width + 20.0;
    for (icon, label, timestamp, y) in [
        (SUNRISE_GLYPH, labels.sunrise, current.sunrise, SUNRISE_Y),
        (SUNSET_GLYPH, labels.sunset, current.sunset, SUNSET_Y),
    ] {
        surface.draw(text_op(right_x, y, icon, Font::icons(20.0), &colors.symbol));
        surface.draw(text_op(right_x + 32.0, y - 8.0, label, Font::text(11.0), &colors.text));
        surface.draw(text_op(
            right_x + 32.0,
            y + 8.0,
            state.zone.time(timestamp, labels),
            Font::bold(14.0),
            &colors.text,
        ));
    }
}

fn draw_divider<S: Surface>(surface: &mut S, y: f32, left_width: f32, color: &str) {
    surface.draw(DrawOp::Line {
        x1: PRIMARY_X - 7.0,
        y1: y,
        x2: left_width - 42.0,
        y2: y,
        width: 3.0,
        color: color.to_string(),
    });
}

fn draw_forecast_strip<S: Surface>(surface: &mut S, state: &PresentationState, forecast: &ForecastData) {
    let colors = &state.colors.forecast;
    let box_width = CANVAS_WIDTH / FORECAST_DAYS as f32;

    surface.draw(DrawOp::FillRect {
        x: 0.0,
        y: PANEL_HEIGHT,
        width: CANVAS_WIDTH,
        height: FORECAST_HEIGHT,
        color: colors.background.clone(),
    });

    for (idx, day) in forecast.upcoming().enumerate() {
        let left = idx as f32 * box_width;

        if idx > 0 {
            surface.draw(DrawOp::Line {
                x1: left,
                y1: PANEL_HEIGHT + BOX_TOP_PADDING,
                x2: left,
                y2: PANEL_HEIGHT + FORECAST_HEIGHT - BOX_TOP_PADDING,
                width: 1.0,
                color: colors.divider.clone(),
            });
        }

        draw_forecast_box(surface, state, day, left, box_width);
    }
}

fn draw_forecast_box<S: Surface>(
    surface: &mut S,
    state: &PresentationState,
    day: &DailyForecast,
    left: f32,
    box_width: f32,
) {
    let colors = &state.colors.forecast;
    let labels = state.labels;
    let top = PANEL_HEIGHT + BOX_TOP_PADDING;
    let inner_width = box_width - 2.0 * BOX_SIDE_PADDING;
    let center = left + box_width / 2.0;

    surface.draw(DrawOp::FillRect {
        x: left + BOX_SIDE_PADDING / 2.0,
        y: top - 5.0,
        width: box_width - BOX_SIDE_PADDING,
        height: FORECAST_HEIGHT - 2.0 * BOX_TOP_PADDING + 10.0,
        color: colors.panel.clone(),
    });

    surface.draw(centered(
        center,
        top + 14.0,
        state.zone.day(day.dt, labels),
        Font::bold(14.0),
        &colors.text,
    ));

    let glyph = day
        .condition()
        .map(|c| icon_glyph(&c.icon))
        .unwrap_or(UNKNOWN_GLYPH);
    surface.draw(centered(center, top + 56.0, glyph, Font::icons(32.0), &colors.symbol));

    if let Some(condition) = day.condition() {
        let description = capitalise_first(&condition.description);
        let size = fit_font_size(
            |size| surface.measure_text(&description, &Font::text(size)),
            inner_width,
            12.0,
        );
        surface.draw(centered(center, top + 80.0, description, Font::text(size), &colors.text));
    }

    surface.draw(centered(
        center,
        top + 100.0,
        format!(
            "{} / {}",
            temperature(day.temp.min, state.units),
            temperature(day.temp.max, state.units)
        ),
        Font::text(13.0),
        &colors.text,
    ));
}
