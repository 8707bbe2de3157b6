//! Card color scheme: caller overrides merged over built-in defaults.
//!
//! Colors are any value SVG accepts as a paint (`#RRGGBB`, named colors).

use serde::{Deserialize, Serialize};

/// Partial theme supplied by the caller; unset slots keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverrides {
    pub day_left: Option<String>,
    pub day_right: Option<String>,
    pub day_text: Option<String>,
    pub day_symbol: Option<String>,
    pub night_left: Option<String>,
    pub night_right: Option<String>,
    pub night_text: Option<String>,
    pub night_symbol: Option<String>,
    pub forecast_background: Option<String>,
    pub forecast_box: Option<String>,
    pub forecast_text: Option<String>,
    pub forecast_symbol: Option<String>,
    pub forecast_divider: Option<String>,
}

/// Fully populated theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub day: PanelColors,
    pub night: PanelColors,
    pub forecast: ForecastColors,
}

/// Colors of the current-conditions panel for one half of the day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelColors {
    pub left: String,
    pub right: String,
    pub text: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastColors {
    pub background: String,
    pub panel: String,
    pub text: String,
    pub symbol: String,
    pub divider: String,
}

/// Colors picked for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColors {
    pub panel: PanelColors,
    pub forecast: ForecastColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            day: PanelColors {
                left: "#FFD982".to_string(),
                right: "#5ECEF6".to_string(),
                text: "black".to_string(),
                symbol: "black".to_string(),
            },
            night: PanelColors {
                left: "#25395C".to_string(),
                right: "#1C2A4F".to_string(),
                text: "white".to_string(),
                symbol: "white".to_string(),
            },
            forecast: ForecastColors {
                background: "#DDDDDD".to_string(),
                panel: "#EEEEEE".to_string(),
                text: "black".to_string(),
                symbol: "black".to_string(),
                divider: "black".to_string(),
            },
        }
    }
}

fn apply(slot: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

impl Theme {
    pub fn with_overrides(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        apply(&mut theme.day.left, &overrides.day_left);
        apply(&mut theme.day.right, &overrides.day_right);
        apply(&mut theme.day.text, &overrides.day_text);
        apply(&mut theme.day.symbol, &overrides.day_symbol);
        apply(&mut theme.night.left, &overrides.night_left);
        apply(&mut theme.night.right, &overrides.night_right);
        apply(&mut theme.night.text, &overrides.night_text);
        apply(&mut theme.night.symbol, &overrides.night_symbol);
        apply(&mut theme.forecast.background, &overrides.forecast_background);
        apply(&mut theme.forecast.panel, &overrides.forecast_box);
        apply(&mut theme.forecast.text, &overrides.forecast_text);
        apply(&mut theme.forecast.symbol, &overrides.forecast_symbol);
        apply(&mut theme.forecast.divider, &overrides.forecast_divider);

        theme
    }
}

/// Merge `overrides` over the defaults and pick the day or night panel.
pub fn select_theme(is_daytime: bool, overrides: &ThemeOverrides) -> ResolvedColors {
    let Theme { day, night, forecast } = Theme::with_overrides(overrides);

    ResolvedColors {
        panel: if is_daytime { day } else { night },
        forecast,
    }
}
