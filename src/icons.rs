//! OpenWeather icon codes to Weather Icons font glyphs

/// Family name the icon font registers under
pub const ICON_FONT_FAMILY: &str = "Weather Icons";

/// Glyph drawn for codes missing from the table
pub const UNKNOWN_GLYPH: char = '\u{f07b}';

pub const SUNRISE_GLYPH: char = '\u{f051}';
pub const SUNSET_GLYPH: char = '\u{f052}';

static GLYPHS: &[(&str, char)] = &[
    ("01d", '\u{f00d}'),
    ("01n", '\u{f02e}'),
    ("02d", '\u{f002}'),
    ("02n", '\u{f086}'),
    ("03d", '\u{f041}'),
    ("03n", '\u{f041}'),
    ("04d", '\u{f013}'),
    ("04n", '\u{f013}'),
    ("09d", '\u{f009}'),
    ("09n", '\u{f029}'),
    ("10d", '\u{f019}'),
    ("10n", '\u{f019}'),
    ("11d", '\u{f01e}'),
    ("11n", '\u{f01e}'),
    ("13d", '\u{f01b}'),
    ("13n", '\u{f01b}'),
    ("50d", '\u{f003}'),
    ("50n", '\u{f04a}'),
];

/// Glyph for an icon code; every input has an answer.
pub fn icon_glyph(code: &str) -> char {
    GLYPHS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(_, glyph)| glyph)
        .unwrap_or(UNKNOWN_GLYPH)
}

/// Night counterpart of a day icon code (`10d` -> `10n`)
pub fn night_variant(code: &str) -> String {
    match code.strip_suffix('d') {
        Some(stem) => format!("{stem}n"),
        None => code.to_string(),
    }
}

/// Code to draw for the current conditions given the day/night state
pub fn current_icon_code(code: &str, is_daytime: bool) -> String {
    if is_daytime {
        code.to_string()
    } else {
        night_variant(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_variants_share_a_glyph() {
        assert_eq!(icon_glyph("03d"), icon_glyph("03n"));
        assert_eq!(icon_glyph("04d"), icon_glyph("04n"));
        assert_ne!(icon_glyph("01d"), icon_glyph("01n"));
    }

    #[test]
    fn unknown_codes_use_fallback() {
        assert_eq!(icon_glyph("99x"), UNKNOWN_GLYPH);
        assert_eq!(icon_glyph(""), UNKNOWN_GLYPH);
    }

    #[test]
    fn night_swaps_day_suffix() {
        assert_eq!(current_icon_code("01d", false), "01n");
        assert_eq!(current_icon_code("01d", true), "01d");
        assert_eq!(night_variant("50n"), "50n");
        assert_eq!(icon_glyph(&night_variant("09d")), '\u{f029}');
    }
}
