//! SVG-backed drawing surface
//!
//! Draw operations are collected as SVG markup, which usvg parses with the
//! configured font database and resvg rasterizes onto a tiny-skia pixmap.

use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{CardError, Result};
use crate::icons::ICON_FONT_FAMILY;
use crate::layout::{Align, CanvasSize, DrawOp, Font, FontFamily, Surface};

/// Font sources for rendering
#[derive(Debug, Clone)]
pub struct FontSettings {
    /// CSS font-family list for ordinary text
    pub text_family: String,
    /// Weather Icons TTF registered before any glyph is drawn
    pub icon_font: Option<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            text_family: "Arial, 'DejaVu Sans', sans-serif".to_string(),
            icon_font: None,
            load_system_fonts: true,
        }
    }
}

pub struct SvgSurface {
    size: CanvasSize,
    text_family: String,
    icon_family: String,
    options: usvg::Options<'static>,
    body: String,
}

impl SvgSurface {
    pub fn new(size: CanvasSize, fonts: &FontSettings) -> Result<Self> {
        let mut options = usvg::Options::default();
        let db = options.fontdb_mut();

        if fonts.load_system_fonts {
            db.load_system_fonts();
            db.set_sans_serif_family("DejaVu Sans");
            db.set_serif_family("DejaVu Serif");
            db.set_monospace_family("DejaVu Sans Mono");
        }

        let mut icon_family = ICON_FONT_FAMILY.to_string();
        if let Some(path) = &fonts.icon_font {
            let data = std::fs::read(path).map_err(|e| {
                CardError::Font(format!("cannot read icon font {}: {e}", path.display()))
            })?;

            let before = db.len();
            db.load_font_data(data);
            let family = db
                .faces()
                .nth(before)
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone())
                .ok_or_else(|| {
                    CardError::Font(format!("{} contains no font face", path.display()))
                })?;

            debug!("Registered icon font {} as {}", path.display(), family);
            icon_family = family;
        }

        debug!("Font database holds {} faces", options.fontdb.len());

        Ok(Self {
            size,
            text_family: fonts.text_family.clone(),
            icon_family,
            options,
            body: String::new(),
        })
    }

    fn font_attributes(&self, font: &Font) -> String {
        let family = match font.family {
            FontFamily::Text => escape(&self.text_family),
            FontFamily::Icons => format!("'{}'", escape(&self.icon_family)),
        };
        let weight = if font.bold { r#" font-weight="bold""# } else { "" };
        format!(r#"font-family="{}" font-size="{}"{}"#, family, font.size, weight)
    }

    /// Complete SVG document for everything drawn so far
    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
{body}</svg>"#,
            w = self.size.width,
            h = self.size.height,
            body = self.body
        )
    }

    /// Rasterize the drawing and encode it as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let tree = usvg::Tree::from_str(&self.to_svg(), &self.options)
            .map_err(|e| CardError::render(format!("failed to parse SVG: {e}")))?;

        let mut pixmap = tiny_skia::Pixmap::new(self.size.width, self.size.height)
            .ok_or_else(|| CardError::render("failed to create pixmap"))?;

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| CardError::render(format!("failed to encode PNG: {e}")))
    }
}

impl Surface for SvgSurface {
    fn measure_text(&self, text: &str, font: &Font) -> f32 {
        let sample = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="4000" height="400"><text x="0" y="200" {}>{}</text></svg>"#,
            self.font_attributes(font),
            escape(text)
        );

        match usvg::Tree::from_str(&sample, &self.options) {
            Ok(tree) if tree.root().has_children() => tree.root().abs_bounding_box().width(),
            Ok(_) => 0.0,
            Err(e) => {
                warn!("Could not measure text {:?}: {}", text, e);
                0.0
            }
        }
    }

    fn draw(&mut self, op: DrawOp) {
        let element = match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => format!(
                r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
                escape(&color)
            ),
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => format!(
                r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{width}"/>"#,
                escape(&color)
            ),
            DrawOp::Text {
                x,
                y,
                text,
                font,
                color,
                align,
            } => {
                let anchor = match align {
                    Align::Start => "start",
                    Align::Center => "middle",
                };
                format!(
                    r#"  <text x="{x}" y="{y}" text-anchor="{anchor}" {} fill="{}">{}</text>"#,
                    self.font_attributes(&font),
                    escape(&color),
                    escape(&text)
                )
            }
        };

        let _ = writeln!(self.body, "{element}");
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas_size;

    fn fontless() -> FontSettings {
        FontSettings {
            load_system_fonts: false,
            ..Default::default()
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"Rock & "Roll" <3"#), "Rock &amp; &quot;Roll&quot; &lt;3");
    }

    #[test]
    fn draw_ops_become_svg_elements() {
        let mut surface = SvgSurface::new(canvas_size(false), &fontless()).unwrap();
        surface.draw(DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 5.5,
            color: "#FFD982".to_string(),
        });
        surface.draw(DrawOp::Text {
            x: 22.0,
            y: 62.0,
            text: "Köln, DE".to_string(),
            font: Font::icons(20.0),
            color: "black".to_string(),
            align: Align::Center,
        });

        let svg = surface.to_svg();
        assert!(svg.contains(r#"width="520" height="320""#));
        assert!(svg.contains(r##"<rect x="0" y="0" width="10" height="5.5" fill="#FFD982"/>"##));
        assert!(svg.contains("font-family=\"'Weather Icons'\""));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(">Köln, DE</text>"));
    }

    #[test]
    fn png_has_canvas_dimensions() {
        let surface = SvgSurface::new(canvas_size(true), &fontless()).unwrap();
        let png = surface.to_png().unwrap();

        assert_eq!(&png[1..4], b"PNG");
        let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
        assert_eq!((width, height), (520, 460));
    }

    #[test]
    fn missing_icon_font_is_a_font_error() {
        let settings = FontSettings {
            icon_font: Some(PathBuf::from("/nonexistent/weathericons.ttf")),
            ..fontless()
        };
        assert!(matches!(
            SvgSurface::new(canvas_size(false), &settings),
            Err(CardError::Font(_))
        ));
    }

    #[test]
    fn measuring_without_fonts_is_zero() {
        let surface = SvgSurface::new(canvas_size(false), &fontless()).unwrap();
        assert_eq!(surface.measure_text("Sydney, AU", &Font::text(32.0)), 0.0);
    }
}
