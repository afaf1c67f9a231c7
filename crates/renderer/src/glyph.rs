//! Arrow glyph assembly.

use arrows_common::{ArrowStyle, Color};
use std::fmt::Write;

use crate::arrow::{ArrowShape, Point};
use crate::error::{RenderError, RenderResult};
use crate::gradient::wind_speed_color;

/// A rendered wind arrow: rotated outline, fill color and speed label.
///
/// Glyphs are plain values computed from `(angle, speed)`; rendering the
/// same inputs twice yields equal glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGlyph {
    /// Direction the wind comes from, degrees clockwise from north
    pub angle: f64,
    /// Canonical speed in km/h
    pub speed_kmh: f64,
    /// Text drawn over the glyph, the raw speed in its original unit
    pub label: String,
    pub shape: ArrowShape,
    /// Outline in logical pixels, already rotated
    pub polygon: [Point; 7],
    pub fill: Color,
}

impl ArrowGlyph {
    /// Tooltip text for the glyph, e.g. `275°`.
    pub fn title(&self) -> String {
        format!("{}°", self.angle)
    }
}

/// Renders arrow glyphs with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct ArrowRenderer {
    style: ArrowStyle,
}

impl ArrowRenderer {
    /// A renderer for `style`, which must pass [`ArrowStyle::validate`].
    ///
    /// Styles loaded from JSON are validated on load; styles built in code
    /// are checked here so a malformed color cannot render as black.
    pub fn new(style: ArrowStyle) -> RenderResult<Self> {
        style.validate().map_err(RenderError::Style)?;
        Ok(Self { style })
    }

    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }

    /// Center of the arrow box the glyph rotates about.
    pub fn arrow_center(&self) -> Point {
        let half = self.style.arrow_box / 2.0;
        Point::new(half, half)
    }

    /// Build the glyph for a wind angle (degrees) and speed (km/h).
    pub fn render(&self, angle: f64, speed_kmh: f64, label: &str) -> ArrowGlyph {
        let shape = ArrowShape::for_speed(speed_kmh, &self.style);
        let polygon = shape.rotated_polygon(self.arrow_center(), angle);

        ArrowGlyph {
            angle,
            speed_kmh,
            label: label.to_string(),
            shape,
            polygon,
            fill: wind_speed_color(speed_kmh, &self.style),
        }
    }

    /// Standalone SVG document for a glyph at logical size.
    pub fn to_svg(&self, glyph: &ArrowGlyph) -> String {
        let style = &self.style;
        let mut points = String::new();
        for (i, p) in glyph.polygon.iter().enumerate() {
            if i > 0 {
                points.push(' ');
            }
            let _ = write!(points, "{:.3},{:.3}", p.x, p.y);
        }

        let mut svg = String::with_capacity(640);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = style.canvas_width,
            h = style.canvas_height,
        );
        let _ = write!(svg, "<title>{}</title>", escape_xml(&glyph.title()));
        let _ = write!(
            svg,
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            points,
            glyph.fill.to_css(),
            style.outline_color.to_css(),
            style.outline_width,
        );
        // The outline stroke is painted first so the fill stays readable.
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round" paint-order="stroke">{}</text>"#,
            style.label_x,
            style.label_y,
            escape_xml(&style.font_family),
            style.font_size,
            style.label_color.to_css(),
            style.label_outline_color.to_css(),
            style.label_outline_width,
            escape_xml(&glyph.label),
        );
        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn test_title_uses_degree_mark() {
        let glyph = ArrowRenderer::default().render(275.0, 33.0, "33");
        assert_eq!(glyph.title(), "275°");
    }
}
