//! Style configuration for arrow glyph rendering.
//!
//! All rendering constants live in [`ArrowStyle`]. The built-in defaults
//! reproduce the Meteo-Parapente look; a JSON file can override any of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ArrowsError, ArrowsResult};
use crate::range::RangeMapper;

/// Color representation supporting multiple formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hex string: "#RRGGBB" or "#RRGGBBAA"
    Hex(String),

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 255 }
    }

    pub fn hex(s: &str) -> Self {
        Color::Hex(s.to_string())
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(&self) -> (u8, u8, u8, u8) {
        match self {
            Color::Hex(s) => parse_hex_color(s).unwrap_or((0, 0, 0, 255)),
            Color::Array(arr) => {
                let r = arr.first().copied().unwrap_or(0);
                let g = arr.get(1).copied().unwrap_or(0);
                let b = arr.get(2).copied().unwrap_or(0);
                let a = arr.get(3).copied().unwrap_or(255);
                (r, g, b, a)
            }
            Color::Rgba { r, g, b, a } => (*r, *g, *b, *a),
        }
    }

    /// CSS/SVG color string, `#rrggbb` for opaque colors.
    pub fn to_css(&self) -> String {
        let (r, g, b, a) = self.to_rgba();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({},{},{},{:.3})", r, g, b, a as f64 / 255.0)
        }
    }

    /// Linear interpolation between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let (r1, g1, b1, a1) = self.to_rgba();
        let (r2, g2, b2, a2) = other.to_rgba();

        let t = t.clamp(0.0, 1.0);

        let lerp_u8 =
            |a: u8, b: u8, t: f64| -> u8 { ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8 };

        Color::Rgba {
            r: lerp_u8(r1, r2, t),
            g: lerp_u8(g1, g2, t),
            b: lerp_u8(b1, b2, t),
            a: lerp_u8(a1, a2, t),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Color::Hex(s) => parse_hex_color(s)
                .map(|_| ())
                .ok_or_else(|| format!("'{}' is not a #RRGGBB or #RRGGBBAA color", s)),
            Color::Array(arr) if arr.len() != 3 && arr.len() != 4 => {
                Err(format!("color array needs 3 or 4 components, got {}", arr.len()))
            }
            _ => Ok(()),
        }
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();

    match s.len() {
        6 => Some((channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some((channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

/// A color stop at a percent position (0-100) of the gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Ordered color stops with linear interpolation between neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRamp {
    pub stops: Vec<ColorStop>,
}

impl ColorRamp {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.stops.len() < 2 {
            return Err("Gradient must have at least 2 color stops".to_string());
        }

        for i in 1..self.stops.len() {
            if self.stops[i].position <= self.stops[i - 1].position {
                return Err("Color stops must be in ascending position order".to_string());
            }
        }

        for stop in &self.stops {
            stop.color.validate()?;
        }

        Ok(())
    }

    /// Color at a percent position, clamped to the outermost stops.
    pub fn color_at(&self, position: f64) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::rgb(0, 0, 0),
        };

        if position.is_nan() || position <= first.position {
            return first.color.clone();
        }
        if position >= last.position {
            return last.color.clone();
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if position <= high.position {
                let t = (position - low.position) / (high.position - low.position);
                return low.color.lerp(&high.color, t);
            }
        }

        last.color.clone()
    }
}

/// Speed-driven size curve for one arrow dimension, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeCurve {
    /// Size at calm wind
    pub min: f64,
    /// Size at and above `full_at_kmh`
    pub max: f64,
    /// Power-curve exponent applied to the normalized speed
    pub exponent: f64,
    /// Speed (km/h) at which the size saturates
    pub full_at_kmh: f64,
}

impl SizeCurve {
    pub fn mapper(&self) -> RangeMapper {
        RangeMapper::linear(0.0, self.full_at_kmh, self.min, self.max)
            .with_exponent(self.exponent)
            .clamped()
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.min < 0.0 || self.max < self.min {
            return Err(format!("{}: need 0 <= min <= max", name));
        }
        if self.exponent <= 0.0 {
            return Err(format!("{}: exponent must be positive", name));
        }
        if self.full_at_kmh <= 0.0 {
            return Err(format!("{}: full_at_kmh must be positive", name));
        }
        Ok(())
    }
}

/// Every constant that shapes and colors an arrow glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Output canvas width in logical pixels
    pub canvas_width: f64,
    /// Output canvas height in logical pixels
    pub canvas_height: f64,
    /// Square box the arrow is rotated in, anchored at the canvas origin
    pub arrow_box: f64,

    pub color_stops: ColorRamp,
    /// Speeds at or above this render in the last color stop
    pub color_max_kmh: f64,
    pub color_exponent: f64,

    pub length: SizeCurve,
    pub tail_width: SizeCurve,
    pub head_width: SizeCurve,
    /// Head length as a multiple of head width
    pub head_length_ratio: f64,
    /// Upper bound for head length as a fraction of arrow length
    pub head_length_max_fraction: f64,

    pub outline_color: Color,
    pub outline_width: f64,

    pub label_x: f64,
    pub label_y: f64,
    pub font_size: f64,
    pub font_family: String,
    pub label_color: Color,
    pub label_outline_color: Color,
    pub label_outline_width: f64,

    /// Background for cells whose wind layer is below the usable height
    pub highlight_color: Color,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            canvas_width: 37.0,
            canvas_height: 20.0,
            arrow_box: 20.0,
            color_stops: ColorRamp::new(vec![
                ColorStop::new(0.0, Color::hex("#00E5FF")),
                ColorStop::new(25.0, Color::hex("#00C800")),
                ColorStop::new(50.0, Color::hex("#FFF000")),
                ColorStop::new(75.0, Color::hex("#FF2000")),
                ColorStop::new(100.0, Color::hex("#50005A")),
            ]),
            color_max_kmh: 50.0,
            color_exponent: 0.8,
            length: SizeCurve {
                min: 10.0,
                max: 20.0,
                exponent: 0.6,
                full_at_kmh: 50.0,
            },
            tail_width: SizeCurve {
                min: 1.5,
                max: 5.0,
                exponent: 1.0,
                full_at_kmh: 50.0,
            },
            head_width: SizeCurve {
                min: 6.0,
                max: 12.0,
                exponent: 0.7,
                full_at_kmh: 50.0,
            },
            head_length_ratio: 0.8,
            head_length_max_fraction: 0.6,
            outline_color: Color::hex("#404040"),
            outline_width: 0.6,
            label_x: 22.0,
            label_y: 15.0,
            font_size: 12.0,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            label_color: Color::hex("#000000"),
            label_outline_color: Color::hex("#FFFFFF"),
            label_outline_width: 3.0,
            highlight_color: Color::hex("#FFFFAA"),
        }
    }
}

impl ArrowStyle {
    /// Load a style from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ArrowsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a style from a JSON string and validate it.
    pub fn from_json(json: &str) -> ArrowsResult<Self> {
        let style: ArrowStyle = serde_json::from_str(json)?;
        style.validate().map_err(ArrowsError::InvalidStyle)?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 || self.arrow_box <= 0.0 {
            return Err("canvas and arrow box sizes must be positive".to_string());
        }
        if self.color_max_kmh <= 0.0 {
            return Err("color_max_kmh must be positive".to_string());
        }
        if self.color_exponent <= 0.0 {
            return Err("color_exponent must be positive".to_string());
        }
        self.color_stops.validate()?;
        self.length.validate("length")?;
        self.tail_width.validate("tail_width")?;
        self.head_width.validate("head_width")?;
        if self.head_length_ratio <= 0.0 {
            return Err("head_length_ratio must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.head_length_max_fraction) {
            return Err("head_length_max_fraction must be within [0, 1]".to_string());
        }
        for color in [
            &self.outline_color,
            &self.label_color,
            &self.label_outline_color,
            &self.highlight_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }

    /// Speed (km/h) to percent position on the color ramp.
    pub fn color_mapper(&self) -> RangeMapper {
        RangeMapper::linear(0.0, self.color_max_kmh, 0.0, 100.0)
            .with_exponent(self.color_exponent)
            .clamped()
    }
}
