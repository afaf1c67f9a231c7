//! Glyph rasterization at device scale.
//!
//! Glyph SVGs are parsed with usvg and drawn by resvg into a tiny-skia
//! pixmap that is `scale` times the logical canvas size. The page then
//! shows the PNG at logical size, which keeps it sharp on dense screens.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};
use usvg::fontdb::{Database, Family, Query};

use crate::error::{RenderError, RenderResult};
use crate::glyph::{ArrowGlyph, ArrowRenderer};

/// Integer upscale factor for raster output, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceScale(u32);

impl DeviceScale {
    pub const ONE: DeviceScale = DeviceScale(1);

    pub fn new(factor: u32) -> Self {
        Self(factor.max(1))
    }

    /// Derive the factor from a screen pixel ratio. Only upscales.
    pub fn from_pixel_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 1.0 {
            return Self::ONE;
        }
        Self(ratio.ceil() as u32)
    }

    pub fn factor(self) -> u32 {
        self.0
    }
}

impl Default for DeviceScale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Families tried, in order, when the generic `sans-serif` family has no
/// installed face.
const FALLBACK_SANS_SERIF: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Helvetica",
];

fn resolves(db: &Database, family: Family<'_>) -> bool {
    db.query(&Query {
        families: &[family],
        ..Query::default()
    })
    .is_some()
}

/// Point the generic `sans-serif` family at a face that exists.
///
/// fontdb maps `sans-serif` to Arial. Without Arial usvg finds no face for
/// the label and drops the text.
fn resolve_sans_serif(db: &mut Database) {
    if resolves(db, Family::SansSerif) {
        return;
    }

    let fallback = FALLBACK_SANS_SERIF
        .iter()
        .find(|name| resolves(db, Family::Name(name)))
        .map(|name| name.to_string())
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        });

    match fallback {
        Some(name) => {
            debug!(family = %name, "Using fallback sans-serif family");
            db.set_sans_serif_family(name);
        }
        None => warn!("No font faces found, speed labels will not be drawn"),
    }
}

/// System fonts for the speed label, loaded once per process.
fn font_database() -> Arc<Database> {
    static FONTS: OnceLock<Arc<Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            resolve_sans_serif(&mut db);
            debug!(faces = db.len(), "Loaded label fonts");
            Arc::new(db)
        })
        .clone()
}

impl ArrowRenderer {
    /// Rasterize a glyph into a premultiplied RGBA pixmap.
    pub fn rasterize(
        &self,
        glyph: &ArrowGlyph,
        scale: DeviceScale,
    ) -> RenderResult<tiny_skia::Pixmap> {
        let style = self.style();
        let factor = scale.factor() as f32;
        let width = (style.canvas_width as f32 * factor).ceil() as u32;
        let height = (style.canvas_height as f32 * factor).ceil() as u32;

        let mut opt = usvg::Options::default();
        opt.fontdb = font_database();

        let svg = self.to_svg(glyph);
        let tree =
            usvg::Tree::from_str(&svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))?;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;

        let transform = tiny_skia::Transform::from_scale(factor, factor);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }

    /// Rasterize a glyph and encode it as PNG.
    pub fn render_png(&self, glyph: &ArrowGlyph, scale: DeviceScale) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(glyph, scale)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Png(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_from_pixel_ratio() {
        assert_eq!(DeviceScale::from_pixel_ratio(0.5).factor(), 1);
        assert_eq!(DeviceScale::from_pixel_ratio(1.0).factor(), 1);
        assert_eq!(DeviceScale::from_pixel_ratio(1.5).factor(), 2);
        assert_eq!(DeviceScale::from_pixel_ratio(2.0).factor(), 2);
        assert_eq!(DeviceScale::from_pixel_ratio(f64::NAN).factor(), 1);
        assert_eq!(DeviceScale::new(0).factor(), 1);
    }

    #[test]
    fn test_sans_serif_resolves_to_installed_face() {
        let db = font_database();
        if db.is_empty() {
            return;
        }
        assert!(resolves(&db, Family::SansSerif));
    }

    #[test]
    fn test_empty_database_keeps_default_family() {
        let mut db = Database::new();
        resolve_sans_serif(&mut db);
        assert_eq!(db.family_name(&Family::SansSerif), "Arial");
    }
}
