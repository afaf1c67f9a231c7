//! Wind arrow glyph rendering.
//!
//! Turns a wind direction and a canonical speed into a Meteo-Parapente
//! style arrow:
//! - Arrow polygon geometry sized by speed
//! - Speed to color mapping over a gradient of color stops
//! - SVG assembly with an outlined speed label
//! - Rasterization to PNG at an integer device scale

pub mod arrow;
pub mod error;
pub mod glyph;
pub mod gradient;
pub mod raster;

pub use arrow::{ArrowShape, Point};
pub use error::{RenderError, RenderResult};
pub use glyph::{ArrowGlyph, ArrowRenderer};
pub use raster::DeviceScale;
