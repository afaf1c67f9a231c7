//! Common types shared by the arrow renderer and the table scanner.

pub mod error;
pub mod range;
pub mod style;
pub mod units;

pub use error::{ArrowsError, ArrowsResult};
pub use range::RangeMapper;
pub use style::{ArrowStyle, Color, ColorRamp, ColorStop, SizeCurve};
pub use units::Unit;
