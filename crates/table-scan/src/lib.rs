//! Forecast table scanning and wind cell annotation.
//!
//! A scan pass walks the label rows of a forecast table in document order,
//! accumulates the usable height per column, and turns every cell of a wind
//! row into an arrow glyph that replaces the cell's text.

pub mod annotate;
pub mod error;
pub mod extract;
pub mod heights;
pub mod html;
pub mod labels;
pub mod table;

pub use annotate::{Annotator, ChangeNotifier, PassGuard, ScanReport};
pub use error::{ScanError, ScanResult};
pub use extract::{extract, Extraction, WindReading};
pub use heights::HeightThresholds;
pub use html::HtmlTable;
pub use labels::{CellMatch, LabelMatch, RowKind};
pub use table::{CellPatch, ForecastTable, MemoryTable, TableRow};
