//! Wind reading extraction.
//!
//! Rows are visited in document order. Height rows feed the per-column
//! thresholds, wind rows consume them, so a wind row only sees heights from
//! rows above it. Column `i` of every row is data cell `i` (label excluded),
//! which keeps thresholds and wind cells aligned regardless of unrelated
//! rows in between.

use arrows_common::Unit;
use tracing::{debug, warn};

use crate::error::{ScanError, ScanResult};
use crate::heights::HeightThresholds;
use crate::labels::{
    classify_label, match_wind_cell, parse_leading_int, CellMatch, LabelMatch, RowKind,
};
use crate::table::TableRow;

/// One wind cell, decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct WindReading {
    /// Row index in the table
    pub row: usize,
    /// Data column index, label cell excluded
    pub column: usize,
    /// Height of the wind layer in meters
    pub wind_height: u32,
    /// Direction the wind comes from, degrees clockwise from north
    pub angle: u32,
    /// Speed as printed in the cell
    pub speed_raw: u32,
    pub unit: Unit,
    /// Speed in km/h
    pub speed_kmh: f64,
    /// Wind layer at or below the column's usable height
    pub usable: bool,
}

impl WindReading {
    /// Label text for the glyph: the raw number in its source unit.
    pub fn speed_label(&self) -> String {
        self.speed_raw.to_string()
    }
}

/// Everything one pass learned from a table.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub readings: Vec<WindReading>,
    /// Thresholds as they stood after the last row
    pub thresholds: HeightThresholds,
    pub wind_rows: usize,
}

/// Decode all wind rows of a table.
///
/// Fails on the first wind cell that does not read as `angle°/speed`, or on
/// a wind row with an unknown unit or an out-of-range height. Nothing is
/// skipped silently.
pub fn extract(rows: &[TableRow]) -> ScanResult<Extraction> {
    let mut out = Extraction::default();

    for (row_idx, row) in rows.iter().enumerate() {
        match classify_label(&row.label) {
            LabelMatch::NoMatch => {}
            LabelMatch::UnknownUnit { unit, .. } => {
                return Err(ScanError::UnknownUnit {
                    row: row_idx,
                    label: row.label.clone(),
                    unit,
                });
            }
            LabelMatch::HeightOutOfRange { height } => {
                return Err(ScanError::HeightOutOfRange {
                    row: row_idx,
                    label: row.label.clone(),
                    height,
                });
            }
            LabelMatch::Matched(RowKind::UsableHeight) => {
                debug!(row = row_idx, cells = row.cells.len(), "Usable height row");
                for (column, text) in row.cells.iter().enumerate() {
                    let meters = parse_leading_int(text);
                    if meters.is_none() {
                        warn!(row = row_idx, column, text = %text, "Unreadable usable height");
                    }
                    out.thresholds.set_usable_height(column, meters);
                }
            }
            LabelMatch::Matched(RowKind::CloudBase) => {
                debug!(row = row_idx, cells = row.cells.len(), "Cloud base row");
                for (column, text) in row.cells.iter().enumerate() {
                    if out.thresholds.apply_cloud_base(column, parse_leading_int(text)) {
                        debug!(row = row_idx, column, text = %text, "Cloud base caps usable height");
                    }
                }
            }
            LabelMatch::Matched(RowKind::WindAtHeight { height, unit }) => {
                debug!(row = row_idx, height, unit = %unit, "Wind row");
                out.wind_rows += 1;
                for (column, text) in row.cells.iter().enumerate() {
                    let (angle, speed_raw) = match match_wind_cell(text) {
                        CellMatch::Matched { angle, speed } => (angle, speed),
                        CellMatch::NoMatch => {
                            return Err(ScanError::CellPattern {
                                row: row_idx,
                                column,
                                label: row.label.clone(),
                                text: text.trim().to_string(),
                            });
                        }
                    };

                    out.readings.push(WindReading {
                        row: row_idx,
                        column,
                        wind_height: height,
                        angle,
                        speed_raw,
                        unit,
                        speed_kmh: unit.to_kmh(f64::from(speed_raw)),
                        usable: out.thresholds.is_usable(column, height),
                    });
                }
            }
        }
    }

    Ok(out)
}
