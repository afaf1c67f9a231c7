//! Pattern matchers for row labels and wind cells.
//!
//! Forecast pages are localized (English, German, French), so each label
//! category matches a set of aliases. Every matcher returns a tagged result
//! instead of raw captures.

use arrows_common::Unit;
use regex::Regex;
use std::sync::OnceLock;

/// Kind of a recognized label row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind {
    /// Usable (working) height per column, sets the baseline
    UsableHeight,
    /// Cumulus base per column, overrides the baseline when positive
    CloudBase,
    /// Wind at a fixed height, cells are `angle°/speed` in `unit`
    WindAtHeight { height: u32, unit: Unit },
}

/// Result of matching a row label.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelMatch {
    NoMatch,
    Matched(RowKind),
    /// A wind row whose bracketed unit has no known conversion
    UnknownUnit { height: u32, unit: String },
    /// A wind row whose height does not fit in meters as `u32`
    HeightOutOfRange { height: String },
}

/// Result of matching a wind cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMatch {
    NoMatch,
    Matched { angle: u32, speed: u32 },
}

fn usable_height_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:Usable height|Arbeitshöhe|Altitude utilisable)")
            .expect("usable height regex is valid")
    })
}

fn cloud_base_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:Cumulus Basis|Cumulus base|Base Cumulus)")
            .expect("cloud base regex is valid")
    })
}

// e.g. "Wind 2600m ISA [km/h]"
fn wind_row_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:Wind|Vent)\s+(\d+).+\[(.+)\]").expect("wind row regex is valid")
    })
}

// e.g. "275°/33"
fn wind_cell_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)°/(\d+)").expect("wind cell regex is valid"))
}

fn leading_int_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer regex is valid"))
}

/// Classify a row label.
///
/// Height rows are checked before wind rows, so a label is never both.
pub fn classify_label(label: &str) -> LabelMatch {
    if usable_height_pattern().is_match(label) {
        return LabelMatch::Matched(RowKind::UsableHeight);
    }
    if cloud_base_pattern().is_match(label) {
        return LabelMatch::Matched(RowKind::CloudBase);
    }

    let caps = match wind_row_pattern().captures(label) {
        Some(caps) => caps,
        None => return LabelMatch::NoMatch,
    };
    let height = match caps[1].parse::<u32>() {
        Ok(height) => height,
        Err(_) => {
            return LabelMatch::HeightOutOfRange {
                height: caps[1].to_string(),
            }
        }
    };
    let token = &caps[2];
    match token.parse::<Unit>() {
        Ok(unit) => LabelMatch::Matched(RowKind::WindAtHeight { height, unit }),
        Err(_) => LabelMatch::UnknownUnit {
            height,
            unit: token.to_string(),
        },
    }
}

/// Match a wind cell's text against `angle°/speed`.
pub fn match_wind_cell(text: &str) -> CellMatch {
    let caps = match wind_cell_pattern().captures(text) {
        Some(caps) => caps,
        None => return CellMatch::NoMatch,
    };
    match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
        (Ok(angle), Ok(speed)) => CellMatch::Matched { angle, speed },
        _ => CellMatch::NoMatch,
    }
}

/// Read the integer a cell's text starts with, e.g. `1800 m` -> 1800.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    leading_int_pattern()
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}
