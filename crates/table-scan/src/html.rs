//! Forecast tables read from a captured HTML page.
//!
//! Label rows are found through a CSS selector on the label element (the
//! forecast site wraps every row title in `span.product-title-txt`). The row
//! is the nearest enclosing `tr`; its first `td` holds the label, the other
//! `td`s are data cells.
//!
//! The parsed page is kept whole. A replaced cell gets zero padding and its
//! first `span` (or its whole content, when it has none) is swapped for the
//! glyph. Everything else on the page is written back as it was read.

use std::collections::HashSet;
use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ego_tree::{NodeId, NodeMut, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::error::{ScanError, ScanResult};
use crate::table::{CellPatch, ForecastTable, TableRow};

pub const DEFAULT_LABEL_SELECTOR: &str = "span.product-title-txt";

/// Class of the element holding a glyph inside a replaced cell.
pub const GLYPH_CLASS: &str = "wind-arrow";

#[derive(Debug, Clone)]
struct HtmlCell {
    td: NodeId,
    /// Element the glyph replaces; the whole cell content when `None`
    slot: Option<NodeId>,
    text: String,
    slot_text: String,
    patch: Option<CellPatch>,
}

#[derive(Debug, Clone)]
struct HtmlRow {
    label: String,
    cells: Vec<HtmlCell>,
}

/// A parsed page and its label rows, with any glyphs written into them.
#[derive(Debug, Clone)]
pub struct HtmlTable {
    document: Html,
    rows: Vec<HtmlRow>,
}

fn parse_selector(selector: &str) -> ScanResult<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::Selector(format!("{}: {:?}", selector, e)))
}

/// Visible text of an element with whitespace collapsed.
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl HtmlTable {
    /// Parse a page using the default label selector.
    pub fn parse(html: &str) -> ScanResult<Self> {
        Self::parse_with_selector(html, DEFAULT_LABEL_SELECTOR)
    }

    pub fn parse_with_selector(html: &str, label_selector: &str) -> ScanResult<Self> {
        let document = Html::parse_document(html);
        let labels = parse_selector(label_selector)?;
        let tds = parse_selector("td")?;
        let spans = parse_selector("span")?;

        let mut seen_rows = HashSet::new();
        let mut rows = Vec::new();
        for label in document.select(&labels) {
            let tr = label
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "tr");
            let tr = match tr {
                Some(tr) => tr,
                None => {
                    debug!(label = %element_text(&label), "Label outside of a table row");
                    continue;
                }
            };
            // Only the first label of a row names it
            if !seen_rows.insert(tr.id()) {
                debug!(label = %element_text(&label), "Extra label in a labelled row");
                continue;
            }

            let cells = tr
                .select(&tds)
                .skip(1)
                .map(|td| {
                    let slot = td.select(&spans).next();
                    let text = element_text(&td);
                    HtmlCell {
                        td: td.id(),
                        slot: slot.map(|s| s.id()),
                        slot_text: slot.as_ref().map_or_else(|| text.clone(), element_text),
                        text,
                        patch: None,
                    }
                })
                .collect();

            rows.push(HtmlRow {
                label: element_text(&label),
                cells,
            });
        }

        debug!(rows = rows.len(), selector = label_selector, "Parsed forecast table");
        Ok(Self { document, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Every replaced cell as `(row, column, patch)`.
    pub fn patches(&self) -> impl Iterator<Item = (usize, usize, &CellPatch)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells
                .iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.patch.as_ref().map(|p| (r, c, p)))
        })
    }

    /// The whole page with every replaced cell showing its glyph.
    pub fn to_document(&self) -> String {
        let mut document = self.document.clone();
        for cell in self.rows.iter().flat_map(|row| row.cells.iter()) {
            if let Some(patch) = &cell.patch {
                splice_patch(&mut document, cell, patch);
            }
        }
        document.html()
    }
}

/// Copy the children of `source` under `target`.
fn graft(target: &mut NodeMut<'_, Node>, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let mut copy = target.append(child.value().clone());
        graft(&mut copy, child);
    }
}

/// Write a glyph into the cell's node in `document`.
///
/// The replacement cell is built as markup and parsed, then its element and
/// glyph subtree are copied over the original nodes.
fn splice_patch(document: &mut Html, cell: &HtmlCell, patch: &CellPatch) {
    let markup = match document.tree.get(cell.td).and_then(ElementRef::wrap) {
        Some(td) => format!(
            "<table><tbody><tr>{}</tr></tbody></table>",
            patched_cell_html(&td, patch, &cell.slot_text)
        ),
        None => {
            warn!("Replaced cell is missing from the page");
            return;
        }
    };

    let fragment = Html::parse_fragment(&markup);
    let new_td = fragment
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "td");
    let (td_value, glyph) = match new_td.and_then(|td| td.first_child().map(|g| (td, g))) {
        Some((td, glyph)) => (td.value().clone(), glyph),
        None => {
            warn!("Cannot build replacement cell markup");
            return;
        }
    };

    if let Some(mut td) = document.tree.get_mut(cell.td) {
        *td.value() = Node::Element(td_value);
    }

    match cell.slot.and_then(|slot| document.tree.get_mut(slot)) {
        Some(mut slot) => {
            let mut copy = slot.insert_before(glyph.value().clone());
            graft(&mut copy, glyph);
            slot.detach();
        }
        None => {
            if let Some(mut td) = document.tree.get_mut(cell.td) {
                while let Some(mut child) = td.first_child() {
                    child.detach();
                }
                let mut copy = td.append(glyph.value().clone());
                graft(&mut copy, glyph);
            }
        }
    }
}

/// Replace any padding declaration with `padding:0`.
fn with_zero_padding(style: &str) -> String {
    let mut declarations: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| d.split(':').next().map(str::trim) != Some("padding"))
        .collect();
    declarations.push("padding:0");
    declarations.join(";")
}

/// Markup of a replaced cell: the source cell's attributes with zero
/// padding, holding the glyph image.
///
/// The replaced text stays in the glyph element, hidden, so an annotated
/// page scans like the page it came from.
fn patched_cell_html(td: &ElementRef<'_>, patch: &CellPatch, slot_text: &str) -> String {
    let mut attrs = String::new();
    let mut has_style = false;
    for (name, value) in td.value().attrs() {
        let value = if name == "style" {
            has_style = true;
            with_zero_padding(value)
        } else {
            value.to_string()
        };
        let _ = write!(attrs, " {}=\"{}\"", name, escape_attr(&value));
    }
    if !has_style {
        attrs.push_str(" style=\"padding:0\"");
    }

    let mut style = format!("width:{}px;height:{}px", patch.width, patch.height);
    if let Some(background) = &patch.background {
        style.push_str(";background-color:");
        style.push_str(&background.to_css());
    }
    format!(
        "<td{}><span class=\"{}\"><img src=\"data:image/png;base64,{}\" title=\"{}\" alt=\"{}\" style=\"{}\"><span hidden>{}</span></span></td>",
        attrs,
        GLYPH_CLASS,
        STANDARD.encode(&patch.png),
        escape_attr(&patch.title),
        escape_attr(&patch.title),
        style,
        escape_attr(slot_text),
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl ForecastTable for HtmlTable {
    fn rows(&self) -> Vec<TableRow> {
        self.rows
            .iter()
            .map(|row| TableRow {
                label: row.label.clone(),
                cells: row.cells.iter().map(|c| c.text.clone()).collect(),
            })
            .collect()
    }

    fn replace_cell(&mut self, row: usize, column: usize, patch: CellPatch) -> ScanResult<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(column))
            .ok_or(ScanError::NoSuchCell { row, column })?;
        cell.patch = Some(patch);
        Ok(())
    }
}
