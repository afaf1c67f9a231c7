//! Tests for the HTML page adapter.

use table_scan::{Annotator, ForecastTable, HtmlTable};
use test_utils::{sample_day, ForecastPage};

#[test]
fn test_parse_fixture_page() {
    let table = HtmlTable::parse(&sample_day().to_html()).unwrap();
    assert_eq!(table.row_count(), 7);
    let rows = table.rows();
    assert_eq!(rows[4].label, "Wind 800m ISA [km/h]");
    assert_eq!(rows[4].cells.len(), 4);
}

#[test]
fn test_output_replaces_wind_cells_with_images() {
    let page = ForecastPage::new()
        .usable_height(&["1500", "1000"])
        .wind(1200, "km/h", &["90°/20", "270°/35"]);
    let mut table = HtmlTable::parse(&page.to_html()).unwrap();
    Annotator::default().scan_and_render(&mut table).unwrap();

    let html = table.to_document();
    assert_eq!(html.matches("<img src=\"data:image/png;base64,").count(), 2);
    assert_eq!(html.matches("background-color:#ffffaa").count(), 1);
    assert!(html.contains("title=\"90°\""));
    assert!(html.contains("title=\"270°\""));
    assert!(html.contains("<td style=\"padding:0\">"));
    assert!(html.contains("width:37px;height:20px"));
    // Height cells keep their content
    assert!(html.contains("<td><span>1500</span></td>"));
    // Source text survives only as hidden text
    assert!(!html.contains("<span>90°/20</span>"));
    assert!(html.contains("<span hidden=\"\">90°/20</span>"));
}

#[test]
fn test_annotated_output_scans_the_same() {
    let mut first = HtmlTable::parse(&sample_day().to_html()).unwrap();
    let report = Annotator::default().scan_and_render(&mut first).unwrap();

    let annotated = first.to_document();
    let mut second = HtmlTable::parse(&annotated).unwrap();
    assert_eq!(second.rows(), first.rows());
    assert_eq!(Annotator::default().scan_and_render(&mut second).unwrap(), report);

    // The glyph element is replaced, not nested or duplicated
    let again = second.to_document();
    assert_eq!(again, annotated);
    assert_eq!(again.matches("class=\"wind-arrow\"").count(), 12);
}

#[test]
fn test_patches_listing() {
    let mut table = HtmlTable::parse(&sample_day().to_html()).unwrap();
    Annotator::default().scan_and_render(&mut table).unwrap();
    let patched: Vec<(usize, usize)> = table.patches().map(|(r, c, _)| (r, c)).collect();
    assert_eq!(patched.len(), 12);
    assert_eq!(patched[0], (4, 0));
    assert_eq!(patched[11], (6, 3));
}

#[test]
fn test_document_keeps_page_shell() {
    let table = HtmlTable::parse(&sample_day().to_html()).unwrap();
    let doc = table.to_document();
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<meta charset=\"utf-8\">"));
    assert!(doc.contains("<table class=\"product\">"));
}

const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Forecast</title></head><body>
<h1>Forecast for Monday</h1>
<table class="product">
<tr><th></th><th>09:00</th><th>12:00</th></tr>
<tr><td><span class="product-title-txt">Usable height [m]</span></td><td>1500</td><td>1000</td></tr>
<tr><td><span class="product-title-txt">Wind 1200m ISA [km/h]</span></td><td class="c"><span>90°/20</span><small>gust 30</small></td><td style="color: red; padding: 4px"><span>270°/35</span></td></tr>
</table>
<p class="footer">Data: forecast service</p>
</body></html>"#;

#[test]
fn test_annotation_keeps_rest_of_page() {
    let mut table = HtmlTable::parse(FULL_PAGE).unwrap();
    let report = Annotator::default().scan_and_render(&mut table).unwrap();
    assert_eq!(report.cells_rendered, 2);

    let doc = table.to_document();
    assert!(doc.contains("<title>Forecast</title>"));
    assert!(doc.contains("<h1>Forecast for Monday</h1>"));
    assert!(doc.contains("<tr><th></th><th>09:00</th><th>12:00</th></tr>"));
    assert!(doc.contains("<p class=\"footer\">Data: forecast service</p>"));

    // Cell attributes and sibling markup survive, only the span is swapped
    assert!(doc.contains("<td class=\"c\" style=\"padding:0\"><span class=\"wind-arrow\">"));
    assert!(doc.contains("</span></span><small>gust 30</small></td>"));
    assert!(doc.contains("<td style=\"color: red;padding:0\"><span class=\"wind-arrow\">"));
    assert_eq!(doc.matches("<img ").count(), 2);
}

#[test]
fn test_sibling_text_does_not_break_rescan() {
    let mut table = HtmlTable::parse(FULL_PAGE).unwrap();
    Annotator::default().scan_and_render(&mut table).unwrap();

    let mut again = HtmlTable::parse(&table.to_document()).unwrap();
    assert_eq!(again.rows()[1].cells, vec!["90°/20 gust 30", "270°/35"]);
    Annotator::default().scan_and_render(&mut again).unwrap();
    assert_eq!(again.to_document(), table.to_document());
}

#[test]
fn test_page_without_labels() {
    let table = HtmlTable::parse("<html><body><p>maintenance</p></body></html>").unwrap();
    assert_eq!(table.row_count(), 0);
    let mut table = table;
    let report = Annotator::default().scan_and_render(&mut table).unwrap();
    assert_eq!(report.cells_rendered, 0);
}
