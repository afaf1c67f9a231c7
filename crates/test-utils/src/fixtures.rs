//! Forecast page fixtures.
//!
//! Pages mimic the forecast site's markup: every row title sits in a
//! `span.product-title-txt` inside the row's first `td`, data cells wrap
//! their text in a `span`.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Builder for a forecast page with one table.
#[derive(Debug, Clone, Default)]
pub struct ForecastPage {
    rows: Vec<(String, Vec<String>)>,
}

impl ForecastPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row with a label and its data cells.
    pub fn row<S: AsRef<str>>(mut self, label: &str, cells: &[S]) -> Self {
        self.rows.push((
            label.to_string(),
            cells.iter().map(|c| c.as_ref().to_string()).collect(),
        ));
        self
    }

    pub fn usable_height(self, cells: &[&str]) -> Self {
        self.row("Usable height [m]", cells)
    }

    pub fn cloud_base(self, cells: &[&str]) -> Self {
        self.row("Cumulus base [m]", cells)
    }

    /// A wind row such as `Wind 1200m ISA [km/h]`.
    pub fn wind(self, height: u32, unit: &str, cells: &[&str]) -> Self {
        let label = format!("Wind {}m ISA [{}]", height, unit);
        self.row(&label, cells)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"></head><body>\n<table class=\"product\">\n",
        );
        for (label, cells) in &self.rows {
            html.push_str("<tr><td><span class=\"product-title-txt\">");
            html.push_str(label);
            html.push_str("</span></td>");
            for cell in cells {
                html.push_str("<td><span>");
                html.push_str(cell);
                html.push_str("</span></td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n</body></html>\n");
        html
    }

    /// Write the page into a fresh temp dir. Keep the dir alive while the
    /// file is in use.
    pub fn write_temp(&self) -> std::io::Result<(TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("forecast.html");
        let mut file = std::fs::File::create(&path)?;
        file.write_all(self.to_html().as_bytes())?;
        Ok((dir, path))
    }
}

/// A typical day: heights, a cloud base that caps one column, three wind
/// layers in different units and an unrelated row in between.
pub fn sample_day() -> ForecastPage {
    ForecastPage::new()
        .row("Temperature 2m [°C]", &["12", "17", "19", "15"])
        .usable_height(&["1200", "1800", "2100", "900"])
        .cloud_base(&["0", "1500", "0", "1100"])
        .row("Cloud cover [%]", &["10", "30", "50", "80"])
        .wind(800, "km/h", &["200°/8", "220°/12", "240°/15", "250°/18"])
        .wind(1500, "kt", &["230°/10", "240°/14", "260°/18", "270°/25"])
        .wind(2600, "m/s", &["260°/5", "270°/8", "280°/11", "290°/14"])
}

/// German page labels.
pub fn sample_day_german() -> ForecastPage {
    ForecastPage::new()
        .row("Arbeitshöhe [m]", &["1600", "2000"])
        .row("Cumulus Basis [m]", &["0", "1700"])
        .row("Wind 1500m ISA [km/h]", &["90°/20", "100°/25"])
}

/// French page labels.
pub fn sample_day_french() -> ForecastPage {
    ForecastPage::new()
        .row("Altitude utilisable [m]", &["1400", "1900"])
        .row("Base Cumulus [m]", &["1300", "0"])
        .row("Vent 1500m ISA [kt]", &["180°/10", "200°/12"])
}
