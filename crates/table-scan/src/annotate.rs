//! The scan-and-render pass.
//!
//! A pass reads the table, extracts every wind reading, renders one glyph
//! per reading and writes the glyphs back. Extraction completes before the
//! first write, so a malformed cell leaves the table untouched.
//!
//! Passes are triggered by a change notifier. The notifier is paused for
//! the duration of a pass so the pass's own writes do not trigger another.

use renderer::{ArrowRenderer, DeviceScale};
use tracing::{debug, info};

use crate::error::ScanResult;
use crate::extract::{extract, WindReading};
use crate::table::{CellPatch, ForecastTable};

/// Source of "table content changed" signals.
pub trait ChangeNotifier {
    /// Stop reporting changes.
    fn pause(&mut self);

    /// Resume reporting changes made after this call.
    fn resume(&mut self);
}

/// Keeps a notifier paused for its lifetime.
pub struct PassGuard<'a, N: ChangeNotifier + ?Sized> {
    notifier: &'a mut N,
}

impl<'a, N: ChangeNotifier + ?Sized> PassGuard<'a, N> {
    pub fn new(notifier: &'a mut N) -> Self {
        notifier.pause();
        Self { notifier }
    }
}

impl<N: ChangeNotifier + ?Sized> Drop for PassGuard<'_, N> {
    fn drop(&mut self) {
        self.notifier.resume();
    }
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub wind_rows: usize,
    pub cells_rendered: usize,
    pub cells_highlighted: usize,
}

/// Renders wind glyphs into forecast tables.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    renderer: ArrowRenderer,
    scale: DeviceScale,
}

impl Annotator {
    pub fn new(renderer: ArrowRenderer, scale: DeviceScale) -> Self {
        Self { renderer, scale }
    }

    pub fn renderer(&self) -> &ArrowRenderer {
        &self.renderer
    }

    pub fn scale(&self) -> DeviceScale {
        self.scale
    }

    /// Build the replacement for one wind cell.
    pub fn patch_for(&self, reading: &WindReading) -> ScanResult<CellPatch> {
        let glyph = self.renderer.render(
            f64::from(reading.angle),
            reading.speed_kmh,
            &reading.speed_label(),
        );
        let style = self.renderer.style();

        Ok(CellPatch {
            title: glyph.title(),
            png: self.renderer.render_png(&glyph, self.scale)?,
            svg: self.renderer.to_svg(&glyph),
            width: style.canvas_width,
            height: style.canvas_height,
            background: reading.usable.then(|| style.highlight_color.clone()),
        })
    }

    /// Run one full pass over `table`.
    ///
    /// Thresholds are rebuilt from the table on every call, and replaced
    /// cells keep their source text, so calling this again on the same
    /// content produces the same result.
    pub fn scan_and_render<T: ForecastTable + ?Sized>(
        &self,
        table: &mut T,
    ) -> ScanResult<ScanReport> {
        let rows = table.rows();
        let extraction = extract(&rows)?;

        let patches = extraction
            .readings
            .iter()
            .map(|reading| self.patch_for(reading).map(|patch| (reading, patch)))
            .collect::<ScanResult<Vec<_>>>()?;

        let mut report = ScanReport {
            wind_rows: extraction.wind_rows,
            ..ScanReport::default()
        };

        for (reading, patch) in patches {
            debug!(
                row = reading.row,
                column = reading.column,
                angle = reading.angle,
                speed_kmh = reading.speed_kmh,
                usable = reading.usable,
                "Replacing wind cell"
            );
            table.replace_cell(reading.row, reading.column, patch)?;
            report.cells_rendered += 1;
            if reading.usable {
                report.cells_highlighted += 1;
            }
        }

        info!(
            rows = rows.len(),
            wind_rows = report.wind_rows,
            cells = report.cells_rendered,
            highlighted = report.cells_highlighted,
            "Scan pass complete"
        );

        Ok(report)
    }

    /// Handle a change signal: pause the notifier, run a pass, resume.
    ///
    /// The notifier is resumed even when the pass fails, so the next
    /// content change gets a fresh attempt.
    pub fn on_change<T, N>(&self, table: &mut T, notifier: &mut N) -> ScanResult<ScanReport>
    where
        T: ForecastTable + ?Sized,
        N: ChangeNotifier + ?Sized,
    {
        let _guard = PassGuard::new(notifier);
        self.scan_and_render(table)
    }
}
