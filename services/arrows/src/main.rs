//! Wind arrow annotator.
//!
//! Reads a captured forecast page, replaces every wind cell with an arrow
//! glyph and writes the annotated page back out. In watch mode the page is
//! re-annotated whenever it changes.

mod config;
mod watch;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use renderer::ArrowRenderer;
use table_scan::{Annotator, ChangeNotifier, HtmlTable, PassGuard, ScanReport};

use config::ArrowsConfig;
use watch::FileWatcher;

#[derive(Parser, Debug)]
#[command(name = "arrows")]
#[command(about = "Replace forecast wind cells with colored arrow glyphs")]
struct Args {
    /// Captured forecast page
    input: PathBuf,

    /// Output HTML file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep running and re-annotate whenever the page changes
    #[arg(long)]
    watch: bool,

    /// JSON arrow style file
    #[arg(long, env = "ARROWS_STYLE_FILE")]
    style: Option<PathBuf>,

    /// Device pixel ratio to render for
    #[arg(long, env = "ARROWS_DEVICE_PIXEL_RATIO")]
    scale: Option<f64>,

    /// CSS selector of row label elements
    #[arg(long)]
    label_selector: Option<String>,

    /// Watch mode poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Also write every glyph as an SVG file into this directory
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Also write every glyph as a PNG file into this directory
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Command line flags take precedence over the environment.
    fn apply_to(&self, config: &mut ArrowsConfig) {
        if let Some(style) = &self.style {
            config.style_file = Some(style.clone());
        }
        if let Some(scale) = self.scale {
            config.device_pixel_ratio = scale;
        }
        if let Some(selector) = &self.label_selector {
            config.label_selector = selector.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval = Duration::from_millis(ms);
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays clean for the HTML
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Where a pass reads from and writes to.
struct Job {
    input: PathBuf,
    output: Option<PathBuf>,
    svg_dir: Option<PathBuf>,
    png_dir: Option<PathBuf>,
    label_selector: String,
}

impl Job {
    /// Read, annotate and write the page once.
    fn run(&self, annotator: &Annotator) -> Result<ScanReport> {
        let html = fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;

        let mut table = HtmlTable::parse_with_selector(&html, &self.label_selector)?;
        let report = annotator.scan_and_render(&mut table)?;

        let document = table.to_document();
        match &self.output {
            Some(path) => fs::write(path, document)
                .with_context(|| format!("writing {}", path.display()))?,
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
        }

        if let Some(dir) = &self.svg_dir {
            write_glyphs(dir, &table, GlyphFormat::Svg)?;
        }
        if let Some(dir) = &self.png_dir {
            write_glyphs(dir, &table, GlyphFormat::Png)?;
        }

        Ok(report)
    }

    /// Run a pass with the watcher paused, so the pass's own output does
    /// not count as a page change.
    fn run_watched<N: ChangeNotifier + ?Sized>(
        &self,
        annotator: &Annotator,
        notifier: &mut N,
    ) -> Result<ScanReport> {
        let _guard = PassGuard::new(notifier);
        self.run(annotator)
    }
}

#[derive(Debug, Clone, Copy)]
enum GlyphFormat {
    Svg,
    Png,
}

impl GlyphFormat {
    fn extension(self) -> &'static str {
        match self {
            GlyphFormat::Svg => "svg",
            GlyphFormat::Png => "png",
        }
    }
}

/// Write one file per replaced cell, named `r<row>_c<column>`.
fn write_glyphs(dir: &Path, table: &HtmlTable, format: GlyphFormat) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut count = 0;
    for (row, column, patch) in table.patches() {
        let path = dir.join(format!("r{}_c{}.{}", row, column, format.extension()));
        let bytes = match format {
            GlyphFormat::Svg => patch.svg.as_bytes(),
            GlyphFormat::Png => patch.png.as_slice(),
        };
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        count += 1;
    }
    info!(dir = %dir.display(), count, format = format.extension(), "Wrote glyph files");
    Ok(())
}

async fn watch_loop(job: &Job, annotator: &Annotator, poll_interval: Duration) -> Result<()> {
    let mut watcher = FileWatcher::new(&job.input);
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!(
        path = %watcher.path().display(),
        interval_ms = poll_interval.as_millis() as u64,
        "Watching page"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                return Ok(());
            }
        }

        match watcher.poll_changed() {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!(error = %e, "Cannot check page");
                continue;
            }
        }

        // A failed pass leaves the last output in place and waits for the
        // next change.
        if let Err(e) = job.run_watched(annotator, &mut watcher) {
            error!(error = %format!("{:#}", e), "Annotation pass failed");
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let mut config = ArrowsConfig::from_env()?;
    args.apply_to(&mut config);

    let style = config.load_style()?;
    let annotator = Annotator::new(ArrowRenderer::new(style)?, config.device_scale());
    info!(
        scale = annotator.scale().factor(),
        selector = %config.label_selector,
        "Loaded configuration"
    );

    let job = Job {
        input: args.input.clone(),
        output: args.output.clone(),
        svg_dir: args.svg_dir.clone(),
        png_dir: args.png_dir.clone(),
        label_selector: config.label_selector.clone(),
    };

    if !args.watch {
        job.run(&annotator)?;
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(&job, &annotator, config.poll_interval))
}
