//! Service configuration from the environment.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use arrows_common::ArrowStyle;
use renderer::DeviceScale;
use table_scan::html::DEFAULT_LABEL_SELECTOR;

/// Runtime configuration of the arrows tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowsConfig {
    /// Screen pixel ratio the glyphs are rendered for
    pub device_pixel_ratio: f64,

    /// Optional JSON style overriding the built-in arrow style
    pub style_file: Option<PathBuf>,

    /// How often watch mode checks the page for changes
    pub poll_interval: Duration,

    /// CSS selector of the row label elements
    pub label_selector: String,
}

impl Default for ArrowsConfig {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            style_file: None,
            poll_interval: Duration::from_millis(500),
            label_selector: DEFAULT_LABEL_SELECTOR.to_string(),
        }
    }
}

impl ArrowsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let device_pixel_ratio = match lookup("ARROWS_DEVICE_PIXEL_RATIO") {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("ARROWS_DEVICE_PIXEL_RATIO='{}'", v))?,
            None => defaults.device_pixel_ratio,
        };

        let poll_interval = match lookup("ARROWS_POLL_INTERVAL_MS") {
            Some(v) => Duration::from_millis(
                v.trim()
                    .parse::<u64>()
                    .with_context(|| format!("ARROWS_POLL_INTERVAL_MS='{}'", v))?,
            ),
            None => defaults.poll_interval,
        };

        Ok(Self {
            device_pixel_ratio,
            style_file: lookup("ARROWS_STYLE_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            poll_interval,
            label_selector: lookup("ARROWS_LABEL_SELECTOR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.label_selector),
        })
    }

    pub fn device_scale(&self) -> DeviceScale {
        DeviceScale::from_pixel_ratio(self.device_pixel_ratio)
    }

    /// The arrow style: the configured file, or the built-in default.
    pub fn load_style(&self) -> Result<ArrowStyle> {
        match &self.style_file {
            Some(path) => ArrowStyle::from_file(path)
                .with_context(|| format!("loading style {}", path.display())),
            None => Ok(ArrowStyle::default()),
        }
    }
}
