//! Page file watching.
//!
//! Watch mode polls the page file's modification time. While a pass runs
//! the watcher is paused; on resume it re-baselines to the file's current
//! state, so the tool's own output (even when written over the input) is
//! not mistaken for a new page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use table_scan::ChangeNotifier;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: SystemTime,
    len: u64,
}

fn stamp(path: &Path) -> io::Result<Stamp> {
    let meta = fs::metadata(path)?;
    Ok(Stamp {
        modified: meta.modified()?,
        len: meta.len(),
    })
}

/// Polling change notifier for a single file.
#[derive(Debug)]
pub struct FileWatcher {
    path: PathBuf,
    last_seen: Option<Stamp>,
    paused: bool,
}

impl FileWatcher {
    /// A watcher that reports the file as changed on its first poll.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_seen: None,
            paused: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the file changed since the last poll or resume.
    ///
    /// A missing file is not a change; the next poll after it reappears is.
    pub fn poll_changed(&mut self) -> io::Result<bool> {
        if self.paused {
            return Ok(false);
        }

        let current = match stamp(&self.path) {
            Ok(current) => current,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.last_seen = None;
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if self.last_seen == Some(current) {
            return Ok(false);
        }

        debug!(path = %self.path.display(), "Page changed");
        self.last_seen = Some(current);
        Ok(true)
    }
}

impl ChangeNotifier for FileWatcher {
    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
        match stamp(&self.path) {
            Ok(current) => self.last_seen = Some(current),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot stat page on resume");
                self.last_seen = None;
            }
        }
    }
}
