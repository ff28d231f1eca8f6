//! Session persistence for chart controls.
//!
//! Selections, toggles and weights survive between invocations in a small
//! JSON file, the way widget state survives between interactions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use metric_model::ChartControls;

/// Default session file name.
pub const DEFAULT_SESSION_FILE: &str = ".metrics-session.json";

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored controls.
    ///
    /// A missing file yields defaults. An unreadable or malformed file also
    /// yields defaults, plus a warning for the user.
    pub fn load(&self) -> (ChartControls, Option<String>) {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return (ChartControls::default(), None);
            }
            Err(e) => return self.fallback(format!("failed to read session: {e}")),
        };
        match serde_json::from_str::<ChartControls>(&text) {
            Ok(controls) => (controls.sanitized(), None),
            Err(e) => self.fallback(format!("ignoring malformed session: {e}")),
        }
    }

    /// Persist the controls, replacing the previous session.
    pub fn save(&self, controls: &ChartControls) -> Result<()> {
        let text = serde_json::to_string_pretty(controls).context("encode session")?;
        fs::write(&self.path, text)
            .with_context(|| format!("write session: {}", self.path.display()))?;
        info!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Remove the stored session, if any.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("remove session: {}", self.path.display()))
            }
        }
    }

    fn fallback(&self, message: String) -> (ChartControls, Option<String>) {
        warn!(path = %self.path.display(), %message, "using default chart controls");
        (ChartControls::default(), Some(message))
    }
}
