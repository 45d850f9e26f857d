//! Preview configuration.
//!
//! Stored as JSON under the user's config directory. Every field has a
//! default, so partial files are fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ClipLineError, Result};

/// Tunables for ingestion, playback and the timeline view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// How long a still image stays on screen, in seconds.
    pub image_duration_secs: f64,
    /// Polling interval of the image display timer, in milliseconds.
    pub poll_interval_ms: u64,
    /// Half-width of the playhead grab band, in pixels.
    pub scrub_tolerance_px: f32,
    /// Initial requested zoom in pixels per second.
    pub default_zoom: f32,
    /// Lower bound for the zoom control.
    pub min_zoom: f32,
    /// Upper bound for the zoom control.
    pub max_zoom: f32,
    /// How long ingestion waits for metadata before discarding a file.
    pub metadata_timeout_ms: u64,
    /// Height of the timeline drawing surface, in pixels.
    pub timeline_height: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            image_duration_secs: 5.0,
            poll_interval_ms: 50,
            scrub_tolerance_px: 5.0,
            default_zoom: 50.0,
            min_zoom: 1.0,
            max_zoom: 500.0,
            metadata_timeout_ms: 5_000,
            timeline_height: 80.0,
        }
    }
}

impl PreviewConfig {
    /// Default location: `<config_dir>/clipline/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clipline").join("config.json"))
    }

    /// Parse from JSON bytes and validate.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| ClipLineError::Serialization(format!("Invalid config: {}", e)))?;
        Ok(config.validate())
    }

    /// Serialize to pretty JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ClipLineError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Load from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Load from the default location. A missing file yields defaults; a
    /// malformed one is logged and also yields defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Replace nonsensical values with defaults.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        if !(self.image_duration_secs.is_finite() && self.image_duration_secs > 0.0) {
            self.image_duration_secs = defaults.image_duration_secs;
        }
        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = defaults.poll_interval_ms;
        }
        if !(self.scrub_tolerance_px.is_finite() && self.scrub_tolerance_px >= 0.0) {
            self.scrub_tolerance_px = defaults.scrub_tolerance_px;
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        self.default_zoom = self.default_zoom.clamp(self.min_zoom, self.max_zoom);
        if !(self.timeline_height > 0.0) {
            self.timeline_height = defaults.timeline_height;
        }
        self
    }

    /// Image timer polling interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Metadata wait bound for ingestion.
    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }
}
