//! Media descriptors shared by ingestion, the timeline and the media engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "mkv", "avi", "ogv"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Native playback behavior of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Self-timed: the media engine reports progress and end of playback.
    Video,
    /// Untimed still: shown for a fixed duration.
    Image,
}

impl MediaKind {
    /// Detect the kind from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// File extensions recognized for this kind, lowercase.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO_EXTENSIONS,
            Self::Image => IMAGE_EXTENSIONS,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => f.write_str("video"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Opaque handle the media engine loads. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource {
    path: Arc<PathBuf>,
}

impl MediaSource {
    /// Create a source for a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Path to the media file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
