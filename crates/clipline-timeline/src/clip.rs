//! Clip types.

use clipline_core::{ClipLineError, Color, MediaKind, MediaSource, RationalTime, Result};
use std::fmt;
use uuid::Uuid;

/// Stable clip identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(Uuid);

impl ClipId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One ingested media unit. Immutable once created; the timeline shares it
/// through `Arc` and may reference it any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Clip name (displayed on the timeline)
    pub name: String,
    /// Handle the media engine loads
    pub source: MediaSource,
    /// Video or still image
    pub kind: MediaKind,
    /// Duration on the timeline
    pub duration: RationalTime,
    /// Display color, fixed at creation
    pub color: Color,
}

impl Clip {
    /// Create a clip with a fresh id and a display color drawn from it.
    ///
    /// Fails if the duration is not a positive finite number of seconds.
    pub fn new(
        name: impl Into<String>,
        source: MediaSource,
        kind: MediaKind,
        duration_secs: f64,
    ) -> Result<Self> {
        let duration = RationalTime::from_seconds_f64(duration_secs);
        if !duration_secs.is_finite() || !duration.is_positive() {
            return Err(ClipLineError::InvalidParameter(format!(
                "clip duration must be positive, got {}",
                duration_secs
            )));
        }
        let id = ClipId::new();
        Ok(Self {
            id,
            name: name.into(),
            source,
            kind,
            duration,
            // Low 32 bits of a v4 UUID are fully random.
            color: Color::from_rgb24(id.as_uuid().as_u128() as u32),
        })
    }

    /// Duration in float seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration.to_seconds_f64()
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
