//! The timeline: an ordered sequence of clip references.
//!
//! Start offsets are cached alongside the entries. Appending extends the
//! cache, so earlier offsets never change and lookups never recompute sums.

use clipline_core::{RationalTime, TimeRange};
use std::sync::Arc;

use crate::clip::Clip;

/// Where a global time falls on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Inside entry `index`, `offset` seconds after its start.
    Within { index: usize, offset: RationalTime },
    /// At or beyond the total length (or the timeline is empty).
    PastEnd,
}

impl Location {
    /// Entry index, if not past the end.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Within { index, .. } => Some(index),
            Self::PastEnd => None,
        }
    }
}

/// Append-only sequence of shared clips. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<Arc<Clip>>,
    /// `starts[i]` = sum of durations of entries `0..i`.
    starts: Vec<RationalTime>,
    total: RationalTime,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip reference. Returns the new entry's index.
    pub fn append(&mut self, clip: Arc<Clip>) -> usize {
        let index = self.entries.len();
        self.starts.push(self.total);
        self.total = self.total + clip.duration;
        tracing::debug!(index, clip = %clip.name, total = %self.total, "Clip appended");
        self.entries.push(clip);
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry durations; zero when empty.
    pub fn total_length(&self) -> RationalTime {
        self.total
    }

    /// [`Timeline::total_length`] in float seconds.
    pub fn total_length_secs(&self) -> f64 {
        self.total.to_seconds_f64()
    }

    /// Clip at entry `index`.
    pub fn entry(&self, index: usize) -> Option<&Arc<Clip>> {
        self.entries.get(index)
    }

    /// Start offset of entry `index`.
    pub fn start_of(&self, index: usize) -> Option<RationalTime> {
        self.starts.get(index).copied()
    }

    /// Time span occupied by entry `index`.
    pub fn span(&self, index: usize) -> Option<TimeRange> {
        let clip = self.entries.get(index)?;
        Some(TimeRange::new(self.starts[index], clip.duration))
    }

    /// Entries in order with their spans.
    pub fn iter(&self) -> impl Iterator<Item = (TimeRange, &Arc<Clip>)> {
        self.starts
            .iter()
            .zip(&self.entries)
            .map(|(start, clip)| (TimeRange::new(*start, clip.duration), clip))
    }

    /// Map a global time to an entry and an offset within it.
    ///
    /// A time exactly on a boundary belongs to the entry starting there.
    /// Negative times are treated as zero.
    pub fn locate(&self, time: RationalTime) -> Location {
        let time = time.max(RationalTime::ZERO);
        if time >= self.total {
            return Location::PastEnd;
        }
        // starts[0] == 0 <= time, so the partition point is at least 1.
        let index = self.starts.partition_point(|start| *start <= time) - 1;
        Location::Within {
            index,
            offset: time - self.starts[index],
        }
    }

    /// [`Timeline::locate`] for float seconds.
    pub fn locate_secs(&self, seconds: f64) -> Location {
        self.locate(RationalTime::from_seconds_f64(seconds))
    }
}
