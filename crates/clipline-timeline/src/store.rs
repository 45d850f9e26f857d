//! Store of ingested clips.

use std::sync::Arc;

use crate::clip::{Clip, ClipId};

/// Owns every ingested clip. Timeline entries borrow from here by `Arc`.
#[derive(Debug, Default)]
pub struct ClipStore {
    clips: Vec<Arc<Clip>>,
}

impl ClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clip, returning the shared handle.
    pub fn insert(&mut self, clip: Clip) -> Arc<Clip> {
        let clip = Arc::new(clip);
        tracing::debug!(id = %clip.id, name = %clip.name, "Clip stored");
        self.clips.push(Arc::clone(&clip));
        clip
    }

    /// Look up a clip by id.
    pub fn get(&self, id: ClipId) -> Option<&Arc<Clip>> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    /// Clips in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Clip>> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
