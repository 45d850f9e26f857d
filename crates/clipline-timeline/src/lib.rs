//! Clipline Timeline - clip store and timeline model
//!
//! Implements the data side of the previewer:
//! - Clips: immutable media descriptors with a stable display color
//! - The clip store that owns ingested clips
//! - The timeline: an ordered, append-only sequence of shared clip
//!   references with cumulative offsets and time lookup

pub mod clip;
pub mod store;
pub mod timeline;

pub use clip::{Clip, ClipId};
pub use store::ClipStore;
pub use timeline::{Location, Timeline};
