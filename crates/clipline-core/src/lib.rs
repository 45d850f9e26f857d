//! Clipline Core - Foundation types for the timeline previewer
//!
//! This crate provides the fundamental types used throughout Clipline:
//! - Time representation (RationalTime, TimeRange) and time readouts
//! - Monotonic clocks (system and manual)
//! - Display colors
//! - Geometric primitives for the timeline surface
//! - Media descriptors shared by ingestion and the media engine
//! - Preview configuration

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod media;
pub mod time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use color::Color;
pub use config::PreviewConfig;
pub use error::{ClipLineError, Result};
pub use geometry::{Rect, Vec2};
pub use media::{MediaKind, MediaSource};
pub use time::{format_time, RationalTime, TimeRange};
