//! Clipline Playback - sequencing clips into continuous preview
//!
//! The scheduler walks the timeline one clip at a time. Videos are timed by
//! the media engine (end-of-playback signal); stills by a polling timer.
//! Each playing state owns the one resource it armed and releases it on exit.

pub mod scheduler;
pub mod timer;

pub use scheduler::{PlaybackState, Scheduler};
pub use timer::{ImageTimer, TimerPoll};
