//! Integration test crate for Clipline.
//!
//! This crate exists solely to hold cross-crate integration tests: full
//! preview sessions driven by a hand-advanced clock and the virtual-clock
//! media engine, so every scenario is deterministic and headless.

#[cfg(test)]
mod support;

#[cfg(test)]
mod playback;

#[cfg(test)]
mod gestures;

#[cfg(test)]
mod rendering;

#[cfg(test)]
mod ingest;
