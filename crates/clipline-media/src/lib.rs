//! Clipline Media - media engine contract and ingestion
//!
//! This crate handles:
//! - The media engine contract the playback scheduler drives
//! - A virtual-clock engine for headless preview and tests
//! - Media file probing through ffprobe
//! - Ingestion of dropped/selected files into probed media descriptors

pub mod clock_engine;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod probe;

pub use clock_engine::ClockEngine;
pub use engine::{EngineEvent, MediaEngine, Subscription};
pub use error::IngestError;
pub use ingest::{IngestReport, Ingestor, ProbedMedia};
pub use probe::{FfprobeProbe, MetadataProbe};
