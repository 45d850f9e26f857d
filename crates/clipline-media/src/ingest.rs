//! Ingestion of selected or dropped files into probed media descriptors.
//!
//! Unsupported files are skipped. Videos are probed concurrently on a small
//! worker pool; every probe shares one deadline, and a probe that misses it
//! is discarded so a stuck file cannot hold up the rest of the batch.

use clipline_core::{MediaKind, MediaSource, PreviewConfig};
use crossbeam_channel::RecvTimeoutError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::probe::MetadataProbe;

/// A file that made it through ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedMedia {
    /// Display name (file name).
    pub name: String,
    pub source: MediaSource,
    pub kind: MediaKind,
    /// Duration in seconds; the configured constant for images.
    pub duration: f64,
}

/// Outcome of one ingestion batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Accepted media, in input order.
    pub accepted: Vec<ProbedMedia>,
    /// Files that were skipped or discarded, in input order.
    pub skipped: Vec<IngestError>,
}

/// Turns file paths into [`ProbedMedia`].
#[derive(Clone)]
pub struct Ingestor {
    probe: Arc<dyn MetadataProbe>,
    timeout: Duration,
    image_duration: f64,
    max_workers: usize,
}

impl Ingestor {
    /// Create an ingestor using the config's timeout and image duration.
    pub fn new(probe: Arc<dyn MetadataProbe>, config: &PreviewConfig) -> Self {
        Self {
            probe,
            timeout: config.metadata_timeout(),
            image_duration: config.image_duration_secs,
            max_workers: num_cpus::get().max(1),
        }
    }

    /// Override the metadata deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ingest a batch of paths.
    pub fn ingest<I, P>(&self, paths: I) -> IngestReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let mut slots: Vec<Option<Result<ProbedMedia, IngestError>>> =
            (0..paths.len()).map(|_| None).collect();
        let mut jobs = Vec::new();

        for (index, path) in paths.iter().enumerate() {
            match MediaKind::from_path(path) {
                None => {
                    debug!(path = %path.display(), "Skipping unsupported file");
                    slots[index] = Some(Err(IngestError::Unsupported(path.clone())));
                }
                Some(MediaKind::Image) => {
                    slots[index] = Some(Ok(self.describe(path, MediaKind::Image, self.image_duration)));
                }
                Some(MediaKind::Video) => jobs.push((index, path.clone())),
            }
        }

        if !jobs.is_empty() {
            self.probe_videos(jobs, &paths, &mut slots);
        }

        let mut report = IngestReport::default();
        for (slot, path) in slots.into_iter().zip(&paths) {
            match slot {
                Some(Ok(media)) => report.accepted.push(media),
                Some(Err(err)) => report.skipped.push(err),
                None => report.skipped.push(IngestError::MetadataTimeout {
                    path: path.clone(),
                    waited: self.timeout,
                }),
            }
        }
        info!(
            accepted = report.accepted.len(),
            skipped = report.skipped.len(),
            "Ingestion batch finished"
        );
        report
    }

    fn probe_videos(
        &self,
        jobs: Vec<(usize, PathBuf)>,
        paths: &[PathBuf],
        slots: &mut [Option<Result<ProbedMedia, IngestError>>],
    ) {
        let pending_total = jobs.len();
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, PathBuf)>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        for job in jobs {
            // Receiver is alive in this scope, so this cannot fail.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        for _ in 0..self.max_workers.min(pending_total) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let probe = Arc::clone(&self.probe);
            std::thread::spawn(move || {
                for (index, path) in job_rx.iter() {
                    let result = probe.probe_duration(&path);
                    // The batch may have given up on us already.
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        let deadline = Instant::now() + self.timeout;
        let mut pending = pending_total;
        while pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match result_rx.recv_timeout(remaining) {
                Ok((index, result)) => {
                    pending -= 1;
                    let path = &paths[index];
                    slots[index] = Some(
                        result.and_then(|duration| self.validate(path, duration)),
                    );
                    if let Some(Err(err)) = &slots[index] {
                        warn!(path = %path.display(), error = %err, "Discarding file");
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(pending, timeout = ?self.timeout, "Metadata wait timed out");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn validate(&self, path: &std::path::Path, duration: f64) -> Result<ProbedMedia, IngestError> {
        if duration.is_finite() && duration > 0.0 {
            Ok(self.describe(path, MediaKind::Video, duration))
        } else {
            Err(IngestError::InvalidDuration {
                path: path.to_path_buf(),
                duration,
            })
        }
    }

    fn describe(&self, path: &std::path::Path, kind: MediaKind, duration: f64) -> ProbedMedia {
        let source = MediaSource::new(path);
        ProbedMedia {
            name: source.display_name(),
            source,
            kind,
            duration,
        }
    }
}
