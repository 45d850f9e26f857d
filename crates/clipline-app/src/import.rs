//! Background ingestion so probing never blocks the UI thread.

use clipline_media::{IngestReport, Ingestor};
use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use tracing::info;

/// Runs ingestion batches on worker threads and hands reports back to the
/// UI thread.
pub struct ImportQueue {
    ingestor: Ingestor,
    tx: Sender<IngestReport>,
    rx: Receiver<IngestReport>,
    in_flight: usize,
}

impl ImportQueue {
    pub fn new(ingestor: Ingestor) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            ingestor,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start ingesting `paths`. `ctx` is woken when the batch finishes.
    pub fn submit(&mut self, paths: Vec<PathBuf>, ctx: &egui::Context) {
        if paths.is_empty() {
            return;
        }
        info!(files = paths.len(), "Importing media");
        let ingestor = self.ingestor.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.in_flight += 1;
        std::thread::spawn(move || {
            let report = ingestor.ingest(paths);
            // The app may have shut down; nothing to deliver to then.
            let _ = tx.send(report);
            ctx.request_repaint();
        });
    }

    /// Reports that finished since the last call.
    pub fn drain(&mut self) -> Vec<IngestReport> {
        let reports: Vec<_> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(reports.len());
        reports
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}
