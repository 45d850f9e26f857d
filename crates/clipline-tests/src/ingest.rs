//! Integration tests from dropped files to a playable timeline.

use clipline_core::{MediaKind, PreviewConfig};
use clipline_media::{IngestError, Ingestor, MetadataProbe};
use clipline_playback::PlaybackState;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::support::session;

/// Probe answering from a fixed table of durations.
struct TableProbe(HashMap<PathBuf, f64>);

impl MetadataProbe for TableProbe {
    fn probe_duration(&self, path: &Path) -> Result<f64, IngestError> {
        self.0.get(path).copied().ok_or_else(|| IngestError::Probe {
            path: path.to_path_buf(),
            reason: "no such file".into(),
        })
    }
}

fn ingestor() -> Ingestor {
    let probe = TableProbe(HashMap::from([
        (PathBuf::from("media/A.mp4"), 4.0),
        (PathBuf::from("media/C.webm"), 2.0),
        (PathBuf::from("media/broken.mov"), f64::NAN),
    ]));
    let config = PreviewConfig {
        image_duration_secs: 3.0,
        ..Default::default()
    };
    Ingestor::new(Arc::new(probe), &config)
}

#[test]
fn dropped_files_become_a_playable_timeline() {
    let report = ingestor().ingest([
        "media/A.mp4",
        "media/readme.txt",
        "media/B.png",
        "media/broken.mov",
        "media/C.webm",
    ]);
    assert_eq!(report.skipped.len(), 2);

    let (mut session, clock) = session();
    for media in report.accepted.iter().filter(|m| m.kind == MediaKind::Video) {
        session
            .engine_mut()
            .register(media.source.clone(), media.duration);
    }
    let ids = session.add_report(report);
    assert_eq!(ids.len(), 3);
    for id in &ids {
        session.append_to_timeline(*id).unwrap();
    }
    assert_eq!(session.total_secs(), 9.0);

    let names: Vec<_> = session.timeline().iter().map(|(_, clip)| clip.name.clone()).collect();
    assert_eq!(names, ["A.mp4", "B.png", "C.webm"]);

    session.play();
    clock.advance_secs(4.0);
    session.tick();
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
}

#[test]
fn same_clip_can_appear_twice() {
    let report = ingestor().ingest(["media/B.png"]);
    let (mut session, clock) = session();
    let ids = session.add_report(report);
    session.append_to_timeline(ids[0]).unwrap();
    session.append_to_timeline(ids[0]).unwrap();
    assert_eq!(session.total_secs(), 6.0);
    assert_eq!(session.store().len(), 1);

    session.play();
    clock.advance_secs(3.0);
    session.tick();
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
    clock.advance_secs(3.0);
    session.tick();
    assert_eq!(session.state(), PlaybackState::Ended);
}

#[test]
fn clip_colors_are_assigned_once() {
    let report = ingestor().ingest(["media/B.png", "media/B.png"]);
    let (mut session, _clock) = session();
    let ids = session.add_report(report);
    let first = session.store().get(ids[0]).unwrap().color;
    let again = session.store().get(ids[0]).unwrap().color;
    assert_eq!(first, again);
    assert_eq!(first.a, 1.0);
}
