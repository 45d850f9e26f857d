//! Shared fixtures.

use clipline_core::{ManualClock, MediaKind, MediaSource, PreviewConfig};
use clipline_media::{ClockEngine, ProbedMedia};
use clipline_ui::Session;

pub type TestSession = Session<ClockEngine<ManualClock>, ManualClock>;

/// Headless session on a manual clock with a 400px-wide timeline.
pub fn session() -> (TestSession, ManualClock) {
    let clock = ManualClock::new();
    let engine = ClockEngine::new(clock.clone());
    let mut session = Session::new(engine, clock.clone(), PreviewConfig::default());
    session.set_container_width(400.0);
    (session, clock)
}

pub fn media(name: &str, kind: MediaKind, duration: f64) -> ProbedMedia {
    ProbedMedia {
        name: name.to_string(),
        source: MediaSource::new(name),
        kind,
        duration,
    }
}

/// Add media to the bin and the timeline, registering videos with the engine.
pub fn append(session: &mut TestSession, media: ProbedMedia) -> usize {
    if media.kind == MediaKind::Video {
        session
            .engine_mut()
            .register(media.source.clone(), media.duration);
    }
    let clip = session.add_media(media).unwrap();
    session.append_to_timeline(clip.id).unwrap()
}

/// Video A (4.0s), Image B (3.0s), Video C (2.0s): 9.0s total.
pub fn abc_session() -> (TestSession, ManualClock) {
    let (mut session, clock) = session();
    append(&mut session, media("A.mp4", MediaKind::Video, 4.0));
    append(&mut session, media("B.png", MediaKind::Image, 3.0));
    append(&mut session, media("C.mp4", MediaKind::Video, 2.0));
    (session, clock)
}

/// Advance in 50ms steps, ticking after each, until `done` holds or
/// `max_secs` pass. Returns the simulated seconds elapsed.
pub fn tick_until(
    session: &mut TestSession,
    clock: &ManualClock,
    max_secs: f64,
    mut done: impl FnMut(&TestSession) -> bool,
) -> f64 {
    let step = 0.05;
    let mut elapsed = 0.0;
    while elapsed < max_secs && !done(session) {
        clock.advance_secs(step);
        elapsed += step;
        session.tick();
    }
    elapsed
}
