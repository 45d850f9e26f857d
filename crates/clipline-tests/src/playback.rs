//! Integration tests for sequencing playback across clip kinds.

use clipline_core::RationalTime;
use clipline_media::MediaEngine;
use clipline_playback::PlaybackState;
use proptest::prelude::*;

use crate::support::{abc_session, session, tick_until, TestSession};

fn assert_single_resource(session: &TestSession) {
    let subscriptions = session.engine().subscription_count();
    let armed = session.scheduler().armed_resources();
    assert!(subscriptions <= 1, "{subscriptions} subscriptions attached");
    assert!(armed <= 1, "{armed} resources armed");
    let video = matches!(session.state(), PlaybackState::PlayingVideo { .. });
    assert_eq!(subscriptions == 1, video, "subscription without video in {:?}", session.state());
}

// ── Sequencing ─────────────────────────────────────────────────

#[test]
fn video_image_video_plays_through_to_end() {
    let (mut session, clock) = abc_session();
    assert_eq!(session.total_secs(), 9.0);

    session.play();
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 0 });
    assert_single_resource(&session);

    // A's end-of-playback signal hands over to the still.
    clock.advance_secs(4.0);
    session.tick();
    assert_eq!(
        session.state(),
        PlaybackState::PlayingImage {
            index: 1,
            started_at: 4.0
        }
    );
    assert_single_resource(&session);

    tick_until(&mut session, &clock, 2.9, |_| false);
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));

    tick_until(&mut session, &clock, 1.0, |s| s.state() != PlaybackState::PlayingImage { index: 1, started_at: 4.0 });
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 2 });
    assert_eq!(session.scheduler().cursor(), RationalTime::new(7, 1));
    assert_single_resource(&session);

    clock.advance_secs(2.0);
    session.tick();
    assert_eq!(session.state(), PlaybackState::Ended);
    assert_eq!(session.cursor_secs(), 9.0);
    assert_single_resource(&session);
}

#[test]
fn cursor_tracks_both_time_sources() {
    let (mut session, clock) = abc_session();
    session.play();
    clock.advance_secs(1.5);
    session.tick();
    assert_eq!(session.cursor_secs(), 1.5);

    clock.advance_secs(2.5);
    session.tick();
    clock.advance_secs(1.0);
    session.tick();
    // One second into B.
    assert_eq!(session.cursor_secs(), 5.0);
}

#[test]
fn empty_timeline_stays_idle() {
    let (mut session, clock) = session();
    session.play();
    clock.advance_secs(1.0);
    session.tick();
    assert_eq!(session.state(), PlaybackState::Idle);
    assert_eq!(session.cursor_secs(), 0.0);
}

#[test]
fn pause_and_resume_across_image() {
    let (mut session, clock) = abc_session();
    session.scrub_to(RationalTime::new(5, 1));
    assert_eq!(session.state(), PlaybackState::Paused { index: 1 });

    session.toggle_playback();
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
    clock.advance_secs(1.0);
    session.tick();
    session.toggle_playback();
    assert_eq!(session.state(), PlaybackState::Paused { index: 1 });
    assert_eq!(session.cursor_secs(), 6.0);
    assert_single_resource(&session);

    // Time spent paused is not counted.
    clock.advance_secs(30.0);
    session.tick();
    assert_eq!(session.state(), PlaybackState::Paused { index: 1 });

    session.toggle_playback();
    tick_until(&mut session, &clock, 1.5, |s| {
        matches!(s.state(), PlaybackState::PlayingVideo { .. })
    });
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 2 });
}

#[test]
fn play_after_end_restarts_from_zero() {
    let (mut session, clock) = abc_session();
    session.scrub_to(RationalTime::new(100, 1));
    assert_eq!(session.cursor_secs(), 9.0);
    session.play();
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 0 });
    assert_eq!(session.cursor_secs(), 0.0);
    clock.advance_secs(0.5);
    session.tick();
    assert_eq!(session.cursor_secs(), 0.5);
}

// ── Scrub retargeting ──────────────────────────────────────────

#[test]
fn scrub_within_video_only_seeks() {
    let (mut session, clock) = abc_session();
    session.play();
    clock.advance_secs(1.0);
    session.tick();
    session.scrub_to(RationalTime::new(3, 1));
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 0 });
    clock.advance_secs(0.5);
    session.tick();
    assert_eq!(session.cursor_secs(), 3.5);
}

#[test]
fn scrub_from_video_into_image_detaches_subscription() {
    let (mut session, clock) = abc_session();
    session.play();
    clock.advance_secs(0.5);
    session.tick();

    session.scrub_to(RationalTime::new(5, 1));
    assert_eq!(
        session.state(),
        PlaybackState::PlayingImage {
            index: 1,
            started_at: 0.5 - 1.0
        }
    );
    assert_eq!(session.engine().subscription_count(), 0);
    assert_single_resource(&session);

    // A would have ended at 4.0s; nothing may advance on its behalf.
    clock.advance_secs(1.9);
    session.tick();
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
    clock.advance_secs(0.2);
    session.tick();
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 2 });
}

#[test]
fn scrub_backwards_from_image_into_video() {
    let (mut session, clock) = abc_session();
    session.scrub_to(RationalTime::new(5, 1));
    session.play();
    session.scrub_to(RationalTime::new(1, 1));
    assert_eq!(session.state(), PlaybackState::PlayingVideo { index: 0 });
    assert_eq!(session.engine().current_time(), 1.0);
    assert_single_resource(&session);
    clock.advance_secs(3.0);
    session.tick();
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
}

// ── Invariant ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Action {
    Play,
    Pause,
    Toggle,
    Advance(u32),
    Scrub(u32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Play),
        Just(Action::Pause),
        Just(Action::Toggle),
        (1u32..3_000).prop_map(Action::Advance),
        (0u32..10_000).prop_map(Action::Scrub),
    ]
}

proptest! {
    #[test]
    fn at_most_one_timer_or_subscription(actions in proptest::collection::vec(action(), 1..40)) {
        let (mut session, clock) = abc_session();
        for action in actions {
            match action {
                Action::Play => session.play(),
                Action::Pause => session.pause(),
                Action::Toggle => session.toggle_playback(),
                Action::Advance(ms) => clock.advance_secs(ms as f64 / 1000.0),
                Action::Scrub(ms) => session.scrub_to(RationalTime::new(ms as i64, 1000)),
            }
            session.tick();
            assert_single_resource(&session);
            prop_assert!((0.0..=9.0).contains(&session.cursor_secs()));
        }
    }
}
